//! URL composition from a resolved path.

use serde::Serialize;

use crate::config::PreviewConfig;

/// The links shown for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewUrls {
    /// Enables draft preview mode and opens the record.
    pub preview: String,
    /// The published page.
    pub live: String,
    /// Turns draft preview mode off.
    pub disable: String,
}

/// How the locale part of a URL is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleSegment {
    /// The locale active when the URL is composed.
    Current,
    /// Always the same segment, possibly empty.
    Fixed(String),
}

impl LocaleSegment {
    /// Multi-locale sites follow the active locale. Single-locale sites use
    /// their only locale when `use_default_lang` is set, and nothing otherwise.
    pub fn for_site(locales: &[String], use_default_lang: bool) -> Self {
        if locales.len() > 1 {
            return LocaleSegment::Current;
        }
        match locales.first() {
            Some(default) if use_default_lang => LocaleSegment::Fixed(default.clone()),
            _ => LocaleSegment::Fixed(String::new()),
        }
    }

    fn render<'a>(&'a self, current: &'a str) -> &'a str {
        match self {
            LocaleSegment::Current => current,
            LocaleSegment::Fixed(segment) => segment,
        }
    }
}

/// Builds [`PreviewUrls`] from resolved paths.
#[derive(Debug, Clone)]
pub struct UrlComposer {
    base_url: String,
    preview_path: String,
    secret: Option<String>,
    locale_segment: LocaleSegment,
}

impl UrlComposer {
    pub fn new(config: &PreviewConfig) -> Self {
        let base_url = config
            .instance_url
            .strip_suffix('/')
            .unwrap_or(&config.instance_url)
            .to_string();
        Self {
            base_url,
            preview_path: config.preview_path.clone(),
            secret: config.secret().map(str::to_string),
            locale_segment: LocaleSegment::for_site(&config.locales, config.use_default_lang),
        }
    }

    pub fn locale_segment(&self) -> &LocaleSegment {
        &self.locale_segment
    }

    /// Compose the links for `resolved_path` under `locale`.
    ///
    /// `resolved_path` is appended verbatim and is expected to start with `/`.
    pub fn compose(&self, resolved_path: &str, locale: &str) -> PreviewUrls {
        let segment = self.locale_segment.render(locale);
        let base = &self.base_url;
        let preview_path = &self.preview_path;

        let mut preview = format!("{base}{preview_path}/{segment}{resolved_path}");
        if let Some(secret) = &self.secret {
            preview.push_str("?secret=");
            preview.push_str(secret);
        }

        PreviewUrls {
            preview,
            live: format!("{base}/{segment}{resolved_path}"),
            disable: self.disable_url(),
        }
    }

    /// The link that turns preview mode off. Independent of the record.
    pub fn disable_url(&self) -> String {
        format!("{}{}/disable", self.base_url, self.preview_path)
    }
}
