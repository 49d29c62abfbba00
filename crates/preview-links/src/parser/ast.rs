//! Parsed representation of path templates.

/// A parsed path template.
///
/// Keeps the original source next to its segments so the template can be
/// reported back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    pub(crate) source: String,
    pub segments: Vec<Segment>,
}

/// A segment within a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, copied to the output unchanged.
    Literal(String),
    /// A `$name` placeholder. Holds the bare name without the `$`.
    Placeholder(String),
}

impl PathTemplate {
    /// The template string this was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Iterates over placeholder names in order of occurrence, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if the template contains no placeholders.
    pub fn is_static(&self) -> bool {
        self.placeholders().next().is_none()
    }
}

/// The distinct placeholder names of a template, in first-occurrence order.
///
/// Computed once per activation. One field subscription exists per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderSet {
    names: Vec<String>,
}

impl PlaceholderSet {
    /// Collects the distinct placeholder names of `template`.
    pub fn from_template(template: &PathTemplate) -> Self {
        template.placeholders().collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for PlaceholderSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in iter {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        Self { names }
    }
}
