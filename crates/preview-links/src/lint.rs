//! Checks that template placeholders name real fields.

use std::fmt::{Display, Formatter, Result as FmtResult};

use strsim::levenshtein;

use crate::parser::PlaceholderSet;

/// A placeholder that does not match any known field.
///
/// Such a placeholder never resolves and stays as `$name` in every URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderWarning {
    /// Placeholder name without `$`.
    pub name: String,
    /// Similar known field names, closest first.
    pub suggestions: Vec<String>,
}

impl Display for PlaceholderWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "placeholder '${}' does not match any field", self.name)?;
        if !self.suggestions.is_empty() {
            write!(f, " (did you mean: {}?)", self.suggestions.join(", "))?;
        }
        Ok(())
    }
}

/// Report every placeholder in `placeholders` that is not in `known_fields`.
pub fn lint_placeholders<'a>(
    placeholders: &PlaceholderSet,
    known_fields: impl IntoIterator<Item = &'a str>,
) -> Vec<PlaceholderWarning> {
    let known: Vec<&str> = known_fields.into_iter().collect();
    placeholders
        .iter()
        .filter(|name| !known.contains(name))
        .map(|name| PlaceholderWarning {
            name: name.to_string(),
            suggestions: compute_suggestions(name, known.iter().copied()),
        })
        .collect()
}

/// Compute up to three typo suggestions for `name`, closest first.
///
/// Names of three characters or fewer allow an edit distance of 1; longer
/// names allow 2.
pub fn compute_suggestions<'a>(
    name: &str,
    fields: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut ranked: Vec<(usize, &str)> = fields
        .into_iter()
        .map(|field| (levenshtein(name, field), field))
        .filter(|&(distance, _)| (1..=max_distance).contains(&distance))
        .collect();

    // Stable sort keeps caller order among equally distant fields.
    ranked.sort_by_key(|&(distance, _)| distance);
    ranked
        .into_iter()
        .take(3)
        .map(|(_, field)| field.to_string())
        .collect()
}
