//! Placeholder substitution.

use crate::parser::{PathTemplate, Segment, parse_path_template};
use crate::subscription::Snapshot;
use crate::types::FieldValue;

/// Substitute snapshot values into a parsed template.
///
/// Every occurrence of a placeholder receives the same value. Substituted
/// text is never scanned again, so a value containing `$name` stays literal.
/// A placeholder whose value is missing or null is emitted unchanged as
/// `$name` until the value arrives.
pub fn resolve(template: &PathTemplate, snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(template.source().len());

    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => {
                match snapshot.get(name).and_then(FieldValue::path_text) {
                    Some(text) => out.push_str(&text),
                    None => {
                        out.push('$');
                        out.push_str(name);
                    }
                }
            }
        }
    }

    out
}

/// Parse `template` and resolve it against `snapshot`.
pub fn resolve_str(template: &str, snapshot: &Snapshot) -> String {
    resolve(&parse_path_template(template), snapshot)
}
