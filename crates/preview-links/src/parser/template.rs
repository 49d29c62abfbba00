//! Path template parser using winnow.
//!
//! A placeholder is `$` followed by one or more ASCII letters or underscores.
//! Everything else, including a `$` that does not start a placeholder, is
//! literal text, so parsing cannot fail.

use winnow::combinator::{alt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use super::ast::{PathTemplate, Segment};

/// Parse a path template into literal and placeholder segments.
pub fn parse_path_template(input: &str) -> PathTemplate {
    let mut remaining = input;
    let segments = match template(&mut remaining) {
        Ok(segments) if remaining.is_empty() => segments,
        // Unreachable with the current grammar: every character is valid literal text.
        _ => vec![Segment::Literal(input.to_string())],
    };
    PathTemplate {
        source: input.to_string(),
        segments,
    }
}

/// Extract placeholder names from a template, left to right.
///
/// Duplicates are preserved exactly as found; use
/// [`PlaceholderSet`](super::PlaceholderSet) for the distinct names.
pub fn extract_placeholders(input: &str) -> Vec<String> {
    parse_path_template(input)
        .placeholders()
        .map(str::to_string)
        .collect()
}

fn template(input: &mut &str) -> ModalResult<Vec<Segment>> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(merge_literals(segments))
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((placeholder, literal_run, lone_dollar)).parse_next(input)
}

/// Parse a placeholder: `$name`
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    preceded('$', take_while(1.., is_name_char))
        .map(|name: &str| Segment::Placeholder(name.to_string()))
        .parse_next(input)
}

/// Parse a run of text up to the next `$`.
fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_till(1.., '$')
        .map(|text: &str| Segment::Literal(text.to_string()))
        .parse_next(input)
}

/// A `$` that does not start a placeholder.
fn lone_dollar(input: &mut &str) -> ModalResult<Segment> {
    '$'.value(Segment::Literal("$".to_string()))
        .parse_next(input)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
