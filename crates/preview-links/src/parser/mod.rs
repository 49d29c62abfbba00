//! Path template parser.
//!
//! Path templates are plain strings with `$name` placeholders that refer to
//! fields of the record being previewed, e.g. `/blog/$category/$slug`.

pub mod ast;
mod template;

pub use ast::*;
pub use template::{extract_placeholders, parse_path_template};
