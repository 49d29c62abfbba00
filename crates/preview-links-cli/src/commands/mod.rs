//! CLI command implementations.

mod params;
mod placeholders;
mod resolve;
mod simulate;
mod urls;

pub use placeholders::{run_placeholders, PlaceholdersArgs};
pub use resolve::{run_resolve, ResolveArgs};
pub use simulate::{run_simulate, SimulateArgs};
pub use urls::{run_urls, UrlsArgs};
