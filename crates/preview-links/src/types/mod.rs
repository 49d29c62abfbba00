mod status;
mod value;

pub use status::{RecordStatus, UnknownStatus};
pub use value::FieldValue;
