//! Structured errors with keyed message groups

pub mod argument;
pub mod kind;
pub mod messages;
pub mod response;
pub mod structured;

pub use argument::InvalidArgument;
pub use kind::ErrorKind;
pub use messages::{MessageMap, DEFAULT_KEY};
pub use response::ErrorResponse;
pub use structured::StructuredError;
