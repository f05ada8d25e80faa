// Library exports
pub mod config;
pub mod errors;
pub mod openapi;

pub use config::Config;
pub use errors::{ErrorKind, ErrorResponse, InvalidArgument, MessageMap, StructuredError, DEFAULT_KEY};
