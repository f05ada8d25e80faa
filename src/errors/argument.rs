use thiserror::Error;

/// Raised when a caller passes an argument the error API refuses to default
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Value cannot be null or whitespace. (Parameter '{param}')")]
pub struct InvalidArgument {
    param: &'static str,
}

impl InvalidArgument {
    pub fn new(param: &'static str) -> Self {
        Self { param }
    }

    /// Name of the offending parameter
    pub fn param_name(&self) -> &'static str {
        self.param
    }
}
