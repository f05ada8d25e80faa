use std::error::Error;
use std::fmt;
use tracing::{debug, warn};

use super::argument::InvalidArgument;
use super::kind::ErrorKind;
use super::messages::{MessageMap, DEFAULT_KEY};

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Error carrying a base message plus groups of keyed messages.
///
/// Every kind of error shares this shape; the [`ErrorKind`] only picks the
/// default message and the status code used at transport boundaries.
#[derive(Debug)]
pub struct StructuredError {
    kind: ErrorKind,
    message: String,
    cause: Option<BoxError>,
    messages: MessageMap,
}

impl StructuredError {
    /// Create an error using the kind's default message
    pub fn new(kind: ErrorKind) -> Self {
        Self::with_message(kind, kind.default_message())
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
            messages: MessageMap::new(),
        }
    }

    /// Wrap an existing error as the cause.
    ///
    /// When the wrapped error is itself a `StructuredError` its message groups
    /// are copied, so both maps evolve independently afterwards. An
    /// `anyhow::Error` hides its inner type once boxed; use
    /// [`wrap_anyhow`](Self::wrap_anyhow) for those.
    pub fn wrap<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<BoxError>,
    {
        let cause: BoxError = error.into();
        let messages = cause
            .downcast_ref::<StructuredError>()
            .map(|inner| inner.messages.clone())
            .unwrap_or_default();

        Self {
            kind,
            message: kind.default_message().to_string(),
            cause: Some(cause),
            messages,
        }
    }

    /// Like [`wrap`](Self::wrap), but looks through `anyhow` for a
    /// `StructuredError` before boxing so its message groups are copied too.
    pub fn wrap_anyhow(kind: ErrorKind, error: anyhow::Error) -> Self {
        match error.downcast::<StructuredError>() {
            Ok(inner) => Self::wrap(kind, inner),
            Err(other) => Self::wrap(kind, other),
        }
    }

    /// Add messages under the default key. Empty input is ignored.
    pub fn add_messages<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append(DEFAULT_KEY, messages);
    }

    /// Add messages under `key`.
    ///
    /// A blank key is rejected even when `messages` is empty; only
    /// [`DEFAULT_KEY`] is exempt. Empty input under a valid key is ignored.
    pub fn add_keyed_messages<I, S>(&mut self, key: &str, messages: I) -> Result<(), InvalidArgument>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if key != DEFAULT_KEY && key.trim().is_empty() {
            warn!(kind = %self.kind, "Rejected blank message key");
            return Err(InvalidArgument::new("key"));
        }

        self.append(key, messages);
        Ok(())
    }

    /// Builder form of [`add_keyed_messages`](Self::add_keyed_messages)
    pub fn with_messages<I, S>(mut self, key: &str, messages: I) -> Result<Self, InvalidArgument>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_keyed_messages(key, messages)?;
        Ok(self)
    }

    fn append<I, S>(&mut self, key: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            return;
        }

        debug!(kind = %self.kind, key = %key, count = messages.len(), "Adding error messages");
        self.messages.append(key, messages);
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Base human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn messages(&self) -> &MessageMap {
        &self.messages
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }
}

/// Helpers for creating common errors
impl StructuredError {
    pub fn bad_request() -> Self {
        Self::new(ErrorKind::BadRequest)
    }

    pub fn validation() -> Self {
        Self::new(ErrorKind::Validation)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized)
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden)
    }

    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    pub fn conflict() -> Self {
        Self::new(ErrorKind::Conflict)
    }

    pub fn too_many_requests() -> Self {
        Self::new(ErrorKind::TooManyRequests)
    }

    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal)
    }

    pub fn service_unavailable() -> Self {
        Self::new(ErrorKind::ServiceUnavailable)
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for StructuredError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

impl From<InvalidArgument> for StructuredError {
    fn from(err: InvalidArgument) -> Self {
        let param = err.param_name();
        let detail = err.to_string();
        let mut error = Self::wrap(ErrorKind::BadRequest, err);
        error.append(param, [detail]);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_new_uses_kind_default_message() {
        let err = StructuredError::not_found();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Resource not found.");
        assert_eq!(err.to_string(), "Resource not found.");
        assert!(err.source().is_none());
        assert!(!err.has_messages());
    }

    #[test]
    fn test_with_message_overrides_default() {
        let err = StructuredError::with_message(ErrorKind::NotFound, "Card abc123 not found");
        assert_eq!(err.message(), "Card abc123 not found");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_wrap_keeps_cause() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk on fire");
        let err = StructuredError::wrap(ErrorKind::Internal, io_err);

        assert_eq!(err.message(), ErrorKind::Internal.default_message());
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk on fire".to_string()));
        assert!(err.messages().is_empty());
    }

    #[test]
    fn test_wrap_structured_error_copies_messages() {
        let mut inner = StructuredError::validation();
        inner.add_keyed_messages("a", ["one"]).unwrap();
        inner.add_keyed_messages("b", ["two"]).unwrap();

        let mut outer = StructuredError::wrap(ErrorKind::NotFound, inner);
        assert_eq!(outer.messages().keys().collect::<Vec<_>>(), vec!["a", "b"]);

        outer.add_keyed_messages("a", ["three"]).unwrap();
        outer.add_keyed_messages("c", ["four"]).unwrap();

        let inner = outer
            .source()
            .and_then(|s| s.downcast_ref::<StructuredError>())
            .unwrap();
        assert_eq!(inner.messages().len(), 2);
        assert_eq!(&inner.messages()["a"], &["one".to_string()][..]);
        assert_eq!(outer.messages().len(), 3);
        assert_eq!(
            &outer.messages()["a"],
            &["one".to_string(), "three".to_string()][..]
        );
    }

    #[test]
    fn test_wrap_anyhow_copies_messages() {
        let mut inner = StructuredError::validation();
        inner.add_keyed_messages("email", ["is required"]).unwrap();
        let error = anyhow::Error::new(inner).context("saving user");

        let outer = StructuredError::wrap_anyhow(ErrorKind::Conflict, error);
        assert_eq!(outer.kind(), ErrorKind::Conflict);
        assert_eq!(&outer.messages()["email"], &["is required".to_string()][..]);
        assert!(outer
            .source()
            .and_then(|s| s.downcast_ref::<StructuredError>())
            .is_some());
    }

    #[test]
    fn test_wrap_anyhow_keeps_plain_cause() {
        let outer = StructuredError::wrap_anyhow(ErrorKind::Internal, anyhow::anyhow!("boom"));
        assert!(outer.messages().is_empty());
        assert_eq!(outer.source().map(|s| s.to_string()), Some("boom".to_string()));
    }

    #[test]
    fn test_with_messages_builder() {
        let err = StructuredError::validation()
            .with_messages("email", ["is required"])
            .unwrap()
            .with_messages("email", ["must contain @"])
            .unwrap();
        assert_eq!(err.messages().len(), 1);
        assert_eq!(err.messages().message_count(), 2);
    }

    #[test]
    fn test_with_messages_builder_rejects_blank_key() {
        let result = StructuredError::validation().with_messages("\t", ["x"]);
        assert_eq!(result.unwrap_err().param_name(), "key");
    }

    #[test]
    fn test_from_invalid_argument() {
        let err: StructuredError = InvalidArgument::new("key").into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(err.messages().contains_key("key"));
        assert!(err
            .source()
            .and_then(|s| s.downcast_ref::<InvalidArgument>())
            .is_some());
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StructuredError>();
    }
}
