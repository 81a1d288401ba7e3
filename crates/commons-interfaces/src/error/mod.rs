//! Error vocabulary shared by every abstraction in this crate.
//!
//! All failures are represented by a single [`Error`] type tagged with an
//! [`ErrorKind`]. The kind names the operation that failed (converting,
//! producing, providing, ...), the optional cause carries whatever the user
//! code returned.
//!
//! # Wrapping rule
//!
//! When a user-supplied step fails, the adapter wraps the failure into the
//! kind of the operation. A failure that already is an [`Error`] of that kind
//! is passed through unchanged:
//!
//! ```
//! use commons_interfaces::error::{Error, ErrorKind};
//!
//! let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad byte");
//! let wrapped = Error::wrap(ErrorKind::Conversion, io);
//! assert!(wrapped.is(ErrorKind::Conversion));
//! assert_eq!(wrapped.chain().count(), 2);
//!
//! let again = Error::wrap(ErrorKind::Conversion, wrapped);
//! assert_eq!(again.chain().count(), 2);
//! ```

mod boundary;
mod report;

pub use boundary::ErrorBoundary;
pub use report::ErrorReport;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Boxed error accepted from user code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared cause, cloned whenever an error is cloned.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Classification of a failure by the operation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A factory failed to create a product for a specification.
    Creation,
    /// A converter or translator failed to map a value.
    Conversion,
    /// A producer failed to produce a product.
    Production,
    /// A provider failed to provide a product.
    Provisioning,
    /// A predicate could not be evaluated.
    Predicate,
    /// A lazy value could not be initialized.
    Initialization,
    /// A handler failed to handle an event.
    Handling,
}

impl ErrorKind {
    /// Short human readable description used when an error has no message.
    pub fn description(self) -> &'static str {
        match self {
            Self::Creation => "creation failed",
            Self::Conversion => "conversion failed",
            Self::Production => "production failed",
            Self::Provisioning => "provisioning failed",
            Self::Predicate => "predicate evaluation failed",
            Self::Initialization => "initialization failed",
            Self::Handling => "handling failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A classified failure with an optional message and chained cause.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<SharedError>,
}

impl Error {
    /// Create an error with a message and no cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Create an error with a message and a chained cause.
    ///
    /// Unlike [`Error::wrap`], this always creates a new link in the chain.
    pub fn with_cause(
        kind: ErrorKind,
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: Some(SharedError::from(cause.into())),
        }
    }

    /// Create an error that chains an already shared cause.
    pub fn with_shared_cause(
        kind: ErrorKind,
        message: impl Into<String>,
        cause: SharedError,
    ) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: Some(cause),
        }
    }

    /// Wrap `cause` into an error of `kind`.
    ///
    /// If `cause` already is an [`Error`] of `kind` it is returned unchanged.
    pub fn wrap(kind: ErrorKind, cause: impl Into<BoxError>) -> Self {
        Self::wrap_lazy(kind, cause.into(), || None)
    }

    /// Same as [`Error::wrap`], but a newly created wrapper carries `message`.
    ///
    /// An error passed through unchanged keeps its own message, or lack of one.
    pub fn wrap_with(
        kind: ErrorKind,
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::wrap_lazy(kind, cause.into(), || Some(message.into()))
    }

    /// `message` is only evaluated when a new wrapper is created.
    fn wrap_lazy(
        kind: ErrorKind,
        cause: BoxError,
        message: impl FnOnce() -> Option<String>,
    ) -> Self {
        let source = match cause.downcast::<Error>() {
            Ok(err) if err.kind == kind => return *err,
            Ok(err) => SharedError::from(err as BoxError),
            Err(other) => SharedError::from(other),
        };
        Self {
            kind,
            message: message(),
            source: Some(source),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether this error is of `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// The message given at construction, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The shared cause, if any.
    pub fn cause(&self) -> Option<&SharedError> {
        self.source.as_ref()
    }

    /// Iterate over this error followed by every cause in its chain.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: Some(self as &(dyn std::error::Error + 'static)),
        }
    }

    /// The innermost error of the chain.
    pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        self.chain().last().unwrap_or(self)
    }

    /// The first [`Error`] of `kind` found in the chain, starting with `self`.
    pub fn find_kind(&self, kind: ErrorKind) -> Option<&Error> {
        self.chain()
            .filter_map(|e| e.downcast_ref::<Error>())
            .find(|e| e.kind == kind)
    }

    /// Snapshot this error into a serializable report.
    pub fn report(&self) -> ErrorReport {
        ErrorReport::from(self)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Error");
        s.field("kind", &self.kind);
        if let Some(message) = &self.message {
            s.field("message", message);
        }
        if let Some(source) = &self.source {
            s.field("source", source);
        }
        s.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.source) {
            (Some(message), _) => write!(f, "{}: {}", self.kind, message),
            (None, Some(source)) => write!(f, "{}: {}", self.kind, source),
            (None, None) => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Iterator over an error chain, see [`Error::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn std::error::Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn std::error::Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn test_wrap_foreign_error_chains_cause() {
        let err = Error::wrap(ErrorKind::Production, DiskError);

        assert_eq!(err.kind(), ErrorKind::Production);
        assert!(err.message().is_none());
        assert_eq!(err.to_string(), "production failed: disk on fire");

        let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1], "disk on fire");
        assert!(err.root_cause().downcast_ref::<DiskError>().is_some());
    }

    #[test]
    fn test_wrap_same_kind_is_not_nested() {
        let inner = Error::new(ErrorKind::Conversion, "not a number");
        let wrapped = Error::wrap(ErrorKind::Conversion, inner);

        assert_eq!(wrapped.message(), Some("not a number"));
        assert!(wrapped.cause().is_none());
        assert_eq!(wrapped.chain().count(), 1);
    }

    #[test]
    fn test_wrap_other_kind_is_nested() {
        let inner = Error::new(ErrorKind::Conversion, "not a number");
        let wrapped = Error::wrap(ErrorKind::Provisioning, inner);

        assert!(wrapped.is(ErrorKind::Provisioning));
        assert_eq!(wrapped.chain().count(), 2);
        let found = wrapped.find_kind(ErrorKind::Conversion).unwrap();
        assert_eq!(found.message(), Some("not a number"));
    }

    #[test]
    fn test_wrap_with_keeps_existing_message() {
        let inner = Error::new(ErrorKind::Handling, "original");
        let same = Error::wrap_with(ErrorKind::Handling, "ignored", inner);
        assert_eq!(same.message(), Some("original"));

        let io_error = io::Error::new(io::ErrorKind::NotFound, "gone");
        let fresh = Error::wrap_with(ErrorKind::Handling, "while handling", io_error);
        assert_eq!(fresh.message(), Some("while handling"));
        assert_eq!(fresh.to_string(), "handling failed: while handling");
    }

    #[test]
    fn test_wrap_with_leaves_messageless_same_kind_untouched() {
        let inner = Error::wrap(ErrorKind::Production, io::Error::other("disk gone"));
        let before = inner.to_string();

        let passed = Error::wrap_with(ErrorKind::Production, "while producing", inner);

        assert!(passed.message().is_none());
        assert_eq!(passed.to_string(), before);
        assert_eq!(passed.to_string(), "production failed: disk gone");
        assert_eq!(passed.chain().count(), 2);
    }

    #[test]
    fn test_clone_shares_cause() {
        let err = Error::with_cause(ErrorKind::Initialization, "boom", DiskError);
        let copy = err.clone();

        let a = err.cause().unwrap();
        let b = copy.cause().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::Provisioning).unwrap();
        assert_eq!(json, "\"provisioning\"");
        let kind: ErrorKind = serde_json::from_str("\"initialization\"").unwrap();
        assert_eq!(kind, ErrorKind::Initialization);
    }

    #[test]
    fn test_display_without_message_or_cause() {
        let err = Error {
            kind: ErrorKind::Predicate,
            message: None,
            source: None,
        };
        assert_eq!(err.to_string(), "predicate evaluation failed");
    }
}
