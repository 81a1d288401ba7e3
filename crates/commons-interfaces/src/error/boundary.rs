use super::{BoxError, Error, ErrorKind};

/// Classify the error of a `Result` at an operation boundary.
///
/// This trait lets implementers of the plain traits (`Producer`, `Converter`,
/// ...) follow the crate's wrapping rule with the `?` operator instead of
/// repetitive `map_err()` chains. Errors that already are an [`Error`] of the
/// requested kind pass through untouched.
///
/// # Example
///
/// ```
/// use commons_interfaces::error::{ErrorBoundary, ErrorKind, Result};
/// use commons_interfaces::produce::Provider;
///
/// struct PortProvider(&'static str);
///
/// impl Provider<u16> for PortProvider {
///     fn provide(&self) -> Result<u16> {
///         let port = self.0.parse::<u16>().at_boundary(ErrorKind::Provisioning)?;
///         Ok(port)
///     }
/// }
///
/// assert_eq!(PortProvider("8080").provide().unwrap(), 8080);
/// let err = PortProvider("http").provide().unwrap_err();
/// assert!(err.is(ErrorKind::Provisioning));
/// ```
pub trait ErrorBoundary<T> {
    /// Wrap the error into `kind`, leaving errors of that kind unchanged.
    fn at_boundary(self, kind: ErrorKind) -> Result<T, Error>;

    /// Like [`ErrorBoundary::at_boundary`], attaching `message` to a newly
    /// created wrapper. `message` is not called for errors passed through.
    fn at_boundary_with<M, F>(self, kind: ErrorKind, message: F) -> Result<T, Error>
    where
        M: Into<String>,
        F: FnOnce() -> M;
}

impl<T, E> ErrorBoundary<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn at_boundary(self, kind: ErrorKind) -> Result<T, Error> {
        self.map_err(|e| Error::wrap(kind, e))
    }

    fn at_boundary_with<M, F>(self, kind: ErrorKind, message: F) -> Result<T, Error>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        self.map_err(|e| Error::wrap_lazy(kind, e.into(), || Some(message().into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum ParseError {
        #[error("empty input")]
        Empty,
        #[error("unexpected token: {0}")]
        Unexpected(String),
    }

    fn parse(s: &str) -> Result<u32, ParseError> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        s.parse().map_err(|_| ParseError::Unexpected(s.to_string()))
    }

    #[test]
    fn test_boundary_with_question_mark() {
        fn convert(s: &str) -> Result<u32, Error> {
            let n = parse(s).at_boundary(ErrorKind::Conversion)?;
            Ok(n * 2)
        }

        assert_eq!(convert("21").unwrap(), 42);

        let err = convert("x").unwrap_err();
        assert!(err.is(ErrorKind::Conversion));
        assert_eq!(
            err.root_cause().downcast_ref::<ParseError>(),
            Some(&ParseError::Unexpected("x".to_string()))
        );
    }

    #[test]
    fn test_boundary_passes_through_same_kind() {
        let result: Result<(), Error> = Err(Error::new(ErrorKind::Creation, "no stock"));
        let err = result.at_boundary(ErrorKind::Creation).unwrap_err();

        assert_eq!(err.message(), Some("no stock"));
        assert_eq!(err.chain().count(), 1);
    }

    #[test]
    fn test_boundary_with_message_is_lazy() {
        let ok: Result<u8, io::Error> = Ok(1);
        let value = ok
            .at_boundary_with(ErrorKind::Handling, || -> String {
                panic!("message must not be built on success")
            })
            .unwrap();
        assert_eq!(value, 1);

        let failed: Result<u8, io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"));
        let err = failed
            .at_boundary_with(ErrorKind::Handling, || "dispatching event")
            .unwrap_err();
        assert_eq!(err.message(), Some("dispatching event"));
        assert!(err.root_cause().to_string().contains("access denied"));
    }

    #[test]
    fn test_boundary_with_message_skips_same_kind() {
        let failed: Result<(), Error> = Err(Error::wrap(
            ErrorKind::Handling,
            io::Error::other("socket closed"),
        ));
        let err = failed
            .at_boundary_with(ErrorKind::Handling, || -> String {
                panic!("message must not be built for a pass-through")
            })
            .unwrap_err();

        assert!(err.message().is_none());
        assert_eq!(err.to_string(), "handling failed: socket closed");
    }

    #[test]
    fn test_boundary_accepts_string_errors() {
        let failed: Result<(), String> = Err("plain text failure".to_string());
        let err = failed.at_boundary(ErrorKind::Predicate).unwrap_err();

        assert!(err.is(ErrorKind::Predicate));
        assert_eq!(err.root_cause().to_string(), "plain text failure");
    }
}
