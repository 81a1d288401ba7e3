//! Lazily initialized values with cached failure.
//!
//! A lazy holder defers computing its value until first access and then
//! caches the outcome, success or failure. Initialization is attempted at
//! most once; a failed initialization is never retried:
//!
//! ```
//! use commons_interfaces::error::ErrorKind;
//! use commons_interfaces::lazy::{LazyState, LazyValue};
//!
//! let lazy = LazyValue::new(|| "not a port".parse::<u16>());
//! assert_eq!(lazy.state(), LazyState::Uninitialized);
//!
//! let first = lazy.get().unwrap_err();
//! assert!(first.is(ErrorKind::Initialization));
//!
//! let second = lazy.get().unwrap_err();
//! assert_eq!(second.message(), Some("former initialization failed"));
//! assert_eq!(lazy.state(), LazyState::Failed);
//! ```

mod asynchronous;
mod value;

pub use asynchronous::AsyncLazy;
pub use value::{LazyValue, NoInit};

use crate::error::{Error, ErrorKind, Result};
use std::sync::Arc;

/// Message of the error returned to every caller after the first failure.
pub(crate) const FORMER_FAILURE: &str = "former initialization failed";

/// A value container that defers and caches the computation of its contents.
pub trait Lazy {
    /// The type of the lazily computed value.
    type Subject;

    /// Get the value, computing it on first access.
    ///
    /// Fails with an [`ErrorKind::Initialization`] error if the computation
    /// failed, now or on an earlier call.
    fn get(&self) -> Result<&Self::Subject>;
}

/// Observable state of a lazy holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LazyState {
    /// The value has not been computed yet.
    Uninitialized,
    /// The value has been computed and is cached.
    Initialized,
    /// The computation failed; the failure is cached.
    Failed,
}

impl LazyState {
    pub(crate) fn of<T>(outcome: Option<&Result<T>>) -> Self {
        match outcome {
            None => Self::Uninitialized,
            Some(Ok(_)) => Self::Initialized,
            Some(Err(_)) => Self::Failed,
        }
    }
}

/// Map a cached outcome to what a caller receives.
///
/// The caller that ran the initializer gets the failure itself, every later
/// caller gets a fresh error chained to it.
pub(crate) fn observe<T>(outcome: &Result<T>, fresh: bool) -> Result<&T> {
    match outcome {
        Ok(value) => Ok(value),
        Err(cause) if fresh => Err(cause.clone()),
        Err(cause) => Err(Error::with_shared_cause(
            ErrorKind::Initialization,
            FORMER_FAILURE,
            Arc::new(cause.clone()),
        )),
    }
}

/// Error stored when the initializer is gone without producing an outcome.
pub(crate) fn abandoned() -> Error {
    Error::new(
        ErrorKind::Initialization,
        "initializer did not complete on an earlier attempt",
    )
}

#[cfg(feature = "tracing")]
pub(crate) fn log_outcome<T>(outcome: &Result<T>) {
    match outcome {
        Ok(_) => tracing::debug!(
            subject = std::any::type_name::<T>(),
            "lazy value initialized"
        ),
        Err(err) => tracing::warn!(
            subject = std::any::type_name::<T>(),
            error = %err,
            "lazy value initialization failed"
        ),
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn log_outcome<T>(_outcome: &Result<T>) {}
