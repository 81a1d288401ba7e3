//! Conveying results and events back to the initiator of a process.
//!
//! The process that eventually yields a result is the *executor*; the code
//! that started it is the *initiator*. A [`Callback`] carries results, a
//! [`Handler`] carries events whose handling may fail.
//!
//! # Callback contract
//!
//! - The executor must call [`Callback::on_result`] at least once, unless it
//!   knows the initiator is gone (see [`WeakCallback`]).
//! - It may call it more than once to convey partial or updated results, but
//!   never more than once for the same result.
//!
//! # Handler contract
//!
//! - The executor may or may not call [`Handler::handle`].
//! - It must not call it more than once for the same event.

use crate::error::{BoxError, ErrorBoundary, ErrorKind, Result};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;

/// Receives the result of a process.
///
/// Closures `Fn(R)` are callbacks:
///
/// ```
/// use commons_interfaces::callback::Callback;
/// use std::sync::Mutex;
///
/// fn compute(callback: &dyn Callback<u64>) {
///     callback.on_result(6 * 7);
/// }
///
/// let results = Mutex::new(Vec::new());
/// compute(&|r: u64| results.lock().unwrap().push(r));
/// assert_eq!(*results.lock().unwrap(), vec![42]);
/// ```
pub trait Callback<R> {
    /// Called by the executor when a result is available.
    fn on_result(&self, result: R);
}

impl<R, F> Callback<R> for F
where
    F: Fn(R),
{
    fn on_result(&self, result: R) {
        self(result)
    }
}

/// Results are dropped silently once the receiver is closed.
impl<R> Callback<R> for mpsc::UnboundedSender<R> {
    fn on_result(&self, result: R) {
        if self.send(result).is_err() {
            #[cfg(feature = "tracing")]
            tracing::debug!("callback receiver closed, result dropped");
        }
    }
}

/// A callback that only reaches its target while the target is alive.
///
/// The executor holds a [`Weak`] reference, so it does not keep the
/// initiator alive. Results conveyed after the target has been dropped are
/// discarded. The target must be owned elsewhere: a temporary wrapped in a
/// `WeakCallback` is gone immediately.
#[derive(Debug)]
pub struct WeakCallback<C: ?Sized> {
    target: Weak<C>,
}

impl<C: ?Sized> WeakCallback<C> {
    /// Refer weakly to `target`.
    pub fn new(target: &Arc<C>) -> Self {
        Self {
            target: Arc::downgrade(target),
        }
    }

    /// Whether the target still exists.
    pub fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl<C: ?Sized> Clone for WeakCallback<C> {
    fn clone(&self) -> Self {
        Self {
            target: Weak::clone(&self.target),
        }
    }
}

impl<R, C: Callback<R> + ?Sized> Callback<R> for WeakCallback<C> {
    fn on_result(&self, result: R) {
        match self.target.upgrade() {
            Some(target) => target.on_result(result),
            None => {
                #[cfg(feature = "tracing")]
                tracing::trace!("callback target dropped, result discarded");
            }
        }
    }
}

/// Handles events encountered by a process.
///
/// Failures should be reported as
/// [`ErrorKind::Handling`](crate::error::ErrorKind::Handling).
pub trait Handler<E> {
    /// Called by the executor when an event occurs.
    fn handle(&self, event: E) -> Result<()>;
}

impl<E, H: Handler<E> + ?Sized> Handler<E> for Arc<H> {
    fn handle(&self, event: E) -> Result<()> {
        (**self).handle(event)
    }
}

impl<E, H: Handler<E> + ?Sized> Handler<E> for &H {
    fn handle(&self, event: E) -> Result<()> {
        (**self).handle(event)
    }
}

/// A [`Handler`] backed by a closure `Fn(E) -> Result<(), X>`.
///
/// Failures become [`ErrorKind::Handling`] errors.
#[derive(Debug, Clone, Copy)]
pub struct FnHandler<F>(F);

impl<F> FnHandler<F> {
    /// Wrap a fallible event handler.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<E, X, F> Handler<E> for FnHandler<F>
where
    F: Fn(E) -> Result<(), X>,
    X: Into<BoxError>,
{
    fn handle(&self, event: E) -> Result<()> {
        (self.0)(event)
            .at_boundary(ErrorKind::Handling)
            .inspect_err(log_failure)
    }
}

#[cfg(feature = "tracing")]
fn log_failure(err: &crate::error::Error) {
    tracing::warn!(error = %err, "event handler failed");
}

#[cfg(not(feature = "tracing"))]
fn log_failure(_err: &crate::error::Error) {}
