//! Lazy holder for values produced by an async step.

use super::{LazyState, abandoned, log_outcome, observe};
use crate::error::{BoxError, ErrorBoundary, ErrorKind, Result};
use crate::produce::AsyncProvider;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tokio::sync::OnceCell;

/// An async lazily initialized value with cached failure.
///
/// The async counterpart of [`LazyValue`](super::LazyValue): the
/// initializer future runs at most once, concurrent tasks wait for it, and a
/// failure is cached forever. If the task driving the initializer is
/// cancelled, the holder is poisoned like a panicking initializer poisons a
/// `LazyValue`.
///
/// # Examples
///
/// ```rust
/// use commons_interfaces::lazy::AsyncLazy;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), commons_interfaces::error::Error> {
/// let settings = AsyncLazy::new(|| async {
///     // Expensive lookup happens here, once.
///     Ok::<_, std::io::Error>(String::from("region=eu"))
/// });
///
/// assert!(!settings.is_initialized());
/// let value = settings.get().await?;
/// assert_eq!(value, "region=eu");
/// assert!(settings.is_initialized());
/// # Ok(())
/// # }
/// ```
pub struct AsyncLazy<T, F> {
    cell: OnceCell<Result<T>>,
    init: Mutex<Option<F>>,
}

impl<T, F, Fut, E> AsyncLazy<T, F>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    /// Create a holder that awaits `init()` on first access.
    pub fn new(init: F) -> Self {
        Self {
            cell: OnceCell::new(),
            init: Mutex::new(Some(init)),
        }
    }

    /// Get the value, running the initializer if this is the first access.
    pub async fn get(&self) -> Result<&T> {
        let mut fresh = false;
        let ran = &mut fresh;
        let outcome = self
            .cell
            .get_or_init(move || async move {
                *ran = true;
                self.initialize().await
            })
            .await;
        observe(outcome, fresh)
    }

    async fn initialize(&self) -> Result<T> {
        let init = self
            .init
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let outcome = match init {
            Some(init) => init().await.at_boundary(ErrorKind::Initialization),
            None => Err(abandoned()),
        };
        log_outcome(&outcome);
        outcome
    }
}

impl<T, F> AsyncLazy<T, F> {
    /// The current state, without triggering initialization.
    pub fn state(&self) -> LazyState {
        LazyState::of(self.cell.get())
    }

    /// Whether the value has been computed successfully.
    pub fn is_initialized(&self) -> bool {
        self.state() == LazyState::Initialized
    }

    /// Consume the holder, returning the cached outcome if there is one.
    pub fn into_inner(self) -> Option<Result<T>> {
        self.cell.into_inner()
    }
}

#[async_trait]
impl<T, F, Fut, E> AsyncProvider<T> for AsyncLazy<T, F>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    E: Into<BoxError> + 'static,
{
    async fn provide(&self) -> Result<T> {
        self.get().await.cloned().at_boundary(ErrorKind::Provisioning)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for AsyncLazy<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("AsyncLazy");
        match self.cell.get() {
            None => s.field("state", &LazyState::Uninitialized),
            Some(Ok(value)) => s.field("value", value),
            Some(Err(err)) => s.field("error", err),
        };
        s.finish()
    }
}
