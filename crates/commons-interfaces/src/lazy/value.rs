use super::{Lazy, LazyState, abandoned, log_outcome, observe};
use crate::error::{BoxError, ErrorBoundary, ErrorKind, Result};
use crate::produce::Provider;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Initializer type of a holder created with [`LazyValue::with_value`].
pub type NoInit<T> = fn() -> Result<T>;

/// A thread-safe lazily initialized value with cached failure.
///
/// The initializer runs at most once. Concurrent callers of
/// [`get`](LazyValue::get) block until the running initialization completes
/// and then all observe the same outcome.
///
/// If the initializer fails, the calling thread receives the failure wrapped
/// into an [`ErrorKind::Initialization`] error. Every later call receives a
/// new initialization error whose cause is that cached failure. If the
/// initializer panics, the holder is poisoned and never runs it again.
///
/// # Examples
///
/// ```
/// use commons_interfaces::lazy::LazyValue;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// let calls = AtomicU32::new(0);
/// let lazy = LazyValue::new(|| {
///     calls.fetch_add(1, Ordering::SeqCst);
///     Ok::<_, std::io::Error>(vec![1, 2, 3])
/// });
///
/// assert_eq!(lazy.get().unwrap().len(), 3);
/// assert_eq!(lazy.get().unwrap().len(), 3);
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct LazyValue<T, F = NoInit<T>> {
    cell: OnceLock<Result<T>>,
    init: Mutex<Option<F>>,
}

impl<T, F, E> LazyValue<T, F>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError>,
{
    /// Create a holder that computes its value with `init` on first access.
    pub fn new(init: F) -> Self {
        Self {
            cell: OnceLock::new(),
            init: Mutex::new(Some(init)),
        }
    }

    /// Get the value, running the initializer if this is the first access.
    pub fn get(&self) -> Result<&T> {
        let mut fresh = false;
        let outcome = self.cell.get_or_init(|| {
            fresh = true;
            self.initialize()
        });
        observe(outcome, fresh)
    }

    fn initialize(&self) -> Result<T> {
        let init = self
            .init
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let outcome = match init {
            Some(init) => init().at_boundary(ErrorKind::Initialization),
            None => Err(abandoned()),
        };
        log_outcome(&outcome);
        outcome
    }
}

impl<T> LazyValue<T> {
    /// Create a holder that is already initialized with `value`.
    pub fn with_value(value: T) -> Self {
        Self {
            cell: OnceLock::from(Ok(value)),
            init: Mutex::new(None),
        }
    }
}

impl<T, F> LazyValue<T, F> {
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

impl<T, F, E> Lazy for LazyValue<T, F>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError>,
{
    type Subject = T;

    fn get(&self) -> Result<&T> {
        LazyValue::get(self)
    }
}

impl<T, F, E> Provider<T> for LazyValue<T, F>
where
    T: Clone,
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError>,
{
    fn provide(&self) -> Result<T> {
        self.get().cloned().at_boundary(ErrorKind::Provisioning)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for LazyValue<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("LazyValue");
        match self.cell.get() {
            None => s.field("state", &LazyState::Uninitialized),
            Some(Ok(value)) => s.field("value", value),
            Some(Err(err)) => s.field("error", err),
        };
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::lazy::FORMER_FAILURE;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::thread;

    #[derive(Debug, thiserror::Error)]
    #[error("database unreachable")]
    struct Unreachable;

    #[test]
    fn test_lazy_value_initializes_once() {
        let calls = AtomicU32::new(0);
        let lazy = LazyValue::new(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Unreachable>(42)
        });

        assert_eq!(lazy.state(), LazyState::Uninitialized);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(*lazy.get().unwrap(), 42);
        assert!(lazy.is_initialized());
        assert_eq!(*lazy.get().unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lazy_value_failure_is_cached() {
        let calls = AtomicU32::new(0);
        let lazy = LazyValue::new(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<u32, _>(Unreachable)
        });

        let first = lazy.get().unwrap_err();
        assert!(first.is(ErrorKind::Initialization));
        assert!(first.root_cause().downcast_ref::<Unreachable>().is_some());

        for _ in 0..3 {
            let later = lazy.get().unwrap_err();
            assert!(later.is(ErrorKind::Initialization));
            assert_eq!(later.message(), Some(FORMER_FAILURE));
            assert!(later.root_cause().downcast_ref::<Unreachable>().is_some());
            assert_eq!(later.chain().count(), 3);
        }

        assert_eq!(lazy.state(), LazyState::Failed);
        assert!(!lazy.is_initialized());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_initialization_error_is_not_rewrapped() {
        let lazy = LazyValue::new(|| {
            Err::<u32, _>(Error::new(ErrorKind::Initialization, "config missing"))
        });

        let first = lazy.get().unwrap_err();
        assert_eq!(first.message(), Some("config missing"));
        assert_eq!(first.chain().count(), 1);

        let later = lazy.get().unwrap_err();
        assert_eq!(later.chain().count(), 2);
        let original = later.chain().nth(1).unwrap().downcast_ref::<Error>().unwrap();
        assert_eq!(original.message(), Some("config missing"));
    }

    #[test]
    fn test_lazy_value_concurrent_access() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let lazy = Arc::new(LazyValue::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(20));
            Ok::<_, Unreachable>(String::from("shared"))
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                thread::spawn(move || lazy.get().map(|v| v.clone()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), "shared");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_failure_seen_by_all() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let lazy = Arc::new(LazyValue::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(20));
            Err::<u8, _>(Unreachable)
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                thread::spawn(move || lazy.get().map(|v| *v))
            })
            .collect();

        for handle in handles {
            let err = handle.join().unwrap().unwrap_err();
            assert!(err.is(ErrorKind::Initialization));
            assert!(err.root_cause().downcast_ref::<Unreachable>().is_some());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_initializer_poisons_holder() {
        let calls = AtomicU32::new(0);
        let lazy = LazyValue::new(|| -> Result<u32, Unreachable> {
            calls.fetch_add(1, Ordering::SeqCst);
            panic!("initializer exploded")
        });

        let outcome = catch_unwind(AssertUnwindSafe(|| lazy.get().map(|v| *v)));
        assert!(outcome.is_err());
        assert_eq!(lazy.state(), LazyState::Uninitialized);

        let err = lazy.get().unwrap_err();
        assert!(err.is(ErrorKind::Initialization));
        assert_eq!(lazy.state(), LazyState::Failed);
        assert!(lazy.get().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_value_is_initialized() {
        let lazy = LazyValue::with_value("ready");
        assert!(lazy.is_initialized());
        assert_eq!(lazy.into_inner().unwrap().unwrap(), "ready");
    }

    #[test]
    fn test_into_inner_before_and_after_access() {
        let untouched = LazyValue::new(|| Ok::<_, Unreachable>(1));
        assert!(untouched.into_inner().is_none());

        let failed = LazyValue::new(|| Err::<u8, _>(Unreachable));
        let _ = failed.get();
        let err = failed.into_inner().unwrap().unwrap_err();
        assert!(err.is(ErrorKind::Initialization));
    }

    #[test]
    fn test_lazy_value_as_provider() {
        let lazy = LazyValue::new(|| Ok::<_, Unreachable>(vec![1, 2]));
        assert_eq!(lazy.provide().unwrap(), vec![1, 2]);

        let broken = LazyValue::new(|| Err::<Vec<u8>, _>(Unreachable));
        let err = broken.provide().unwrap_err();
        assert!(err.is(ErrorKind::Provisioning));
        assert!(err.find_kind(ErrorKind::Initialization).is_some());
    }

    #[test]
    fn test_lazy_trait_object() {
        fn first_char(lazy: &dyn Lazy<Subject = String>) -> Option<char> {
            lazy.get().ok().and_then(|s| s.chars().next())
        }

        let lazy = LazyValue::new(|| Ok::<_, Unreachable>("xyz".to_string()));
        assert_eq!(first_char(&lazy), Some('x'));
    }

    #[test]
    fn test_debug_shows_state() {
        let lazy = LazyValue::new(|| Ok::<_, Unreachable>(7));
        assert!(format!("{:?}", lazy).contains("Uninitialized"));
        lazy.get().unwrap();
        assert!(format!("{:?}", lazy).contains("value: 7"));
    }
}
