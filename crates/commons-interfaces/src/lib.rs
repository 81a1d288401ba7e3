#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Functional-style building blocks shared across libraries.
//!
//! This crate provides a vocabulary for "a thing that yields, transforms or
//! tests a value" without committing to a concrete implementation:
//!
//! - **Producers** via `Producer`, `Provider`, `Factory`, `CustomizingProducer`
//!   and `AsyncProvider`
//! - **Converters** via `Converter` and `Translator`, with `NullSafe` applying
//!   the null pass-through contract
//! - **Predicates** via `Predicate` and `FalliblePredicate`
//! - **Callbacks** via `Callback` and `Handler`
//! - **Lazy values** via `LazyValue` and `AsyncLazy`, which compute once and
//!   cache success or failure
//!
//! # Errors
//!
//! Every fallible operation returns [`error::Result`]. Failures of user code
//! are wrapped into an [`error::Error`] whose [`error::ErrorKind`] names the
//! operation that failed; an error that already has the expected kind is
//! never wrapped twice.
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use commons_interfaces::prelude::*;
//!
//! let parse = NullSafe::new(|s: &str| s.parse::<i32>());
//! let config = LazyValue::new(|| parse.convert(Some("42")));
//!
//! assert_eq!(*config.get()?, Some(42));
//! # Ok::<(), Error>(())
//! ```

pub mod callback;
pub mod convert;
pub mod error;
pub mod lazy;
pub mod predicate;
pub mod produce;

/// Convenient re-exports of commonly used items.
///
/// Import all core abstractions with:
///
/// ```rust
/// use commons_interfaces::prelude::*;
/// ```
pub mod prelude {
    pub use crate::callback::{Callback, FnHandler, Handler, WeakCallback};
    pub use crate::convert::{Conversion, Converter, FnTranslator, NullSafe, Reversion, Translator};
    pub use crate::error::{Error, ErrorBoundary, ErrorKind, Result};
    pub use crate::lazy::{AsyncLazy, Lazy, LazyState, LazyValue};
    pub use crate::predicate::{FalliblePredicate, Predicate, PredicateExt, TryPredicate};
    pub use crate::produce::{
        AsyncProvider, CustomizingProducer, Factory, FnCustomizingProducer, FnFactory, FnProducer,
        FnProvider, Producer, Provider,
    };
}
