//! Converters and translators.
//!
//! A [`Converter`] maps values of one type to another (transforms, parses,
//! projects, evaluates, ...). A [`Translator`] can also map them back.
//!
//! Both interfaces take and return `Option`s: an absent input yields an
//! absent output. Callers decide what an absent value means for them, e.g.
//! by substituting a default or reporting an error.
//!
//! Implementations usually provide only the core step through
//! [`Conversion`] (and [`Reversion`]) and let [`NullSafe`] apply the shared
//! contract:
//!
//! - `None` passes through without calling the step;
//! - failures are wrapped into [`ErrorKind::Conversion`], unless they already
//!   are conversion errors.
//!
//! ```
//! use commons_interfaces::convert::{Converter, NullSafe};
//!
//! let port = NullSafe::new(|s: &str| s.trim().parse::<u16>());
//!
//! assert_eq!(port.convert(Some(" 8080 ")).unwrap(), Some(8080));
//! assert_eq!(port.convert(None::<&str>).unwrap(), None);
//! assert!(port.convert(Some("http")).is_err());
//! ```
//!
//! [`ErrorKind::Conversion`]: crate::error::ErrorKind::Conversion

mod null_safe;

pub use null_safe::{FnTranslator, NullSafe};

use crate::error::{BoxError, Result};
use std::sync::Arc;

/// Converts values of type `S` into values of type `T`.
pub trait Converter<S, T> {
    /// Convert `value`.
    ///
    /// Implementations following the crate's conventions return `Ok(None)`
    /// for `None` and report failures as
    /// [`ErrorKind::Conversion`](crate::error::ErrorKind::Conversion).
    fn convert(&self, value: Option<S>) -> Result<Option<T>>;
}

/// A [`Converter`] that can also map values back.
pub trait Translator<S, T>: Converter<S, T> {
    /// Revert `value`; the inverse of [`Converter::convert`].
    fn revert(&self, value: Option<T>) -> Result<Option<S>>;
}

/// The core step of a conversion, applied only to present values.
///
/// Closures `Fn(S) -> Result<T, E>` implement this trait.
pub trait Conversion<S, T> {
    /// Convert a present value.
    fn do_convert(&self, value: S) -> Result<T, BoxError>;
}

/// The core step of a reversion, applied only to present values.
pub trait Reversion<S, T> {
    /// Revert a present value.
    fn do_revert(&self, value: T) -> Result<S, BoxError>;
}

impl<S, T, E, F> Conversion<S, T> for F
where
    F: Fn(S) -> Result<T, E>,
    E: Into<BoxError>,
{
    fn do_convert(&self, value: S) -> Result<T, BoxError> {
        self(value).map_err(Into::into)
    }
}

impl<S, T, C: Converter<S, T> + ?Sized> Converter<S, T> for &C {
    fn convert(&self, value: Option<S>) -> Result<Option<T>> {
        (**self).convert(value)
    }
}

impl<S, T, C: Converter<S, T> + ?Sized> Converter<S, T> for Box<C> {
    fn convert(&self, value: Option<S>) -> Result<Option<T>> {
        (**self).convert(value)
    }
}

impl<S, T, C: Converter<S, T> + ?Sized> Converter<S, T> for Arc<C> {
    fn convert(&self, value: Option<S>) -> Result<Option<T>> {
        (**self).convert(value)
    }
}

impl<S, T, C: Translator<S, T> + ?Sized> Translator<S, T> for &C {
    fn revert(&self, value: Option<T>) -> Result<Option<S>> {
        (**self).revert(value)
    }
}

impl<S, T, C: Translator<S, T> + ?Sized> Translator<S, T> for Box<C> {
    fn revert(&self, value: Option<T>) -> Result<Option<S>> {
        (**self).revert(value)
    }
}

impl<S, T, C: Translator<S, T> + ?Sized> Translator<S, T> for Arc<C> {
    fn revert(&self, value: Option<T>) -> Result<Option<S>> {
        (**self).revert(value)
    }
}
