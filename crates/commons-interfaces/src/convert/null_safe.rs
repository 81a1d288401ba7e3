use super::{Conversion, Converter, Reversion, Translator};
use crate::error::{BoxError, ErrorBoundary, ErrorKind, Result};

/// Applies the shared converter contract to a [`Conversion`].
///
/// `None` is returned for `None` without invoking the inner step. Failures of
/// the step are wrapped into [`ErrorKind::Conversion`]; conversion errors are
/// returned unchanged. When the inner step is also a [`Reversion`], the same
/// contract applies to [`Translator::revert`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSafe<C> {
    inner: C,
}

impl<C> NullSafe<C> {
    /// Wrap a conversion step.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped step.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Return the wrapped step.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<S, T, C> Converter<S, T> for NullSafe<C>
where
    C: Conversion<S, T>,
{
    fn convert(&self, value: Option<S>) -> Result<Option<T>> {
        value
            .map(|v| self.inner.do_convert(v))
            .transpose()
            .at_boundary(ErrorKind::Conversion)
    }
}

impl<S, T, C> Translator<S, T> for NullSafe<C>
where
    C: Conversion<S, T> + Reversion<S, T>,
{
    fn revert(&self, value: Option<T>) -> Result<Option<S>> {
        value
            .map(|v| self.inner.do_revert(v))
            .transpose()
            .at_boundary(ErrorKind::Conversion)
    }
}

/// A conversion and reversion step built from a pair of closures.
///
/// Wrap it in [`NullSafe`] to get a [`Translator`]:
///
/// ```
/// use commons_interfaces::convert::{Converter, FnTranslator, NullSafe, Translator};
///
/// let hex = NullSafe::new(FnTranslator::new(
///     |s: String| u32::from_str_radix(&s, 16),
///     |n: u32| Ok::<_, std::fmt::Error>(format!("{n:x}")),
/// ));
///
/// assert_eq!(hex.convert(Some("ff".to_string())).unwrap(), Some(255));
/// assert_eq!(hex.revert(Some(255)).unwrap(), Some("ff".to_string()));
/// assert_eq!(hex.revert(None).unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnTranslator<F, G> {
    forward: F,
    backward: G,
}

impl<F, G> FnTranslator<F, G> {
    /// Pair a forward and a backward mapping.
    pub fn new(forward: F, backward: G) -> Self {
        Self { forward, backward }
    }
}

impl<S, T, E, F, G> Conversion<S, T> for FnTranslator<F, G>
where
    F: Fn(S) -> Result<T, E>,
    E: Into<BoxError>,
{
    fn do_convert(&self, value: S) -> Result<T, BoxError> {
        (self.forward)(value).map_err(Into::into)
    }
}

impl<S, T, E, F, G> Reversion<S, T> for FnTranslator<F, G>
where
    G: Fn(T) -> Result<S, E>,
    E: Into<BoxError>,
{
    fn do_revert(&self, value: T) -> Result<S, BoxError> {
        (self.backward)(value).map_err(Into::into)
    }
}
