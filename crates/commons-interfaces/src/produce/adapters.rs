use super::{CustomizingProducer, Factory, Producer, Provider};
use crate::error::{BoxError, ErrorBoundary, ErrorKind, Result};
use std::fmt;

macro_rules! closure_adapter {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name<F> {
            f: F,
        }

        impl<F> $name<F> {
            /// Wrap `f`.
            pub fn new(f: F) -> Self {
                Self { f }
            }

            /// Return the wrapped closure.
            pub fn into_inner(self) -> F {
                self.f
            }
        }

        impl<F> fmt::Debug for $name<F> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

closure_adapter!(
    /// A [`Producer`] backed by a closure; failures become
    /// [`ErrorKind::Production`].
    FnProducer
);

closure_adapter!(
    /// A [`Provider`] backed by a closure; failures become
    /// [`ErrorKind::Provisioning`].
    FnProvider
);

closure_adapter!(
    /// A [`Factory`] backed by a closure; failures become
    /// [`ErrorKind::Creation`].
    FnFactory
);

closure_adapter!(
    /// A [`CustomizingProducer`] backed by a closure; failures become
    /// [`ErrorKind::Production`].
    FnCustomizingProducer
);

impl<P, E, F> Producer<P> for FnProducer<F>
where
    F: Fn() -> Result<P, E>,
    E: Into<BoxError>,
{
    fn produce(&self) -> Result<P> {
        (self.f)().at_boundary(ErrorKind::Production)
    }
}

impl<P, E, F> Provider<P> for FnProvider<F>
where
    F: Fn() -> Result<P, E>,
    E: Into<BoxError>,
{
    fn provide(&self) -> Result<P> {
        (self.f)().at_boundary(ErrorKind::Provisioning)
    }
}

impl<S, P, E, F> Factory<S, P> for FnFactory<F>
where
    F: Fn(S) -> Result<P, E>,
    E: Into<BoxError>,
{
    fn create(&self, specification: S) -> Result<P> {
        (self.f)(specification).at_boundary(ErrorKind::Creation)
    }
}

impl<C, P, E, F> CustomizingProducer<C, P> for FnCustomizingProducer<F>
where
    F: Fn(C) -> Result<P, E>,
    E: Into<BoxError>,
{
    fn produce_with(&self, customization: C) -> Result<P> {
        (self.f)(customization).at_boundary(ErrorKind::Production)
    }
}
