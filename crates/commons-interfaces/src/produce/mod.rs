//! Abstractions that yield values.
//!
//! - [`Producer`] makes a new product on every call.
//! - [`Provider`] yields a product that may be cached and shared.
//! - [`Factory`] makes a new product that fulfills a specification.
//! - [`CustomizingProducer`] makes a new product adjusted by a customization.
//! - [`AsyncProvider`] is the async counterpart of [`Provider`].
//!
//! The `Fn*` adapters in this module turn closures into these abstractions
//! and classify every failure with the operation's [`ErrorKind`]:
//!
//! ```
//! use commons_interfaces::error::ErrorKind;
//! use commons_interfaces::produce::{FnFactory, Factory};
//!
//! let buffers = FnFactory::new(|capacity: usize| {
//!     if capacity > 1024 {
//!         return Err("capacity too large");
//!     }
//!     Ok(Vec::<u8>::with_capacity(capacity))
//! });
//!
//! assert!(buffers.create(64).unwrap().capacity() >= 64);
//! assert!(buffers.create(4096).unwrap_err().is(ErrorKind::Creation));
//! ```
//!
//! [`ErrorKind`]: crate::error::ErrorKind

mod adapters;

pub use adapters::{FnCustomizingProducer, FnFactory, FnProducer, FnProvider};

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces a new product each time it is called.
///
/// Suitable for stateful products (iterators, readers, key material) that
/// must not be shared between consumers. Implementers must return a new
/// instance on every call and should report failures as
/// [`ErrorKind::Production`](crate::error::ErrorKind::Production).
pub trait Producer<P> {
    /// Produce a new product. This may be a costly operation.
    fn produce(&self) -> Result<P>;
}

/// Provides a product, possibly the same one on every call.
///
/// Useful where retrieving a value on demand is preferable to holding it from
/// the start, usually because it might not be needed and is costly to create.
/// Only the first call needs to be costly, since providers may cache. Because
/// the product may be shared, stateful products belong in a [`Producer`].
/// Failures should be reported as
/// [`ErrorKind::Provisioning`](crate::error::ErrorKind::Provisioning).
pub trait Provider<P> {
    /// Provide the product. This may be a costly operation.
    fn provide(&self) -> Result<P>;
}

/// Creates a new product that fulfills a specification.
///
/// Failures should be reported as
/// [`ErrorKind::Creation`](crate::error::ErrorKind::Creation).
pub trait Factory<S, P> {
    /// Create a new, custom made product for `specification`.
    fn create(&self, specification: S) -> Result<P>;
}

/// Produces a new product adjusted by a customization.
///
/// Failures should be reported as
/// [`ErrorKind::Production`](crate::error::ErrorKind::Production).
pub trait CustomizingProducer<C, P> {
    /// Produce a new product, taking `customization` into account.
    fn produce_with(&self, customization: C) -> Result<P>;
}

/// Async counterpart of [`Provider`].
#[async_trait]
pub trait AsyncProvider<P: Send>: Send + Sync {
    /// Provide the product, possibly awaiting its computation.
    async fn provide(&self) -> Result<P>;
}

impl<P, T: Producer<P> + ?Sized> Producer<P> for &T {
    fn produce(&self) -> Result<P> {
        (**self).produce()
    }
}

impl<P, T: Producer<P> + ?Sized> Producer<P> for Box<T> {
    fn produce(&self) -> Result<P> {
        (**self).produce()
    }
}

impl<P, T: Producer<P> + ?Sized> Producer<P> for Arc<T> {
    fn produce(&self) -> Result<P> {
        (**self).produce()
    }
}

impl<P, T: Provider<P> + ?Sized> Provider<P> for &T {
    fn provide(&self) -> Result<P> {
        (**self).provide()
    }
}

impl<P, T: Provider<P> + ?Sized> Provider<P> for Box<T> {
    fn provide(&self) -> Result<P> {
        (**self).provide()
    }
}

impl<P, T: Provider<P> + ?Sized> Provider<P> for Arc<T> {
    fn provide(&self) -> Result<P> {
        (**self).provide()
    }
}

impl<S, P, T: Factory<S, P> + ?Sized> Factory<S, P> for &T {
    fn create(&self, specification: S) -> Result<P> {
        (**self).create(specification)
    }
}

impl<S, P, T: Factory<S, P> + ?Sized> Factory<S, P> for Box<T> {
    fn create(&self, specification: S) -> Result<P> {
        (**self).create(specification)
    }
}

impl<S, P, T: Factory<S, P> + ?Sized> Factory<S, P> for Arc<T> {
    fn create(&self, specification: S) -> Result<P> {
        (**self).create(specification)
    }
}

impl<C, P, T: CustomizingProducer<C, P> + ?Sized> CustomizingProducer<C, P> for &T {
    fn produce_with(&self, customization: C) -> Result<P> {
        (**self).produce_with(customization)
    }
}

impl<C, P, T: CustomizingProducer<C, P> + ?Sized> CustomizingProducer<C, P> for Box<T> {
    fn produce_with(&self, customization: C) -> Result<P> {
        (**self).produce_with(customization)
    }
}

impl<C, P, T: CustomizingProducer<C, P> + ?Sized> CustomizingProducer<C, P> for Arc<T> {
    fn produce_with(&self, customization: C) -> Result<P> {
        (**self).produce_with(customization)
    }
}
