//! Tests on subjects.
//!
//! [`Predicate`] is the plain, infallible test. [`FalliblePredicate`] is for
//! tests that may be unable to reach a verdict; its failures are reported as
//! [`ErrorKind::Predicate`].

use crate::error::{BoxError, ErrorBoundary, ErrorKind, Result};

/// Performs a test on a subject.
///
/// Implementations must not fail; use [`FalliblePredicate`] for tests that
/// can. Closures `Fn(&S) -> bool` are predicates.
pub trait Predicate<S: ?Sized> {
    /// Whether `subject` passes the test.
    fn test(&self, subject: &S) -> bool;
}

impl<S: ?Sized, F> Predicate<S> for F
where
    F: Fn(&S) -> bool,
{
    fn test(&self, subject: &S) -> bool {
        self(subject)
    }
}

/// Performs a test that may fail to evaluate.
pub trait FalliblePredicate<S: ?Sized> {
    /// Whether `subject` passes the test, or why the test could not be made.
    fn try_test(&self, subject: &S) -> Result<bool>;
}

/// Combinators on predicates.
///
/// ```
/// use commons_interfaces::predicate::{Predicate, PredicateExt};
///
/// let short = |s: &str| s.len() < 8;
/// let lower = |s: &str| s.chars().all(|c| c.is_ascii_lowercase());
/// let name = short.and(lower);
///
/// assert!(name.test("admin"));
/// assert!(!name.test("Administrator"));
/// assert!(name.not().test("ROOT"));
/// ```
pub trait PredicateExt<S: ?Sized>: Predicate<S> + Sized {
    /// Passes when both predicates pass; `other` is skipped if `self` fails.
    fn and<P: Predicate<S>>(self, other: P) -> And<Self, P> {
        And(self, other)
    }

    /// Passes when either predicate passes; `other` is skipped if `self`
    /// passes.
    fn or<P: Predicate<S>>(self, other: P) -> Or<Self, P> {
        Or(self, other)
    }

    /// Passes when `self` fails.
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<S: ?Sized, P: Predicate<S>> PredicateExt<S> for P {}

/// Conjunction of two predicates, see [`PredicateExt::and`].
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(A, B);

/// Disjunction of two predicates, see [`PredicateExt::or`].
#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(A, B);

/// Negation of a predicate, see [`PredicateExt::not`].
#[derive(Debug, Clone, Copy)]
pub struct Not<P>(P);

impl<S: ?Sized, A: Predicate<S>, B: Predicate<S>> Predicate<S> for And<A, B> {
    fn test(&self, subject: &S) -> bool {
        self.0.test(subject) && self.1.test(subject)
    }
}

impl<S: ?Sized, A: Predicate<S>, B: Predicate<S>> Predicate<S> for Or<A, B> {
    fn test(&self, subject: &S) -> bool {
        self.0.test(subject) || self.1.test(subject)
    }
}

impl<S: ?Sized, P: Predicate<S>> Predicate<S> for Not<P> {
    fn test(&self, subject: &S) -> bool {
        !self.0.test(subject)
    }
}

/// A [`FalliblePredicate`] backed by a closure `Fn(&S) -> Result<bool, E>`.
///
/// Failures become [`ErrorKind::Predicate`] errors.
#[derive(Debug, Clone, Copy)]
pub struct TryPredicate<F>(F);

impl<F> TryPredicate<F> {
    /// Wrap a fallible test.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<S: ?Sized, E, F> FalliblePredicate<S> for TryPredicate<F>
where
    F: Fn(&S) -> Result<bool, E>,
    E: Into<BoxError>,
{
    fn try_test(&self, subject: &S) -> Result<bool> {
        (self.0)(subject).at_boundary(ErrorKind::Predicate)
    }
}

/// Uses an infallible [`Predicate`] where a [`FalliblePredicate`] is expected.
#[derive(Debug, Clone, Copy)]
pub struct Infallible<P>(pub P);

impl<S: ?Sized, P: Predicate<S>> FalliblePredicate<S> for Infallible<P> {
    fn try_test(&self, subject: &S) -> Result<bool> {
        Ok(self.0.test(subject))
    }
}
