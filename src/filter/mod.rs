// src/filter/mod.rs
//! Composable filter predicates
//!
//! A filter is any value implementing [`Filter<V>`]; plain closures
//! `Fn(&V) -> bool` qualify. Filters compose with [`chain`] (short-circuit
//! AND), [`or`], [`not`], and the constants [`true_`] / [`false_`]:
//!
//! ```
//! use trovepool::filter::{chain, not, ByKind, ByName};
//! use trovepool::{Kind, Resolvable};
//!
//! let bash = Resolvable::parse(Kind::Package, "bash", "5.1", "x86_64").unwrap();
//! let packages_not_kernel = chain(ByKind::new(Kind::Package), not(ByName::new("kernel")));
//! assert!(trovepool::filter::Filter::test(&packages_not_kernel, &bash));
//! ```
//!
//! Filters and actions share one signature, so an action that records
//! matches can sit at the end of a chain. `chain` evaluates left to right
//! and stops at the first `false`, which count/collect idioms rely on.
//! Actions take `&self`; keep their state in a `Cell` / `RefCell` owned by
//! the caller.
//!
//! Attribute filters (see [`attr`]) are small `Copy` values that borrow
//! their operands, so ad hoc queries cost nothing to build.

pub mod attr;

pub use attr::{
    ByArch, ByCapMatch, ByCapabilityIndex, ByEdition, ByInstalled, ByKind, ByLock, ByName,
    ByNotTransact, BySource, ByTransact, ByUninstalled,
};

use crate::version::Rel;

/// Unary predicate over `V`
pub trait Filter<V: ?Sized> {
    fn test(&self, value: &V) -> bool;
}

impl<V: ?Sized, F> Filter<V> for F
where
    F: Fn(&V) -> bool,
{
    fn test(&self, value: &V) -> bool {
        self(value)
    }
}

/// Short-circuit AND of two filters
#[derive(Debug, Clone, Copy)]
pub struct Chain<P, Q> {
    first: P,
    second: Q,
}

impl<V: ?Sized, P: Filter<V>, Q: Filter<V>> Filter<V> for Chain<P, Q> {
    fn test(&self, value: &V) -> bool {
        self.first.test(value) && self.second.test(value)
    }
}

/// Short-circuit OR of two filters
#[derive(Debug, Clone, Copy)]
pub struct Or<P, Q> {
    first: P,
    second: Q,
}

impl<V: ?Sized, P: Filter<V>, Q: Filter<V>> Filter<V> for Or<P, Q> {
    fn test(&self, value: &V) -> bool {
        self.first.test(value) || self.second.test(value)
    }
}

/// Negation of a filter
#[derive(Debug, Clone, Copy)]
pub struct Not<P> {
    inner: P,
}

impl<V: ?Sized, P: Filter<V>> Filter<V> for Not<P> {
    fn test(&self, value: &V) -> bool {
        !self.inner.test(value)
    }
}

/// Accept-all filter
#[derive(Debug, Clone, Copy, Default)]
pub struct True;

impl<V: ?Sized> Filter<V> for True {
    fn test(&self, _value: &V) -> bool {
        true
    }
}

/// Reject-all filter
#[derive(Debug, Clone, Copy, Default)]
pub struct False;

impl<V: ?Sized> Filter<V> for False {
    fn test(&self, _value: &V) -> bool {
        false
    }
}

/// `first && second`, evaluating `second` only if `first` passed
pub fn chain<P, Q>(first: P, second: Q) -> Chain<P, Q> {
    Chain { first, second }
}

/// `first || second`, evaluating `second` only if `first` failed
pub fn or<P, Q>(first: P, second: Q) -> Or<P, Q> {
    Or { first, second }
}

pub fn not<P>(inner: P) -> Not<P> {
    Not { inner }
}

pub fn true_() -> True {
    True
}

pub fn false_() -> False {
    False
}

/// Run `action` on every element accepted by `filter`
///
/// Stops early when `action` returns `false`. Returns how many times
/// `action` ran.
pub fn invoke_on_each<I, F, A>(iter: I, filter: F, mut action: A) -> usize
where
    I: IntoIterator,
    F: Filter<I::Item>,
    A: FnMut(I::Item) -> bool,
{
    let mut count = 0;
    for item in iter {
        if !filter.test(&item) {
            continue;
        }
        count += 1;
        if !action(item) {
            break;
        }
    }
    count
}

/// Binary comparison policy injected into edition / arch filters
///
/// [`Rel`] covers the usual relations through `Ord`; any
/// `Fn(&T, &T) -> bool` works for anything else (e.g. arch compatibility).
pub trait Comparator<T: ?Sized> {
    /// Whether `lhs` relates to `rhs`
    fn compare(&self, lhs: &T, rhs: &T) -> bool;
}

impl<T: Ord + ?Sized> Comparator<T> for Rel {
    fn compare(&self, lhs: &T, rhs: &T) -> bool {
        self.holds(lhs.cmp(rhs))
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn compare(&self, lhs: &T, rhs: &T) -> bool {
        self(lhs, rhs)
    }
}
