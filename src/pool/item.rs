// src/pool/item.rs

//! Handles and borrowed views into a pool

use super::unit::{HasSource, Unit};
use crate::capability::{Capability, DepKind};
use crate::label::Label;
use crate::resolvable::{AsResolvable, Resolvable};
use crate::status::{AsStatus, Status};
use std::fmt;

/// Stable handle to a pool item
///
/// Carries the generation the item was inserted at, so a handle that
/// outlives its item (or whose slot was reused) is detected instead of
/// silently pointing at another unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolItem {
    pub(super) index: usize,
    pub(super) generation: u64,
}

impl PoolItem {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for PoolItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

/// Read-only view of one item: unit plus live status
#[derive(Debug, Clone, Copy)]
pub struct ItemRef<'a> {
    pub(super) handle: PoolItem,
    pub(super) unit: &'a Unit,
    pub(super) status: &'a Status,
}

impl<'a> ItemRef<'a> {
    pub fn handle(&self) -> PoolItem {
        self.handle
    }

    pub fn unit(&self) -> &'a Unit {
        self.unit
    }

    pub fn status(&self) -> &'a Status {
        self.status
    }

    pub fn name(&self) -> &'a str {
        self.unit.resolvable().name()
    }
}

impl AsResolvable for ItemRef<'_> {
    fn resolvable(&self) -> &Resolvable {
        self.unit.resolvable()
    }
}

impl AsStatus for ItemRef<'_> {
    fn status(&self) -> &Status {
        self.status
    }
}

impl HasSource for ItemRef<'_> {
    fn source(&self) -> &Label {
        self.unit.source()
    }
}

impl fmt::Display for ItemRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.unit, f)
    }
}

/// A (capability, providing item) pair produced by a capability query
///
/// Borrows the pool, so the pool cannot change while associations are
/// alive. To mutate item status based on a query, collect the
/// [`PoolItem`] handles first and mutate afterwards.
#[derive(Debug, Clone, Copy)]
pub struct CapAndItem<'a> {
    pub(super) cap: &'a Capability,
    pub(super) dep_kind: DepKind,
    pub(super) item: ItemRef<'a>,
}

impl<'a> CapAndItem<'a> {
    pub fn cap(&self) -> &'a Capability {
        self.cap
    }

    pub fn dep_kind(&self) -> DepKind {
        self.dep_kind
    }

    pub fn item(&self) -> ItemRef<'a> {
        self.item
    }
}

impl AsResolvable for CapAndItem<'_> {
    fn resolvable(&self) -> &Resolvable {
        self.item.unit.resolvable()
    }
}

impl AsStatus for CapAndItem<'_> {
    fn status(&self) -> &Status {
        self.item.status
    }
}

impl HasSource for CapAndItem<'_> {
    fn source(&self) -> &Label {
        self.item.unit.source()
    }
}

impl fmt::Display for CapAndItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.item, self.dep_kind, self.cap)
    }
}
