// src/pool/mod.rs

//! The resolvable pool
//!
//! The pool owns every [`Unit`] together with its [`Status`] and hands out
//! [`PoolItem`] handles. Queries return borrowed views ([`ItemRef`],
//! [`CapAndItem`]), so the borrow checker gives every query snapshot
//! isolation: nothing can be inserted, removed, or re-marked while a query
//! iterator is alive. Resolver code that wants to mutate status based on a
//! query collects handles first (see [`Pool::select`]) and mutates after.
//!
//! Handles carry the pool generation they were issued at. Using a handle
//! whose item has been removed fails with [`Error::StaleHandle`] instead of
//! reaching a different unit that reused the slot.
//!
//! The pool does no internal locking. Callers sharing it across threads
//! wrap it in their own reader-writer lock.

mod item;
mod unit;

pub use item::{CapAndItem, ItemRef, PoolItem};
pub use unit::{HasSource, Unit};

use crate::arch::Arch;
use crate::capability::{Capability, DepKind};
use crate::config::PoolConfig;
use crate::error::{Error, Result};
use crate::filter::{ByCapMatch, Filter};
use crate::resolvable::AsResolvable;
use crate::status::{Causer, Status};
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct Slot {
    unit: Unit,
    status: Status,
    generation: u64,
}

/// Index entry: slot plus position of the capability within its dep list
type CapRef = (usize, usize);

/// In-memory collection of all known units and their live status
#[derive(Debug, Default)]
pub struct Pool {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    generation: u64,
    live: usize,
    cap_index: HashMap<DepKind, HashMap<String, Vec<CapRef>>>,
    name_index: HashMap<String, Vec<usize>>,
    config: PoolConfig,
}

impl Pool {
    /// Create an empty pool with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty pool whose inserts consult `config`'s lock list
    pub fn with_config(config: PoolConfig) -> Self {
        info!(
            "Creating pool for {} with {} persisted lock(s)",
            config.system_arch(),
            config.locks.len()
        );
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn system_arch(&self) -> Arch {
        self.config.system_arch()
    }

    /// Number of live items
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Counter bumped by every insert and remove
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Add a unit to the pool
    ///
    /// `installed` is the on-disk truth; the lock flag comes from the
    /// configured lock list. Inserting a unit whose identity, origin and
    /// installed flag match an existing item returns that item's handle.
    pub fn insert(&mut self, unit: Unit, installed: bool) -> PoolItem {
        if let Some(existing) = self.find_duplicate(&unit, installed) {
            debug!("Skipping duplicate {} from {}", unit, unit.source());
            return existing;
        }

        let locked = self.config.is_locked(unit.resolvable());
        if locked {
            debug!("{} enters the pool locked", unit);
        }

        self.generation += 1;
        let generation = self.generation;
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };

        for (kind, caps) in unit.deps() {
            let by_name = self.cap_index.entry(kind).or_default();
            for (pos, cap) in caps.iter().enumerate() {
                by_name
                    .entry(cap.name().to_string())
                    .or_default()
                    .push((index, pos));
            }
        }
        self.name_index
            .entry(unit.resolvable().name().to_string())
            .or_default()
            .push(index);

        debug!("Inserted {} from {} at #{}", unit, unit.source(), index);
        self.slots[index] = Some(Slot {
            unit,
            status: Status::new(installed, locked),
            generation,
        });
        self.live += 1;

        PoolItem { index, generation }
    }

    fn find_duplicate(&self, unit: &Unit, installed: bool) -> Option<PoolItem> {
        let candidates = self.name_index.get(unit.resolvable().name())?;
        candidates.iter().find_map(|&index| {
            let slot = self.slots.get(index)?.as_ref()?;
            let same = slot.unit.resolvable() == unit.resolvable()
                && slot.unit.source() == unit.source()
                && slot.status.is_installed() == installed;
            same.then_some(PoolItem {
                index,
                generation: slot.generation,
            })
        })
    }

    /// Remove an item, returning its unit
    pub fn remove(&mut self, handle: PoolItem) -> Result<Unit> {
        self.check(handle)?;
        let slot = self.slots[handle.index]
            .take()
            .ok_or_else(|| Error::StaleHandle(handle.to_string()))?;

        for (kind, caps) in slot.unit.deps() {
            if let Some(by_name) = self.cap_index.get_mut(&kind) {
                for cap in caps {
                    if let Some(refs) = by_name.get_mut(cap.name()) {
                        refs.retain(|&(index, _)| index != handle.index);
                        if refs.is_empty() {
                            by_name.remove(cap.name());
                        }
                    }
                }
            }
        }
        let name = slot.unit.resolvable().name();
        if let Some(indices) = self.name_index.get_mut(name) {
            indices.retain(|&index| index != handle.index);
            if indices.is_empty() {
                self.name_index.remove(name);
            }
        }

        self.free.push(handle.index);
        self.generation += 1;
        self.live -= 1;
        debug!("Removed {} from #{}", slot.unit, handle.index);

        Ok(slot.unit)
    }

    fn check(&self, handle: PoolItem) -> Result<&Slot> {
        self.slots
            .get(handle.index)
            .and_then(Option::as_ref)
            .filter(|slot| slot.generation == handle.generation)
            .ok_or_else(|| Error::StaleHandle(handle.to_string()))
    }

    fn check_mut(&mut self, handle: PoolItem) -> Result<&mut Slot> {
        self.slots
            .get_mut(handle.index)
            .and_then(Option::as_mut)
            .filter(|slot| slot.generation == handle.generation)
            .ok_or_else(|| Error::StaleHandle(handle.to_string()))
    }

    fn item_ref(&self, index: usize) -> Option<ItemRef<'_>> {
        let slot = self.slots.get(index)?.as_ref()?;
        Some(ItemRef {
            handle: PoolItem {
                index,
                generation: slot.generation,
            },
            unit: &slot.unit,
            status: &slot.status,
        })
    }

    /// Borrowed view of an item
    pub fn get(&self, handle: PoolItem) -> Result<ItemRef<'_>> {
        let slot = self.check(handle)?;
        Ok(ItemRef {
            handle,
            unit: &slot.unit,
            status: &slot.status,
        })
    }

    pub fn status(&self, handle: PoolItem) -> Result<&Status> {
        Ok(&self.check(handle)?.status)
    }

    /// Direct access to an item's status
    ///
    /// Lock rules still apply: they are enforced by [`Status`] itself.
    pub fn status_mut(&mut self, handle: PoolItem) -> Result<&mut Status> {
        Ok(&mut self.check_mut(handle)?.status)
    }

    /// Set an item's transact flag on behalf of the resolver or application
    ///
    /// Fails with [`Error::LockedStatus`] naming the item if it is locked.
    pub fn set_transact(&mut self, handle: PoolItem, transact: bool, causer: Causer) -> Result<()> {
        let slot = self.check_mut(handle)?;
        if slot.status.set_transact(transact, causer).is_err() {
            warn!("Refusing to change transact on locked {}", slot.unit);
            return Err(Error::LockedStatus(slot.unit.to_string()));
        }
        Ok(())
    }

    /// Operator override: change the transact flag even on a locked item
    pub fn force_transact(&mut self, handle: PoolItem, transact: bool) -> Result<()> {
        let slot = self.check_mut(handle)?;
        if slot.status.is_locked() {
            info!("Overriding lock on {}", slot.unit);
        }
        slot.status.force_transact(transact);
        Ok(())
    }

    pub fn set_lock(&mut self, handle: PoolItem, locked: bool) -> Result<()> {
        let slot = self.check_mut(handle)?;
        slot.status.set_lock(locked);
        Ok(())
    }

    /// All live items in slot order
    pub fn iter(&self) -> impl Iterator<Item = ItemRef<'_>> {
        (0..self.slots.len()).filter_map(|index| self.item_ref(index))
    }

    /// All live items in resolvable order (name, newest edition first, arch, kind)
    pub fn sorted(&self) -> Vec<ItemRef<'_>> {
        let mut items: Vec<_> = self.iter().collect();
        items.sort_by(|a, b| a.resolvable().cmp(b.resolvable()));
        items
    }

    /// Items with the given name
    pub fn by_name<'p>(&'p self, name: &str) -> impl Iterator<Item = ItemRef<'p>> + use<'p> {
        let indices: &'p [usize] = self
            .name_index
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        indices.iter().filter_map(move |&index| self.item_ref(index))
    }

    /// Every (capability, item) pair whose capability under `kind` is named `name`
    ///
    /// Only the name is checked here; relational matching and attribute
    /// filtering are up to the caller (see [`ByCapMatch`]).
    pub fn by_capability_index<'p>(
        &'p self,
        kind: DepKind,
        name: &str,
    ) -> impl Iterator<Item = CapAndItem<'p>> + use<'p> {
        let refs: &'p [CapRef] = self
            .cap_index
            .get(&kind)
            .and_then(|by_name| by_name.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        refs.iter().filter_map(move |&(index, pos)| {
            let item = self.item_ref(index)?;
            let cap = item.unit.dep(kind).get(pos)?;
            Some(CapAndItem {
                cap,
                dep_kind: kind,
                item,
            })
        })
    }

    /// Provides associations sharing the requirement's name
    pub fn providers<'p>(
        &'p self,
        requirement: &Capability,
    ) -> impl Iterator<Item = CapAndItem<'p>> + use<'p> {
        self.by_capability_index(DepKind::Provides, requirement.name())
    }

    /// Provides associations that conclusively satisfy `requirement`
    pub fn satisfying<'p>(&'p self, requirement: &'p Capability) -> Vec<CapAndItem<'p>> {
        let matcher = ByCapMatch::new(requirement);
        self.providers(requirement)
            .filter(|cai| matcher.test(cai))
            .collect()
    }

    /// Materialize the handles of every item accepted by `filter`
    pub fn select<'p, F>(&'p self, filter: F) -> Vec<PoolItem>
    where
        F: Filter<ItemRef<'p>>,
    {
        self.iter()
            .filter(|item| filter.test(item))
            .map(|item| item.handle())
            .collect()
    }
}
