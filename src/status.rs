// src/status.rs

//! Per-item transactional status
//!
//! Three independent facets: installed or not, marked for the current
//! transaction or not, locked or not. A locked item's transact flag can only
//! be changed through [`Status::force_transact`], the operator override path.
//! Automated resolution goes through [`Status::set_transact`], which refuses.

use crate::error::{Error, Result};
use std::fmt;

/// Who last changed the transact flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Causer {
    /// Dependency resolution
    #[default]
    Solver,
    /// Application policy (updates, patterns, ...)
    Application,
    /// Explicit operator request
    User,
}

/// Operator-visible summary of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    InstalledStable,
    InstalledToRemove,
    UninstalledStable,
    UninstalledToInstall,
    LockedInstalled,
    LockedUninstalled,
}

/// Mutable status of one pool item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status {
    installed: bool,
    transact: bool,
    locked: bool,
    causer: Causer,
}

impl Status {
    /// Status of an item present on the target system
    pub fn installed() -> Self {
        Self {
            installed: true,
            ..Self::default()
        }
    }

    /// Status of an item available but not installed
    pub fn uninstalled() -> Self {
        Self::default()
    }

    /// Initial status from on-disk truth and the persisted lock list
    pub fn new(installed: bool, locked: bool) -> Self {
        Self {
            installed,
            locked,
            ..Self::default()
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn is_uninstalled(&self) -> bool {
        !self.installed
    }

    pub fn transacts(&self) -> bool {
        self.transact
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn causer(&self) -> Causer {
        self.causer
    }

    /// Uninstalled and marked for installation
    pub fn is_to_be_installed(&self) -> bool {
        !self.installed && self.transact
    }

    /// Installed and marked for removal
    pub fn is_to_be_uninstalled(&self) -> bool {
        self.installed && self.transact
    }

    pub fn stage(&self) -> Stage {
        match (self.installed, self.transact, self.locked) {
            (true, true, _) => Stage::InstalledToRemove,
            (false, true, _) => Stage::UninstalledToInstall,
            (true, false, true) => Stage::LockedInstalled,
            (false, false, true) => Stage::LockedUninstalled,
            (true, false, false) => Stage::InstalledStable,
            (false, false, false) => Stage::UninstalledStable,
        }
    }

    /// Set the transact flag on behalf of `causer`
    ///
    /// Fails with [`Error::LockedStatus`] when the item is locked and the
    /// flag would change. Setting the flag to its current value always
    /// succeeds.
    pub fn set_transact(&mut self, transact: bool, causer: Causer) -> Result<()> {
        if self.transact == transact {
            return Ok(());
        }
        if self.locked {
            return Err(Error::LockedStatus(format!(
                "cannot {} transact on a locked item",
                if transact { "set" } else { "clear" }
            )));
        }

        self.transact = transact;
        self.causer = causer;
        Ok(())
    }

    /// Operator override: change the transact flag regardless of the lock
    pub fn force_transact(&mut self, transact: bool) {
        self.transact = transact;
        self.causer = Causer::User;
    }

    /// Lock or unlock the item
    ///
    /// Never fails and never clears an existing transact flag.
    pub fn set_lock(&mut self, locked: bool) {
        self.locked = locked;
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            if self.installed { 'I' } else { 'U' },
            if self.transact { 'T' } else { '_' },
            if self.locked { 'L' } else { '_' }
        )
    }
}

/// Anything that exposes a pool status
pub trait AsStatus {
    fn status(&self) -> &Status;
}

impl AsStatus for Status {
    fn status(&self) -> &Status {
        self
    }
}

impl<T: AsStatus + ?Sized> AsStatus for &T {
    fn status(&self) -> &Status {
        (**self).status()
    }
}
