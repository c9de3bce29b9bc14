// src/config.rs

//! Pool configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! system_arch = "x86_64"
//!
//! [[lock]]
//! name = "kernel-default"
//! edition = "6.4.0-150600.1"
//!
//! [[lock]]
//! kind = "pattern"
//! name = "base"
//! ```
//!
//! Each `[[lock]]` entry names a unit that enters the pool locked. Omitted
//! `edition` / `arch` fields match every edition / arch; `kind` defaults to
//! `package`.

use crate::arch::Arch;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::resolvable::Resolvable;
use crate::version::Edition;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default path for the persisted lock list
pub const DEFAULT_CONFIG_PATH: &str = "/etc/trovepool/pool.toml";

/// Settings a pool is created with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    /// Architecture of the target system (defaults to the build target)
    #[serde(default)]
    pub system_arch: Option<Arch>,

    /// Units that start out locked
    #[serde(default, rename = "lock")]
    pub locks: Vec<LockEntry>,
}

/// One entry of the persisted lock list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LockEntry {
    #[serde(default)]
    pub kind: Kind,
    pub name: String,
    #[serde(default)]
    pub edition: Option<Edition>,
    #[serde(default)]
    pub arch: Option<Arch>,
}

impl LockEntry {
    /// Lock every edition and arch of a package name
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            kind: Kind::Package,
            name: name.into(),
            edition: None,
            arch: None,
        }
    }

    /// Check if this entry covers a resolvable
    pub fn matches(&self, resolvable: &Resolvable) -> bool {
        self.kind == resolvable.kind()
            && self.name == resolvable.name()
            && self.edition.as_ref().is_none_or(|e| e == resolvable.edition())
            && self.arch.is_none_or(|a| a == resolvable.arch())
    }
}

impl PoolConfig {
    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: PoolConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(
            "Loaded pool config from {}: {} lock(s)",
            path.display(),
            config.locks.len()
        );
        Ok(config)
    }

    /// Load configuration if the file exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No pool config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Target system architecture
    pub fn system_arch(&self) -> Arch {
        self.system_arch.unwrap_or_else(Arch::system)
    }

    /// Check if any lock entry covers a resolvable
    pub fn is_locked(&self, resolvable: &Resolvable) -> bool {
        self.locks.iter().any(|lock| lock.matches(resolvable))
    }

    fn validate(&self) -> Result<()> {
        for lock in &self.locks {
            if lock.name.trim().is_empty() {
                return Err(Error::ConfigError("lock entry with empty name".to_string()));
            }
        }
        Ok(())
    }
}
