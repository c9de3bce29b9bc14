// src/lib.rs

//! Trovepool
//!
//! In-memory pool of resolvable units for a package dependency resolver.
//!
//! # Architecture
//!
//! - Resolvables: immutable identity (kind, name, edition, arch)
//! - Capabilities: named, optionally versioned dependency atoms
//! - Status: per-item installed / transact / lock flags with lock rules
//! - Filters: composable predicates over resolvables, status and
//!   capability associations
//! - Pool: owns units, indexes capabilities by name, hands out generational
//!   handles

pub mod arch;
pub mod capability;
pub mod config;
mod error;
pub mod filter;
pub mod kind;
pub mod label;
pub mod pool;
pub mod resolvable;
pub mod status;
pub mod version;

pub use arch::Arch;
pub use capability::{CapMatch, Capability, DepKind};
pub use config::{DEFAULT_CONFIG_PATH, LockEntry, PoolConfig};
pub use error::{Error, Result};
pub use kind::{Kind, ResTraits};
pub use label::{Label, LabelParseError};
pub use pool::{CapAndItem, HasSource, ItemRef, Pool, PoolItem, Unit};
pub use resolvable::{AsResolvable, Resolvable};
pub use status::{AsStatus, Causer, Stage, Status};
pub use version::{Edition, Rel};
