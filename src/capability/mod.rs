// src/capability/mod.rs
//! Capabilities and three-valued matching
//!
//! A capability is a name with an optional version qualifier (`bash`,
//! `libssl.so.3`, `bash >= 5.1`). Units declare capabilities under a
//! [`DepKind`]: what they provide, require, conflict with, and so on.
//!
//! Matching a required capability against a provided one answers
//! [`CapMatch::Yes`], [`CapMatch::No`], or [`CapMatch::Maybe`] when only one
//! side is versioned and the answer depends on context the capabilities do
//! not carry. There is no conversion to `bool`; call sites pick their own
//! `Maybe` policy through [`CapMatch::is_yes`] and friends.

mod matching;

pub use matching::CapMatch;

use crate::error::{Error, Result};
use crate::version::{Edition, Rel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Dependency kind a capability is declared under
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DepKind {
    Provides,
    Prerequires,
    Requires,
    Conflicts,
    Obsoletes,
    Recommends,
    Suggests,
    Supplements,
    Enhances,
}

/// A named, optionally versioned capability
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Capability {
    name: String,
    range: Option<(Rel, Edition)>,
}

impl Capability {
    /// Unversioned capability
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, range: None })
    }

    /// Capability qualified by `REL edition`
    ///
    /// Only `=`, `<`, `<=`, `>` and `>=` are valid qualifiers.
    pub fn versioned(name: impl Into<String>, rel: Rel, edition: Edition) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        if matches!(rel, Rel::Any | Rel::Ne) {
            return Err(Error::InvalidCapability(format!(
                "'{}' is not a valid qualifier for '{}'",
                rel.as_str(),
                name
            )));
        }

        Ok(Self {
            name,
            range: Some((rel, edition)),
        })
    }

    /// Parse a capability string
    ///
    /// Examples:
    /// - "bash" → unversioned
    /// - "bash >= 5.1" → versioned
    /// - "libc.so.6(GLIBC_2.34)(64bit)" → unversioned
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| Error::InvalidCapability("empty capability".to_string()))?;

        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => Self::new(name),
            (Some(op), Some(edition), None) => {
                let rel: Rel = op.parse().map_err(|_| {
                    Error::InvalidCapability(format!("bad operator '{}' in '{}'", op, s))
                })?;
                let edition = Edition::parse(edition).map_err(|e| {
                    Error::InvalidCapability(format!("bad edition in '{}': {}", s, e))
                })?;
                Self::versioned(name, rel, edition)
            }
            _ => Err(Error::InvalidCapability(format!(
                "expected 'name [op edition]', got '{}'",
                s
            ))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rel(&self) -> Option<Rel> {
        self.range.as_ref().map(|(rel, _)| *rel)
    }

    pub fn edition(&self) -> Option<&Edition> {
        self.range.as_ref().map(|(_, edition)| edition)
    }

    pub fn is_versioned(&self) -> bool {
        self.range.is_some()
    }

    /// Match `self` as a requirement against a provided capability
    ///
    /// A versioned provide is treated as the single edition it names.
    pub fn matches(&self, provided: &Capability) -> CapMatch {
        matching::matches(self, provided)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidCapability("empty capability name".to_string()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidCapability(format!(
            "capability name '{}' contains whitespace",
            name
        )));
    }
    Ok(())
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some((rel, ref edition)) => write!(f, "{} {} {}", self.name, rel, edition),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Match a required capability against a provided one
pub fn matches(requirement: &Capability, provided: &Capability) -> CapMatch {
    matching::matches(requirement, provided)
}
