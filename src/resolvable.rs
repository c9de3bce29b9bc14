// src/resolvable.rs

//! Resolvable identity
//!
//! A [`Resolvable`] is the immutable `(kind, name, edition, arch)` tuple that
//! identifies a unit. Two units are the same resolvable iff all four fields
//! compare equal. Rendering follows the `[kind]name-edition.arch` format
//! that log tooling scrapes, so keep `Display` stable.

use crate::arch::Arch;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::version::Edition;
use std::cmp::Ordering;
use std::fmt;

/// Identity of a resolvable unit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resolvable {
    kind: Kind,
    name: String,
    edition: Edition,
    arch: Arch,
}

impl Resolvable {
    /// Create a resolvable identity
    ///
    /// The name must be non-empty and free of whitespace.
    pub fn new(kind: Kind, name: impl Into<String>, edition: Edition, arch: Arch) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidIdentity(format!(
                "empty name for {} {}.{}",
                kind, edition, arch
            )));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(Error::InvalidIdentity(format!(
                "name '{}' contains whitespace",
                name
            )));
        }

        Ok(Self {
            kind,
            name,
            edition,
            arch,
        })
    }

    /// Convenience constructor parsing edition and arch strings
    pub fn parse(kind: Kind, name: &str, edition: &str, arch: &str) -> Result<Self> {
        Self::new(kind, name, Edition::parse(edition)?, Arch::parse(arch)?)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edition(&self) -> &Edition {
        &self.edition
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }
}

/// Deterministic iteration order
///
/// Name ascending, then newest edition first, then arch, then kind.
impl Ord for Resolvable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| other.edition.cmp(&self.edition))
            .then_with(|| self.arch.cmp(&other.arch))
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

impl PartialOrd for Resolvable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Resolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]{}-{}.{}",
            self.kind, self.name, self.edition, self.arch
        )
    }
}

/// Anything that exposes a resolvable identity
///
/// Attribute filters are written against this trait so the same filter value
/// works on bare identities, pool items and capability associations.
pub trait AsResolvable {
    fn resolvable(&self) -> &Resolvable;
}

impl AsResolvable for Resolvable {
    fn resolvable(&self) -> &Resolvable {
        self
    }
}

impl<T: AsResolvable + ?Sized> AsResolvable for &T {
    fn resolvable(&self) -> &Resolvable {
        (**self).resolvable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(name: &str, edition: &str, arch: &str) -> Resolvable {
        Resolvable::parse(Kind::Package, name, edition, arch).unwrap()
    }

    #[test]
    fn test_display_format() {
        assert_eq!(res("bash", "5.1", "x86_64").to_string(), "[package]bash-5.1.x86_64");

        let src = Resolvable::parse(Kind::SrcPackage, "bash", "1:5.1-3", "src").unwrap();
        assert_eq!(src.to_string(), "[srcpackage]bash-1:5.1-3.src");
    }

    #[test]
    fn test_empty_name_rejected() {
        let edition = Edition::parse("1.0").unwrap();
        assert!(matches!(
            Resolvable::new(Kind::Package, "", edition.clone(), Arch::Noarch),
            Err(Error::InvalidIdentity(_))
        ));
        assert!(matches!(
            Resolvable::new(Kind::Package, "two words", edition, Arch::Noarch),
            Err(Error::InvalidIdentity(_))
        ));
    }

    #[test]
    fn test_equality_needs_all_fields() {
        let a = res("bash", "5.1", "x86_64");
        assert_eq!(a, res("bash", "5.1", "x86_64"));
        assert_ne!(a, res("bash", "5.2", "x86_64"));
        assert_ne!(a, res("bash", "5.1", "i686"));
        assert_ne!(a, Resolvable::parse(Kind::Pattern, "bash", "5.1", "x86_64").unwrap());
    }

    #[test]
    fn test_ordering() {
        let mut items = vec![
            res("zsh", "5.9", "x86_64"),
            res("bash", "5.0", "x86_64"),
            res("bash", "5.1", "x86_64"),
            res("bash", "5.1", "i686"),
        ];
        items.sort();

        let rendered: Vec<String> = items.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "[package]bash-5.1.i686",
                "[package]bash-5.1.x86_64",
                "[package]bash-5.0.x86_64",
                "[package]zsh-5.9.x86_64",
            ]
        );
    }
}
