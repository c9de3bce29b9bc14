// src/arch/mod.rs
//! Architecture values and install compatibility
//!
//! Architectures form a partial order: a package built for `i586` installs on
//! an `i686` or `x86_64` system, but not the other way around, and `noarch`
//! installs everywhere. `Ord` refines that partial order into a total one
//! (family, then compatibility rank) so editions and archs can be sorted
//! deterministically.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Known architectures
///
/// Declaration order is the sort order: within a family, a lower variant is
/// compatible with every higher one.
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
pub enum Arch {
    #[strum(serialize = "noarch")]
    #[serde(rename = "noarch")]
    Noarch,
    #[strum(serialize = "src")]
    #[serde(rename = "src")]
    Src,
    #[strum(serialize = "nosrc")]
    #[serde(rename = "nosrc")]
    Nosrc,
    #[strum(serialize = "i386")]
    #[serde(rename = "i386")]
    I386,
    #[strum(serialize = "i486")]
    #[serde(rename = "i486")]
    I486,
    #[strum(serialize = "i586")]
    #[serde(rename = "i586")]
    I586,
    #[strum(serialize = "i686")]
    #[serde(rename = "i686")]
    I686,
    #[strum(serialize = "athlon")]
    #[serde(rename = "athlon")]
    Athlon,
    #[strum(serialize = "x86_64")]
    #[serde(rename = "x86_64")]
    X86_64,
    #[strum(serialize = "armv7hl")]
    #[serde(rename = "armv7hl")]
    Armv7hl,
    #[strum(serialize = "aarch64")]
    #[serde(rename = "aarch64")]
    Aarch64,
    #[strum(serialize = "ppc64")]
    #[serde(rename = "ppc64")]
    Ppc64,
    #[strum(serialize = "ppc64le")]
    #[serde(rename = "ppc64le")]
    Ppc64le,
    #[strum(serialize = "s390x")]
    #[serde(rename = "s390x")]
    S390x,
    #[strum(serialize = "riscv64")]
    #[serde(rename = "riscv64")]
    Riscv64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Neutral,
    Source,
    X86,
    Arm32,
    Arm64,
    Ppc64,
    Ppc64le,
    S390x,
    Riscv64,
}

impl Arch {
    fn family(self) -> Family {
        match self {
            Arch::Noarch => Family::Neutral,
            Arch::Src | Arch::Nosrc => Family::Source,
            Arch::I386 | Arch::I486 | Arch::I586 | Arch::I686 | Arch::Athlon | Arch::X86_64 => {
                Family::X86
            }
            Arch::Armv7hl => Family::Arm32,
            Arch::Aarch64 => Family::Arm64,
            Arch::Ppc64 => Family::Ppc64,
            Arch::Ppc64le => Family::Ppc64le,
            Arch::S390x => Family::S390x,
            Arch::Riscv64 => Family::Riscv64,
        }
    }

    /// Parse an architecture name like `x86_64` or `noarch`
    pub fn parse(s: &str) -> Result<Self> {
        Arch::from_str(s.trim())
            .map_err(|_| Error::InvalidIdentity(format!("Unknown architecture '{}'", s)))
    }

    /// Architecture of the running build target
    ///
    /// Falls back to `noarch` for targets outside the known set.
    pub fn system() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::I686,
            "arm" => Arch::Armv7hl,
            "powerpc64" if cfg!(target_endian = "little") => Arch::Ppc64le,
            "powerpc64" => Arch::Ppc64,
            other => Arch::parse(other).unwrap_or(Arch::Noarch),
        }
    }

    /// Whether a package built for `self` installs on a `target` system
    pub fn compatible_with(self, target: Arch) -> bool {
        if self == target || self == Arch::Noarch {
            return true;
        }
        // Source packages only ever match themselves
        if self.family() == Family::Source || target.family() == Family::Source {
            return false;
        }
        self.family() == target.family() && self <= target
    }

    /// Whether this is a source architecture (`src` / `nosrc`)
    pub fn is_source(self) -> bool {
        self.family() == Family::Source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_arch_parse_display_roundtrip() {
        for arch in Arch::iter() {
            assert_eq!(Arch::parse(&arch.to_string()).unwrap(), arch);
        }
        assert_eq!(Arch::X86_64.to_string(), "x86_64");
    }

    #[test]
    fn test_arch_parse_unknown() {
        assert!(matches!(Arch::parse("vax"), Err(Error::InvalidIdentity(_))));
    }

    #[test]
    fn test_noarch_compatible_with_everything() {
        for arch in Arch::iter() {
            assert!(Arch::Noarch.compatible_with(arch));
        }
    }

    #[test]
    fn test_x86_chain_is_one_directional() {
        assert!(Arch::I586.compatible_with(Arch::X86_64));
        assert!(Arch::I686.compatible_with(Arch::I686));
        assert!(!Arch::X86_64.compatible_with(Arch::I686));
        assert!(!Arch::X86_64.compatible_with(Arch::Noarch));
    }

    #[test]
    fn test_cross_family_incompatible() {
        assert!(!Arch::Aarch64.compatible_with(Arch::X86_64));
        assert!(!Arch::Ppc64.compatible_with(Arch::Ppc64le));
        assert!(!Arch::Src.compatible_with(Arch::X86_64));
        assert!(!Arch::I386.compatible_with(Arch::Src));
    }

    #[test]
    fn test_ord_refines_compatibility() {
        for a in Arch::iter() {
            for b in Arch::iter() {
                if a != b && a.compatible_with(b) {
                    assert!(a < b, "{} should sort before {}", a, b);
                }
            }
        }
    }
}
