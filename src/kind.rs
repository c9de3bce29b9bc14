// src/kind.rs

//! Resolvable kinds
//!
//! Every resolvable carries exactly one [`Kind`], fixed at construction.
//! Rust types that model a particular kind implement [`ResTraits`] so
//! kind-filters can be built from the type alone (`ByKind::of::<Package>()`).

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Category of a resolvable unit
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Installable binary package
    #[default]
    Package,
    Patch,
    Pattern,
    Product,
    /// Source package (arch `src` / `nosrc`)
    SrcPackage,
    Message,
    Script,
    Selection,
    Language,
    Atom,
    System,
}

/// Maps a resolvable type to its kind tag
pub trait ResTraits {
    const KIND: Kind;
}

/// Marker for binary packages
#[derive(Debug, Clone, Copy)]
pub struct Package;

/// Marker for patches
#[derive(Debug, Clone, Copy)]
pub struct Patch;

/// Marker for patterns
#[derive(Debug, Clone, Copy)]
pub struct Pattern;

/// Marker for products
#[derive(Debug, Clone, Copy)]
pub struct Product;

/// Marker for source packages
#[derive(Debug, Clone, Copy)]
pub struct SrcPackage;

impl ResTraits for Package {
    const KIND: Kind = Kind::Package;
}

impl ResTraits for Patch {
    const KIND: Kind = Kind::Patch;
}

impl ResTraits for Pattern {
    const KIND: Kind = Kind::Pattern;
}

impl ResTraits for Product {
    const KIND: Kind = Kind::Product;
}

impl ResTraits for SrcPackage {
    const KIND: Kind = Kind::SrcPackage;
}

/// Kind tag of `T`
pub fn kind_of<T: ResTraits>() -> Kind {
    T::KIND
}
