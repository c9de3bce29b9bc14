// src/pool/unit.rs

//! Pool payload: identity, origin and declared capabilities

use crate::capability::{Capability, DepKind};
use crate::label::Label;
use crate::resolvable::{AsResolvable, Resolvable};
use std::collections::BTreeMap;
use std::fmt;

/// A resolvable unit as loaded from a repository or the installed system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    resolvable: Resolvable,
    source: Label,
    deps: BTreeMap<DepKind, Vec<Capability>>,
}

impl Unit {
    /// Create a unit with no declared capabilities
    pub fn new(resolvable: Resolvable, source: Label) -> Self {
        Self {
            resolvable,
            source,
            deps: BTreeMap::new(),
        }
    }

    /// Declare a capability under `kind`
    pub fn with_dep(mut self, kind: DepKind, capability: Capability) -> Self {
        self.deps.entry(kind).or_default().push(capability);
        self
    }

    /// Declare several capabilities under `kind`
    pub fn with_deps(mut self, kind: DepKind, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.deps.entry(kind).or_default().extend(capabilities);
        self
    }

    pub fn source(&self) -> &Label {
        &self.source
    }

    /// Capabilities declared under `kind`
    pub fn dep(&self, kind: DepKind) -> &[Capability] {
        self.deps.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All declared capabilities, grouped by kind
    pub fn deps(&self) -> impl Iterator<Item = (DepKind, &[Capability])> {
        self.deps.iter().map(|(kind, caps)| (*kind, caps.as_slice()))
    }
}

impl AsResolvable for Unit {
    fn resolvable(&self) -> &Resolvable {
        &self.resolvable
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.resolvable, f)
    }
}

/// Anything that knows which repository it came from
pub trait HasSource {
    fn source(&self) -> &Label;
}

impl HasSource for Unit {
    fn source(&self) -> &Label {
        &self.source
    }
}

impl<T: HasSource + ?Sized> HasSource for &T {
    fn source(&self) -> &Label {
        (**self).source()
    }
}
