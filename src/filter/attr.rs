// src/filter/attr.rs

//! Attribute filters over resolvables, pool items and capability associations
//!
//! Identity filters (`ByKind`, `ByName`, `ByEdition`, `ByArch`) work on
//! anything implementing [`AsResolvable`]; status filters on anything
//! implementing [`AsStatus`]. A [`CapAndItem`] implements both by delegating
//! to its owning item, so the same values select associations by owner kind
//! or owner status.

use super::{Comparator, Filter};
use crate::arch::Arch;
use crate::capability::Capability;
use crate::kind::{Kind, ResTraits};
use crate::label::Label;
use crate::pool::{CapAndItem, HasSource};
use crate::resolvable::AsResolvable;
use crate::status::AsStatus;
use crate::version::{Edition, Rel};

/// Select by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByKind {
    kind: Kind,
}

impl ByKind {
    pub fn new(kind: Kind) -> Self {
        Self { kind }
    }

    /// Kind filter for a resolvable type, e.g. `ByKind::of::<SrcPackage>()`
    pub fn of<T: ResTraits>() -> Self {
        Self { kind: T::KIND }
    }
}

impl<V: AsResolvable + ?Sized> Filter<V> for ByKind {
    fn test(&self, value: &V) -> bool {
        value.resolvable().kind() == self.kind
    }
}

/// Select by exact name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByName<'a> {
    name: &'a str,
}

impl<'a> ByName<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }
}

impl<V: AsResolvable + ?Sized> Filter<V> for ByName<'_> {
    fn test(&self, value: &V) -> bool {
        value.resolvable().name() == self.name
    }
}

/// Select by origin label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BySource<'a> {
    source: &'a Label,
}

impl<'a> BySource<'a> {
    pub fn new(source: &'a Label) -> Self {
        Self { source }
    }
}

impl<V: HasSource + ?Sized> Filter<V> for BySource<'_> {
    fn test(&self, value: &V) -> bool {
        value.source() == self.source
    }
}

/// Select when `cmp(item_edition, edition)` holds
///
/// ```
/// use trovepool::filter::{ByEdition, Filter};
/// use trovepool::{Edition, Kind, Rel, Resolvable};
///
/// let two = Edition::parse("2.0").unwrap();
/// let newer_than_two = ByEdition::with(&two, Rel::Gt);
/// let r = Resolvable::parse(Kind::Package, "foo", "3.0", "noarch").unwrap();
/// assert!(newer_than_two.test(&r));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ByEdition<'a, C = Rel> {
    edition: &'a Edition,
    cmp: C,
}

impl<'a> ByEdition<'a, Rel> {
    /// Equality on edition
    pub fn new(edition: &'a Edition) -> Self {
        Self {
            edition,
            cmp: Rel::Eq,
        }
    }
}

impl<'a, C: Comparator<Edition>> ByEdition<'a, C> {
    pub fn with(edition: &'a Edition, cmp: C) -> Self {
        Self { edition, cmp }
    }
}

impl<V, C> Filter<V> for ByEdition<'_, C>
where
    V: AsResolvable + ?Sized,
    C: Comparator<Edition>,
{
    fn test(&self, value: &V) -> bool {
        self.cmp.compare(value.resolvable().edition(), self.edition)
    }
}

/// Select when `cmp(item_arch, arch)` holds
///
/// [`ByArch::compatible_with`] selects everything installable on a system
/// arch.
#[derive(Debug, Clone, Copy)]
pub struct ByArch<C = Rel> {
    arch: Arch,
    cmp: C,
}

impl ByArch<Rel> {
    /// Equality on arch
    pub fn new(arch: Arch) -> Self {
        Self { arch, cmp: Rel::Eq }
    }
}

impl<C: Comparator<Arch>> ByArch<C> {
    pub fn with(arch: Arch, cmp: C) -> Self {
        Self { arch, cmp }
    }
}

impl ByArch<fn(&Arch, &Arch) -> bool> {
    /// Items whose arch installs on `system`
    pub fn compatible_with(system: Arch) -> Self {
        fn installs_on(item: &Arch, system: &Arch) -> bool {
            item.compatible_with(*system)
        }
        Self {
            arch: system,
            cmp: installs_on,
        }
    }
}

impl<V, C> Filter<V> for ByArch<C>
where
    V: AsResolvable + ?Sized,
    C: Comparator<Arch>,
{
    fn test(&self, value: &V) -> bool {
        self.cmp.compare(&value.resolvable().arch(), &self.arch)
    }
}

/// Select installed items
#[derive(Debug, Clone, Copy, Default)]
pub struct ByInstalled;

impl<V: AsStatus + ?Sized> Filter<V> for ByInstalled {
    fn test(&self, value: &V) -> bool {
        value.status().is_installed()
    }
}

/// Select uninstalled items
#[derive(Debug, Clone, Copy, Default)]
pub struct ByUninstalled;

impl<V: AsStatus + ?Sized> Filter<V> for ByUninstalled {
    fn test(&self, value: &V) -> bool {
        value.status().is_uninstalled()
    }
}

/// Select items marked for the current transaction
#[derive(Debug, Clone, Copy, Default)]
pub struct ByTransact;

impl<V: AsStatus + ?Sized> Filter<V> for ByTransact {
    fn test(&self, value: &V) -> bool {
        value.status().transacts()
    }
}

/// Select items not marked for the current transaction
#[derive(Debug, Clone, Copy, Default)]
pub struct ByNotTransact;

impl<V: AsStatus + ?Sized> Filter<V> for ByNotTransact {
    fn test(&self, value: &V) -> bool {
        !value.status().transacts()
    }
}

/// Select locked items
#[derive(Debug, Clone, Copy, Default)]
pub struct ByLock;

impl<V: AsStatus + ?Sized> Filter<V> for ByLock {
    fn test(&self, value: &V) -> bool {
        value.status().is_locked()
    }
}

/// Select associations whose capability conclusively satisfies a requirement
///
/// `Maybe` is rejected.
#[derive(Debug, Clone, Copy)]
pub struct ByCapMatch<'a> {
    requirement: &'a Capability,
}

impl<'a> ByCapMatch<'a> {
    pub fn new(requirement: &'a Capability) -> Self {
        Self { requirement }
    }
}

impl Filter<CapAndItem<'_>> for ByCapMatch<'_> {
    fn test(&self, value: &CapAndItem<'_>) -> bool {
        self.requirement.matches(value.cap()).is_yes()
    }
}

/// Accepts every association; the capability index already did the selection
#[derive(Debug, Clone, Copy, Default)]
pub struct ByCapabilityIndex;

impl Filter<CapAndItem<'_>> for ByCapabilityIndex {
    fn test(&self, _value: &CapAndItem<'_>) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{chain, not};
    use crate::kind::SrcPackage;
    use crate::resolvable::Resolvable;
    use crate::status::Status;

    fn res(kind: Kind, name: &str, edition: &str, arch: &str) -> Resolvable {
        Resolvable::parse(kind, name, edition, arch).unwrap()
    }

    #[test]
    fn test_by_kind_and_name() {
        let bash = res(Kind::Package, "bash", "5.1", "x86_64");
        let src = res(Kind::SrcPackage, "bash", "5.1", "src");

        assert!(ByKind::new(Kind::Package).test(&bash));
        assert!(!ByKind::new(Kind::Package).test(&src));
        assert!(ByKind::of::<SrcPackage>().test(&src));
        assert!(ByName::new("bash").test(&src));
        assert!(!ByName::new("zsh").test(&bash));

        let packages_named_bash = chain(ByKind::new(Kind::Package), ByName::new("bash"));
        assert!(packages_named_bash.test(&bash));
        assert!(!packages_named_bash.test(&src));
    }

    #[test]
    fn test_by_edition_comparators() {
        let two = Edition::parse("2.0").unwrap();
        let one = res(Kind::Package, "foo", "1.0", "noarch");
        let three = res(Kind::Package, "foo", "3.0", "noarch");

        assert!(!ByEdition::new(&two).test(&one));
        assert!(ByEdition::with(&two, Rel::Gt).test(&three));
        assert!(ByEdition::with(&two, Rel::Le).test(&one));

        let same_major = |a: &Edition, b: &Edition| {
            a.version().split('.').next() == b.version().split('.').next()
        };
        let two_seven = res(Kind::Package, "foo", "2.7", "noarch");
        assert!(ByEdition::with(&two, same_major).test(&two_seven));
    }

    #[test]
    fn test_by_arch() {
        let i586 = res(Kind::Package, "glibc", "2.38", "i586");
        let noarch = res(Kind::Package, "fonts", "1.0", "noarch");
        let aarch64 = res(Kind::Package, "glibc", "2.38", "aarch64");

        assert!(ByArch::new(Arch::I586).test(&i586));
        assert!(!ByArch::new(Arch::X86_64).test(&i586));

        let installable = ByArch::compatible_with(Arch::X86_64);
        assert!(installable.test(&i586));
        assert!(installable.test(&noarch));
        assert!(!installable.test(&aarch64));
    }

    #[test]
    fn test_status_filters() {
        let mut status = Status::installed();
        assert!(ByInstalled.test(&status));
        assert!(!ByUninstalled.test(&status));
        assert!(ByNotTransact.test(&status));

        status.force_transact(true);
        status.set_lock(true);
        assert!(ByTransact.test(&status));
        assert!(ByLock.test(&status));
        assert!(!chain(ByTransact, not(ByTransact)).test(&status));
    }
}
