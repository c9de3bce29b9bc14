// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use trovepool::{Capability, DepKind, Kind, Label, Pool, PoolItem, Resolvable, Unit};

/// Label for the fixture repository
pub fn repo() -> Label {
    Label::new("download.example.org", "oss", "15.6")
}

/// Build a package unit from `repo()` providing the given capabilities
pub fn package(name: &str, edition: &str, arch: &str, provides: &[&str]) -> Unit {
    let res = Resolvable::parse(Kind::Package, name, edition, arch).unwrap();
    Unit::new(res, repo()).with_deps(
        DepKind::Provides,
        provides.iter().map(|c| Capability::parse(c).unwrap()),
    )
}

/// Create a pool with bash-5.1 and zsh-5.9 available (not installed).
///
/// Returns (pool, bash, zsh).
pub fn shell_pool() -> (Pool, PoolItem, PoolItem) {
    let mut pool = Pool::new();
    let bash = pool.insert(package("bash", "5.1", "x86_64", &["bash"]), false);
    let zsh = pool.insert(package("zsh", "5.9", "x86_64", &["zsh"]), false);
    (pool, bash, zsh)
}

/// Create a pool with three editions of `foo`.
pub fn foo_editions_pool() -> Pool {
    let mut pool = Pool::new();
    for edition in ["1.0", "2.0", "3.0"] {
        pool.insert(package("foo", edition, "noarch", &["foo"]), false);
    }
    pool
}
