// src/capability/matching.rs

//! Three-valued capability matching

use super::Capability;
use std::fmt;

/// Outcome of matching a requirement against a provided capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapMatch {
    Yes,
    /// Undecidable without more context (one side is unversioned)
    Maybe,
    No,
}

impl CapMatch {
    pub fn is_yes(self) -> bool {
        self == CapMatch::Yes
    }

    pub fn is_no(self) -> bool {
        self == CapMatch::No
    }

    pub fn is_maybe(self) -> bool {
        self == CapMatch::Maybe
    }

    /// Three-valued AND: `No` dominates, then `Maybe`
    pub fn and(self, other: CapMatch) -> CapMatch {
        match (self, other) {
            (CapMatch::No, _) | (_, CapMatch::No) => CapMatch::No,
            (CapMatch::Maybe, _) | (_, CapMatch::Maybe) => CapMatch::Maybe,
            _ => CapMatch::Yes,
        }
    }

    /// Three-valued OR: `Yes` dominates, then `Maybe`
    pub fn or(self, other: CapMatch) -> CapMatch {
        match (self, other) {
            (CapMatch::Yes, _) | (_, CapMatch::Yes) => CapMatch::Yes,
            (CapMatch::Maybe, _) | (_, CapMatch::Maybe) => CapMatch::Maybe,
            _ => CapMatch::No,
        }
    }

    /// Three-valued negation; `Maybe` stays `Maybe`
    pub fn not(self) -> CapMatch {
        match self {
            CapMatch::Yes => CapMatch::No,
            CapMatch::Maybe => CapMatch::Maybe,
            CapMatch::No => CapMatch::Yes,
        }
    }
}

impl From<bool> for CapMatch {
    fn from(value: bool) -> Self {
        if value { CapMatch::Yes } else { CapMatch::No }
    }
}

impl fmt::Display for CapMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapMatch::Yes => write!(f, "yes"),
            CapMatch::Maybe => write!(f, "maybe"),
            CapMatch::No => write!(f, "no"),
        }
    }
}

/// Total over well-formed capabilities; never fails
///
/// A versioned provide names a single edition: its operator is not
/// consulted, so `bash > 1` is matched as if it were `bash = 1`.
pub(crate) fn matches(requirement: &Capability, provided: &Capability) -> CapMatch {
    if requirement.name != provided.name {
        return CapMatch::No;
    }

    match (&requirement.range, &provided.range) {
        (None, None) => CapMatch::Yes,
        (Some(_), None) | (None, Some(_)) => CapMatch::Maybe,
        (Some((rel, wanted)), Some((_, offered))) => {
            CapMatch::from(rel.holds(offered.match_cmp(wanted)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap(s: &str) -> Capability {
        Capability::parse(s).unwrap()
    }

    #[test]
    fn test_name_mismatch_is_no() {
        assert_eq!(cap("bash").matches(&cap("zsh")), CapMatch::No);
        assert_eq!(cap("bash >= 1").matches(&cap("zsh = 5")), CapMatch::No);
        // case-sensitive
        assert_eq!(cap("Bash").matches(&cap("bash")), CapMatch::No);
    }

    #[test]
    fn test_unversioned_both_is_yes() {
        assert_eq!(cap("bash").matches(&cap("bash")), CapMatch::Yes);
    }

    #[test]
    fn test_one_side_versioned_is_maybe() {
        assert_eq!(cap("bash >= 5").matches(&cap("bash")), CapMatch::Maybe);
        assert_eq!(cap("bash").matches(&cap("bash = 5.1")), CapMatch::Maybe);
    }

    #[test]
    fn test_both_versioned_evaluates_relation() {
        let provided = cap("bash = 5.1");
        assert_eq!(cap("bash >= 5.0").matches(&provided), CapMatch::Yes);
        assert_eq!(cap("bash > 5.1").matches(&provided), CapMatch::No);
        assert_eq!(cap("bash <= 5.1").matches(&provided), CapMatch::Yes);
        assert_eq!(cap("bash < 5.1").matches(&provided), CapMatch::No);
        assert_eq!(cap("bash = 5.1").matches(&provided), CapMatch::Yes);
    }

    #[test]
    fn test_missing_release_matches_any_release() {
        assert_eq!(cap("bash = 5.1").matches(&cap("bash = 5.1-3")), CapMatch::Yes);
        assert_eq!(cap("bash = 5.1-2").matches(&cap("bash = 5.1-3")), CapMatch::No);
    }

    #[test]
    fn test_match_is_deterministic() {
        let req = cap("bash >= 5.0");
        let prov = cap("bash = 5.1");
        assert_eq!(req.matches(&prov), req.matches(&prov));
    }

    #[test]
    fn test_kleene_tables() {
        use CapMatch::*;
        let all = [Yes, Maybe, No];
        let and = [[Yes, Maybe, No], [Maybe, Maybe, No], [No, No, No]];
        let or = [[Yes, Yes, Yes], [Yes, Maybe, Maybe], [Yes, Maybe, No]];
        for (i, a) in all.into_iter().enumerate() {
            for (j, b) in all.into_iter().enumerate() {
                assert_eq!(a.and(b), and[i][j], "{a} and {b}");
                assert_eq!(a.or(b), or[i][j], "{a} or {b}");
            }
        }
        assert_eq!(all.map(CapMatch::not), [No, Maybe, Yes]);
    }

    #[test]
    fn test_provided_operator_is_ignored() {
        assert_eq!(cap("bash = 1").matches(&cap("bash > 1")), CapMatch::Yes);
        assert_eq!(cap("bash > 1").matches(&cap("bash > 1")), CapMatch::No);
    }

    #[test]
    fn test_kleene_logic() {
        use CapMatch::*;
        assert_eq!(Yes.and(Maybe), Maybe);
        assert_eq!(Maybe.and(No), No);
        assert_eq!(No.or(Maybe), Maybe);
        assert_eq!(Maybe.or(Yes), Yes);
        assert_eq!(Maybe.not(), Maybe);
        assert_eq!(Yes.not(), No);
    }
}
