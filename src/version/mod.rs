// src/version/mod.rs

//! Edition handling and relational operators
//!
//! An edition is an RPM-style `[epoch:]version[-release]` string. Editions
//! are compared segment-wise: the version and release strings are split into
//! alternating runs of digits and letters (anything else is a separator),
//! numeric runs compare as numbers, alphabetic runs compare lexically, and a
//! numeric run is always newer than an alphabetic one. When one side runs
//! out of segments first, it is the older edition.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A parsed edition with epoch, version, and optional release
///
/// Serializes as its display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Edition {
    epoch: u64,
    version: String,
    release: Option<String>,
}

impl Edition {
    /// Build an edition from its parts
    pub fn new(epoch: u64, version: impl Into<String>, release: Option<String>) -> Result<Self> {
        let version = version.into();
        if segments(&version).next().is_none() {
            return Err(Error::InvalidEdition(format!(
                "version '{}' has no alphanumeric segment",
                version
            )));
        }
        if let Some(ref r) = release
            && segments(r).next().is_none()
        {
            return Err(Error::InvalidEdition(format!(
                "release '{}' has no alphanumeric segment",
                r
            )));
        }

        // The display form must parse back to the same parts
        if version.contains(':') {
            return Err(Error::InvalidEdition(format!(
                "version '{}' contains the epoch separator ':'",
                version
            )));
        }
        if release.is_none() && version.contains('-') {
            return Err(Error::InvalidEdition(format!(
                "version '{}' contains '-' but has no release",
                version
            )));
        }
        if let Some(ref r) = release
            && (r.contains('-') || r.contains(':'))
        {
            return Err(Error::InvalidEdition(format!(
                "release '{}' contains a separator",
                r
            )));
        }

        Ok(Self {
            epoch,
            version,
            release,
        })
    }

    /// Parse an edition string
    ///
    /// Format: [epoch:]version[-release]
    /// - "5.1" → epoch=0, version="5.1", release=None
    /// - "2:5.1" → epoch=2, version="5.1", release=None
    /// - "5.1-3.fc40" → epoch=0, version="5.1", release=Some("3.fc40")
    ///
    /// The release starts after the last dash, so versions may contain dashes.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (epoch_str, rest) = match s.split_once(':') {
            Some((e, r)) => (e, r),
            None => ("", s),
        };

        let epoch = if epoch_str.is_empty() {
            0
        } else {
            epoch_str.parse::<u64>().map_err(|e| {
                Error::InvalidEdition(format!("Invalid epoch in edition '{}': {}", s, e))
            })?
        };

        let (version, release) = match rest.rsplit_once('-') {
            Some((v, r)) => (v, Some(r.to_string())),
            None => (rest, None),
        };

        if version.is_empty() {
            return Err(Error::InvalidEdition(format!(
                "Empty version component in '{}'",
                s
            )));
        }

        Self::new(epoch, version, release)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }

    /// Total order over editions
    ///
    /// A missing release sorts before any present release.
    pub fn compare(&self, other: &Edition) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| vercmp(&self.version, &other.version))
            .then_with(|| match (&self.release, &other.release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => vercmp(a, b),
            })
    }

    /// Comparison used when evaluating capability ranges
    ///
    /// Releases are only compared when both sides carry one, so `5.1`
    /// matches `5.1-3` here while `compare` orders them.
    pub fn match_cmp(&self, other: &Edition) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| vercmp(&self.version, &other.version))
            .then_with(|| match (&self.release, &other.release) {
                (Some(a), Some(b)) => vercmp(a, b),
                _ => Ordering::Equal,
            })
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}", self.version)?;
        if let Some(ref release) = self.release {
            write!(f, "-{}", release)?;
        }
        Ok(())
    }
}

impl FromStr for Edition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Edition {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Edition> for String {
    fn from(edition: Edition) -> Self {
        edition.to_string()
    }
}

impl PartialEq for Edition {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Edition {}

impl Ord for Edition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for Edition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Must agree with `compare`: "1.01" and "1.1" are the same edition.
impl Hash for Edition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch.hash(state);
        segments(&self.version).for_each(|s| s.hash(state));
        self.release.is_some().hash(state);
        if let Some(ref r) = self.release {
            segments(r).for_each(|s| s.hash(state));
        }
    }
}

/// One run of an edition string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Segment<'a> {
    /// Digits with leading zeros stripped
    Numeric(&'a str),
    Alpha(&'a str),
}

fn segments(s: &str) -> impl Iterator<Item = Segment<'_>> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    std::iter::from_fn(move || {
        while pos < bytes.len() && !bytes[pos].is_ascii_alphanumeric() {
            pos += 1;
        }
        if pos >= bytes.len() {
            return None;
        }

        let start = pos;
        let numeric = bytes[pos].is_ascii_digit();
        while pos < bytes.len()
            && bytes[pos].is_ascii_alphanumeric()
            && bytes[pos].is_ascii_digit() == numeric
        {
            pos += 1;
        }

        let run = &s[start..pos];
        Some(if numeric {
            Segment::Numeric(run.trim_start_matches('0'))
        } else {
            Segment::Alpha(run)
        })
    })
}

fn cmp_segment(a: Segment<'_>, b: Segment<'_>) -> Ordering {
    match (a, b) {
        // Leading zeros are gone, so the longer digit run is the bigger number
        (Segment::Numeric(x), Segment::Numeric(y)) => {
            x.len().cmp(&y.len()).then_with(|| x.cmp(y))
        }
        (Segment::Alpha(x), Segment::Alpha(y)) => x.cmp(y),
        (Segment::Numeric(_), Segment::Alpha(_)) => Ordering::Greater,
        (Segment::Alpha(_), Segment::Numeric(_)) => Ordering::Less,
    }
}

/// Segment-wise comparison of two version (or release) strings
pub fn vercmp(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(x), Some(y)) => match cmp_segment(x, y) {
                Ordering::Equal => {}
                ord => return ord,
            },
        }
    }
}

/// Relational operator
///
/// Used both as the qualifier of a versioned capability and as the
/// comparison policy of edition / architecture filters. `Any` holds for
/// every ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rel {
    #[default]
    Any,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Rel {
    /// Whether `lhs REL rhs` holds given `lhs.cmp(rhs)`
    pub fn holds(self, ord: Ordering) -> bool {
        match self {
            Rel::Any => true,
            Rel::Eq => ord == Ordering::Equal,
            Rel::Ne => ord != Ordering::Equal,
            Rel::Lt => ord == Ordering::Less,
            Rel::Le => ord != Ordering::Greater,
            Rel::Gt => ord == Ordering::Greater,
            Rel::Ge => ord != Ordering::Less,
        }
    }

    /// Operator symbol (`Any` renders as an empty string)
    pub fn as_str(&self) -> &'static str {
        match self {
            Rel::Any => "",
            Rel::Eq => "=",
            Rel::Ne => "!=",
            Rel::Lt => "<",
            Rel::Le => "<=",
            Rel::Gt => ">",
            Rel::Ge => ">=",
        }
    }
}

impl fmt::Display for Rel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "*" => Ok(Rel::Any),
            "=" | "==" => Ok(Rel::Eq),
            "!=" => Ok(Rel::Ne),
            "<" => Ok(Rel::Lt),
            "<=" => Ok(Rel::Le),
            ">" => Ok(Rel::Gt),
            ">=" => Ok(Rel::Ge),
            other => Err(Error::ParseError(format!(
                "Unknown relational operator '{}'",
                other
            ))),
        }
    }
}
