// src/label.rs

//! Origin labels for pool items
//!
//! A label names the repository a unit was loaded from, using the format
//! `repository@namespace:tag`:
//! - `download.opensuse.org@oss:15.6` - a distribution repository
//! - `local@system:installed` - the installed system
//!
//! Inside the pool a label is only an equality-comparable tag; how
//! repositories are fetched or refreshed lives outside this crate.

use crate::error;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Repository origin of a unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    /// Repository hostname or identifier
    pub repository: String,
    /// Namespace within the repository
    pub namespace: String,
    /// Branch or release tag
    pub tag: String,
}

impl Label {
    /// Create a new label
    pub fn new(
        repository: impl Into<String>,
        namespace: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            namespace: namespace.into(),
            tag: tag.into(),
        }
    }

    /// Label used for units describing the installed system
    pub fn system() -> Self {
        Self::new("local", "system", "installed")
    }

    /// Check if this label names the installed system
    pub fn is_system(&self) -> bool {
        *self == Self::system()
    }

    /// Parse a label from string format `repository@namespace:tag`
    pub fn parse(s: &str) -> Result<Self, LabelParseError> {
        let (repository, rest) = s
            .split_once('@')
            .ok_or_else(|| LabelParseError::MissingAt(s.to_string()))?;
        let (namespace, tag) = rest
            .split_once(':')
            .ok_or_else(|| LabelParseError::MissingColon(s.to_string()))?;

        if repository.is_empty() || namespace.is_empty() || tag.is_empty() {
            return Err(LabelParseError::EmptyComponent(s.to_string()));
        }

        // alphanumeric, dots, hyphens, underscores
        let valid_chars = |c: char| c.is_alphanumeric() || c == '.' || c == '-' || c == '_';
        for part in [repository, namespace, tag] {
            if !part.chars().all(valid_chars) {
                return Err(LabelParseError::InvalidComponent(part.to_string()));
            }
        }

        Ok(Self::new(repository, namespace, tag))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.repository, self.namespace, self.tag)
    }
}

impl FromStr for Label {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::parse(s)
    }
}

/// Errors that can occur when parsing a label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelParseError {
    #[error("Missing '@' in label: {0}")]
    MissingAt(String),

    #[error("Missing ':' in label: {0}")]
    MissingColon(String),

    #[error("Empty component in label: {0}")]
    EmptyComponent(String),

    #[error("Invalid characters in label component: {0}")]
    InvalidComponent(String),
}

impl From<LabelParseError> for error::Error {
    fn from(err: LabelParseError) -> Self {
        error::Error::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse() {
        let label = Label::parse("download.opensuse.org@oss:15.6").unwrap();
        assert_eq!(label.repository, "download.opensuse.org");
        assert_eq!(label.namespace, "oss");
        assert_eq!(label.tag, "15.6");
    }

    #[test]
    fn test_label_display() {
        let label = Label::new("repo", "ns", "tag");
        assert_eq!(label.to_string(), "repo@ns:tag");
        assert_eq!(Label::system().to_string(), "local@system:installed");
    }

    #[test]
    fn test_label_parse_errors() {
        assert_eq!(
            Label::parse("repo-ns-tag"),
            Err(LabelParseError::MissingAt("repo-ns-tag".to_string()))
        );
        assert!(matches!(
            Label::parse("repo@ns"),
            Err(LabelParseError::MissingColon(_))
        ));
        assert!(matches!(
            Label::parse("@ns:tag"),
            Err(LabelParseError::EmptyComponent(_))
        ));
        assert!(matches!(
            Label::parse("re po@ns:tag"),
            Err(LabelParseError::InvalidComponent(_))
        ));
    }

    #[test]
    fn test_label_error_converts() {
        let err: error::Error = Label::parse("nope").unwrap_err().into();
        assert!(matches!(err, error::Error::ParseError(_)));
    }

    #[test]
    fn test_system_label() {
        assert!(Label::parse("local@system:installed").unwrap().is_system());
        assert!(!Label::new("repo", "oss", "1").is_system());
    }
}
