//! Internationalized Resource Identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An IRI as used by xAPI to identify verbs, activities and attachment
/// usage types.
///
/// Validation is deliberately shallow: xAPI only requires that an IRI is
/// absolute, so a non-empty scheme followed by `:` is accepted. Everything
/// after the scheme is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

/// Error returned when a string is not an absolute IRI.
#[derive(Debug, Error)]
#[error("\"{0}\" is not a valid IRI")]
pub struct InvalidIri(pub String);

impl Iri {
    /// Parse an absolute IRI from a string.
    pub fn parse(value: &str) -> Result<Self, InvalidIri> {
        let scheme = match value.split_once(':') {
            Some((scheme, _)) => scheme,
            None => return Err(InvalidIri(value.to_string())),
        };

        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
            return Err(InvalidIri(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
