//! UMLS Concept Unique Identifier (CUI) type.
//!
//! CUIs are opaque strings such as `C0011849`. They are compared by exact
//! value and ordered lexically, which gives the output tables their order.

use std::borrow::Borrow;
use std::fmt;

/// A UMLS Concept Unique Identifier.
///
/// # Examples
///
/// ```
/// use umls_types::Cui;
///
/// let cui = Cui::new("C0011849");
/// assert_eq!(cui.as_str(), "C0011849");
///
/// let from_url = Cui::from_concept_url("https://uts-ws.nlm.nih.gov/rest/content/2024AA/CUI/C0011860");
/// assert_eq!(from_url, Some(Cui::new("C0011860")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cui(String);

impl Cui {
    /// Creates a CUI from any string-like value. No format check is applied.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Extracts the CUI from the last path segment of a concept URL.
    ///
    /// A trailing slash is ignored. Returns `None` if the last segment is empty.
    pub fn from_concept_url(url: &str) -> Option<Self> {
        let segment = url.trim_end_matches('/').rsplit('/').next()?;
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the CUI and returns the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cui {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Cui {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Cui {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Cui {
    fn borrow(&self) -> &str {
        &self.0
    }
}
