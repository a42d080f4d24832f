//! UMLS atom types.
//!
//! An atom is one name of a concept as contributed by a source vocabulary,
//! optionally pointing at the list of that source concept's descendants.

use crate::{well_known, Cui, TermType};

/// Where an atom's descendants can be listed, if anywhere.
///
/// The service reports "no descendants" with the literal `NONE`; an absent
/// field means the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescendantLink {
    /// The atom has no descendant list.
    None,
    /// URL of the paginated descendant list.
    Url(String),
}

impl DescendantLink {
    /// Interprets the raw `descendants` field of an atom payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use umls_types::DescendantLink;
    ///
    /// assert_eq!(DescendantLink::from_field(None), DescendantLink::None);
    /// assert_eq!(DescendantLink::from_field(Some("NONE")), DescendantLink::None);
    /// assert_eq!(
    ///     DescendantLink::from_field(Some("https://example.org/descendants")),
    ///     DescendantLink::Url("https://example.org/descendants".to_string())
    /// );
    /// ```
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            None => Self::None,
            Some(v) if v == well_known::NONE_SENTINEL || v.trim().is_empty() => Self::None,
            Some(v) => Self::Url(v.to_string()),
        }
    }

    /// Returns the URL, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Url(url) => Some(url),
        }
    }
}

/// One lexical/hierarchical record of a concept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtomRecord {
    /// Term type of this name.
    pub term_type: TermType,
    /// Display string.
    pub name: String,
    /// Descendant list locator.
    pub descendants: DescendantLink,
}

impl AtomRecord {
    /// Creates an atom from raw field values.
    ///
    /// # Examples
    ///
    /// ```
    /// use umls_types::{AtomRecord, TermType};
    ///
    /// let atom = AtomRecord::new("PT", "Diabetes mellitus", Some("NONE"));
    /// assert_eq!(atom.term_type, TermType::PreferredTerm);
    /// assert!(atom.descendants_url().is_none());
    /// ```
    pub fn new(term_type: &str, name: impl Into<String>, descendants: Option<&str>) -> Self {
        Self {
            term_type: TermType::from_code(term_type),
            name: name.into(),
            descendants: DescendantLink::from_field(descendants),
        }
    }

    /// Returns the descendant list URL, if this atom has one.
    pub fn descendants_url(&self) -> Option<&str> {
        self.descendants.url()
    }
}

/// All atoms returned for one concept, in service order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptAtomSet {
    /// The concept these atoms belong to.
    pub cui: Cui,
    /// Atoms in the order the service returned them.
    pub atoms: Vec<AtomRecord>,
}

impl ConceptAtomSet {
    /// Creates an atom set.
    pub fn new(cui: Cui, atoms: Vec<AtomRecord>) -> Self {
        Self { cui, atoms }
    }

    /// Iterates over the descendant URLs of all atoms, in atom order.
    ///
    /// The same URL may appear more than once.
    pub fn descendant_urls(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().filter_map(AtomRecord::descendants_url)
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns true if the concept has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descendant_link_blank_is_none() {
        assert_eq!(DescendantLink::from_field(Some("")), DescendantLink::None);
        assert_eq!(DescendantLink::from_field(Some("  ")), DescendantLink::None);
    }

    #[test]
    fn test_descendant_urls_skip_none() {
        let set = ConceptAtomSet::new(
            Cui::new("C0001"),
            vec![
                AtomRecord::new("PT", "Alpha", Some("https://example.org/a")),
                AtomRecord::new("SY", "Alpha syn", Some("NONE")),
                AtomRecord::new("FN", "Alpha (disorder)", None),
                AtomRecord::new("PT", "Alpha", Some("https://example.org/b")),
            ],
        );

        let urls: Vec<&str> = set.descendant_urls().collect();
        assert_eq!(urls, vec!["https://example.org/a", "https://example.org/b"]);
        assert_eq!(set.len(), 4);
        assert!(!set.is_empty());
    }
}
