//! Synonym classification.
//!
//! Decides which atom names are usable synonyms. Formal and obsolete name
//! forms (FN, OF, OAF, OAP) are dropped; every other name is kept, optionally
//! lowercased.

use std::collections::BTreeSet;

use umls_types::AtomRecord;

/// Returns the synonym contributed by an atom, if any.
///
/// # Examples
///
/// ```
/// use umls_closure::classify;
/// use umls_types::AtomRecord;
///
/// let pt = AtomRecord::new("PT", "Diabetes Mellitus", None);
/// assert_eq!(classify(&pt, true), Some("diabetes mellitus".to_string()));
/// assert_eq!(classify(&pt, false), Some("Diabetes Mellitus".to_string()));
///
/// let fsn = AtomRecord::new("FN", "Diabetes mellitus (disorder)", None);
/// assert_eq!(classify(&fsn, true), None);
/// ```
pub fn classify(atom: &AtomRecord, lowercase: bool) -> Option<String> {
    if atom.term_type.is_excluded_from_synonyms() {
        return None;
    }
    if lowercase {
        Some(atom.name.to_lowercase())
    } else {
        Some(atom.name.clone())
    }
}

/// Collects the sorted, deduplicated synonyms of a set of atoms.
pub fn synonym_set<'a, I>(atoms: I, lowercase: bool) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a AtomRecord>,
{
    atoms
        .into_iter()
        .filter_map(|atom| classify(atom, lowercase))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use umls_types::TermType;

    #[test]
    fn test_excluded_term_types() {
        for code in TermType::EXCLUDED_CODES {
            let atom = AtomRecord::new(code, "Some Name", None);
            assert_eq!(classify(&atom, true), None, "{code} should be excluded");
            assert_eq!(classify(&atom, false), None, "{code} should be excluded");
        }
    }

    #[test]
    fn test_included_term_types() {
        for code in ["PT", "SY", "AB", "MH", "ET", "LLT"] {
            let atom = AtomRecord::new(code, "Heart Attack", None);
            assert_eq!(classify(&atom, false), Some("Heart Attack".to_string()));
            assert_eq!(classify(&atom, true), Some("heart attack".to_string()));
        }
    }

    #[test]
    fn test_synonym_set_sorts_and_dedups() {
        let atoms = vec![
            AtomRecord::new("SY", "MI", None),
            AtomRecord::new("PT", "Myocardial infarction", None),
            AtomRecord::new("FN", "Myocardial infarction (disorder)", None),
            AtomRecord::new("SY", "myocardial infarction", None),
            AtomRecord::new("OAP", "Cardiac infarction", None),
            AtomRecord::new("SY", "Heart attack", None),
        ];

        let lowered: Vec<String> = synonym_set(&atoms, true).into_iter().collect();
        assert_eq!(lowered, vec!["heart attack", "mi", "myocardial infarction"]);

        let cased: Vec<String> = synonym_set(&atoms, false).into_iter().collect();
        assert_eq!(
            cased,
            vec![
                "Heart attack",
                "MI",
                "Myocardial infarction",
                "myocardial infarction"
            ]
        );
    }

    #[test]
    fn test_synonym_set_empty() {
        let atoms = vec![AtomRecord::new("FN", "Only formal (finding)", None)];
        assert!(synonym_set(&atoms, true).is_empty());
    }
}
