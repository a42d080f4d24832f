//! UMLS term type tags.
//!
//! Every atom carries a term type (TTY) that tells a preferred name apart from
//! a synonym, an abbreviation, or a formal/obsolete form of the name.

use std::fmt;

/// Term type of a UMLS atom.
///
/// Common tags get their own variant; everything else is kept verbatim in
/// [`TermType::Other`].
///
/// # Examples
///
/// ```
/// use umls_types::TermType;
///
/// let tty = TermType::from_code("FN");
/// assert_eq!(tty, TermType::FullySpecifiedName);
/// assert!(tty.is_excluded_from_synonyms());
///
/// assert_eq!(TermType::from_code("XM"), TermType::Other("XM".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum TermType {
    /// Preferred term (`PT`).
    PreferredTerm,
    /// Designated synonym (`SY`).
    Synonym,
    /// Abbreviation (`AB`).
    Abbreviation,
    /// Fully specified name (`FN`).
    FullySpecifiedName,
    /// Obsolete fully specified name (`OF`).
    ObsoleteFullySpecifiedName,
    /// Obsolete active fully specified name (`OAF`).
    ObsoleteActiveFullySpecifiedName,
    /// Obsolete active preferred term (`OAP`).
    ObsoleteActivePreferredTerm,
    /// Any other term type code.
    Other(String),
}

impl TermType {
    /// Code for preferred terms.
    pub const PT: &'static str = "PT";
    /// Code for designated synonyms.
    pub const SY: &'static str = "SY";
    /// Code for abbreviations.
    pub const AB: &'static str = "AB";
    /// Code for fully specified names.
    pub const FN: &'static str = "FN";
    /// Code for obsolete fully specified names.
    pub const OF: &'static str = "OF";
    /// Code for obsolete active fully specified names.
    pub const OAF: &'static str = "OAF";
    /// Code for obsolete active preferred terms.
    pub const OAP: &'static str = "OAP";

    /// Term types whose names are formal or obsolete forms, not usable synonyms.
    pub const EXCLUDED_CODES: [&'static str; 4] = [Self::FN, Self::OF, Self::OAF, Self::OAP];

    /// Creates a term type from its code. Matching is exact.
    pub fn from_code(code: &str) -> Self {
        match code {
            Self::PT => Self::PreferredTerm,
            Self::SY => Self::Synonym,
            Self::AB => Self::Abbreviation,
            Self::FN => Self::FullySpecifiedName,
            Self::OF => Self::ObsoleteFullySpecifiedName,
            Self::OAF => Self::ObsoleteActiveFullySpecifiedName,
            Self::OAP => Self::ObsoleteActivePreferredTerm,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the code for this term type.
    pub fn code(&self) -> &str {
        match self {
            Self::PreferredTerm => Self::PT,
            Self::Synonym => Self::SY,
            Self::Abbreviation => Self::AB,
            Self::FullySpecifiedName => Self::FN,
            Self::ObsoleteFullySpecifiedName => Self::OF,
            Self::ObsoleteActiveFullySpecifiedName => Self::OAF,
            Self::ObsoleteActivePreferredTerm => Self::OAP,
            Self::Other(code) => code,
        }
    }

    /// Returns true for FN, OF, OAF and OAP.
    pub fn is_excluded_from_synonyms(&self) -> bool {
        matches!(
            self,
            Self::FullySpecifiedName
                | Self::ObsoleteFullySpecifiedName
                | Self::ObsoleteActiveFullySpecifiedName
                | Self::ObsoleteActivePreferredTerm
        )
    }
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for TermType {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<TermType> for String {
    fn from(tty: TermType) -> Self {
        tty.code().to_string()
    }
}
