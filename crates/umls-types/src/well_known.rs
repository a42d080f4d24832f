//! Well-known UMLS values.
//!
//! Constants of the UTS wire format.
//!
//! # Examples
//!
//! ```
//! use umls_types::well_known;
//!
//! assert_eq!(well_known::LANGUAGE_ENGLISH, "ENG");
//! assert_eq!(well_known::NONE_SENTINEL, "NONE");
//! ```

/// Value of an atom's `descendants` field when it has no descendant list.
pub const NONE_SENTINEL: &str = "NONE";

/// Language code for English atoms.
pub const LANGUAGE_ENGLISH: &str = "ENG";
