//! # umls-types
//!
//! Type definitions for UMLS concepts and atoms.
//!
//! This crate provides the domain types shared by the closure engine and the
//! table builder: concept identifiers, atom records, term types and the
//! descendant links that connect a concept to its subtree.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use umls_types::{AtomRecord, ConceptAtomSet, Cui, TermType};
//!
//! let atoms = ConceptAtomSet::new(
//!     Cui::new("C0011849"),
//!     vec![
//!         AtomRecord::new("PT", "Diabetes mellitus", Some("https://example.org/descendants")),
//!         AtomRecord::new("FN", "Diabetes mellitus (disorder)", Some("NONE")),
//!     ],
//! );
//!
//! assert_eq!(atoms.descendant_urls().count(), 1);
//! assert!(atoms.atoms[1].term_type.is_excluded_from_synonyms());
//! assert_eq!(atoms.atoms[0].term_type, TermType::PreferredTerm);
//! ```

#![warn(missing_docs)]

mod atom;
mod cui;
mod term_type;
pub mod well_known;

// Re-export all public types at crate root
pub use atom::{AtomRecord, ConceptAtomSet, DescendantLink};
pub use cui::Cui;
pub use term_type::TermType;
