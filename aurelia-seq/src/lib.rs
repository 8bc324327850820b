//! Sequence handling for the Aurelia binding-site evaluation toolkit.
//!
//! - **Residue codes** — the shared three-letter → one-letter table in [`residues`]
//! - **Canonical sequences** — validated 1-based reference numbering in [`sequence`]
//! - **FASTA input** — first-record parsing in [`fasta`]
//!
//! # Quick start
//!
//! ```
//! use aurelia_seq::{parse_fasta, residues};
//! use aurelia_core::Sequence;
//!
//! let canonical = parse_fasta(">1abc_A\nMKVTAE\n").unwrap();
//! assert_eq!(canonical.len(), 6);
//! assert_eq!(residues::one_letter("MSE"), b'M');
//! ```

pub mod fasta;
pub mod residues;
pub mod sequence;

pub use fasta::{parse_fasta, parse_fasta_file};
pub use residues::{is_known, one_letter, UNKNOWN_RESIDUE};
pub use sequence::CanonicalSequence;
