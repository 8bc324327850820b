//! Canonical reference sequences.
//!
//! A [`CanonicalSequence`] is the 1-based, gap-free numbering scheme that
//! structure-derived residue numbers are reconciled against. It is independent
//! of any structural model's numbering, which may be offset or gapped.

use aurelia_core::{AureliaError, ContentAddressable, Result, Sequence};
use sha2::{Digest, Sha256};

/// An ordered, 1-based, gap-free one-letter amino-acid sequence.
///
/// Input is uppercased on construction and validated: only ASCII letters are
/// accepted (the unknown code `X` included), so gap characters or stray
/// digits are rejected up front rather than corrupting an alignment later.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalSequence {
    residues: Vec<u8>,
}

impl CanonicalSequence {
    /// Create a canonical sequence from one-letter codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains a non-letter byte.
    pub fn new(seq: impl AsRef<[u8]>) -> Result<Self> {
        let raw = seq.as_ref();
        if raw.is_empty() {
            return Err(AureliaError::InvalidInput(
                "canonical sequence must not be empty".into(),
            ));
        }

        let mut residues = Vec::with_capacity(raw.len());
        for &b in raw {
            let up = b.to_ascii_uppercase();
            if !up.is_ascii_uppercase() {
                return Err(AureliaError::InvalidInput(format!(
                    "invalid residue code {:?} in canonical sequence",
                    b as char
                )));
            }
            residues.push(up);
        }

        Ok(Self { residues })
    }

    /// The residue code at a 1-based canonical position.
    pub fn get(&self, position: usize) -> Option<u8> {
        if position == 0 {
            return None;
        }
        self.residues.get(position - 1).copied()
    }
}

impl Sequence for CanonicalSequence {
    fn as_bytes(&self) -> &[u8] {
        &self.residues
    }
}

impl ContentAddressable for CanonicalSequence {
    fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.residues);
        hex::encode(hasher.finalize())
    }
}
