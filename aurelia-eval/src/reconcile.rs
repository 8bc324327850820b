//! Reconciliation of model residue numbering with canonical numbering.
//!
//! A structural model numbers its residues however the depositing author
//! did — offset starts, gaps over disordered stretches, insertion codes. The
//! canonical sequence is 1-based and gap-free. A [`CorrespondenceMap`] links
//! the two by global alignment so detector output and prediction records can
//! be expressed in one shared coordinate system.

use std::collections::BTreeMap;

use aurelia_align::global_align;
use aurelia_core::{AureliaError, Result, Sequence, Summarizable};
use aurelia_seq::CanonicalSequence;
use aurelia_struct::{BindingSiteSet, ModelSequence, ResidueId};

use crate::metrics::{BindingLabels, Predictions};

/// A one-to-one partial mapping from model residue identity to canonical
/// sequence position (1-based).
///
/// Every key refers to a polymer residue of the model the map was built
/// from; every value lies within `[1, canonical length]`; values are
/// strictly increasing in key order. Model residues that the alignment
/// leaves unpaired are simply absent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrespondenceMap {
    entries: BTreeMap<ResidueId, usize>,
    canonical_len: usize,
}

impl CorrespondenceMap {
    /// Build the correspondence by globally aligning the model sequence
    /// against the canonical one.
    ///
    /// The aligned rows are walked column by column with two cursors: the
    /// model cursor advances on every non-gap model character, the canonical
    /// position on every non-gap canonical character. A pair is recorded
    /// only for columns where both sides hold a residue, so a gap on either
    /// side never shifts the other side's numbering.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has no polymer residues. A missing
    /// canonical sequence is the caller's `DataUnavailable` condition;
    /// an existing one is never empty by construction.
    pub fn build(model: &ModelSequence, canonical: &CanonicalSequence) -> Result<Self> {
        if model.is_empty() {
            return Err(AureliaError::InvalidInput(
                "structural model has no polymer residues to reconcile".into(),
            ));
        }

        let alignment = global_align(model.as_bytes(), canonical.as_bytes())?;

        let mut entries = BTreeMap::new();
        let mut model_cursor = 0usize;
        let mut canonical_pos = 0usize;

        for (&q, &t) in alignment
            .aligned_query
            .iter()
            .zip(alignment.aligned_target.iter())
        {
            let model_gap = q == b'-';
            let canonical_gap = t == b'-';
            if !canonical_gap {
                canonical_pos += 1;
            }
            if !model_gap {
                if !canonical_gap {
                    entries.insert(model.ids()[model_cursor], canonical_pos);
                }
                model_cursor += 1;
            }
        }

        Ok(Self {
            entries,
            canonical_len: canonical.len(),
        })
    }

    /// The canonical position of a model residue, if the alignment paired it.
    ///
    /// Identities that are not in the map — unpaired residues, heteroatom
    /// groups, identities from another structure — return `None`.
    pub fn translate(&self, id: &ResidueId) -> Option<usize> {
        self.entries.get(id).copied()
    }

    /// Re-express detected binding sites as canonical positions.
    ///
    /// Sites the alignment left unpaired are dropped; they have no canonical
    /// coordinate to carry them.
    pub fn translate_sites(&self, sites: &BindingSiteSet) -> BindingLabels {
        BindingLabels::from_positions(sites.ids().filter_map(|id| self.translate(&id)))
    }

    /// Re-key a model-numbered probability record into canonical numbering,
    /// dropping entries the alignment left unpaired.
    ///
    /// This is the second reconciliation pass for predictors that report in
    /// the model's own numbering.
    pub fn translate_keyed(&self, values: &BTreeMap<ResidueId, f64>) -> Result<Predictions> {
        Predictions::new(
            values
                .iter()
                .filter_map(|(id, &p)| self.translate(id).map(|pos| (pos, p))),
        )
    }

    /// Number of mapped residues.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the alignment paired no residues at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the canonical sequence the map was built against.
    pub fn canonical_len(&self) -> usize {
        self.canonical_len
    }

    /// Iterate `(model residue, canonical position)` pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (ResidueId, usize)> + '_ {
        self.entries.iter().map(|(&id, &pos)| (id, pos))
    }
}

impl Summarizable for CorrespondenceMap {
    fn summary(&self) -> String {
        format!(
            "CorrespondenceMap — {} residue(s) mapped onto {} canonical position(s)",
            self.len(),
            self.canonical_len,
        )
    }
}
