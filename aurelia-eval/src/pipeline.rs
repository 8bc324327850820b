//! Single-structure evaluation: detect, reconcile, score.
//!
//! All inputs arrive as values — parsed structures, sequences, and
//! probability records. File download, prediction-server submission, and
//! result persistence belong to the callers that produce and consume these
//! values.

use aurelia_core::{AureliaError, Result};
use aurelia_seq::CanonicalSequence;
use aurelia_struct::{detect_binding_sites, BindingSiteSet, ModelSequence, Structure};

use crate::metrics::{score, BindingLabels, MetricReport, Predictions};
use crate::reconcile::CorrespondenceMap;

/// Everything needed to evaluate one structure.
///
/// The canonical sequence and prediction record are optional at the type
/// level because batch drivers collect them from independent sources; a
/// missing one fails that structure's evaluation with
/// [`AureliaError::DataUnavailable`] instead of poisoning the whole batch.
#[derive(Debug, Clone)]
pub struct EvaluationInput {
    /// Identifier reported alongside results (e.g. a PDB ID).
    pub id: String,
    /// The parsed structural model.
    pub structure: Structure,
    /// The canonical reference sequence, if available.
    pub canonical: Option<CanonicalSequence>,
    /// Per-position binding probabilities in canonical numbering, if available.
    pub predictions: Option<Predictions>,
    /// Target ligand identifier (e.g. "ATP").
    pub ligand: String,
    /// Contact distance cutoff in Angstroms.
    pub cutoff: f64,
}

impl EvaluationInput {
    /// Input with no companion artifacts attached yet.
    pub fn new(
        id: impl Into<String>,
        structure: Structure,
        ligand: impl Into<String>,
        cutoff: f64,
    ) -> Self {
        Self {
            id: id.into(),
            structure,
            canonical: None,
            predictions: None,
            ligand: ligand.into(),
            cutoff,
        }
    }

    /// Attach the canonical sequence.
    pub fn with_canonical(mut self, canonical: CanonicalSequence) -> Self {
        self.canonical = Some(canonical);
        self
    }

    /// Attach the prediction record.
    pub fn with_predictions(mut self, predictions: Predictions) -> Self {
        self.predictions = Some(predictions);
        self
    }
}

/// The full result of one structure's evaluation.
#[derive(Debug, Clone)]
pub struct StructureReport {
    /// Identifier copied from the input.
    pub id: String,
    /// Residues detected in contact with the ligand, in model numbering.
    pub sites: BindingSiteSet,
    /// The model-to-canonical correspondence used for translation.
    pub map: CorrespondenceMap,
    /// Ground-truth binding positions in canonical numbering.
    pub labels: BindingLabels,
    /// Confusion tallies and derived metrics.
    pub metrics: MetricReport,
}

/// Run detect → reconcile → score for one structure.
///
/// # Errors
///
/// - [`AureliaError::DataUnavailable`] if the canonical sequence or the
///   prediction record is missing or empty.
/// - [`AureliaError::InvalidInput`] for bad detector arguments or a model
///   without polymer residues.
pub fn evaluate_structure(input: &EvaluationInput) -> Result<StructureReport> {
    let canonical = input.canonical.as_ref().ok_or_else(|| {
        AureliaError::DataUnavailable(format!("no canonical sequence for {}", input.id))
    })?;
    let predictions = input
        .predictions
        .as_ref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            AureliaError::DataUnavailable(format!("no predictions for {}", input.id))
        })?;

    let sites = detect_binding_sites(&input.structure, &input.ligand, input.cutoff)?;

    let model = ModelSequence::from_structure(&input.structure);
    let map = CorrespondenceMap::build(&model, canonical)?;
    let labels = map.translate_sites(&sites);

    let metrics = score(&labels, predictions);

    Ok(StructureReport {
        id: input.id.clone(),
        sites,
        map,
        labels,
        metrics,
    })
}
