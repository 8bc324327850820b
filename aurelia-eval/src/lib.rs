//! Evaluation of binding-site predictors against structure-derived ground
//! truth.
//!
//! The crate ties the Aurelia pipeline together: detected binding residues
//! ([`aurelia_struct::binding`]) are re-expressed in canonical numbering via
//! a [`CorrespondenceMap`], then scored against per-residue probabilities
//! with a confusion-matrix metric suite.
//!
//! - **Reconciliation** — model ↔ canonical numbering in [`reconcile`]
//! - **Metrics** — tallies, MCC, Brier score in [`metrics`]
//! - **Pipeline** — one structure end-to-end in [`pipeline`]
//! - **Batches** — many structures with per-structure outcomes in [`batch`]
//!
//! # Quick start
//!
//! ```
//! use aurelia_eval::{evaluate_structure, EvaluationInput, Predictions};
//! use aurelia_seq::CanonicalSequence;
//! use aurelia_struct::parse_pdb;
//!
//! let pdb_text = "\
//! ATOM      1  CA  LYS A   1       3.000   0.000   0.000  1.00  0.00           C
//! TER
//! HETATM    2  PG  ATP A 500       0.000   0.000   0.000  1.00  0.00           P
//! END
//! ";
//!
//! let input = EvaluationInput::new("1ABC", parse_pdb(pdb_text).unwrap(), "ATP", 4.0)
//!     .with_canonical(CanonicalSequence::new("K").unwrap())
//!     .with_predictions(Predictions::new([(1, 0.9)]).unwrap());
//!
//! let report = evaluate_structure(&input).unwrap();
//! assert_eq!(report.metrics.tally.true_pos, 1);
//! ```

pub mod batch;
pub mod metrics;
pub mod pipeline;
pub mod reconcile;

pub use batch::{evaluate_batch, BatchReport, BatchSummary, MetricSummary, StructureOutcome};
pub use metrics::{
    score, BindingLabels, ConfusionTally, MetricReport, Predictions, DECISION_THRESHOLD,
};
pub use pipeline::{evaluate_structure, EvaluationInput, StructureReport};
pub use reconcile::CorrespondenceMap;
