//! Batch evaluation across many structures.
//!
//! Structures are independent, so the batch is evaluated one worker per
//! structure when the `parallel` feature is enabled. A structure whose
//! companion data is missing or malformed is recorded as a failure next to
//! the successes; it never aborts the rest of the batch and never silently
//! disappears from the report.
//!
//! Batch summaries average the per-structure scalars rather than pooling the
//! raw tallies: structures vary wildly in residue count, and pooling would
//! weight the large ones.

use aurelia_core::{AureliaError, Summarizable};

use crate::pipeline::{evaluate_structure, EvaluationInput, StructureReport};

/// The result for one structure of a batch: a report or the error that
/// failed it.
#[derive(Debug)]
pub struct StructureOutcome {
    /// Identifier copied from the input.
    pub id: String,
    /// The structure's report, or why it was skipped.
    pub outcome: Result<StructureReport, AureliaError>,
}

/// Mean and sample standard deviation of one metric across a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricSummary {
    pub mean: f64,
    pub std_dev: f64,
}

/// Per-metric summaries over the successfully evaluated structures.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    /// Number of structures that produced a report.
    pub evaluated: usize,
    /// Number of structures that failed.
    pub failed: usize,
    pub sensitivity: MetricSummary,
    pub specificity: MetricSummary,
    pub accuracy: MetricSummary,
    pub precision: MetricSummary,
    pub mcc: MetricSummary,
    pub brier: MetricSummary,
}

/// All per-structure outcomes of one batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// One entry per input, in input order.
    pub outcomes: Vec<StructureOutcome>,
}

impl BatchReport {
    /// The successfully evaluated structures.
    pub fn successes(&self) -> impl Iterator<Item = &StructureReport> {
        self.outcomes.iter().filter_map(|o| o.outcome.as_ref().ok())
    }

    /// The failed structures with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &AureliaError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.outcome.as_ref().err().map(|e| (o.id.as_str(), e)))
    }

    /// Summarize each metric across the successful structures.
    pub fn summarize(&self) -> BatchSummary {
        let reports: Vec<&StructureReport> = self.successes().collect();
        let over = |f: &dyn Fn(&StructureReport) -> f64| -> MetricSummary {
            summarize(&reports.iter().map(|&r| f(r)).collect::<Vec<f64>>())
        };

        BatchSummary {
            evaluated: reports.len(),
            failed: self.outcomes.len() - reports.len(),
            sensitivity: over(&|r| r.metrics.sensitivity),
            specificity: over(&|r| r.metrics.specificity),
            accuracy: over(&|r| r.metrics.accuracy),
            precision: over(&|r| r.metrics.precision),
            mcc: over(&|r| r.metrics.mcc),
            brier: over(&|r| r.metrics.brier),
        }
    }
}

impl Summarizable for BatchReport {
    fn summary(&self) -> String {
        let s = self.summarize();
        format!(
            "Batch — {} evaluated, {} failed; mean MCC {:.3} ± {:.3}",
            s.evaluated, s.failed, s.mcc.mean, s.mcc.std_dev,
        )
    }
}

/// Mean and sample standard deviation (ddof = 1) of a scalar series.
///
/// Fewer than two values give a standard deviation of 0.0, keeping the
/// no-NaN reporting policy.
fn summarize(values: &[f64]) -> MetricSummary {
    if values.is_empty() {
        return MetricSummary {
            mean: 0.0,
            std_dev: 0.0,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std_dev = if values.len() > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (n - 1.0)).sqrt()
    } else {
        0.0
    };
    MetricSummary { mean, std_dev }
}

/// Evaluate every input independently, collecting per-structure outcomes in
/// input order.
pub fn evaluate_batch(inputs: &[EvaluationInput]) -> BatchReport {
    #[cfg(feature = "parallel")]
    let outcomes: Vec<StructureOutcome> = {
        use rayon::prelude::*;
        inputs
            .par_iter()
            .map(|input| StructureOutcome {
                id: input.id.clone(),
                outcome: evaluate_structure(input),
            })
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<StructureOutcome> = inputs
        .iter()
        .map(|input| StructureOutcome {
            id: input.id.clone(),
            outcome: evaluate_structure(input),
        })
        .collect();

    BatchReport { outcomes }
}
