//! Confusion-matrix metrics for per-residue binding predictions.
//!
//! Scoring is closed-world over the prediction record: every predicted
//! position contributes exactly one observation, positions without a
//! prediction contribute nothing. Degenerate denominators yield 0.0 rather
//! than NaN; the raw tallies are always reported alongside so a zero can be
//! traced to its cause.

use std::collections::{BTreeMap, BTreeSet};

use aurelia_core::{AureliaError, Result, Scored, Summarizable};

/// Probability threshold above which (inclusive) a prediction counts as a
/// binding call.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// The set of canonical positions that are true binding sites for one
/// structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingLabels {
    positions: BTreeSet<usize>,
}

impl BindingLabels {
    /// Build from canonical positions; duplicates collapse.
    pub fn from_positions(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    /// Whether a canonical position is a binding site.
    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    /// Number of binding positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no position is labeled binding.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }
}

/// Per-position binding probabilities in canonical numbering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Predictions {
    probabilities: BTreeMap<usize, f64>,
}

impl Predictions {
    /// Build from `(canonical position, probability)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a position is 0 (canonical numbering is 1-based)
    /// or a probability is outside `[0, 1]`.
    pub fn new(pairs: impl IntoIterator<Item = (usize, f64)>) -> Result<Self> {
        let mut probabilities = BTreeMap::new();
        for (position, p) in pairs {
            if position == 0 {
                return Err(AureliaError::InvalidInput(
                    "canonical positions are 1-based; got position 0".into(),
                ));
            }
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(AureliaError::InvalidInput(format!(
                    "probability {} at position {} is outside [0, 1]",
                    p, position
                )));
            }
            probabilities.insert(position, p);
        }
        Ok(Self { probabilities })
    }

    /// The probability recorded at a canonical position.
    pub fn get(&self, position: usize) -> Option<f64> {
        self.probabilities.get(&position).copied()
    }

    /// Number of scored positions.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Whether the record holds no positions.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Iterate `(position, probability)` in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.probabilities.iter().map(|(&k, &v)| (k, v))
    }
}

/// Raw confusion counts from crossing binary calls against true labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionTally {
    pub true_pos: u64,
    pub true_neg: u64,
    pub false_pos: u64,
    pub false_neg: u64,
}

impl ConfusionTally {
    /// Total number of scored positions.
    pub fn total(&self) -> u64 {
        self.true_pos + self.true_neg + self.false_pos + self.false_neg
    }

    /// Sensitivity (recall): TP / (TP + FN). 0.0 when no positives exist.
    pub fn sensitivity(&self) -> f64 {
        ratio(self.true_pos, self.true_pos + self.false_neg)
    }

    /// Specificity: TN / (TN + FP). 0.0 when no negatives exist.
    pub fn specificity(&self) -> f64 {
        ratio(self.true_neg, self.true_neg + self.false_pos)
    }

    /// Accuracy: (TP + TN) / total. 0.0 when nothing was scored.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_pos + self.true_neg, self.total())
    }

    /// Precision: TP / (TP + FP). 0.0 when nothing was called positive.
    pub fn precision(&self) -> f64 {
        ratio(self.true_pos, self.true_pos + self.false_pos)
    }

    /// Matthews correlation coefficient, in `[-1, 1]`; 0.0 when the
    /// denominator vanishes.
    pub fn mcc(&self) -> f64 {
        let tp = self.true_pos as f64;
        let tn = self.true_neg as f64;
        let fp = self.false_pos as f64;
        let fn_ = self.false_neg as f64;
        let denominator = ((tp + fn_) * (tp + fp) * (tn + fn_) * (tn + fp)).sqrt();
        if denominator == 0.0 {
            return 0.0;
        }
        (tp * tn - fp * fn_) / denominator
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// The full metric suite for one structure: raw tallies plus the six derived
/// scalars.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricReport {
    pub tally: ConfusionTally,
    pub sensitivity: f64,
    pub specificity: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub mcc: f64,
    pub brier: f64,
}

impl MetricReport {
    fn from_tally(tally: ConfusionTally, brier: f64) -> Self {
        Self {
            sensitivity: tally.sensitivity(),
            specificity: tally.specificity(),
            accuracy: tally.accuracy(),
            precision: tally.precision(),
            mcc: tally.mcc(),
            brier,
            tally,
        }
    }
}

impl Summarizable for MetricReport {
    fn summary(&self) -> String {
        format!(
            "TP={} TN={} FP={} FN={} | sen={:.3} spe={:.3} acc={:.3} pre={:.3} mcc={:.3} brier={:.3}",
            self.tally.true_pos,
            self.tally.true_neg,
            self.tally.false_pos,
            self.tally.false_neg,
            self.sensitivity,
            self.specificity,
            self.accuracy,
            self.precision,
            self.mcc,
            self.brier,
        )
    }
}

impl Scored for MetricReport {
    fn score(&self) -> f64 {
        self.mcc
    }
}

/// Score a prediction record against the true binding labels.
///
/// Each predicted position is one observation: its true label is 1 iff it is
/// in `labels`, its call is positive iff the probability is at least
/// [`DECISION_THRESHOLD`]. Positions absent from `predictions` are not
/// scored.
pub fn score(labels: &BindingLabels, predictions: &Predictions) -> MetricReport {
    let mut tally = ConfusionTally::default();
    let mut squared_error = 0.0;

    for (position, p) in predictions.iter() {
        let actual = labels.contains(position);
        let called = p >= DECISION_THRESHOLD;
        match (actual, called) {
            (true, true) => tally.true_pos += 1,
            (false, false) => tally.true_neg += 1,
            (false, true) => tally.false_pos += 1,
            (true, false) => tally.false_neg += 1,
        }
        let truth = if actual { 1.0 } else { 0.0 };
        squared_error += (p - truth) * (p - truth);
    }

    let brier = if predictions.is_empty() {
        0.0
    } else {
        squared_error / predictions.len() as f64
    };

    MetricReport::from_tally(tally, brier)
}
