//! ROC rate extraction.
//!
//! Turns binary labels and classifier scores into the ordered sequence of
//! (FPR, TPR, threshold) triples traced as the decision threshold sweeps
//! from "classify nothing as positive" down to the lowest score.

use cutoff_core::{CutoffError, Result};
use tracing::trace;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single point on the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocPoint {
    /// Score threshold at which this point is computed (score >= threshold
    /// is classified positive).
    pub threshold: f64,
    /// False positive rate: FP / (FP + TN).
    pub fpr: f64,
    /// True positive rate (recall): TP / (TP + FN).
    pub tpr: f64,
}

impl RocPoint {
    /// True negative rate (specificity): `1 - fpr`.
    pub fn tnr(&self) -> f64 {
        1.0 - self.fpr
    }

    /// False negative rate: `1 - tpr`.
    pub fn fnr(&self) -> f64 {
        1.0 - self.tpr
    }
}

/// Options for [`roc_curve_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocConfig {
    /// Drop thresholds whose point lies on a straight segment between its
    /// neighbours. Such points never change the shape of the curve.
    pub drop_intermediate: bool,
}

impl Default for RocConfig {
    fn default() -> Self {
        Self {
            drop_intermediate: true,
        }
    }
}

/// ROC curve ordered by descending threshold (ascending FPR/TPR).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocCurve {
    /// Points on the curve, starting at (0, 0) and ending at (1, 1).
    pub points: Vec<RocPoint>,
    /// Number of cases labelled 1.
    pub n_positive: usize,
    /// Number of cases labelled 0.
    pub n_negative: usize,
}

impl RocCurve {
    /// Number of points on the curve.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in threshold-descending order.
    pub fn iter(&self) -> impl Iterator<Item = &RocPoint> {
        self.points.iter()
    }

    /// Fraction of evaluated cases that are positive.
    pub fn positive_rate(&self) -> f64 {
        self.n_positive as f64 / (self.n_positive + self.n_negative) as f64
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Compute the ROC curve with the default [`RocConfig`].
///
/// # Errors
///
/// See [`roc_curve_with`].
pub fn roc_curve(labels: &[u8], scores: &[f64]) -> Result<RocCurve> {
    roc_curve_with(labels, scores, &RocConfig::default())
}

/// Compute the ROC curve from binary labels and classifier scores.
///
/// Sorts by descending score and walks every distinct score, accumulating
/// true and false positive counts. The first point is the boundary
/// (0, 0) whose threshold is one above the highest score, so that no case
/// is classified positive there. Scores too large for `+ 1.0` to move them
/// get `f64::INFINITY` instead.
///
/// # Errors
///
/// Returns an error if the slices are empty or have different lengths, if
/// a label is not 0 or 1, if a score is not finite, or if only one class
/// is present.
pub fn roc_curve_with(labels: &[u8], scores: &[f64], config: &RocConfig) -> Result<RocCurve> {
    let (n_positive, n_negative) = class_counts(labels, scores)?;

    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // (threshold, fp, tp) at each distinct score
    let mut steps: Vec<(f64, usize, usize)> = Vec::new();
    let mut tp = 0usize;
    let mut fp = 0usize;

    let mut i = 0;
    while i < indices.len() {
        let current_score = scores[indices[i]];
        while i < indices.len() && scores[indices[i]] == current_score {
            if labels[indices[i]] == 1 {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        steps.push((current_score, fp, tp));
    }

    if config.drop_intermediate && steps.len() > 2 {
        let before = steps.len();
        steps = drop_collinear(&steps);
        trace!(
            dropped = before - steps.len(),
            kept = steps.len(),
            "dropped intermediate ROC thresholds"
        );
    }

    let p = n_positive as f64;
    let n = n_negative as f64;

    let mut points = Vec::with_capacity(steps.len() + 1);
    points.push(RocPoint {
        threshold: boundary_threshold(steps[0].0),
        fpr: 0.0,
        tpr: 0.0,
    });
    points.extend(steps.iter().map(|&(threshold, fp, tp)| RocPoint {
        threshold,
        fpr: fp as f64 / n,
        tpr: tp as f64 / p,
    }));

    Ok(RocCurve {
        points,
        n_positive,
        n_negative,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate labels and scores, returning (positives, negatives).
fn class_counts(labels: &[u8], scores: &[f64]) -> Result<(usize, usize)> {
    if labels.is_empty() {
        return Err(CutoffError::InvalidInput("empty input".into()));
    }
    if labels.len() != scores.len() {
        return Err(CutoffError::InvalidInput(format!(
            "labels length {} != scores length {}",
            labels.len(),
            scores.len()
        )));
    }
    if let Some(i) = scores.iter().position(|s| !s.is_finite()) {
        return Err(CutoffError::InvalidInput(format!(
            "score at index {i} is not finite"
        )));
    }

    let mut n_positive = 0usize;
    for (i, &label) in labels.iter().enumerate() {
        match label {
            0 => {}
            1 => n_positive += 1,
            other => {
                return Err(CutoffError::InvalidInput(format!(
                    "label at index {i} is {other}, expected 0 or 1"
                )))
            }
        }
    }
    let n_negative = labels.len() - n_positive;

    if n_positive == 0 {
        return Err(CutoffError::InvalidInput(
            "no positive samples, ROC curve is undefined".into(),
        ));
    }
    if n_negative == 0 {
        return Err(CutoffError::InvalidInput(
            "no negative samples, ROC curve is undefined".into(),
        ));
    }
    Ok((n_positive, n_negative))
}

/// Threshold strictly above `top_score`.
fn boundary_threshold(top_score: f64) -> f64 {
    let above = top_score + 1.0;
    if above > top_score {
        above
    } else {
        f64::INFINITY
    }
}

/// Keep the endpoints and every step where the FP or TP count changes slope.
fn drop_collinear(steps: &[(f64, usize, usize)]) -> Vec<(f64, usize, usize)> {
    let last = steps.len() - 1;
    steps
        .iter()
        .enumerate()
        .filter(|&(i, _)| {
            if i == 0 || i == last {
                return true;
            }
            let (_, fp_prev, tp_prev) = steps[i - 1];
            let (_, fp, tp) = steps[i];
            let (_, fp_next, tp_next) = steps[i + 1];
            let bends = |prev: usize, cur: usize, next: usize| prev + next != 2 * cur;
            bends(fp_prev, fp, fp_next) || bends(tp_prev, tp, tp_next)
        })
        .map(|(_, &step)| step)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
