//! Expected net gain curves and optimal cut-off search.
//!
//! Each ROC point is scored with a gain/cost matrix over the four
//! confusion-matrix outcomes, weighted by the class-1 prior of the
//! deployment population:
//!
//! ```text
//! net_gain = p * (tpr * tp_gain - fnr * fn_cost)
//!          + (1 - p) * (tnr * tn_gain - fpr * fp_cost)
//! ```
//!
//! The result is the expected utility per case at every threshold. The
//! optimal cut-off is the threshold attaining the largest value.

use cutoff_core::{CutoffError, Prior, Result};
use tracing::{debug, warn};

use crate::roc::{roc_curve_with, RocConfig, RocCurve};

/// Supplied priors further than this from the empirical positive rate are
/// logged as a likely population mismatch.
const PRIOR_MISMATCH_WARN: f64 = 0.25;

// ---------------------------------------------------------------------------
// Gain/cost matrix
// ---------------------------------------------------------------------------

/// Per-case gains and costs for each confusion-matrix outcome.
///
/// Gains are added and costs subtracted, so all four values are given as
/// non-negative magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostGainMatrix {
    /// Gain from predicting a positive case as positive. Must be > 0.
    pub tp_gain: f64,
    /// Cost of predicting a negative case as positive. Must be > 0.
    pub fp_cost: f64,
    /// Gain from predicting a negative case as negative. Must be >= 0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tn_gain: f64,
    /// Cost of predicting a positive case as negative. Must be >= 0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fn_cost: f64,
}

impl CostGainMatrix {
    /// Matrix with the given TP gain and FP cost, and no TN gain or FN cost.
    pub fn new(tp_gain: f64, fp_cost: f64) -> Self {
        Self {
            tp_gain,
            fp_cost,
            tn_gain: 0.0,
            fn_cost: 0.0,
        }
    }

    /// Set the TN gain.
    pub fn with_tn_gain(mut self, tn_gain: f64) -> Self {
        self.tn_gain = tn_gain;
        self
    }

    /// Set the FN cost.
    pub fn with_fn_cost(mut self, fn_cost: f64) -> Self {
        self.fn_cost = fn_cost;
        self
    }

    /// Check the sign constraints on every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is not finite, if `tp_gain` or
    /// `fp_cost` is not strictly positive, or if `tn_gain` or `fn_cost` is
    /// negative.
    pub fn validate(&self) -> Result<()> {
        let entries = [
            ("tp_gain", self.tp_gain, true),
            ("fp_cost", self.fp_cost, true),
            ("tn_gain", self.tn_gain, false),
            ("fn_cost", self.fn_cost, false),
        ];
        for (name, value, strict) in entries {
            if !value.is_finite() {
                return Err(CutoffError::InvalidInput(format!(
                    "{name} must be finite, got {value}"
                )));
            }
            if strict && value <= 0.0 {
                return Err(CutoffError::InvalidInput(format!(
                    "{name} must be > 0, got {value}"
                )));
            }
            if value < 0.0 {
                return Err(CutoffError::InvalidInput(format!(
                    "{name} must be >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Expected net gain per case at a single operating point.
    pub fn net_gain(&self, prior: Prior, fpr: f64, tpr: f64) -> f64 {
        let tnr = 1.0 - fpr;
        let fnr = 1.0 - tpr;
        prior.p1() * (tpr * self.tp_gain - fnr * self.fn_cost)
            + prior.p0() * (tnr * self.tn_gain - fpr * self.fp_cost)
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Net gain at one threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetGainPoint {
    /// Classifier cut-off (score >= threshold is classified positive).
    pub threshold: f64,
    /// Expected net gain per case at this cut-off.
    pub net_gain: f64,
}

/// Threshold-indexed net gain series, in ROC order (descending threshold).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetGainCurve {
    /// One point per ROC point.
    pub points: Vec<NetGainPoint>,
    /// Class-1 prior the gains were weighted with.
    pub prior: Prior,
}

impl NetGainCurve {
    /// Score every point of a precomputed ROC curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `costs` fails [`CostGainMatrix::validate`].
    pub fn from_roc(roc: &RocCurve, costs: &CostGainMatrix, prior: Prior) -> Result<Self> {
        costs.validate()?;
        let points = roc
            .iter()
            .map(|p| NetGainPoint {
                threshold: p.threshold,
                net_gain: costs.net_gain(prior, p.fpr, p.tpr),
            })
            .collect();
        Ok(Self { points, prior })
    }

    /// Number of thresholds in the series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &NetGainPoint> {
        self.points.iter()
    }

    /// `(threshold, net_gain)` pairs in stored order.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|p| (p.threshold, p.net_gain))
    }

    /// Thresholds (series keys) in stored order.
    pub fn thresholds(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.threshold).collect()
    }

    /// Net gains (series values) in stored order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.net_gain).collect()
    }

    /// Mean net gain over all thresholds, or `None` for an empty series.
    pub fn mean_gain(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().map(|p| p.net_gain).sum::<f64>() / self.points.len() as f64)
    }
}

/// Maximum expected net gain and the cut-off attaining it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimalCutoff {
    /// Cut-off maximizing the expected net gain.
    pub threshold: f64,
    /// Expected net gain per case at that cut-off.
    pub max_gain: f64,
    /// Position of the cut-off in the series.
    pub index: usize,
}

/// Full output of [`net_gain_curve`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetGainAnalysis {
    /// Net gain at every threshold.
    pub curve: NetGainCurve,
    /// Maximum of the curve.
    pub optimum: OptimalCutoff,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute the net gain curve and its optimum with the default
/// [`RocConfig`].
///
/// When `prior` is `None` the empirical positive rate of `labels` is used.
///
/// # Errors
///
/// Returns an error if the labels/scores are rejected by the ROC
/// extraction or if `costs` is invalid.
pub fn net_gain_curve(
    labels: &[u8],
    scores: &[f64],
    costs: &CostGainMatrix,
    prior: Option<Prior>,
) -> Result<NetGainAnalysis> {
    net_gain_curve_with(labels, scores, costs, prior, &RocConfig::default())
}

/// [`net_gain_curve`] with explicit ROC extraction options.
///
/// # Errors
///
/// See [`net_gain_curve`].
pub fn net_gain_curve_with(
    labels: &[u8],
    scores: &[f64],
    costs: &CostGainMatrix,
    prior: Option<Prior>,
    roc_config: &RocConfig,
) -> Result<NetGainAnalysis> {
    let curve = net_gain_series(labels, scores, costs, prior, roc_config)?;
    let optimum = find_optimal_threshold(&curve)?;
    Ok(NetGainAnalysis { curve, optimum })
}

/// Compute only the net gain series, without searching for the optimum.
///
/// # Errors
///
/// See [`net_gain_curve`].
pub fn net_gain_series(
    labels: &[u8],
    scores: &[f64],
    costs: &CostGainMatrix,
    prior: Option<Prior>,
    roc_config: &RocConfig,
) -> Result<NetGainCurve> {
    costs.validate()?;
    let roc = roc_curve_with(labels, scores, roc_config)?;

    let empirical = roc.positive_rate();
    let estimated = prior.is_none();
    let prior = match prior {
        Some(prior) => {
            if (prior.p1() - empirical).abs() > PRIOR_MISMATCH_WARN {
                warn!(
                    prior = prior.p1(),
                    empirical,
                    "supplied prior is far from the evaluation set's positive rate"
                );
            }
            prior
        }
        None => Prior::new(empirical)?,
    };

    let curve = NetGainCurve::from_roc(&roc, costs, prior)?;
    debug!(
        points = curve.len(),
        prior = prior.p1(),
        estimated,
        "computed net gain curve"
    );
    Ok(curve)
}

/// Find the maximum net gain and the threshold attaining it.
///
/// Ties resolve to the first maximum in stored order, which for curves
/// built here is the highest threshold (lowest FPR/TPR) attaining it.
///
/// # Errors
///
/// Returns [`CutoffError::NotReady`] if the series is empty.
pub fn find_optimal_threshold(curve: &NetGainCurve) -> Result<OptimalCutoff> {
    let mut points = curve.points.iter().enumerate();
    let Some((_, first)) = points.next() else {
        return Err(CutoffError::NotReady(
            "net gain series is empty, generate the curve first".into(),
        ));
    };

    let mut best = OptimalCutoff {
        threshold: first.threshold,
        max_gain: first.net_gain,
        index: 0,
    };
    for (i, p) in points {
        if p.net_gain > best.max_gain {
            best = OptimalCutoff {
                threshold: p.threshold,
                max_gain: p.net_gain,
                index: i,
            };
        }
    }

    debug!(
        threshold = best.threshold,
        max_gain = best.max_gain,
        "found optimal cut-off"
    );
    Ok(best)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
