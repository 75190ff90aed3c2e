//! Stateful cut-off calculator.
//!
//! [`CutoffCalculator`] holds one evaluation set and gain/cost matrix and
//! caches the net gain curve and its optimum between calls. The cached
//! results live in a [`CalculatorState`] so that a result can only be read
//! in a state where it exists.
//!
//! ```
//! use cutoff_curve::{CostGainMatrix, CutoffCalculator};
//!
//! let mut calc = CutoffCalculator::new(
//!     vec![1, 1, 0, 0, 1, 1, 0, 0],
//!     vec![0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1],
//!     CostGainMatrix::new(2.0, 1.0),
//! );
//! calc.generate_net_gain_curve()?.find_optimal_cutoff()?;
//! let best = calc.optimum()?;
//! assert!((best.threshold - 0.3).abs() < 1e-12);
//! assert!((best.max_gain - 0.75).abs() < 1e-12);
//! # Ok::<(), cutoff_core::CutoffError>(())
//! ```

use cutoff_core::{CutoffError, Prior, Result};
use tracing::debug;

use crate::gain::{
    find_optimal_threshold, net_gain_series, CostGainMatrix, NetGainCurve, OptimalCutoff,
};
use crate::roc::RocConfig;

/// Computation progress of a [`CutoffCalculator`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CalculatorState {
    /// Constructed, nothing computed yet.
    #[default]
    Configured,
    /// Net gain curve computed.
    CurveGenerated {
        /// The computed curve.
        curve: NetGainCurve,
    },
    /// Net gain curve computed and its maximum located.
    Optimized {
        /// The computed curve.
        curve: NetGainCurve,
        /// Maximum of `curve`.
        optimum: OptimalCutoff,
    },
}

impl CalculatorState {
    /// Short name of the state, for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Configured => "configured",
            Self::CurveGenerated { .. } => "curve generated",
            Self::Optimized { .. } => "optimized",
        }
    }

    /// The cached curve, if one has been generated.
    pub fn curve(&self) -> Option<&NetGainCurve> {
        match self {
            Self::Configured => None,
            Self::CurveGenerated { curve } | Self::Optimized { curve, .. } => Some(curve),
        }
    }

    /// The cached optimum, if one has been found.
    pub fn optimum(&self) -> Option<&OptimalCutoff> {
        match self {
            Self::Optimized { optimum, .. } => Some(optimum),
            _ => None,
        }
    }
}

/// Net gain curve and optimal cut-off for one classifier evaluation.
#[derive(Debug, Clone)]
pub struct CutoffCalculator {
    labels: Vec<u8>,
    scores: Vec<f64>,
    costs: CostGainMatrix,
    prior: Option<Prior>,
    roc_config: RocConfig,
    state: CalculatorState,
}

impl CutoffCalculator {
    /// Create a calculator over held-out labels and scores.
    ///
    /// Inputs are validated when the curve is generated.
    pub fn new(labels: Vec<u8>, scores: Vec<f64>, costs: CostGainMatrix) -> Self {
        Self {
            labels,
            scores,
            costs,
            prior: None,
            roc_config: RocConfig::default(),
            state: CalculatorState::Configured,
        }
    }

    /// Use a known class-1 prior instead of the evaluation set's positive rate.
    ///
    /// Discards any cached results, which belong to the old configuration.
    pub fn with_prior(mut self, prior: Prior) -> Self {
        self.prior = Some(prior);
        self.state = CalculatorState::Configured;
        self
    }

    /// Override the ROC extraction options.
    ///
    /// Discards any cached results, which belong to the old configuration.
    pub fn with_roc_config(mut self, roc_config: RocConfig) -> Self {
        self.roc_config = roc_config;
        self.state = CalculatorState::Configured;
        self
    }

    /// Ground-truth labels of the evaluation set.
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Classifier scores, aligned with [`labels`](Self::labels).
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Gain/cost matrix the curve is scored with.
    pub fn costs(&self) -> &CostGainMatrix {
        &self.costs
    }

    /// The configured prior; `None` means it is estimated from the labels.
    pub fn prior(&self) -> Option<Prior> {
        self.prior
    }

    /// Current computation state and its cached results.
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Compute the net gain curve, replacing any earlier results.
    ///
    /// # Errors
    ///
    /// Returns an error if the labels, scores or gain/cost matrix are
    /// invalid. The previous state is kept in that case.
    pub fn generate_net_gain_curve(&mut self) -> Result<&mut Self> {
        let curve = net_gain_series(
            &self.labels,
            &self.scores,
            &self.costs,
            self.prior,
            &self.roc_config,
        )?;
        self.state = CalculatorState::CurveGenerated { curve };
        Ok(self)
    }

    /// Locate the maximum of the cached curve.
    ///
    /// # Errors
    ///
    /// Returns [`CutoffError::NotReady`] if the curve has not been generated.
    pub fn find_optimal_cutoff(&mut self) -> Result<&mut Self> {
        let optimum = find_optimal_threshold(self.curve()?)?;
        self.state = match std::mem::take(&mut self.state) {
            CalculatorState::CurveGenerated { curve }
            | CalculatorState::Optimized { curve, .. } => {
                CalculatorState::Optimized { curve, optimum }
            }
            CalculatorState::Configured => CalculatorState::Configured,
        };
        debug!(state = self.state.name(), "cut-off calculator advanced");
        Ok(self)
    }

    /// The cached net gain curve.
    ///
    /// # Errors
    ///
    /// Returns [`CutoffError::NotReady`] if the curve has not been generated.
    pub fn curve(&self) -> Result<&NetGainCurve> {
        self.state.curve().ok_or_else(|| {
            CutoffError::NotReady(
                "net gain curve not calculated yet, call generate_net_gain_curve first".into(),
            )
        })
    }

    /// The cached maximum net gain and optimal cut-off.
    ///
    /// # Errors
    ///
    /// Returns [`CutoffError::NotReady`] unless the calculator is optimized.
    pub fn optimum(&self) -> Result<&OptimalCutoff> {
        self.state.optimum().ok_or_else(|| {
            CutoffError::NotReady(format!(
                "no optimal cut-off in state '{}', call find_optimal_cutoff first",
                self.state.name()
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> CutoffCalculator {
        CutoffCalculator::new(
            vec![1, 1, 0, 0, 1, 1, 0, 0],
            vec![0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1],
            CostGainMatrix::new(2.0, 1.0),
        )
    }

    #[test]
    fn starts_configured() {
        let calc = reference();
        assert_eq!(calc.state(), &CalculatorState::Configured);
        assert!(calc.curve().unwrap_err().is_not_ready());
        assert!(calc.optimum().unwrap_err().is_not_ready());
        assert!(calc.prior().is_none());
    }

    #[test]
    fn optimize_before_generate_is_not_ready() {
        let mut calc = reference();
        let err = calc.find_optimal_cutoff().unwrap_err();
        assert!(err.is_not_ready());
        assert_eq!(calc.state().name(), "configured");
    }

    #[test]
    fn generate_then_optimize() {
        let mut calc = reference();
        calc.generate_net_gain_curve().unwrap();
        assert_eq!(calc.state().name(), "curve generated");
        assert_eq!(calc.curve().unwrap().len(), 6);
        assert!(calc.optimum().is_err());

        calc.find_optimal_cutoff().unwrap();
        assert_eq!(calc.state().name(), "optimized");
        let best = calc.optimum().unwrap();
        assert!((best.threshold - 0.3).abs() < 1e-12);
        assert!((best.max_gain - 0.75).abs() < 1e-12);
    }

    #[test]
    fn chained_calls() {
        let mut calc = reference();
        let best = *calc
            .generate_net_gain_curve()
            .unwrap()
            .find_optimal_cutoff()
            .unwrap()
            .optimum()
            .unwrap();
        assert_eq!(best.index, 4);
    }

    #[test]
    fn regenerating_returns_to_curve_generated() {
        let mut calc = reference();
        calc.generate_net_gain_curve().unwrap().find_optimal_cutoff().unwrap();
        calc.generate_net_gain_curve().unwrap();
        assert_eq!(calc.state().name(), "curve generated");
        assert!(calc.optimum().is_err());
    }

    #[test]
    fn optimizing_twice_is_stable() {
        let mut calc = reference();
        calc.generate_net_gain_curve().unwrap().find_optimal_cutoff().unwrap();
        let first = *calc.optimum().unwrap();
        calc.find_optimal_cutoff().unwrap();
        assert_eq!(*calc.optimum().unwrap(), first);
    }

    #[test]
    fn failed_generate_keeps_state() {
        let mut calc = CutoffCalculator::new(
            vec![1, 1],
            vec![0.4, 0.2],
            CostGainMatrix::new(1.0, 1.0),
        );
        let err = calc.generate_net_gain_curve().unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(calc.state(), &CalculatorState::Configured);
    }

    #[test]
    fn configured_prior_is_used() {
        let prior = Prior::new(0.25).unwrap();
        let mut calc = reference().with_prior(prior);
        calc.generate_net_gain_curve().unwrap();
        assert_eq!(calc.curve().unwrap().prior, prior);
        assert_eq!(calc.prior(), Some(prior));
    }

    #[test]
    fn changing_prior_discards_cached_results() {
        let mut calc = reference();
        calc.generate_net_gain_curve().unwrap().find_optimal_cutoff().unwrap();

        let prior = Prior::new(0.1).unwrap();
        let mut calc = calc.with_prior(prior);
        assert_eq!(calc.state(), &CalculatorState::Configured);
        assert!(calc.curve().unwrap_err().is_not_ready());
        assert!(calc.optimum().unwrap_err().is_not_ready());

        calc.generate_net_gain_curve().unwrap().find_optimal_cutoff().unwrap();
        assert_eq!(calc.curve().unwrap().prior, prior);
        assert!((calc.optimum().unwrap().threshold - 0.7).abs() < 1e-12);
    }

    #[test]
    fn changing_roc_config_discards_cached_results() {
        let mut calc = reference();
        calc.generate_net_gain_curve().unwrap();

        let mut calc = calc.with_roc_config(RocConfig {
            drop_intermediate: false,
        });
        assert!(calc.curve().unwrap_err().is_not_ready());
        calc.generate_net_gain_curve().unwrap();
        assert_eq!(calc.curve().unwrap().len(), 9);
    }

    #[test]
    fn roc_config_controls_series_length() {
        let mut calc = reference().with_roc_config(RocConfig {
            drop_intermediate: false,
        });
        calc.generate_net_gain_curve().unwrap();
        assert_eq!(calc.curve().unwrap().len(), 9);
    }

    #[test]
    fn configuration_accessors() {
        let calc = reference();
        assert_eq!(calc.labels().len(), 8);
        assert_eq!(calc.scores()[0], 0.8);
        assert_eq!(calc.costs().tp_gain, 2.0);
    }
}
