//! Expected net gain curves and optimal cut-offs for binary classifiers.
//!
//! Given held-out labels, classifier scores and the per-case gain or cost of
//! each confusion-matrix outcome, this crate computes the expected net gain
//! of operating the classifier at every threshold and picks the best one.
//!
//! - **ROC extraction** — [`roc::roc_curve`] traces (FPR, TPR, threshold)
//! - **Net gain** — [`gain::net_gain_curve`] scores every threshold and finds the maximum
//! - **Calculator** — [`CutoffCalculator`] caches the curve across generate → optimize
//! - **Plot layout** — [`plot::NetGainPlot`] describes the chart for any renderer
//!
//! ```
//! use cutoff_curve::{net_gain_curve, CostGainMatrix};
//!
//! let labels: [u8; 8] = [1, 1, 0, 0, 1, 1, 0, 0];
//! let scores = [0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1];
//! let result = net_gain_curve(&labels, &scores, &CostGainMatrix::new(2.0, 1.0), None)?;
//! assert!((result.optimum.threshold - 0.3).abs() < 1e-12);
//! # Ok::<(), cutoff_core::CutoffError>(())
//! ```

pub mod calculator;
pub mod gain;
pub mod plot;
pub mod roc;

pub use calculator::{CalculatorState, CutoffCalculator};
pub use gain::{
    find_optimal_threshold, net_gain_curve, net_gain_curve_with, net_gain_series, CostGainMatrix,
    NetGainAnalysis, NetGainCurve, NetGainPoint, OptimalCutoff,
};
pub use plot::{NetGainPlot, PlotConfig};
pub use roc::{roc_curve, roc_curve_with, RocConfig, RocCurve, RocPoint};
