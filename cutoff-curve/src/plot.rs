//! Render-ready description of a net gain chart.
//!
//! No drawing happens here. [`NetGainPlot`] carries everything a charting
//! backend needs: the series, a zero-gain reference line, a marker at the
//! optimal cut-off and its annotation, all positioned already.

use cutoff_core::Result;

use crate::calculator::CutoffCalculator;
use crate::gain::{NetGainCurve, OptimalCutoff};

/// Chart options.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotConfig {
    /// Figure width and height in inches.
    pub figsize: (f64, f64),
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            figsize: (10.0, 5.0),
        }
    }
}

/// Stroke pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineStyle {
    /// Continuous stroke.
    Solid,
    /// Long dashes, used for the zero-gain line.
    Dashed,
    /// Dots, used for the cut-off marker.
    Dotted,
}

/// A straight reference line across the whole chart.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceLine {
    /// y for horizontal lines, x for vertical ones.
    pub position: f64,
    /// Stroke pattern.
    pub style: LineStyle,
}

/// Text placed at a data coordinate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// Label text.
    pub text: String,
    /// x coordinate of the text anchor.
    pub x: f64,
    /// y coordinate of the text anchor.
    pub y: f64,
}

/// Everything needed to draw the expected net gain curve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetGainPlot {
    /// Figure width and height in inches.
    pub figsize: (f64, f64),
    /// Chart title, showing the maximum net gain.
    pub title: String,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Visible range of the horizontal axis.
    pub x_limits: (f64, f64),
    /// `(threshold, net_gain)` in series order.
    pub series: Vec<(f64, f64)>,
    /// Horizontal line at zero net gain.
    pub zero_line: ReferenceLine,
    /// Vertical line at the optimal cut-off.
    pub cutoff_marker: ReferenceLine,
    /// Label of the optimal cut-off.
    pub annotation: Annotation,
}

impl NetGainPlot {
    /// Lay out the chart for a curve and its optimum.
    ///
    /// The cut-off label sits at a tenth of the maximum gain, nudged 1% of
    /// the cut-off to the right when the cut-off is below the mean net gain
    /// of the series and 1% to the left otherwise.
    pub fn new(curve: &NetGainCurve, optimum: &OptimalCutoff, config: &PlotConfig) -> Self {
        let cutoff = optimum.threshold;
        let mean_gain = curve.mean_gain().unwrap_or(0.0);
        let offset = if cutoff < mean_gain {
            cutoff * 0.01
        } else {
            -0.01 * cutoff
        };

        Self {
            figsize: config.figsize,
            title: format!("Max net gain = {:.1}", optimum.max_gain),
            x_label: "Classifier's cut-off".into(),
            y_label: "Expected net gain (per case)".into(),
            x_limits: (0.0, 1.0),
            series: curve.pairs().collect(),
            zero_line: ReferenceLine {
                position: 0.0,
                style: LineStyle::Dashed,
            },
            cutoff_marker: ReferenceLine {
                position: cutoff,
                style: LineStyle::Dotted,
            },
            annotation: Annotation {
                text: format!("Cut-off = {cutoff:.2}"),
                x: cutoff + offset,
                y: optimum.max_gain * 0.1,
            },
        }
    }
}

impl CutoffCalculator {
    /// Chart description of the cached curve and optimum.
    ///
    /// # Errors
    ///
    /// Returns [`cutoff_core::CutoffError::NotReady`] unless both the curve
    /// and the optimal cut-off have been computed.
    pub fn plot(&self, config: &PlotConfig) -> Result<NetGainPlot> {
        let curve = self.curve()?;
        let optimum = self.optimum()?;
        Ok(NetGainPlot::new(curve, optimum, config))
    }
}
