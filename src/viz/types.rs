//! Public types and constants for the visualization module.

use crate::error::{Error, Result};
use crate::scale::{AxisLimits, PixelRange};
use crate::stats::LinearFit;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chart types this module composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    /// Population over time for one location.
    Line,
    /// Fertility rate vs. life expectancy, one dot per row.
    Scatter,
}

/// Pixel geometry of one drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    /// Horizontal plot range; the left axis sits at `range_x.min`.
    pub range_x: PixelRange,
    /// Vertical plot range; the bottom axis sits at `range_y.max`.
    pub range_y: PixelRange,
}

/// Layout and formatting knobs. `Layout::default()` gives the classic 500×500 line chart
/// and 300×300 scatter tooltip; any subset can be overridden from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub line: Geometry,
    pub scatter: Geometry,
    /// Fraction of each axis span added on both sides of the data extent (0 = tight).
    pub padding: f64,
    /// Approximate number of ticks per axis.
    pub tick_count: usize,
    /// Locale tag for tick labels (`en`, `de`, `fr`, ...).
    pub locale: String,
    /// Polyline samples per segment of the smoothed population curve.
    pub curve_samples: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            line: Geometry {
                width: 500,
                height: 500,
                range_x: PixelRange::new(50.0, 450.0),
                range_y: PixelRange::new(50.0, 450.0),
            },
            scatter: Geometry {
                width: 300,
                height: 300,
                range_x: PixelRange::new(50.0, 250.0),
                range_y: PixelRange::new(50.0, 250.0),
            },
            padding: 0.0,
            tick_count: 10,
            locale: "en".to_string(),
            curve_samples: 8,
        }
    }
}

impl Layout {
    /// Read a (possibly partial) layout from JSON; missing keys keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// What a render pass drew, for logging and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSummary {
    pub kind: ChartKind,
    /// Rows that made it onto the plot.
    pub plotted: usize,
    /// Rows in the view lacking one of the plotted values.
    pub skipped: usize,
    pub limits: AxisLimits,
    /// Least-squares trend (scatter chart only).
    pub trend: Option<LinearFit>,
}
