//! Scale mapping: data extents, linear scales, and the record → pixel mapping.
//!
//! Vertical scales are built with a reversed domain (`[max, min] → [top, bottom]`) so that
//! larger values land at smaller pixel coordinates, i.e. plot higher.

use crate::models::{Field, Record};
use serde::{Deserialize, Serialize};

/// A pixel interval on one axis of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub min: f64,
    pub max: f64,
}

impl PixelRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, v: f64) -> bool {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        v >= lo && v <= hi
    }
}

/// Closed `[min, max]` interval of observed data values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// True minimum and maximum over the finite values; `None` if there are none.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Extent> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Extent>, v| match acc {
                None => Some(Extent { min: v, max: v }),
                Some(e) => Some(Extent {
                    min: e.min.min(v),
                    max: e.max.max(v),
                }),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widen by `fraction` of the span on both sides. A zero-width extent is widened
    /// relative to its magnitude instead (or by `fraction` itself around zero).
    pub fn padded(self, fraction: f64) -> Extent {
        if !(fraction > 0.0) {
            return self;
        }
        let base = if self.span() > 0.0 {
            self.span()
        } else {
            self.min.abs().max(1.0)
        };
        let pad = base * fraction;
        Extent {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

/// Extents of the two plotted variables. `None` means the input had no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisLimits {
    pub x: Option<Extent>,
    pub y: Option<Extent>,
}

impl AxisLimits {
    pub fn from_values<X, Y>(xs: X, ys: Y) -> Self
    where
        X: IntoIterator<Item = f64>,
        Y: IntoIterator<Item = f64>,
    {
        Self {
            x: Extent::of(xs),
            y: Extent::of(ys),
        }
    }

    /// Limits of two fields over some rows. Each axis is computed independently and
    /// rows missing a value simply do not contribute to that axis.
    pub fn for_fields<'a, I>(rows: I, x_field: Field, y_field: Field) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let (xs, ys): (Vec<Option<f64>>, Vec<Option<f64>>) = rows
            .into_iter()
            .map(|r| (x_field.value(r), y_field.value(r)))
            .unzip();
        Self::from_values(xs.into_iter().flatten(), ys.into_iter().flatten())
    }

    pub fn padded(self, fraction: f64) -> Self {
        Self {
            x: self.x.map(|e| e.padded(fraction)),
            y: self.y.map(|e| e.padded(fraction)),
        }
    }

    pub fn x_min(&self) -> Option<f64> {
        self.x.map(|e| e.min)
    }

    pub fn x_max(&self) -> Option<f64> {
        self.x.map(|e| e.max)
    }

    pub fn y_min(&self) -> Option<f64> {
        self.y.map(|e| e.min)
    }

    pub fn y_max(&self) -> Option<f64> {
        self.y.map(|e| e.max)
    }
}

/// Linear map from a data domain onto a pixel range.
///
/// The domain is stored as given (`d0 → range.min`, `d1 → range.max`), so a reversed
/// domain yields an order-reversing scale. A zero-width domain maps everything to the
/// range midpoint; a scale without a domain maps nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Option<(f64, f64)>,
    range: PixelRange,
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

impl LinearScale {
    pub fn new(d0: f64, d1: f64, range: PixelRange) -> Self {
        let domain = (d0.is_finite() && d1.is_finite()).then_some((d0, d1));
        Self { domain, range }
    }

    /// A scale for an axis with no data.
    pub fn undefined(range: PixelRange) -> Self {
        Self {
            domain: None,
            range,
        }
    }

    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    pub fn range(&self) -> PixelRange {
        self.range
    }

    pub fn apply(&self, v: f64) -> Option<f64> {
        let (d0, d1) = self.domain?;
        if !v.is_finite() {
            return None;
        }
        let span = d1 - d0;
        if span == 0.0 {
            return Some(self.range.midpoint());
        }
        let t = (v - d0) / span;
        Some(self.range.min + t * (self.range.max - self.range.min))
    }

    /// Inverse of [`apply`](Self::apply) for non-degenerate scales.
    pub fn invert(&self, px: f64) -> Option<f64> {
        let (d0, d1) = self.domain?;
        let r = self.range.max - self.range.min;
        if r == 0.0 || d0 == d1 {
            return Some(d0);
        }
        Some(d0 + (px - self.range.min) / r * (d1 - d0))
    }

    /// "Nice" tick values (multiples of 1, 2 or 5 × 10^k) inside the domain, ascending.
    ///
    /// Roughly `count` ticks are produced. A zero-width domain yields its single value.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let Some((d0, d1)) = self.domain else {
            return Vec::new();
        };
        if count == 0 {
            return Vec::new();
        }
        if d0 == d1 {
            return vec![d0];
        }
        let (lo, hi) = if d0 < d1 { (d0, d1) } else { (d1, d0) };
        let Some(spec) = tick_spec(lo, hi, count as f64) else {
            return Vec::new();
        };
        (spec.i1..=spec.i2).map(|i| spec.value(i)).collect()
    }

    /// Distance between consecutive ticks for `count`, used to pick label precision.
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (d0, d1) = self.domain?;
        if count == 0 || d0 == d1 {
            return None;
        }
        let (lo, hi) = if d0 < d1 { (d0, d1) } else { (d1, d0) };
        tick_spec(lo, hi, count as f64).map(|s| s.step())
    }
}

/// Integer tick indices plus increment. A negative increment means "divide by -inc",
/// which keeps sub-unit steps exact (0.1 is stored as 1/10).
struct TickSpec {
    i1: i64,
    i2: i64,
    inc: f64,
}

impl TickSpec {
    fn value(&self, i: i64) -> f64 {
        if self.inc < 0.0 {
            i as f64 / -self.inc
        } else {
            i as f64 * self.inc
        }
    }

    fn step(&self) -> f64 {
        if self.inc < 0.0 { 1.0 / -self.inc } else { self.inc }
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    let step = (stop - start) / count;
    if !(step > 0.0) || !step.is_finite() {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round() as i64;
        i2 = (stop * inv).round() as i64;
        if (i1 as f64) / inv < start {
            i1 += 1;
        }
        if (i2 as f64) / inv > stop {
            i2 -= 1;
        }
        inc = -inv;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = (start / step).round() as i64;
        i2 = (stop / step).round() as i64;
        if (i1 as f64) * step < start {
            i1 += 1;
        }
        if (i2 as f64) * step > stop {
            i2 -= 1;
        }
        inc = step;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i2 >= i1).then_some(TickSpec { i1, i2, inc })
}

/// Everything a chart needs to place records: the two scales and the fields they read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMapping {
    pub x: LinearScale,
    pub y: LinearScale,
    pub x_field: Field,
    pub y_field: Field,
}

impl ScaleMapping {
    /// x maps `[xMin, xMax] → [range_x.min, range_x.max]`, y maps
    /// `[yMax, yMin] → [range_y.min, range_y.max]`.
    pub fn new(
        limits: &AxisLimits,
        x_field: Field,
        y_field: Field,
        range_x: PixelRange,
        range_y: PixelRange,
    ) -> Self {
        let x = match limits.x {
            Some(e) => LinearScale::new(e.min, e.max, range_x),
            None => LinearScale::undefined(range_x),
        };
        let y = match limits.y {
            Some(e) => LinearScale::new(e.max, e.min, range_y),
            None => LinearScale::undefined(range_y),
        };
        Self {
            x,
            y,
            x_field,
            y_field,
        }
    }

    pub fn x_of(&self, record: &Record) -> Option<f64> {
        self.x_field.value(record).and_then(|v| self.x.apply(v))
    }

    pub fn y_of(&self, record: &Record) -> Option<f64> {
        self.y_field.value(record).and_then(|v| self.y.apply(v))
    }

    /// Pixel position of a record, if both of its plotted values are present.
    pub fn point_of(&self, record: &Record) -> Option<(f64, f64)> {
        Some((self.x_of(record)?, self.y_of(record)?))
    }
}
