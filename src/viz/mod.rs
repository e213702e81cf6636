//! Chart composition: line chart of population over time and the fertility / life
//! expectancy scatter chart.
//!
//! - Every render clears its surface first, so a render only ever reflects its own input
//! - Scales are recomputed from the current view on every call
//! - Output is retained on a [`Surface`] and can be written as SVG (plotters backend)

pub mod axis;
pub mod curve;
pub mod scene;
pub mod svg;
pub mod text;
pub mod types;
pub mod util;

pub use scene::{Element, Surface};
pub use types::{ChartKind, ChartSummary, Geometry, Layout};

use crate::error::Result;
use crate::filter;
use crate::models::{Dataset, Field};
use crate::scale::{AxisLimits, Extent, ScaleMapping};
use crate::stats::{LinearFit, linear_fit};
use scene::{Baseline, Dot, Label, Polyline, Segment, TextAnchor};
use std::path::Path;
use util::{INK, LINE_STROKE, TREND_STROKE, TickFormat};

pub const LINE_TITLE: &str = "Population size over time Per Country";
pub const SCATTER_TITLE: &str = "Life Expectancy vs. Fertility Rate";

/// Label sizes: 14pt title, 10pt axis names, browser default (16px) for the scatter title.
const TITLE_PX: f64 = 18.7;
const AXIS_NAME_PX: f64 = 13.3;
const SCATTER_TITLE_PX: f64 = 16.0;
const TREND_LABEL_PX: f64 = 9.0;
const DOT_RADIUS: f64 = 1.5;
const LINE_WIDTH: f64 = 2.0;

/// Draw the population line chart for `location` (default location when `None`).
pub fn line_chart(
    surface: &mut Surface,
    dataset: &Dataset,
    location: Option<&str>,
    layout: &Layout,
) -> ChartSummary {
    surface.clear();
    let view = filter::by_location(dataset, location);
    let geo = &layout.line;

    let limits = AxisLimits::for_fields(view.iter(), Field::Year, Field::Population)
        .padded(layout.padding);
    let mapping = ScaleMapping::new(
        &limits,
        Field::Year,
        Field::Population,
        geo.range_x,
        geo.range_y,
    );
    axis::draw_axes(
        surface,
        &mapping,
        layout.tick_count,
        TickFormat::Plain,
        TickFormat::localized(&layout.locale),
    );

    let mut points: Vec<(f64, f64)> = view.iter().filter_map(|r| mapping.point_of(r)).collect();
    let skipped = view.len() - points.len();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    let plotted = points.len();
    if !points.is_empty() {
        surface.push(Element::Path(Polyline {
            class: "line",
            points: curve::monotone_x(&points, layout.curve_samples),
            color: LINE_STROKE,
            width: LINE_WIDTH,
        }));
    }

    surface.push(Element::Text(Label::new(10.0, 40.0, LINE_TITLE, TITLE_PX)));
    surface.push(Element::Text(Label::new(
        230.0,
        490.0,
        Field::Year.label(),
        AXIS_NAME_PX,
    )));
    surface.push(Element::Text(
        Label::new(15.0, 300.0, Field::Population.label(), AXIS_NAME_PX).rotated(),
    ));

    log::debug!(
        "line chart {}: {} plotted, {} skipped",
        view.key(),
        plotted,
        skipped
    );
    ChartSummary {
        kind: ChartKind::Line,
        plotted,
        skipped,
        limits,
        trend: None,
    }
}

/// Draw the scatter chart over the whole dataset, or over one year when `year` is given,
/// with a least-squares trend line.
pub fn scatter_chart(
    surface: &mut Surface,
    dataset: &Dataset,
    year: Option<i32>,
    layout: &Layout,
) -> ChartSummary {
    surface.clear();
    let view = match year {
        Some(y) => filter::by_year(dataset, Some(y)),
        None => filter::all(dataset),
    };
    let geo = &layout.scatter;

    let limits = AxisLimits::for_fields(view.iter(), Field::FertilityRate, Field::LifeExpectancy)
        .padded(layout.padding);
    let mapping = ScaleMapping::new(
        &limits,
        Field::FertilityRate,
        Field::LifeExpectancy,
        geo.range_x,
        geo.range_y,
    );
    let fmt = TickFormat::localized(&layout.locale);
    axis::draw_axes(surface, &mapping, layout.tick_count, fmt, fmt);

    let mut plotted = 0;
    for r in view.iter() {
        if let Some(center) = mapping.point_of(r) {
            surface.push(Element::Circle(Dot {
                center,
                radius: DOT_RADIUS,
                fill: INK,
            }));
            plotted += 1;
        }
    }
    let skipped = view.len() - plotted;

    let trend = linear_fit(
        view.iter()
            .filter_map(|r| Some((r.fertility_rate?, r.life_expectancy?))),
    );
    if let Some(fit) = &trend {
        draw_trend(surface, &mapping, &limits, fit, geo);
    }

    surface.push(Element::Text(Label::new(
        120.0,
        280.0,
        Field::FertilityRate.label(),
        AXIS_NAME_PX,
    )));
    surface.push(Element::Text(Label::new(
        50.0,
        30.0,
        SCATTER_TITLE,
        SCATTER_TITLE_PX,
    )));
    surface.push(Element::Text(
        Label::new(15.0, 200.0, Field::LifeExpectancy.label(), AXIS_NAME_PX).rotated(),
    ));

    log::debug!(
        "scatter chart {}: {} plotted, {} skipped, trend {:?}",
        view.key(),
        plotted,
        skipped,
        trend
    );
    ChartSummary {
        kind: ChartKind::Scatter,
        plotted,
        skipped,
        limits,
        trend,
    }
}

/// The x interval on which `fit` stays inside the y extent, intersected with the x extent.
fn trend_span(fit: &LinearFit, x: Extent, y: Extent) -> Option<(f64, f64)> {
    let (mut lo, mut hi) = (x.min, x.max);
    if fit.slope != 0.0 {
        let a = (y.min - fit.intercept) / fit.slope;
        let b = (y.max - fit.intercept) / fit.slope;
        lo = lo.max(a.min(b));
        hi = hi.min(a.max(b));
    } else if fit.intercept < y.min || fit.intercept > y.max {
        return None;
    }
    (lo <= hi).then_some((lo, hi))
}

fn draw_trend(
    surface: &mut Surface,
    mapping: &ScaleMapping,
    limits: &AxisLimits,
    fit: &LinearFit,
    geo: &Geometry,
) {
    let (Some(x), Some(y)) = (limits.x, limits.y) else {
        return;
    };
    let Some((x0, x1)) = trend_span(fit, x, y) else {
        return;
    };
    let from = (mapping.x.apply(x0), mapping.y.apply(fit.predict(x0)));
    let to = (mapping.x.apply(x1), mapping.y.apply(fit.predict(x1)));
    if let ((Some(ax), Some(ay)), (Some(bx), Some(by))) = (from, to) {
        surface.push(Element::Line(Segment {
            from: (ax, ay),
            to: (bx, by),
            color: TREND_STROKE,
            width: 1.0,
        }));
    }

    let sign = if fit.slope < 0.0 { '-' } else { '+' };
    let caption = format!(
        "trend: y = {:.1} {} {:.2}x (r² = {:.2})",
        fit.intercept,
        sign,
        fit.slope.abs(),
        fit.r_squared
    );
    let right = geo.range_x.max;
    let caption = text::truncate_to_width(&caption, TREND_LABEL_PX, right - geo.range_x.min);
    surface.push(Element::Text(
        Label::new(right, geo.range_y.min - 6.0, caption, TREND_LABEL_PX)
            .aligned(TextAnchor::End, Baseline::Alphabetic)
            .colored(TREND_STROKE),
    ));
}

/// Render the line chart for one location straight to an SVG file.
pub fn plot_line_svg<P: AsRef<Path>>(
    dataset: &Dataset,
    location: Option<&str>,
    out_path: P,
    layout: &Layout,
) -> Result<ChartSummary> {
    let mut surface = Surface::new(layout.line.width, layout.line.height);
    let summary = line_chart(&mut surface, dataset, location, layout);
    surface.save_svg(out_path)?;
    Ok(summary)
}

/// Render the scatter chart straight to an SVG file.
pub fn plot_scatter_svg<P: AsRef<Path>>(
    dataset: &Dataset,
    year: Option<i32>,
    out_path: P,
    layout: &Layout,
) -> Result<ChartSummary> {
    let mut surface = Surface::new(layout.scatter.width, layout.scatter.height);
    let summary = scatter_chart(&mut surface, dataset, year, layout);
    surface.save_svg(out_path)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_clipped_to_y_extent() {
        let fit = LinearFit {
            slope: -10.0,
            intercept: 100.0,
            r_squared: 0.9,
            n: 10,
        };
        let x = Extent { min: 1.0, max: 8.0 };
        let y = Extent { min: 40.0, max: 80.0 };
        let (lo, hi) = trend_span(&fit, x, y).unwrap();
        assert_eq!((lo, hi), (2.0, 6.0));
    }

    #[test]
    fn flat_trend_outside_extent_is_skipped() {
        let fit = LinearFit {
            slope: 0.0,
            intercept: 10.0,
            r_squared: 1.0,
            n: 3,
        };
        let e = Extent { min: 20.0, max: 30.0 };
        assert!(trend_span(&fit, e, e).is_none());
    }
}
