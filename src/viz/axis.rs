//! Axis rendering: a bottom axis and a left axis with generated, formatted ticks.

use super::scene::{Baseline, Element, Label, Rgb, Segment, Surface, TextAnchor};
use super::util::{INK, TickFormat, format_tick};
use crate::scale::{LinearScale, PixelRange, ScaleMapping};

/// Length of tick marks (and of the outer ticks at both ends of the domain line).
pub const TICK_SIZE: f64 = 6.0;
/// Gap between a tick mark and its label.
pub const TICK_PADDING: f64 = 3.0;
pub const TICK_FONT_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    /// Horizontal axis with ticks and labels below the line.
    Bottom,
    /// Vertical axis with ticks and labels left of the line.
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Pixel position along the axis.
    pub pos: f64,
    pub label: String,
}

/// One axis, fully resolved to pixel positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: Orient,
    /// y of a bottom axis, x of a left axis.
    pub offset: f64,
    /// Extent of the domain line along the axis.
    pub range: PixelRange,
    pub ticks: Vec<Tick>,
    pub color: Rgb,
}

impl Axis {
    pub fn new(
        orient: Orient,
        scale: &LinearScale,
        offset: f64,
        tick_count: usize,
        fmt: TickFormat,
    ) -> Self {
        let step = scale.tick_step(tick_count);
        let ticks = scale
            .ticks(tick_count)
            .into_iter()
            .filter(|&value| fmt.accepts(value))
            .filter_map(|value| {
                let pos = scale.apply(value)?;
                Some(Tick {
                    value,
                    pos,
                    label: format_tick(value, step, fmt),
                })
            })
            .collect();
        Self {
            orient,
            offset,
            range: scale.range(),
            ticks,
            color: INK,
        }
    }

    /// Screen point at `along` pixels on the axis, `across` pixels away from it
    /// (positive = towards the labels).
    fn at(&self, along: f64, across: f64) -> (f64, f64) {
        match self.orient {
            Orient::Bottom => (along, self.offset + across),
            Orient::Left => (self.offset - across, along),
        }
    }

    /// Domain line with outer ticks, tick marks and labels.
    pub fn primitives(&self) -> Vec<Element> {
        let line = |from, to| {
            Element::Line(Segment {
                from,
                to,
                color: self.color,
                width: 1.0,
            })
        };
        let (r0, r1) = (self.range.min, self.range.max);
        let mut out = vec![
            line(self.at(r0, TICK_SIZE), self.at(r0, 0.0)),
            line(self.at(r0, 0.0), self.at(r1, 0.0)),
            line(self.at(r1, 0.0), self.at(r1, TICK_SIZE)),
        ];
        let (anchor, baseline) = match self.orient {
            Orient::Bottom => (TextAnchor::Middle, Baseline::Hanging),
            Orient::Left => (TextAnchor::End, Baseline::Middle),
        };
        for t in &self.ticks {
            out.push(line(self.at(t.pos, 0.0), self.at(t.pos, TICK_SIZE)));
            let (x, y) = self.at(t.pos, TICK_SIZE + TICK_PADDING);
            out.push(Element::Text(
                Label::new(x, y, t.label.clone(), TICK_FONT_PX)
                    .aligned(anchor, baseline)
                    .colored(self.color),
            ));
        }
        out
    }
}

/// Attach a bottom axis at `range_y.max` and a left axis at `range_x.min`, returning
/// the attached axes.
pub fn draw_axes(
    surface: &mut Surface,
    mapping: &ScaleMapping,
    tick_count: usize,
    x_format: TickFormat,
    y_format: TickFormat,
) -> (Axis, Axis) {
    let bottom = Axis::new(
        Orient::Bottom,
        &mapping.x,
        mapping.y.range().max,
        tick_count,
        x_format,
    );
    let left = Axis::new(
        Orient::Left,
        &mapping.y,
        mapping.x.range().min,
        tick_count,
        y_format,
    );
    surface.push(Element::Axis(bottom.clone()));
    surface.push(Element::Axis(left.clone()));
    (bottom, left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;
    use crate::scale::AxisLimits;

    const R: PixelRange = PixelRange::new(50.0, 450.0);

    #[test]
    fn axes_sit_at_plot_edges() {
        let limits = AxisLimits::from_values([1960.0, 1970.0], [0.0, 100.0]);
        let m = ScaleMapping::new(&limits, Field::Year, Field::Population, R, R);
        let mut s = Surface::new(500, 500);
        let (bottom, left) = draw_axes(&mut s, &m, 10, TickFormat::Plain, TickFormat::localized("en"));
        assert_eq!(bottom.offset, 450.0);
        assert_eq!(left.offset, 50.0);
        assert_eq!(s.axes().count(), 2);
        assert_eq!(bottom.ticks.first().unwrap().label, "1960");
        assert_eq!(bottom.ticks.first().unwrap().pos, 50.0);
        // 100 is the top of the y axis.
        let top = left.ticks.iter().find(|t| t.value == 100.0).unwrap();
        assert_eq!(top.pos, 50.0);
    }

    #[test]
    fn undefined_limits_still_draw_domain_lines() {
        let m = ScaleMapping::new(&AxisLimits::default(), Field::Year, Field::Population, R, R);
        let mut s = Surface::new(500, 500);
        let (bottom, left) = draw_axes(&mut s, &m, 10, TickFormat::Plain, TickFormat::Plain);
        assert!(bottom.ticks.is_empty() && left.ticks.is_empty());
        assert_eq!(bottom.primitives().len(), 3);
    }

    #[test]
    fn left_labels_are_right_aligned_outside() {
        let s = LinearScale::new(1.0, 0.0, R);
        let a = Axis::new(Orient::Left, &s, 50.0, 2, TickFormat::Plain);
        let labels: Vec<_> = a
            .primitives()
            .into_iter()
            .filter_map(|e| match e {
                Element::Text(l) => Some(l),
                _ => None,
            })
            .collect();
        assert!(!labels.is_empty());
        assert!(labels.iter().all(|l| l.anchor == TextAnchor::End && l.pos.0 < 50.0));
    }
}
