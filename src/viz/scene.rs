//! Retained drawing surfaces.
//!
//! A chart render appends [`Element`]s to a [`Surface`]; output backends (SVG through
//! plotters, the egui painter) replay them. Keeping the elements around lets callers
//! inspect exactly what a render produced.

use super::axis::Axis;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Vertical alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Anchor is the top of the glyphs.
    Hanging,
    Middle,
    /// Anchor is the text baseline.
    Alphabetic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub pos: (f64, f64),
    pub text: String,
    pub font_px: f64,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
    /// Rotated -90° around `pos`, reading bottom to top.
    pub rotated: bool,
    pub color: Rgb,
}

impl Label {
    /// Left-aligned, baseline-anchored text, the default placement for chart titles.
    pub fn new(x: f64, y: f64, text: impl Into<String>, font_px: f64) -> Self {
        Self {
            pos: (x, y),
            text: text.into(),
            font_px,
            anchor: TextAnchor::Start,
            baseline: Baseline::Alphabetic,
            rotated: false,
            color: super::util::INK,
        }
    }

    pub fn rotated(mut self) -> Self {
        self.rotated = true;
        self
    }

    pub fn aligned(mut self, anchor: TextAnchor, baseline: Baseline) -> Self {
        self.anchor = anchor;
        self.baseline = baseline;
        self
    }

    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Rgb,
    pub width: f64,
}

/// An open polyline, e.g. the smoothed data line.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Role of the path ("line" for the population series, "trend" for the regression).
    pub class: &'static str,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub width: f64,
}

impl Polyline {
    /// Shortest distance from `p` to any segment of the path.
    pub fn distance_to(&self, p: (f64, f64)) -> Option<f64> {
        match self.points.as_slice() {
            [] => None,
            [only] => Some(dist(*only, p)),
            pts => pts
                .windows(2)
                .map(|w| point_segment_distance(p, w[0], w[1]))
                .reduce(f64::min),
        }
    }
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn point_segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return dist(p, a);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0);
    dist(p, (a.0 + t * dx, a.1 + t * dy))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub center: (f64, f64),
    pub radius: f64,
    pub fill: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Path(Polyline),
    Circle(Dot),
    Line(Segment),
    Text(Label),
    Axis(Axis),
}

/// A fixed-size drawing area holding the elements of the last render.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    elements: Vec<Element>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Remove everything drawn so far.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_blank(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Polyline> {
        self.elements.iter().filter_map(|e| match e {
            Element::Path(p) => Some(p),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Dot> {
        self.elements.iter().filter_map(|e| match e {
            Element::Circle(c) => Some(c),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.elements.iter().filter_map(|e| match e {
            Element::Axis(a) => Some(a),
            _ => None,
        })
    }

    /// The data path of a line chart, if one was drawn.
    pub fn data_path(&self) -> Option<&Polyline> {
        self.paths().find(|p| p.class == "line")
    }

    /// All elements with axes expanded into their lines and labels, in drawing order.
    pub fn primitives(&self) -> Vec<Element> {
        let mut out = Vec::with_capacity(self.elements.len());
        for e in &self.elements {
            match e {
                Element::Axis(a) => out.extend(a.primitives()),
                other => out.push(other.clone()),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_polyline() {
        let p = Polyline {
            class: "line",
            points: vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)],
            color: Rgb(0, 0, 0),
            width: 2.0,
        };
        assert_eq!(p.distance_to((5.0, 3.0)), Some(3.0));
        assert_eq!(p.distance_to((12.0, 5.0)), Some(2.0));
        assert_eq!(p.distance_to((-3.0, -4.0)), Some(5.0));
    }

    #[test]
    fn clear_empties_surface() {
        let mut s = Surface::new(300, 300);
        s.push(Element::Text(Label::new(1.0, 2.0, "x", 10.0)));
        assert!(!s.is_blank());
        s.clear();
        assert!(s.is_blank());
        assert_eq!(s.size(), (300, 300));
    }
}
