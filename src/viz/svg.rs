//! SVG output: replays a [`Surface`] on the plotters SVG backend.

use super::scene::{Baseline, Element, Label, Rgb, Surface, TextAnchor};
use crate::error::{Error, Result};
use plotters::backend::DrawingBackend;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{
    Color, FontDesc, FontFamily, FontStyle, FontTransform, RGBColor, ShapeStyle, TextStyle,
};
use plotters_svg::SVGBackend;
use std::path::Path;

fn backend_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Render(format!("{:?}", e))
}

pub fn rgb_color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Stroke style for lines and paths; plotters widths are whole pixels.
fn line_style(c: Rgb, width: f64) -> ShapeStyle {
    ShapeStyle {
        color: rgb_color(c).to_rgba(),
        filled: false,
        stroke_width: width.round().max(1.0) as u32,
    }
}

fn fill_style(c: Rgb) -> ShapeStyle {
    rgb_color(c).filled()
}

fn coord(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

fn draw_label<DB: DrawingBackend>(backend: &mut DB, label: &Label) -> Result<()> {
    let color = rgb_color(label.color);
    let h = match label.anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    };
    let v = match label.baseline {
        Baseline::Hanging => VPos::Top,
        Baseline::Middle => VPos::Center,
        Baseline::Alphabetic => VPos::Bottom,
    };
    let mut font = FontDesc::new(FontFamily::SansSerif, label.font_px, FontStyle::Normal);
    if label.rotated {
        font = font.transform(FontTransform::Rotate270);
    }
    let style = TextStyle::from(font).color(&color).pos(Pos::new(h, v));
    backend
        .draw_text(&label.text, &style, coord(label.pos))
        .map_err(backend_err)
}

/// Draw every element of `surface` onto any plotters backend.
pub fn draw_surface<DB: DrawingBackend>(surface: &Surface, backend: &mut DB) -> Result<()> {
    backend.ensure_prepared().map_err(backend_err)?;
    for element in surface.primitives() {
        match element {
            Element::Line(s) => backend
                .draw_line(coord(s.from), coord(s.to), &line_style(s.color, s.width))
                .map_err(backend_err)?,
            Element::Path(p) => backend
                .draw_path(
                    p.points.iter().map(|&q| coord(q)),
                    &line_style(p.color, p.width),
                )
                .map_err(backend_err)?,
            Element::Circle(d) => backend
                .draw_circle(
                    coord(d.center),
                    d.radius.round().max(1.0) as u32,
                    &fill_style(d.fill),
                    true,
                )
                .map_err(backend_err)?,
            Element::Text(l) => draw_label(backend, &l)?,
            // expanded by `primitives`
            Element::Axis(_) => {}
        }
    }
    Ok(())
}

impl Surface {
    /// Render to an SVG document.
    pub fn to_svg(&self) -> Result<String> {
        let mut buf = String::new();
        {
            let mut backend = SVGBackend::with_string(&mut buf, self.size());
            draw_surface(self, &mut backend)?;
            backend.present().map_err(backend_err)?;
        }
        Ok(buf)
    }

    /// Render to an SVG file.
    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let svg = self.to_svg()?;
        std::fs::write(path, svg).map_err(|e| Error::io(path, e))
    }
}
