/*!
 * GUI application for popviz - population line chart with a scatter-chart tooltip
 *
 * A cross-platform desktop application providing:
 * - A location dropdown driving the population line chart
 * - A fertility rate vs. life expectancy tooltip while the pointer is over the line
 * - Opening another CSV file at runtime
 *
 * Usage: popviz-gui [FILE.csv]
 */

use eframe::egui::{self, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};
use popviz::viz::Layout;
use popviz::viz::scene::{Baseline, Element, Label, Rgb, Surface, TextAnchor};
use popviz::{HoverEvent, RenderContext, storage};
use std::path::PathBuf;

/// Pointer distance (px) from the line that still counts as hovering it.
const HOVER_TOLERANCE_PX: f64 = 4.0;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let initial = std::env::args_os().nth(1).map(PathBuf::from);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 620.0])
            .with_min_inner_size([520.0, 580.0])
            .with_title("Population charts - popviz"),
        ..Default::default()
    };

    eframe::run_native(
        "popviz",
        options,
        Box::new(move |_cc| Ok(Box::new(PopvizApp::new(initial)))),
    )
}

enum State {
    /// Nothing loaded yet.
    Empty,
    Loaded(Box<RenderContext>),
    /// Loading failed; no chart is shown.
    Failed(String),
}

struct PopvizApp {
    state: State,
    hovering: bool,
}

impl PopvizApp {
    fn new(initial: Option<PathBuf>) -> Self {
        let mut app = Self {
            state: State::Empty,
            hovering: false,
        };
        if let Some(path) = initial {
            app.load(path);
        }
        app
    }

    fn load(&mut self, path: PathBuf) {
        self.hovering = false;
        self.state = match storage::load_csv(&path) {
            Ok(data) => State::Loaded(Box::new(RenderContext::new(data, Layout::default()))),
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                State::Failed(format!("Could not load {}: {e}", path.display()))
            }
        };
    }
}

fn color(c: Rgb, opacity: f32) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2).gamma_multiply(opacity)
}

fn paint_label(painter: &egui::Painter, pos: Pos2, label: &Label, opacity: f32) {
    let c = color(label.color, opacity);
    let galley = painter.layout_no_wrap(
        label.text.clone(),
        FontId::proportional(label.font_px as f32),
        c,
    );
    let size = galley.size();
    // Offset of the galley's top-left corner from the anchor, in unrotated text space.
    let dx = match label.anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Middle => -size.x / 2.0,
        TextAnchor::End => -size.x,
    };
    let dy = match label.baseline {
        Baseline::Hanging => 0.0,
        Baseline::Middle => -size.y / 2.0,
        Baseline::Alphabetic => -size.y * 0.8,
    };
    if label.rotated {
        // -90° on a y-down screen maps text space (dx, dy) to (dy, -dx).
        let top_left = pos + Vec2::new(dy, -dx);
        painter.add(
            egui::epaint::TextShape::new(top_left, galley, c)
                .with_angle(-std::f32::consts::FRAC_PI_2),
        );
    } else {
        painter.galley(pos + Vec2::new(dx, dy), galley, c);
    }
}

/// Replay a surface on an egui painter with its top-left corner at `origin`.
fn paint_surface(painter: &egui::Painter, origin: Pos2, surface: &Surface, opacity: f32) {
    let at = |p: (f64, f64)| origin + Vec2::new(p.0 as f32, p.1 as f32);
    for element in surface.primitives() {
        match element {
            Element::Line(s) => {
                painter.line_segment(
                    [at(s.from), at(s.to)],
                    Stroke::new(s.width as f32, color(s.color, opacity)),
                );
            }
            Element::Path(p) => {
                painter.add(Shape::line(
                    p.points.iter().map(|&q| at(q)).collect(),
                    Stroke::new(p.width as f32, color(p.color, opacity)),
                ));
            }
            Element::Circle(d) => {
                painter.circle_filled(at(d.center), d.radius as f32, color(d.fill, opacity));
            }
            Element::Text(l) => paint_label(painter, at(l.pos), &l, opacity),
            Element::Axis(_) => {}
        }
    }
}

impl eframe::App for PopvizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open CSV…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV", &["csv"])
                        .pick_file()
                    {
                        self.load(path);
                    }
                }

                if let State::Loaded(render) = &mut self.state {
                    let mut choice = render.selector().selected().to_string();
                    egui::ComboBox::from_label("Location")
                        .selected_text(choice.clone())
                        .show_ui(ui, |ui| {
                            for c in render.selector().choices() {
                                ui.selectable_value(&mut choice, c.clone(), c.as_str());
                            }
                        });
                    if render.select(&choice) && self.hovering {
                        render.hover(HoverEvent::Leave);
                        self.hovering = false;
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.state {
            State::Empty => {
                ui.label(
                    "Open a CSV file with columns location, time, pop_mlns, \
                     fertility_rate, life_expectancy.",
                );
            }
            State::Failed(msg) => {
                ui.colored_label(Color32::RED, msg.as_str());
            }
            State::Loaded(render) => {
                let surface = render.line_surface();
                let size = Vec2::new(surface.width() as f32, surface.height() as f32);
                let (response, painter) = ui.allocate_painter(size, Sense::hover());
                let origin = response.rect.min;
                painter.rect_filled(response.rect, 0.0, Color32::WHITE);
                paint_surface(&painter, origin, surface, 1.0);

                let pointer = response.hover_pos();
                let over_line = pointer.is_some_and(|p| {
                    render.hits_line(
                        ((p.x - origin.x) as f64, (p.y - origin.y) as f64),
                        HOVER_TOLERANCE_PX,
                    )
                });
                match (over_line, self.hovering, pointer) {
                    (true, false, Some(p)) => render.hover(HoverEvent::Enter {
                        page_x: p.x as f64,
                        page_y: p.y as f64,
                    }),
                    (false, true, _) => render.hover(HoverEvent::Leave),
                    _ => {}
                }
                self.hovering = over_line;
            }
        });

        if let State::Loaded(render) = &self.state {
            let tooltip = render.tooltip();
            let opacity = ctx.animate_value_with_time(
                egui::Id::new("scatter_tooltip_opacity"),
                tooltip.opacity as f32,
                tooltip.transition.as_secs_f32(),
            );
            if opacity > 0.0 && !tooltip.surface.is_blank() {
                egui::Area::new(egui::Id::new("scatter_tooltip"))
                    .order(egui::Order::Tooltip)
                    .fixed_pos(Pos2::new(tooltip.left as f32, tooltip.top as f32))
                    .interactable(false)
                    .show(ctx, |ui| {
                        egui::Frame::popup(ui.style())
                            .fill(Color32::WHITE)
                            .multiply_with_opacity(opacity)
                            .show(ui, |ui| {
                                let s = &tooltip.surface;
                                let (response, painter) = ui.allocate_painter(
                                    Vec2::new(s.width() as f32, s.height() as f32),
                                    Sense::hover(),
                                );
                                paint_surface(&painter, response.rect.min, s, opacity);
                            });
                    });
            }
        }
    }
}
