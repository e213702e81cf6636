//! The render context: dataset, selection, surfaces, and the hover tooltip.
//!
//! All chart state lives here and is passed explicitly; there are no module-level
//! globals. Each render rebuilds its surface from scratch, so the last selection always
//! wins no matter how many selections came before it.

use crate::models::Dataset;
use crate::selector::Selector;
use crate::viz::{self, ChartSummary, Layout, Surface};
use std::time::Duration;

/// Tooltip fade-in after the pointer enters the line.
pub const FADE_IN: Duration = Duration::from_millis(200);
/// Tooltip fade-out after the pointer leaves the line.
pub const FADE_OUT: Duration = Duration::from_millis(500);
/// The tooltip is placed this many pixels above the pointer.
pub const TOOLTIP_OFFSET_Y: f64 = 28.0;

/// Pointer event on the data line, carrying its own coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverEvent {
    Enter { page_x: f64, page_y: f64 },
    Leave,
}

/// Floating panel holding the scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub surface: Surface,
    /// Target opacity (0 hidden, 1 shown).
    pub opacity: f64,
    pub left: f64,
    pub top: f64,
    /// Duration of the transition towards `opacity`.
    pub transition: Duration,
}

impl Tooltip {
    fn new(width: u32, height: u32) -> Self {
        Self {
            surface: Surface::new(width, height),
            opacity: 0.0,
            left: 0.0,
            top: 0.0,
            transition: Duration::ZERO,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct RenderContext {
    dataset: Dataset,
    layout: Layout,
    selector: Selector,
    line: Surface,
    tooltip: Tooltip,
    line_summary: ChartSummary,
    scatter_summary: Option<ChartSummary>,
}

impl RenderContext {
    /// Take ownership of the loaded dataset and draw the initial line chart for the
    /// default location.
    pub fn new(dataset: Dataset, layout: Layout) -> Self {
        let selector = Selector::from_dataset(&dataset);
        let mut line = Surface::new(layout.line.width, layout.line.height);
        let line_summary = viz::line_chart(&mut line, &dataset, Some(selector.selected()), &layout);
        let tooltip = Tooltip::new(layout.scatter.width, layout.scatter.height);
        log::info!(
            "render context ready: {} rows, {} locations, showing {}",
            dataset.len(),
            selector.choices().len(),
            selector.selected()
        );
        Self {
            dataset,
            layout,
            selector,
            line,
            tooltip,
            line_summary,
            scatter_summary: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn line_surface(&self) -> &Surface {
        &self.line
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn line_summary(&self) -> &ChartSummary {
        &self.line_summary
    }

    pub fn scatter_summary(&self) -> Option<&ChartSummary> {
        self.scatter_summary.as_ref()
    }

    /// Handle a dropdown change. Re-renders the line chart when the selection changed
    /// and returns whether it did.
    pub fn select(&mut self, location: &str) -> bool {
        if !self.selector.select(location) {
            return false;
        }
        self.render_line();
        true
    }

    /// Redraw the line chart for the current selection.
    pub fn render_line(&mut self) -> &ChartSummary {
        self.line_summary = viz::line_chart(
            &mut self.line,
            &self.dataset,
            Some(self.selector.selected()),
            &self.layout,
        );
        &self.line_summary
    }

    /// Redraw the tooltip's scatter chart over the full dataset.
    pub fn render_scatter(&mut self) -> &ChartSummary {
        let summary = viz::scatter_chart(&mut self.tooltip.surface, &self.dataset, None, &self.layout);
        self.scatter_summary.insert(summary)
    }

    /// Pointer entered or left the data line.
    pub fn hover(&mut self, event: HoverEvent) {
        match event {
            HoverEvent::Enter { page_x, page_y } => {
                self.tooltip.opacity = 1.0;
                self.tooltip.transition = FADE_IN;
                self.tooltip.left = page_x;
                self.tooltip.top = page_y - TOOLTIP_OFFSET_Y;
                self.render_scatter();
            }
            HoverEvent::Leave => {
                self.tooltip.opacity = 0.0;
                self.tooltip.transition = FADE_OUT;
            }
        }
    }

    /// Whether a pointer at surface coordinates `pos` is over the data line.
    pub fn hits_line(&self, pos: (f64, f64), tolerance: f64) -> bool {
        self.line
            .data_path()
            .and_then(|p| p.distance_to(pos))
            .is_some_and(|d| d <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn ctx() -> RenderContext {
        let ds = Dataset::new(vec![
            Record::new("AUS", 1960, Some(10.3), Some(3.4), Some(70.8)),
            Record::new("AUS", 1961, Some(10.5), Some(3.3), Some(71.0)),
            Record::new("USA", 1960, Some(180.0), Some(3.6), Some(69.8)),
        ]);
        RenderContext::new(ds, Layout::default())
    }

    #[test]
    fn starts_on_default_location() {
        let c = ctx();
        assert_eq!(c.selector().selected(), "AUS");
        assert_eq!(c.line_summary().plotted, 2);
        assert!(!c.tooltip().is_visible());
        assert!(c.tooltip().surface.is_blank());
    }

    #[test]
    fn hover_enter_then_leave() {
        let mut c = ctx();
        c.hover(HoverEvent::Enter {
            page_x: 120.0,
            page_y: 200.0,
        });
        let t = c.tooltip();
        assert!(t.is_visible());
        assert_eq!((t.left, t.top), (120.0, 172.0));
        assert_eq!(t.transition, FADE_IN);
        assert_eq!(t.surface.circles().count(), 3);
        assert_eq!(c.scatter_summary().unwrap().plotted, 3);

        c.hover(HoverEvent::Leave);
        assert!(!c.tooltip().is_visible());
        assert_eq!(c.tooltip().transition, FADE_OUT);
    }

    #[test]
    fn reselecting_same_location_is_a_no_op() {
        let mut c = ctx();
        assert!(!c.select("AUS"));
        assert!(c.select("USA"));
        assert_eq!(c.line_summary().plotted, 1);
    }
}
