use popviz::context::{FADE_IN, FADE_OUT, TOOLTIP_OFFSET_Y};
use popviz::models::Dataset;
use popviz::viz::{Layout, Surface, line_chart};
use popviz::{HoverEvent, RenderContext, storage};
use std::path::PathBuf;

fn fixture() -> Dataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample.csv");
    storage::load_csv(path).unwrap()
}

#[test]
fn initial_render_shows_aus() {
    let ctx = RenderContext::new(fixture(), Layout::default());
    assert_eq!(ctx.selector().choices(), ["AUS", "BRA", "USA"]);
    assert_eq!(ctx.selector().selected(), "AUS");
    assert_eq!(ctx.line_summary().plotted, 6);
    assert!(ctx.line_surface().data_path().is_some());
    assert!(ctx.scatter_summary().is_none());
}

#[test]
fn last_selection_wins() {
    let ds = fixture();
    let layout = Layout::default();
    let mut ctx = RenderContext::new(ds.clone(), layout.clone());
    for loc in ["USA", "BRA", "AUS", "USA", "BRA"] {
        ctx.select(loc);
    }

    let mut fresh = Surface::new(500, 500);
    line_chart(&mut fresh, &ds, Some("BRA"), &layout);
    assert_eq!(ctx.line_surface(), &fresh);
    assert_eq!(ctx.line_surface().paths().count(), 1);
}

#[test]
fn rerender_is_idempotent() {
    let mut ctx = RenderContext::new(fixture(), Layout::default());
    let before = ctx.line_surface().clone();
    ctx.render_line();
    ctx.render_line();
    assert_eq!(ctx.line_surface(), &before);
}

#[test]
fn tooltip_follows_hover_events() {
    let mut ctx = RenderContext::new(fixture(), Layout::default());
    ctx.hover(HoverEvent::Enter {
        page_x: 240.0,
        page_y: 300.0,
    });
    let t = ctx.tooltip();
    assert!(t.is_visible());
    assert_eq!(t.opacity, 1.0);
    assert_eq!(t.left, 240.0);
    assert_eq!(t.top, 300.0 - TOOLTIP_OFFSET_Y);
    assert_eq!(t.transition, FADE_IN);
    assert_eq!(t.surface.circles().count(), 10);
    assert_eq!(ctx.scatter_summary().unwrap().plotted, 10);

    // entering again redraws the same chart, not a second copy
    ctx.hover(HoverEvent::Enter {
        page_x: 100.0,
        page_y: 100.0,
    });
    assert_eq!(ctx.tooltip().surface.circles().count(), 10);
    assert_eq!(ctx.tooltip().top, 72.0);

    ctx.hover(HoverEvent::Leave);
    let t = ctx.tooltip();
    assert!(!t.is_visible());
    assert_eq!(t.transition, FADE_OUT);
    // position and content stay while fading out
    assert_eq!(t.left, 100.0);
    assert!(!t.surface.is_blank());
}

#[test]
fn pointer_hit_testing_on_the_line() {
    let ctx = RenderContext::new(fixture(), Layout::default());
    let first = ctx.line_surface().data_path().unwrap().points[0];
    assert!(ctx.hits_line(first, 1.0));
    assert!(ctx.hits_line((first.0, first.1 + 3.0), 4.0));
    assert!(!ctx.hits_line((0.0, 0.0), 4.0));
}

#[test]
fn empty_dataset_renders_without_line() {
    let ctx = RenderContext::new(Dataset::default(), Layout::default());
    assert!(ctx.selector().choices().is_empty());
    assert_eq!(ctx.line_summary().plotted, 0);
    assert!(ctx.line_surface().data_path().is_none());
    assert!(!ctx.hits_line((100.0, 100.0), 10.0));
}
