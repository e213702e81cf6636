//! popviz
//!
//! Charts for a per-country, per-year demographic table: population over time for one
//! location, and fertility rate vs. life expectancy across the whole table. Pairs with
//! the `popviz` CLI and the `popviz-gui` desktop app.
//!
//! ### Features
//! - Load the table from CSV; malformed numbers become missing values instead of `NaN`
//! - Pure filters by location or year, sorted location choices for a dropdown
//! - Linear scales with an inverted vertical axis and "nice" ticks
//! - Line chart (monotone smoothed) and scatter chart with a least-squares trend line
//! - Hover wiring through an explicit render context; SVG and HTML output
//!
//! ### Example
//! ```no_run
//! use popviz::{HoverEvent, RenderContext, storage, viz::Layout};
//!
//! let data = storage::load_csv("data/dataEveryYear.csv")?;
//! let mut ctx = RenderContext::new(data, Layout::default());
//! ctx.select("USA");
//! ctx.hover(HoverEvent::Enter { page_x: 240.0, page_y: 180.0 });
//! ctx.line_surface().save_svg("usa.svg")?;
//! ctx.tooltip().surface.save_svg("scatter.svg")?;
//! # Ok::<(), popviz::Error>(())
//! ```

pub mod context;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod models;
pub mod scale;
pub mod selector;
pub mod stats;
pub mod storage;
pub mod viz;

pub use context::{HoverEvent, RenderContext, Tooltip};
pub use error::{Error, Result};
pub use filter::FilteredView;
pub use models::{Dataset, Field, Record};
pub use scale::{AxisLimits, Extent, LinearScale, PixelRange, ScaleMapping};
pub use selector::Selector;
