use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use popviz::models::{Dataset, Field};
use popviz::viz::Layout;
use popviz::{dashboard, filter, selector, stats, storage, viz};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "popviz",
    version,
    about = "Chart population, fertility rate & life expectancy from a CSV table"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the distinct locations (dropdown choices), one per line.
    Locations(Common),
    /// Write the population line chart of one location as SVG.
    Line(LineArgs),
    /// Write the fertility rate vs. life expectancy scatter chart as SVG.
    Scatter(ScatterArgs),
    /// Write an interactive HTML page with dropdown and hover tooltip.
    Dashboard(DashboardArgs),
    /// Save the rows of one location or one year as CSV or JSON.
    Export(ExportArgs),
    /// Print per-location statistics of one field.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct Common {
    /// Input CSV (columns: location,time,pop_mlns,fertility_rate,life_expectancy).
    #[arg(short = 'D', long)]
    data: PathBuf,
    /// Optional JSON file overriding layout defaults (sizes, ranges, padding, locale).
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Fraction of the data span added around each axis extent (overrides the layout).
    #[arg(long)]
    pad: Option<f64>,
    /// Locale for tick labels, e.g. en or de (overrides the layout).
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct LineArgs {
    #[command(flatten)]
    common: Common,
    /// Location key (default AUS).
    #[arg(short, long)]
    location: Option<String>,
    /// Output SVG path.
    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ScatterArgs {
    #[command(flatten)]
    common: Common,
    /// Restrict to one year (default: all rows).
    #[arg(short, long)]
    year: Option<i32>,
    /// Output SVG path.
    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct DashboardArgs {
    #[command(flatten)]
    common: Common,
    /// Output HTML path.
    #[arg(short, long)]
    out: PathBuf,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    common: Common,
    /// Keep rows of this location.
    #[arg(short, long, conflicts_with = "year")]
    location: Option<String>,
    /// Keep rows of this year.
    #[arg(short, long)]
    year: Option<i32>,
    /// Output path.
    #[arg(short, long)]
    out: PathBuf,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[command(flatten)]
    common: Common,
    /// Field to summarize (time, pop_mlns, fertility_rate, life_expectancy).
    #[arg(short, long, default_value = "pop_mlns")]
    field: Field,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

impl Common {
    fn load(&self) -> Result<(Dataset, Layout)> {
        let mut layout = match &self.layout {
            Some(p) => Layout::from_json_file(p)
                .with_context(|| format!("reading layout {}", p.display()))?,
            None => Layout::default(),
        };
        if let Some(pad) = self.pad {
            anyhow::ensure!(pad >= 0.0 && pad.is_finite(), "--pad must be a non-negative number");
            layout.padding = pad;
        }
        if let Some(locale) = &self.locale {
            layout.locale = locale.clone();
        }
        let data = storage::load_csv(&self.data)
            .with_context(|| format!("loading {}", self.data.display()))?;
        Ok((data, layout))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Locations(args) => cmd_locations(args),
        Command::Line(args) => cmd_line(args),
        Command::Scatter(args) => cmd_scatter(args),
        Command::Dashboard(args) => cmd_dashboard(args),
        Command::Export(args) => cmd_export(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn cmd_locations(args: Common) -> Result<()> {
    let (data, _) = args.load()?;
    for loc in selector::distinct_locations(&data) {
        println!("{loc}");
    }
    Ok(())
}

fn cmd_line(args: LineArgs) -> Result<()> {
    let (data, layout) = args.common.load()?;
    let summary = viz::plot_line_svg(&data, args.location.as_deref(), &args.out, &layout)?;
    if summary.plotted == 0 {
        eprintln!(
            "No rows for location {}; wrote an empty chart",
            args.location.as_deref().unwrap_or(filter::DEFAULT_LOCATION)
        );
    }
    eprintln!(
        "Wrote line chart ({} points) to {}",
        summary.plotted,
        args.out.display()
    );
    Ok(())
}

fn cmd_scatter(args: ScatterArgs) -> Result<()> {
    let (data, layout) = args.common.load()?;
    let summary = viz::plot_scatter_svg(&data, args.year, &args.out, &layout)?;
    if let Some(fit) = summary.trend {
        eprintln!(
            "trend: life_expectancy = {} + {} * fertility_rate (r² = {}, n = {})",
            fmt_opt(Some(fit.intercept)),
            fmt_opt(Some(fit.slope)),
            fmt_opt(Some(fit.r_squared)),
            fit.n
        );
    }
    eprintln!(
        "Wrote scatter chart ({} points, {} skipped) to {}",
        summary.plotted,
        summary.skipped,
        args.out.display()
    );
    Ok(())
}

fn cmd_dashboard(args: DashboardArgs) -> Result<()> {
    let (data, layout) = args.common.load()?;
    dashboard::save_html(&data, &layout, &args.out)?;
    eprintln!("Wrote dashboard to {}", args.out.display());
    Ok(())
}

fn export_format(args: &ExportArgs, path: &Path) -> String {
    match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase()
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let (data, _) = args.common.load()?;
    let view = match (&args.location, args.year) {
        (Some(loc), _) => filter::by_location(&data, Some(loc)),
        (None, Some(y)) => filter::by_year(&data, Some(y)),
        (None, None) => anyhow::bail!("export needs --location or --year"),
    };
    let path = &args.out;
    match export_format(&args, path).as_str() {
        "csv" => storage::save_csv(view.iter(), path)?,
        "json" => storage::save_json(view.iter(), path)?,
        other => anyhow::bail!(popviz::Error::UnsupportedFormat(other.to_string())),
    }
    eprintln!("Saved {} rows ({}) to {}", view.len(), view.key(), path.display());
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> Result<()> {
    let (data, _) = args.common.load()?;
    for s in stats::grouped_summary(&data, args.field) {
        println!(
            "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
            s.location,
            s.field,
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }
    Ok(())
}
