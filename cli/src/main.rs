use std::convert::Infallible;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use speedfunnel::limit::{AssetRepo, SpeedCategory};
use speedfunnel::render::{CommandList, DrawCommand};
use speedfunnel::road::{RoadId, RoadMap, StraightRoad};
use speedfunnel::token::SignToken;
use speedfunnel::tray::TrayMetrics;
use speedfunnel::view::{Point, Viewport, WorldView};
use speedfunnel::{RenderError, SignTray, TrayConfig, TrayError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("tray error: {0}")]
    Tray(#[from] TrayError),
    #[error("render failed: {0}")]
    Render(#[from] RenderError<Infallible>),
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("no sign within {threshold} px of ({x}, {y})")]
    NothingPicked { x: f64, y: f64, threshold: f64 },
    #[error("sign index {index} out of range (tray holds {len})")]
    NoSuchSign { index: usize, len: usize },
    #[error("sign did not reach the tray within {0} ticks")]
    NeverReturned(usize),
}

#[derive(Parser, Debug)]
#[command(name = "funnel-cli", about = "Headless driver for the speed-limit sign tray")]
struct Cli {
    #[arg(long, env = "FUNNEL_WIDTH", default_value_t = 800.0)]
    width: f64,

    #[arg(long, env = "FUNNEL_HEIGHT", default_value_t = 600.0)]
    height: f64,

    #[arg(long, env = "FUNNEL_CONFIG", help = "JSON tray config; overrides the grid flags")]
    config: Option<PathBuf>,

    #[command(flatten)]
    grid: GridArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GridArgs {
    #[arg(long, env = "FUNNEL_ROWS", default_value_t = 1)]
    rows: usize,

    #[arg(long, env = "FUNNEL_COLUMNS", default_value_t = 6)]
    columns: usize,

    #[arg(long, default_value_t = 0.5, help = "Tray centre, fraction of width from the left")]
    anchor_x: f64,

    #[arg(long, default_value_t = 0.1, help = "Tray centre, fraction of height from the bottom")]
    anchor_y: f64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every sign with its category and tray slot.
    Layout,
    /// Throw a sign off the tray and print its zoom-back path.
    Return(ReturnArgs),
    /// Mount a sign on a straight demo road and print the draw calls.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct ReturnArgs {
    #[arg(long, default_value_t = 0)]
    index: usize,

    #[arg(long, default_value_t = 20.0)]
    threshold: f64,

    #[arg(long, default_value_t = 0.0)]
    to_x: f64,

    #[arg(long, default_value_t = 0.0)]
    to_y: f64,

    #[arg(long, default_value_t = 1000)]
    max_ticks: usize,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long, default_value_t = 0)]
    index: usize,

    #[arg(long, default_value_t = 50.0, help = "Longitudinal position on the road [m]")]
    u: f64,

    #[arg(long, default_value_t = 4.0, help = "Pixels per metre")]
    scale: f64,

    #[arg(long, default_value_t = 0.0)]
    heading_deg: f64,

    #[arg(long, default_value_t = 2)]
    lanes: usize,

    #[arg(long, default_value_t = 3.5)]
    lane_width: f64,
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    metrics: TrayMetrics,
    signs: Vec<SignEntry<'a>>,
}

#[derive(Serialize)]
struct SignEntry<'a> {
    index: usize,
    kmh: f64,
    value_mps: f64,
    #[serde(flatten)]
    token: &'a SignToken,
}

#[derive(Serialize)]
struct ReturnReport {
    index: usize,
    ticks: usize,
    path: Vec<Point>,
}

#[derive(Serialize)]
struct RenderReport {
    index: usize,
    road_limits: Vec<(f64, f64)>,
    commands: Vec<DrawCommand>,
}

const DEMO_ROAD: RoadId = RoadId(1);

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let viewport = Viewport::new(cli.width, cli.height);
    let config = load_config(&cli)?;
    let mut tray = SignTray::with_config(viewport, config)?;

    match cli.command {
        Command::Layout => run_layout(&tray),
        Command::Return(args) => run_return(&mut tray, &args),
        Command::Render(args) => run_render(&mut tray, viewport, &args),
    }
}

fn load_config(cli: &Cli) -> Result<TrayConfig, CliError> {
    let Some(path) = &cli.config else {
        let g = &cli.grid;
        return Ok(TrayConfig::grid(g.rows, g.columns, g.anchor_x, g.anchor_y));
    };
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadConfig { path: path.clone(), source })?;
    tracing::info!(path = %path.display(), "loaded tray config");
    Ok(TrayConfig::from_json(&raw)?)
}

fn run_layout(tray: &SignTray) -> Result<(), CliError> {
    let signs = tray
        .tokens()
        .iter()
        .enumerate()
        .map(|(index, token)| SignEntry {
            index,
            kmh: token.category().kmh(),
            value_mps: token.value_mps(),
            token,
        })
        .collect();
    print_json(&LayoutReport { metrics: tray.metrics(), signs })
}

fn run_return(tray: &mut SignTray, args: &ReturnArgs) -> Result<(), CliError> {
    let index = pick_by_index(tray, args.index, args.threshold)?;
    tray.drag(Point::new(args.to_x, args.to_y));
    tray.release();

    let mut path = vec![Point::new(args.to_x, args.to_y)];
    let mut ticks = 0;
    while tray.advance_return() > 0 {
        ticks += 1;
        path.push(current_position(tray, index)?);
        if ticks >= args.max_ticks {
            return Err(CliError::NeverReturned(args.max_ticks));
        }
    }
    ticks += 1;
    path.push(current_position(tray, index)?);

    tracing::info!(index, ticks, "sign returned to tray");
    print_json(&ReturnReport { index, ticks, path })
}

fn run_render(tray: &mut SignTray, viewport: Viewport, args: &RenderArgs) -> Result<(), CliError> {
    let view = WorldView::new(args.scale);
    // Road runs through the middle of the viewport.
    let origin = view.pixel_to_world(Point::new(0.0, 0.5 * viewport.height));
    let road = StraightRoad {
        origin,
        heading: args.heading_deg.to_radians(),
        length: viewport.width / args.scale,
        lanes: args.lanes,
        lane_width: args.lane_width,
    };
    let u = road.clamp_u(args.u);
    let mut roads = RoadMap::new();
    roads.insert(DEMO_ROAD, road);

    let index = pick_by_index(tray, args.index, 1.0)?;
    tray.drop_on_road(DEMO_ROAD, u)?;

    let assets = AssetRepo::from_fn(SpeedCategory::asset_file);
    let mut surface = CommandList::new();
    tray.draw(&mut surface, &assets, &roads, &view)?;

    print_json(&RenderReport {
        index,
        road_limits: tray.active_limits(DEMO_ROAD),
        commands: surface.into_commands(),
    })
}

fn pick_by_index(tray: &mut SignTray, index: usize, threshold: f64) -> Result<usize, CliError> {
    let at = current_position(tray, index)?;
    tray.pick_nearest(at, threshold)
        .ok_or(CliError::NothingPicked { x: at.x, y: at.y, threshold })
}

fn current_position(tray: &SignTray, index: usize) -> Result<Point, CliError> {
    tray.token(index)
        .map(SignToken::position)
        .ok_or(CliError::NoSuchSign { index, len: tray.len() })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
