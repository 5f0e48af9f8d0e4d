mod http;
mod navigator;
mod report;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use http::HttpBackend;
use navigator::TerminalNavigator;
use plateful_core::{
    CatalogSource, FavoritesStore, OrderConfig, OrderEngine, OrderScreen, OrdersStore,
    RecordIdGenerator, SequentialIds,
};
use report::ScreenReport;

const API_URL_ENV: &str = "PLATEFUL_API_URL";
const DEFAULT_API_URL: &str = "http://localhost:3333";
/// Largest quantity a single flag may ask for; each unit is replayed as one step.
const MAX_REQUEST_QUANTITY: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Console,
    /// Machine-readable JSON document
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "plateful", version)]
#[command(about = "Compose, price and place food orders against a Plateful API")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the API (falls back to PLATEFUL_API_URL, then http://localhost:3333)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// JSON file with quantity ceilings, timeout, favorite policy and currency style
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console, global = true)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Show a food with its extras and base price
    Show { food_id: u64 },
    /// Compose an order and submit it
    Order {
        food_id: u64,
        /// Extra to add, as ID=QTY (repeatable)
        #[arg(long = "extra", value_parser = parse_extra)]
        extras: Vec<ExtraRequest>,
        /// Number of servings
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_REQUEST_QUANTITY))
        )]
        quantity: u32,
        /// Also mark the food as favorite
        #[arg(long)]
        favorite: bool,
        /// Price the order without writing anything remotely
        #[arg(long)]
        dry_run: bool,
    },
    /// Toggle the favorite flag of a food
    Favorite { food_id: u64 },
}

impl Command {
    const fn food_id(&self) -> u64 {
        match self {
            Self::Show { food_id } | Self::Order { food_id, .. } | Self::Favorite { food_id } => {
                *food_id
            }
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Show { .. } => "show",
            Self::Order { .. } => "order",
            Self::Favorite { .. } => "favorite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExtraRequest {
    id: u64,
    quantity: u32,
}

fn parse_extra(raw: &str) -> Result<ExtraRequest, String> {
    let (id, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got `{raw}`"))?;
    let id = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid extra id `{}`", id.trim()))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity `{}`", quantity.trim()))?;
    if quantity > MAX_REQUEST_QUANTITY {
        return Err(format!(
            "quantity {quantity} exceeds the limit of {MAX_REQUEST_QUANTITY}"
        ));
    }
    Ok(ExtraRequest { id, quantity })
}

fn resolve_api_url(flag: Option<&str>, env: Option<String>) -> String {
    flag.map(str::to_string)
        .or(env)
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

fn load_config(args: &Args) -> Result<OrderConfig> {
    match &args.config {
        Some(path) => OrderConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(OrderConfig::default()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let api_url = resolve_api_url(args.api_url.as_deref(), std::env::var(API_URL_ENV).ok());
    let config = load_config(&args)?;
    let engine = OrderEngine::new(HttpBackend::new(api_url), config);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupted, dismissing screen");
            trigger.cancel();
        }
    });

    if args.report == ReportFormat::Console && args.output.is_none() {
        announce_banner(engine.backend().api_url());
    }

    let report = execute(&args.command, &engine, engine.backend().api_url(), cancel).await?;
    write_report(&args, &report, &engine)?;
    Ok(())
}

fn announce_banner(api_url: &str) {
    println!("{}", "🍝 Plateful".bright_cyan().bold());
    println!("{}", format!("   {api_url}").dimmed());
    println!("{}", "================================".cyan());
}

async fn execute<B>(
    command: &Command,
    engine: &OrderEngine<B>,
    api_url: &str,
    cancel: CancellationToken,
) -> Result<ScreenReport>
where
    B: CatalogSource + FavoritesStore + OrdersStore,
{
    let food_id = command.food_id();
    let mut screen = engine
        .open_screen_with(food_id, TerminalNavigator::default(), cancel)
        .await
        .with_context(|| format!("could not open food {food_id}"))?;

    let mut report = match command {
        Command::Show { .. } => ScreenReport::capture(command.name(), api_url, &screen),
        Command::Favorite { .. } => {
            let favorite = screen
                .toggle_favorite()
                .await
                .context("favorite not recorded")?;
            log::info!("food {food_id} favorite: {favorite}");
            ScreenReport::capture(command.name(), api_url, &screen)
        }
        Command::Order {
            extras,
            quantity,
            favorite,
            dry_run,
            ..
        } => {
            compose(&mut screen, extras, *quantity)?;

            let mut favorite_error = None;
            if *favorite {
                if *dry_run {
                    log::warn!("dry run: favorite not recorded");
                } else if let Err(err) = screen.toggle_favorite().await {
                    favorite_error = Some(err.to_string());
                }
            }

            let mut report = ScreenReport::capture(command.name(), api_url, &screen);
            report.favorite_error = favorite_error;
            if *dry_run {
                let id = SequentialIds::new("dry-run").next_id();
                report.order = Some(screen.draft().to_payload(id));
            } else {
                let payload = screen.submit_order().await.context("order not placed")?;
                report.order = Some(payload);
                report.submitted = true;
            }
            report
        }
    };

    report.header_icon = screen.navigator().header();
    report.left_screen = screen.navigator().has_left();
    Ok(report)
}

/// Apply the requested extras and servings, stopping at any configured ceiling.
fn compose<B, N>(
    screen: &mut OrderScreen<B, N>,
    extras: &[ExtraRequest],
    quantity: u32,
) -> Result<()>
where
    N: plateful_core::Navigator,
{
    for request in extras {
        if screen.extras().find(request.id).is_none() {
            let offered: Vec<String> = screen
                .extras()
                .lines()
                .iter()
                .map(|line| line.id.to_string())
                .collect();
            bail!(
                "food {} has no extra {} (offered: {})",
                screen.item().id,
                request.id,
                offered.join(", ")
            );
        }
        let mut reached = screen.extras().quantity_of(request.id).unwrap_or_default();
        while reached < request.quantity {
            let next = screen
                .increment_extra(request.id)
                .quantity_of(request.id)
                .unwrap_or_default();
            if next == reached {
                break;
            }
            reached = next;
        }
        if reached < request.quantity {
            log::warn!(
                "extra {} capped at {reached} (asked for {})",
                request.id,
                request.quantity
            );
        }
    }

    while screen.food_quantity() < quantity {
        let before = screen.food_quantity();
        if screen.increment_food() == before {
            log::warn!("quantity capped at {before} (asked for {quantity})");
            break;
        }
    }
    Ok(())
}

fn write_report<B>(args: &Args, report: &ScreenReport, engine: &OrderEngine<B>) -> Result<()>
where
    B: CatalogSource + FavoritesStore + OrdersStore,
{
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => report::write_json(output_target.writer(), report)?,
        ReportFormat::Console => {
            report::write_console(output_target.writer(), report, engine.formatter())?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
