use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use vlist::app::settings::{self, Settings};
use vlist::app::VirtualList;
use vlist::data::JsonFileSource;
use vlist::runner::{generate_rows, parse_offsets, run_app, run_script, DemoSource, RunOptions};
use vlist::ui::{colors, Theme};
use vlist::window::DebounceProfile;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// 200 ms between recomputations
    Gecko,
    /// 100 ms between recomputations
    Standard,
}

/// Scroll through a large list while only a small window of rows is loaded.
#[derive(Parser, Debug)]
#[command(name = "vlist", version, about)]
struct Args {
    /// Number of generated rows (ignored with --data)
    #[arg(long, default_value_t = 10_000)]
    items: usize,

    /// JSON file with an array of {id, label, detail} rows
    #[arg(long)]
    data: Option<PathBuf>,

    /// Settings file to use instead of the per-user one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows kept materialized at once
    #[arg(long)]
    window: Option<usize>,

    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,

    /// Simulated fetch latency in milliseconds
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Built-in theme name or path to a theme TOML file
    #[arg(long)]
    theme: Option<String>,

    /// Run headless: apply comma-separated scroll offsets and print each window
    #[arg(long, value_name = "OFFSETS")]
    simulate: Option<String>,
}

/// Log to a daily file in the cache dir; stdout belongs to the TUI.
fn init_logging() -> anyhow::Result<Option<WorkerGuard>> {
    let Some(dir) = settings::user_cache_dir() else {
        return Ok(None);
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, "vlist.log"));
    let filter = EnvFilter::try_from_env("VLIST_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;
    tracing_log::LogTracer::init().context("bridging log records")?;
    Ok(Some(guard))
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut s = match &args.config {
        Some(path) => settings::load_settings_from(path)?,
        None => settings::load_settings()?,
    };
    if let Some(window) = args.window {
        s.window.window_item_count = window;
    }
    match args.profile {
        Some(ProfileArg::Gecko) => s.scroll.profile = DebounceProfile::Gecko,
        Some(ProfileArg::Standard) => s.scroll.profile = DebounceProfile::Standard,
        None => {}
    }
    if let Some(theme) = &args.theme {
        s.ui.theme = theme.clone();
    }
    s.window.validate()?;
    Ok(s)
}

fn apply_theme(name: &str) -> anyhow::Result<()> {
    if let Some(theme) = Theme::by_name(name) {
        colors::set_from_theme(&theme);
        return Ok(());
    }
    let path = Path::new(name);
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("theme `{name}` is neither built in nor a readable file"))?;
    let theme = Theme::from_toml(&text).with_context(|| format!("parsing theme {}", path.display()))?;
    colors::set_from_theme(&theme);
    Ok(())
}

fn build_source(args: &Args) -> anyhow::Result<DemoSource> {
    let source = match &args.data {
        Some(path) => DemoSource::file(JsonFileSource::open(path)?),
        None => DemoSource::generated(generate_rows(args.items, Local::now().naive_local())),
    };
    Ok(source.with_latency(Duration::from_millis(args.latency_ms)))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_logging().unwrap_or_else(|e| {
        eprintln!("vlist: logging disabled: {e:#}");
        None
    });
    let settings = load_settings(&args)?;
    let source = build_source(&args)?;
    info!(?args, "starting");

    if let Some(script) = &args.simulate {
        let offsets = parse_offsets(script)?;
        let mut list = VirtualList::new(source, settings.window_config()?, settings.scroll.profile)?;
        let stdout = std::io::stdout();
        return run_script(&mut list, &offsets, &mut stdout.lock());
    }

    apply_theme(&settings.ui.theme)?;
    run_app(
        source,
        RunOptions {
            settings,
            data_file: args.data.clone(),
        },
    )
}
