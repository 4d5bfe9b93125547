use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::unbounded_channel;
use zpanel::engine::StdioEngine;
use zpanel::{Bar, BarConfig};
use zpanel_core::InProcessEngine;
use zpanel_types::{
    AudioOutput, BatteryOutput, CpuOutput, DateOutput, GlazeWmOutput, MediaOutput, MediaSession,
    MemoryOutput, OutputValue, WeatherOutput, Workspace,
};

/// zpanel - a reactive desktop status bar
///
/// Speaks line-delimited JSON on stdin/stdout with the widget engine that
/// hosts it.
#[derive(Parser, Debug, Clone)]
#[command(name = "zpanel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Feed built-in sample values, print one rendered bar and exit
    #[arg(long = "demo")]
    demo: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting. Logs go to stderr; stdout
    // carries the engine protocol.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting zpanel v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli);

    if cli.demo {
        return run_demo(config);
    }

    // Single logical thread: updates, renders and actions are all handled
    // by one cooperative loop.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build runtime")?;
    runtime.block_on(run_stdio(config))
}

fn load_config(cli: &Cli) -> BarConfig {
    if let Some(ref path) = cli.config {
        match BarConfig::load_from_path(path) {
            Ok(config) => {
                info!("Loaded config from: {}", path.display());
                return config;
            }
            Err(e) => warn!("Failed to load config '{}': {:#}", path.display(), e),
        }
    }

    BarConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}; using defaults", e);
        BarConfig::default()
    })
}

async fn run_stdio(config: BarConfig) -> Result<()> {
    let engine = Arc::new(StdioEngine::stdout());
    let (bar, updates) = Bar::start(engine.as_ref(), config);
    let (action_tx, actions) = unbounded_channel();

    let reader_engine = Arc::clone(&engine);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match reader_engine.handle_line(&line) {
                    Ok(Some(action)) => {
                        if action_tx.send(action).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Ignoring input line: {}", e),
                },
                Ok(None) => {
                    info!("Input closed");
                    break;
                }
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    bar.run(updates, actions, |view| {
        if let Err(e) = engine.emit_render(view) {
            warn!("Failed to write render: {:#}", e);
        }
    })
    .await;

    Ok(())
}

fn run_demo(config: BarConfig) -> Result<()> {
    let engine = InProcessEngine::new();
    let (bar, mut updates) = Bar::start(&engine, config);

    for (source, value) in demo_values() {
        engine.push(source, value);
    }
    bar.drain(&mut updates);

    println!("{}", serde_json::to_string_pretty(&bar.render())?);
    Ok(())
}

fn demo_values() -> Vec<(&'static str, OutputValue)> {
    let workspace = |name: &str, focused: bool| Workspace {
        name: name.to_string(),
        display_name: None,
        has_focus: focused,
        is_displayed: Some(focused),
    };

    vec![
        (
            "glazewm",
            OutputValue::Glazewm(GlazeWmOutput {
                all_workspaces: vec![workspace("1", false), workspace("2", true), workspace("3", false)],
            }),
        ),
        (
            "calendar",
            OutputValue::Date(DateOutput {
                formatted: "2026 October 18 Sunday".to_string(),
            }),
        ),
        (
            "date",
            OutputValue::Date(DateOutput {
                formatted: "09:41:00 AM".to_string(),
            }),
        ),
        ("cpu", OutputValue::Cpu(CpuOutput { usage: 23.4 })),
        ("memory", OutputValue::Memory(MemoryOutput { usage: 61.8 })),
        (
            "battery",
            OutputValue::Battery(BatteryOutput {
                charge_percent: 55.0,
                is_charging: true,
            }),
        ),
        (
            "weather",
            OutputValue::Weather(WeatherOutput {
                celsius_temp: Some(14.6),
                fahrenheit_temp: Some(58.3),
                status: Some("cloudy_day".to_string()),
                wind_speed: Some(11.0),
            }),
        ),
        (
            "audio",
            OutputValue::Audio(AudioOutput {
                volume: Some(35),
                device_name: Some("Speakers".to_string()),
            }),
        ),
        (
            "media",
            OutputValue::Media(MediaOutput {
                current_session: Some(MediaSession {
                    title: Some("Windowlicker".to_string()),
                    artist: Some("Aphex Twin".to_string()),
                    album_title: None,
                    is_playing: true,
                }),
            }),
        ),
    ]
}
