//! procpool - Run shell commands with bounded concurrency
//!
//! This is the CLI front end: it resolves configuration, collects the
//! command list, feeds it through a `Pool` and renders the report.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use procpool_config::Config;
use procpool_events::EventReceiver;
use procpool_platform::{NativePlatform, StdoutTarget};
use procpool_pool::{IntoPoolSettings, Pool};
use procpool_source::{expand_patterns, read_command_file, CommandTemplate};
use procpool_types::{ColorChoice, OutputFormat, PoolReport};
use std::process;
use tokio::select;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Main application logic; `Ok(false)` means some command failed
async fn run(cli: Cli) -> Result<bool, CliError> {
    info!("Starting procpool v{}", env!("CARGO_PKG_VERSION"));

    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global);
    config.validate()?;

    let commands = collect_commands(&cli.command)?;
    if commands.is_empty() {
        warn!("no commands to run");
    }

    let format = if cli.global.json {
        OutputFormat::Json
    } else {
        config.general.default_output
    };
    let renderer = OutputRenderer::new(format, config.general.color);

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(
        colors_enabled && format != OutputFormat::Plain,
        cli.global.debug,
        format == OutputFormat::Json,
    );

    // Children must not write into the JSON report
    let mut settings = (&config).into_pool_settings();
    if format == OutputFormat::Json {
        settings = settings.stdout(StdoutTarget::Stderr);
    }

    let (event_sender, event_receiver) = procpool_events::channel();
    let pool = Pool::new(settings, NativePlatform::new())?.with_event_sender(event_sender);

    let report = run_with_events(pool, commands, event_receiver, &mut event_handler).await?;

    renderer.render_report(&report)?;

    info!(
        completed = report.stats.completed,
        failed = report.stats.failed,
        "Run finished"
    );
    Ok(report.all_succeeded())
}

/// Drive the pool while rendering its events as they arrive
async fn run_with_events(
    pool: Pool,
    commands: Vec<String>,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<PoolReport, CliError> {
    let mut run_future = Box::pin(run_commands(pool, commands));

    loop {
        select! {
            result = &mut run_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

/// Submit every command, then wait for all of them
async fn run_commands(mut pool: Pool, commands: Vec<String>) -> Result<PoolReport, CliError> {
    for command in &commands {
        if let Err(e) = pool.submit(command).await {
            // Collect what is already running before reporting the error
            if let Err(drain_err) = pool.drain().await {
                warn!("drain after submit failure also failed: {}", drain_err);
            }
            return Err(e.into());
        }
    }

    pool.drain().await?;
    Ok(pool.report())
}

/// Build the command list for the selected subcommand
fn collect_commands(command: &Commands) -> Result<Vec<String>, CliError> {
    match command {
        Commands::Run { commands, file } => {
            let mut all = commands.clone();
            if let Some(path) = file {
                all.extend(read_command_file(path)?);
            }
            if all.is_empty() {
                return Err(CliError::InvalidArguments(
                    "no commands given; pass them as arguments or with --file".to_string(),
                ));
            }
            Ok(all)
        }
        Commands::Expand {
            template,
            root,
            patterns,
        } => {
            let template = CommandTemplate::parse(template)?;
            let paths = expand_patterns(root, patterns)?;
            info!(matched = paths.len(), root = %root.display(), "patterns expanded");
            Ok(template.render_all(&paths))
        }
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if global.json {
        config.general.default_output = OutputFormat::Json;
    }
    if let Some(capacity) = global.capacity {
        config.pool.capacity = capacity;
    }
    if global.dry_run {
        config.pool.dry_run = true;
    }
    if let Some(interval) = global.poll_interval_ms {
        config.pool.poll_interval_ms = interval;
    }
    if let Some(reclaim) = global.reclaim {
        config.pool.reclaim = reclaim;
    }
    if let Some(shell) = &global.shell {
        config.shell.program.clone_from(shell);
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = Config::logs_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "procpool-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,procpool=debug,procpool_pool=debug"),
                        ),
                    )
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
            }
        }
    }

    if json_mode {
        // JSON mode: keep stdout and stderr free of log lines
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("warn,procpool=warn,procpool_pool=warn")
                }),
            )
            .init();
    }
}
