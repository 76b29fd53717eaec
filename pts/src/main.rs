// pts/src/main.rs
use std::fs;
use std::process;

use clap::Parser;
use pts_common::config::Config;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

mod cli;
mod ui;

use cli::CliArgs;

fn init_logging(config: Option<&Config>, verbose: u8) {
    let level_filter = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let max_log_level = level_filter.into_level().unwrap_or(tracing::Level::INFO);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("PTS_LOG")
        .from_env_lossy();

    let log_dir = config.map(Config::logs_dir);
    match log_dir {
        Some(log_dir) if verbose > 0 => {
            if let Err(e) = fs::create_dir_all(&log_dir) {
                ui::warn(&format!(
                    "Failed to create log directory {}: {}",
                    log_dir.display(),
                    e
                ));
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_writer(std::io::stderr)
                    .without_time()
                    .try_init();
                return;
            }

            let file_appender = tracing_appender::rolling::daily(&log_dir, "pts.log");
            let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

            // For verbose mode, show debug/trace logs on stderr too
            let stderr_writer = std::io::stderr.with_max_level(max_log_level);
            let file_writer = non_blocking_appender.with_max_level(max_log_level);

            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(stderr_writer.and(file_writer))
                .without_time()
                .try_init();

            Box::leak(Box::new(guard)); // Keep guard alive

            debug!(
                "Verbose logging enabled. Writing logs to: {}/pts.log",
                log_dir.display()
            );
        }
        _ => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .without_time()
                .try_init();
        }
    }
}

fn main() {
    let cli_args = CliArgs::parse();
    let mode = cli_args.mode();

    let config = Config::load();
    init_logging(config.as_ref().ok(), cli_args.verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Could not load config: {}", e);
            ui::error(&format!("{e:#}"));
            process::exit(1);
        }
    };

    debug!("Running in {:?} mode", mode);
    if let Err(e) = mode.run(&config) {
        error!("Command failed: {:#}", e);
        ui::error(&format!("{e:#}"));
        process::exit(1);
    }

    // Uninstall always lands here.
    debug!("Command completed successfully.");
}
