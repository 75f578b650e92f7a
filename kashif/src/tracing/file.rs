use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

use super::filter::ConsoleFilter;
use super::filter::DebugOnlyFilter;
use super::filter::ErrorWarnFilter;
use super::format::KashifFormat;
use crate::config::LoggingConfig;

/// Keeps the non-blocking file writers alive; drop it at process exit
#[must_use]
pub struct TracingGuard {
    _guards: Vec<WorkerGuard>,
}

fn console_level() -> Level {
    if cfg!(feature = "dev") { Level::INFO } else { Level::ERROR }
}

fn make_file_writers(
    engine_name: &str,
    logging_config: &LoggingConfig,
    guards: &mut Vec<WorkerGuard>,
) -> Option<(NonBlocking, NonBlocking)> {
    let base_logs_dir = Path::new(logging_config.directory.as_deref().unwrap_or(".logs"));
    let debug_dir = base_logs_dir.join("debug");
    let error_dir = base_logs_dir.join("error");

    for dir in [&debug_dir, &error_dir] {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Failed to create logs directory {}: {}", dir.display(), e);
            return None;
        }
    }

    let debug_appender = RollingFileAppender::new(Rotation::DAILY, &debug_dir, format!("{}.log", engine_name));
    let error_appender = RollingFileAppender::new(Rotation::DAILY, &error_dir, format!("{}.log", engine_name));

    let (non_blocking_debug, debug_guard) = tracing_appender::non_blocking(debug_appender);
    let (non_blocking_error, error_guard) = tracing_appender::non_blocking(error_appender);
    guards.push(debug_guard);
    guards.push(error_guard);

    Some((non_blocking_debug, non_blocking_error))
}

pub fn setup_tracing(
    engine_name: &str,
    logging_config: &LoggingConfig,
) -> TracingGuard {
    let format = KashifFormat::new(engine_name);
    let mut guards = Vec::new();

    let file_writers = if logging_config.file_output {
        make_file_writers(engine_name, logging_config, &mut guards)
    } else {
        None
    };
    let (debug_writer, error_writer) = match file_writers {
        Some((debug_writer, error_writer)) => (Some(debug_writer), Some(error_writer)),
        None => (None, None),
    };

    // Console goes to stderr so stdout only carries command output
    let console_layer = tracing_subscriber::fmt::Layer::default()
        .with_ansi(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .event_format(format.clone())
        .with_writer(std::io::stderr)
        .with_filter(ConsoleFilter {
            min_level: console_level(),
        });

    // DEBUG log file - debug only
    let debug_layer = debug_writer.map(|writer| {
        tracing_subscriber::fmt::Layer::default()
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .event_format(format.clone())
            .with_writer(writer)
            .with_filter(DebugOnlyFilter)
    });

    // ERROR log file - warn and error only
    let error_layer = error_writer.map(|writer| {
        tracing_subscriber::fmt::Layer::default()
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .event_format(format.clone())
            .with_writer(writer)
            .with_filter(ErrorWarnFilter)
    });

    let subscriber = tracing_subscriber::registry().with(console_layer).with(debug_layer).with(error_layer);

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(()) => {
            tracing::info!("{}_logging_started::file_output::{}", engine_name, !guards.is_empty());
        },
        Err(e) => {
            eprintln!("Error setting up logging: {}", e);
        },
    }

    TracingGuard { _guards: guards }
}
