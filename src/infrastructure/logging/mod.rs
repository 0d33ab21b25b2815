//! Log file session for one invocation.
//!
//! Every record is persisted as `[YYYY-MM-DD HH:MM:SS] LEVEL: message`.
//! Verbose runs also echo records to stdout and lower the threshold to
//! DEBUG. Console lines (see [`console`]) go to stdout bare and to the log
//! file timestamped, never twice to the terminal.

use chrono::Local;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{EnvFilter, LevelFilter, Targets};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::common::error::ComposectlError;
use crate::common::result::ComposectlResult;

/// Name of the log file inside the base directory
pub const LOG_FILE_NAME: &str = "composectl.log";

/// Target of user-facing progress lines
pub const CONSOLE_TARGET: &str = "composectl::console";

/// Environment variable overriding the log-file filter (`EnvFilter` syntax)
pub const LOG_FILTER_ENV: &str = "COMPOSECTL_LOG";

/// Print a progress line to stdout and persist it to the log file
pub fn console(message: impl fmt::Display) {
    let message = message.to_string();
    println!("{}", message);
    tracing::info!(target: CONSOLE_TARGET, "{}", message);
}

/// `[timestamp] LEVEL: message` lines
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = match *event.metadata().level() {
            Level::ERROR => "ERROR",
            Level::WARN => "WARN",
            Level::INFO => "INFO",
            Level::DEBUG => "DEBUG",
            Level::TRACE => "TRACE",
        };

        write!(
            writer,
            "[{}] {}: ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Keeps the log subscriber installed; dropping it closes the log file
pub struct LogSession {
    path: PathBuf,
    _guard: DefaultGuard,
}

impl LogSession {
    /// Open `<base_dir>/composectl.log` and install the subscriber for this thread
    pub fn start(base_dir: &Path, verbose: bool) -> ComposectlResult<Self> {
        let path = base_dir.join(LOG_FILE_NAME);
        let file = open_log_file(&path)?;
        let guard = install(Arc::new(file), std::io::stdout, verbose);
        Ok(Self {
            path,
            _guard: guard,
        })
    }

    /// Log file in use
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_log_file(path: &Path) -> ComposectlResult<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ComposectlError::filesystem_error_with_source(
                "creating log directory",
                Some(parent.to_path_buf()),
                e,
            )
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            ComposectlError::filesystem_error_with_source(
                "opening log file",
                Some(path.to_path_buf()),
                e,
            )
        })
}

/// Install the file layer (and the stdout echo layer when verbose) as the
/// thread-local default subscriber.
pub fn install<F, E>(file_writer: F, echo_writer: E, verbose: bool) -> DefaultGuard
where
    F: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    E: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let default_level = if verbose { "debug" } else { "info" };
    let file_filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .event_format(LogLineFormat)
        .with_filter(file_filter);

    let echo_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(echo_writer)
            .with_ansi(false)
            .event_format(LogLineFormat)
            .with_filter(
                Targets::new()
                    .with_default(LevelFilter::DEBUG)
                    .with_target(CONSOLE_TARGET, LevelFilter::OFF),
            )
    });

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(echo_layer);

    tracing::subscriber::set_default(subscriber)
}
