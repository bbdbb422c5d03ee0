//! Tracing setup for the terminal wizard.
//!
//! The wizard owns stdout, so console logging goes to stderr. A log file
//! can be attached after start-up; until then file output is discarded.
//! Level, console and file can all be changed at runtime.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber, debug};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, reload};

use crate::config::LoggingSection;

const FALLBACK_LEVEL: &str = "warn";

/// `HH:MM:SS.mmm LEVEL target: fields`, coloured when the writer allows.
struct LogFormat;

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");
        let level = *meta.level();

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m {}{level:>5}\x1b[0m \x1b[2m{}:\x1b[0m ",
                level_colour(level),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {level:>5} {}: ", meta.target())?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file that can be opened, swapped or closed after the subscriber is
/// installed. Writes with no file open are dropped.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(
        &self,
        file: Option<File>,
    ) {
        *self.lock() = file;
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |f| f.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |f| f.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.lock())
    }
}

type ReloadLevel = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type GateConsole = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

/// Runtime switches captured when the subscriber is installed.
struct Controls {
    reload_level: ReloadLevel,
    gate_console: GateConsole,
    file: LogFile,
}

static CONTROLS: OnceLock<Controls> = OnceLock::new();

fn controls() -> Result<&'static Controls> {
    CONTROLS.get().ok_or_else(|| anyhow!("logging not yet initialized"))
}

/// `RUST_LOG` wins over the configured level.
fn initial_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

fn reload_level<S>(handle: reload::Handle<EnvFilter, S>) -> ReloadLevel
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |level: &str| {
        let filter = EnvFilter::try_new(level)
            .map_err(|e| anyhow!("invalid log level '{level}': {e}"))?;
        handle
            .reload(filter)
            .map_err(|e| anyhow!("filter reload failed: {e}"))
    })
}

fn gate_console<S>(handle: reload::Handle<EnvFilter, S>) -> GateConsole
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |enabled: bool| {
        let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
        handle
            .reload(gate)
            .map_err(|e| anyhow!("console reload failed: {e}"))
    })
}

/// Changes the active filter. Accepts a bare level or any `EnvFilter`
/// directive.
pub fn set_log_level(level: &str) -> Result<()> {
    (controls()?.reload_level)(level)
}

/// Shows or hides console output without affecting the log file.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    (controls()?.gate_console)(enabled)
}

/// Starts appending to `path`, closing any file already open. The
/// directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let controls = controls()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;
    controls.file.replace(Some(file));
    debug!(path = %path.display(), "file logging enabled");
    Ok(())
}

pub fn disable_file_logging() {
    if let Some(controls) = CONTROLS.get() {
        controls.file.replace(None);
    }
}

/// Installs the global subscriber at `level`. Later calls are ignored.
pub fn init_logging(level: &str) {
    let file = LogFile::default();
    // Console gate sits under the global filter, which stays the ceiling.
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let (level_filter, level_handle) = reload::Layer::new(initial_filter(level));

    let console = tracing_subscriber::fmt::layer()
        .event_format(LogFormat)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(console_gate);
    let to_file = tracing_subscriber::fmt::layer()
        .event_format(LogFormat)
        .with_ansi(false)
        .with_writer(file.clone());

    let installed = tracing_subscriber::registry()
        .with(level_filter)
        .with(console)
        .with(to_file)
        .try_init()
        .is_ok();
    if installed {
        let _ = CONTROLS.set(Controls {
            reload_level: reload_level(level_handle),
            gate_console: gate_console(console_handle),
            file,
        });
    }
}

/// Installs the subscriber and applies the console and file settings of
/// the `[logging]` section.
pub fn init_from_config(section: &LoggingSection) -> Result<()> {
    init_logging(&section.level);
    set_console_enabled(section.console)?;
    match &section.file {
        Some(path) => enable_file_logging(path),
        None => {
            disable_file_logging();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_log_file_swallows_writes() {
        let file = LogFile::default();
        let mut writer = file.make_writer();

        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        assert!(writer.flush().is_ok());
    }

    #[test]
    fn each_level_has_its_own_colour() {
        let colours = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE]
            .map(level_colour);

        for (i, colour) in colours.iter().enumerate() {
            assert!(!colours[i + 1..].contains(colour));
        }
    }

    #[test]
    fn unparsable_level_falls_back() {
        // Must not panic.
        let _ = initial_filter("[[[");
    }
}
