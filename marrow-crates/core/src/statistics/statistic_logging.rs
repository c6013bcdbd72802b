//! The process-wide destination of the statistics.
//!
//! Nothing is written until [`configure_statistic_logging`] has been called; afterwards every
//! statistic is written as `{prefix} {name}={value}` to the configured [`StatisticSink`].

use std::fmt::Debug;
use std::fmt::Display;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;
use log::info;
use log::warn;

/// Where the statistic lines end up.
pub enum StatisticSink {
    /// Every line is logged at the info level with target `statistics`.
    Log,
    /// Every line is written to the provided writer.
    Writer(Box<dyn Write + Send>),
}

impl Debug for StatisticSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatisticSink::Log => write!(f, "Log"),
            StatisticSink::Writer(_) => write!(f, "Writer(<writer>)"),
        }
    }
}

/// How the statistics are formatted and where they are written.
#[derive(Debug)]
pub struct StatisticOptions {
    prefix: String,
    postfix: Option<String>,
    casing: Option<Case>,
    sink: StatisticSink,
}

impl StatisticOptions {
    /// Statistics are prefixed with `prefix` and logged through the [`log`] crate.
    pub fn new(prefix: impl Into<String>) -> Self {
        StatisticOptions {
            prefix: prefix.into(),
            postfix: None,
            casing: None,
            sink: StatisticSink::Log,
        }
    }

    /// The line written by [`log_statistic_postfix`], e.g. to close a block of statistics.
    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = Some(postfix.into());
        self
    }

    /// Converts the names of the statistics to `casing` before writing them.
    pub fn with_casing(mut self, casing: Case) -> Self {
        self.casing = Some(casing);
        self
    }

    pub fn with_sink(mut self, sink: StatisticSink) -> Self {
        self.sink = sink;
        self
    }

    fn write_line(&mut self, line: impl Display) -> std::io::Result<()> {
        match &mut self.sink {
            StatisticSink::Log => {
                info!(target: "statistics", "{line}");
                Ok(())
            }
            StatisticSink::Writer(writer) => writeln!(writer, "{line}"),
        }
    }
}

static STATISTIC_OPTIONS: OnceLock<Mutex<StatisticOptions>> = OnceLock::new();

/// Enables the logging of statistics with the provided `options`.
///
/// Only the first configuration takes effect; returns whether it was this one.
pub fn configure_statistic_logging(options: StatisticOptions) -> bool {
    STATISTIC_OPTIONS.set(Mutex::new(options)).is_ok()
}

/// Returns whether [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}

/// Writes the statistic `name` with `value`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(options) = STATISTIC_OPTIONS.get() else {
        return;
    };
    let Ok(mut options) = options.lock() else {
        return;
    };

    let name = match options.casing {
        Some(casing) => name.to_string().to_case(casing),
        None => name.to_string(),
    };
    let line = format!("{} {name}={value}", options.prefix);
    if let Err(error) = options.write_line(line) {
        warn!("Failed to write the statistic '{name}': {error}");
    }
}

/// Writes the configured postfix, if there is one.
pub fn log_statistic_postfix() {
    let Some(options) = STATISTIC_OPTIONS.get() else {
        return;
    };
    let Ok(mut options) = options.lock() else {
        return;
    };

    if let Some(postfix) = options.postfix.clone() {
        if let Err(error) = options.write_line(postfix) {
            warn!("Failed to write the statistic postfix: {error}");
        }
    }
}
