//! Rolling file logs for the todo core.
//!
//! Events are `key=value` lines carrying ids, counts and outcomes. Todo text
//! never reaches a log line, panic payloads included.
//!
//! Logging is started from [`CoreConfig`] at most once per process; a config
//! without `log_dir` leaves it off.

use crate::config::CoreConfig;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "todo_core";
const ROTATE_AT_BYTES: u64 = 4 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 3;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Level and directory resolved from a [`CoreConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub dir: PathBuf,
}

impl LogSettings {
    /// Returns `None` when `config.log_dir` is unset.
    pub fn from_config(config: &CoreConfig) -> Result<Option<Self>, LoggingError> {
        let Some(dir) = config.log_dir.as_ref() else {
            return Ok(None);
        };
        if !dir.is_absolute() {
            return Err(LoggingError::RelativeDir(dir.clone()));
        }
        let level = parse_level(&config.log_level)?;
        Ok(Some(Self {
            level,
            dir: dir.clone(),
        }))
    }
}

#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    RelativeDir(PathBuf),
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    /// Logging already runs with different settings.
    AlreadyActive(LogSettings),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}`; expected off|error|warn|info|debug|trace"
            ),
            Self::RelativeDir(path) => {
                write!(f, "log_dir must be absolute, got `{}`", path.display())
            }
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                path.display()
            ),
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::AlreadyActive(active) => write!(
                f,
                "logging already active at `{}` with level `{}`",
                active.dir.display(),
                active.level
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            Self::UnknownLevel(_) | Self::RelativeDir(_) | Self::AlreadyActive(_) => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Starts file logging as described by `config`.
///
/// Returns `Ok(false)` when `config` has no `log_dir`, `Ok(true)` once
/// logging is active. Repeating the call with equal settings is a no-op.
///
/// # Errors
/// - `UnknownLevel` / `RelativeDir` for unusable settings.
/// - `CreateDir` / `Backend` when the log files cannot be opened.
/// - `AlreadyActive` when logging runs with different settings.
pub fn init_logging(config: &CoreConfig) -> Result<bool, LoggingError> {
    let Some(settings) = LogSettings::from_config(config)? else {
        return Ok(false);
    };

    let active = ACTIVE.get_or_try_init(|| start(&settings))?;
    if active.settings != settings {
        return Err(LoggingError::AlreadyActive(active.settings.clone()));
    }
    Ok(true)
}

/// Settings of the running logger, if any.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE.get().map(|active| active.settings.clone())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(settings: &LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.dir).map_err(|source| LoggingError::CreateDir {
        path: settings.dir.clone(),
        source,
    })?;

    let level_spec = LogSpecification::builder().default(settings.level).build();
    let handle = Logger::with(level_spec)
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    install_panic_hook();
    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={}",
        settings.level,
        settings.dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        settings: settings.clone(),
        _handle: handle,
    })
}

fn parse_level(value: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = value.trim();
    trimmed
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::UnknownLevel(trimmed.to_string()))
}

/// Runs inside the one-time logger start, so it chains at most once.
fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Payloads may quote todo text; only the location is logged.
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let thread = std::thread::current()
            .name()
            .unwrap_or("unnamed")
            .to_string();
        error!("event=panic module=logging status=error location={location} thread={thread}");
        previous_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, parse_level, LogSettings, LoggingError};
    use crate::config::CoreConfig;
    use log::LevelFilter;
    use std::path::PathBuf;

    fn config_with(level: &str, dir: Option<PathBuf>) -> CoreConfig {
        CoreConfig {
            log_level: level.to_string(),
            log_dir: dir,
            ..CoreConfig::default()
        }
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(matches!(
            parse_level("loud"),
            Err(LoggingError::UnknownLevel(ref level)) if level == "loud"
        ));
    }

    #[test]
    fn missing_log_dir_leaves_logging_off() {
        assert!(LogSettings::from_config(&CoreConfig::default())
            .unwrap()
            .is_none());
        assert!(!init_logging(&CoreConfig::default()).unwrap());
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let config = config_with("info", Some(PathBuf::from("logs/dev")));
        assert!(matches!(
            init_logging(&config),
            Err(LoggingError::RelativeDir(_))
        ));
    }

    #[test]
    fn init_is_repeatable_with_same_settings_and_rejects_others() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let config = config_with("info", Some(log_dir.clone()));

        assert!(init_logging(&config).unwrap());
        assert!(init_logging(&config).unwrap());
        assert!(log_dir.is_dir());

        let louder = config_with("debug", Some(log_dir.clone()));
        assert!(matches!(
            init_logging(&louder),
            Err(LoggingError::AlreadyActive(ref active)) if active.level == LevelFilter::Info
        ));

        let moved = config_with("info", Some(dir.path().join("elsewhere")));
        assert!(matches!(
            init_logging(&moved),
            Err(LoggingError::AlreadyActive(_))
        ));

        let status = logging_status().unwrap();
        assert_eq!(status.dir, log_dir);
        assert_eq!(status.level, LevelFilter::Info);
    }
}
