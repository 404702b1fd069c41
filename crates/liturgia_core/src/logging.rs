//! Rolling file logs for core and shells.
//!
//! # Responsibility
//! - Start one `flexi_logger` backend per process.
//! - Route panics into the log before the default hook runs.
//!
//! # Invariants
//! - The first successful `init_logging` fixes level and directory; later
//!   calls with the same settings succeed, anything else is rejected.
//! - Initialization never panics.
//! - Log lines carry metadata only; liturgical content is never logged.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "liturgia";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 5;
const PANIC_SUMMARY_CHARS: usize = 120;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub log_dir: PathBuf,
}

impl LogSettings {
    /// Parses a level name and an absolute directory.
    ///
    /// # Errors
    /// - [`LoggingError::UnknownLevel`] for names other than
    ///   `off|error|warn|info|debug|trace` (`warning` is accepted).
    /// - [`LoggingError::RelativeDir`] for empty or relative directories.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, LoggingError> {
        let level_name = level.trim().to_ascii_lowercase();
        let level = match level_name.as_str() {
            "warning" => LevelFilter::Warn,
            name => name
                .parse::<LevelFilter>()
                .map_err(|_| LoggingError::UnknownLevel(level.trim().to_string()))?,
        };

        let log_dir = Path::new(log_dir.trim());
        if !log_dir.is_absolute() {
            return Err(LoggingError::RelativeDir(log_dir.to_path_buf()));
        }

        Ok(Self {
            level,
            log_dir: log_dir.to_path_buf(),
        })
    }
}

/// Logging setup failure.
#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    RelativeDir(PathBuf),
    CreateDir { dir: PathBuf, source: std::io::Error },
    Backend(flexi_logger::FlexiLoggerError),
    /// A logger with other settings is already running.
    Conflict { active: LogSettings },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error|off"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "logger backend failed to start: {err}"),
            Self::Conflict { active } => write!(
                f,
                "logging already active at `{}` with level {}",
                active.log_dir.display(),
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
            Self::UnknownLevel(_) | Self::RelativeDir(_) | Self::Conflict { .. } => None,
        }
    }
}

/// Starts file logging under `log_dir`.
///
/// Files are named `liturgia*.log`, rotated by size with a bounded history.
///
/// # Errors
/// - See [`LogSettings::parse`] for argument validation.
/// - [`LoggingError::Conflict`] when logging already runs with other settings.
/// - [`LoggingError::CreateDir`] / [`LoggingError::Backend`] for IO failures.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let requested = LogSettings::parse(level, log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_logger(requested.clone()))?;
    if active.settings != requested {
        return Err(LoggingError::Conflict {
            active: active.settings.clone(),
        });
    }
    Ok(())
}

/// Settings of the running logger, if any.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE.get().map(|active| active.settings.clone())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|source| LoggingError::CreateDir {
        dir: settings.log_dir.clone(),
        source,
    })?;

    let spec = LogSpecification::builder().default(settings.level).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(LoggingError::Backend)?;

    install_panic_hook();
    info!(
        "event=logging_start module=logging status=ok app=liturgia os={} version={} level={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        settings.level
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string payload".to_string());
        error!(
            "event=panic module=logging status=error location={location} payload={}",
            one_line(&payload, PANIC_SUMMARY_CHARS)
        );
        previous(panic_info);
    }));
}

/// Flattens `value` to one line of at most `max_chars` characters.
fn one_line(value: &str, max_chars: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut cut = flat.chars().take(max_chars).collect::<String>();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, one_line, LogSettings, LoggingError};
    use log::LevelFilter;

    #[test]
    fn parse_accepts_level_aliases() {
        let settings = LogSettings::parse(" WARNING ", "/var/log/liturgia").expect("settings");
        assert_eq!(settings.level, LevelFilter::Warn);
        assert_eq!(
            LogSettings::parse("Trace", "/tmp").expect("settings").level,
            LevelFilter::Trace
        );
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            LogSettings::parse("verbose", "/tmp"),
            Err(LoggingError::UnknownLevel(level)) if level == "verbose"
        ));
        assert!(matches!(
            LogSettings::parse("info", "logs/dev"),
            Err(LoggingError::RelativeDir(_))
        ));
        assert!(matches!(
            LogSettings::parse("info", "  "),
            Err(LoggingError::RelativeDir(_))
        ));
    }

    #[test]
    fn one_line_flattens_and_truncates() {
        assert_eq!(one_line("Glória\na Deus", 40), "Glória a Deus");
        assert_eq!(one_line("abcdefgh\rij", 4), "abcd...");
    }

    #[test]
    fn init_logging_keeps_first_settings() {
        let first = tempfile::tempdir().expect("temp dir");
        let second = tempfile::tempdir().expect("temp dir");
        let first_dir = first.path().to_string_lossy().to_string();
        let second_dir = second.path().to_string_lossy().to_string();

        init_logging("info", &first_dir).expect("first init");
        init_logging("INFO", &first_dir).expect("same settings");
        assert!(matches!(
            init_logging("debug", &first_dir),
            Err(LoggingError::Conflict { .. })
        ));
        assert!(matches!(
            init_logging("info", &second_dir),
            Err(LoggingError::Conflict { .. })
        ));

        let active = logging_status().expect("logging active");
        assert_eq!(active.level, LevelFilter::Info);
        assert_eq!(active.log_dir, first.path());

        log::logger().flush();
        let has_log_file = std::fs::read_dir(first.path())
            .expect("log dir")
            .filter_map(Result::ok)
            .any(|entry| entry.file_name().to_string_lossy().starts_with("liturgia"));
        assert!(has_log_file);
    }
}
