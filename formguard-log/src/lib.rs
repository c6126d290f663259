//! Formguard Logging
//!
//! Structured logging for the formguard crates, controlled through
//! `FORMGUARD_*` environment variables.
//!
//! The validation engine never fails a pass because of a bad rule or a
//! faulty dependency predicate; it reports the problem here instead.
//!
//! # Usage
//!
//! ```rust
//! use formguard_log::{debug, info, warn, error, trace};
//!
//! debug!("Validating field {}", "email");
//! info!("Message table rebuilt with {} fields", 3);
//! warn!("Dependency function error: {}", "boom");
//! error!("Method {} failed", "regexp");
//!
//! // With target
//! debug!(target: "formguard::submit", "Sending {} pairs", 4);
//! ```
//!
//! # Environment Variables
//!
//! - `FORMGUARD_DEBUG=1` - Enable debug logging
//! - `FORMGUARD_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `FORMGUARD_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `FORMGUARD_LOG_COLOR=1|0` - Enable/disable colors
//! - `FORMGUARD_LOG_TIMESTAMPS=1|0` - Include timestamps

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Log Levels
// ============================================================================

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl Level {
    /// Parse a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Get level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    #[cfg(feature = "color")]
    fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => "TRACE".magenta(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
            Level::Off => "OFF".white(),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable, one field per column
    Pretty,
    /// Single short line
    Compact,
    /// One JSON object per line
    Json,
}

impl Format {
    /// Parse a format name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Global Configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether colors are enabled
    pub color: bool,
    /// Whether to include timestamps
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Json,
            color: false,
            timestamps: true,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    /// Read the configuration from `FORMGUARD_*` environment variables.
    ///
    /// Warnings are the default threshold: a validation pass only has
    /// something to say when a rule or dependency misbehaves.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debug = env_flag("FORMGUARD_DEBUG").unwrap_or(false);

        let level = env::var("FORMGUARD_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = env::var("FORMGUARD_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or(defaults.format);

        let color = env_flag("FORMGUARD_LOG_COLOR")
            .unwrap_or_else(|| env::var("NO_COLOR").is_err() && env::var("TERM").is_ok());

        let timestamps = env_flag("FORMGUARD_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps);

        Self {
            debug,
            level,
            format,
            color,
            timestamps,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Initialize the logging system eagerly.
///
/// Called implicitly by the first emitted log line.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Check if debug logging is enabled.
#[inline]
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Check if a log level is enabled.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

/// Whether a macro at `level` writes anything. Used by the macros.
#[doc(hidden)]
pub fn enabled(level: Level) -> bool {
    init();
    is_level_enabled(level) || (level == Level::Debug && is_debug_enabled())
}

/// Get current log level.
pub fn current_level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level at runtime.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Enable or disable debug mode at runtime.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

/// Get the global configuration.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Log Output
// ============================================================================

/// Write one log line to stderr. Used by the macros.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    let config = config();
    let line = match config.format {
        Format::Json => json_line(level, target, message),
        Format::Pretty | Format::Compact => text_line(level, target, message, config),
    };

    let _ = writeln!(std::io::stderr().lock(), "{}", line);
}

fn text_line(level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    let compact = config.format == Format::Compact;
    let mut line = String::new();

    if config.timestamps {
        let pattern = if compact { "%H:%M:%S" } else { "%Y-%m-%d %H:%M:%S%.3f" };
        line.push_str(&chrono::Local::now().format(pattern).to_string());
        line.push(' ');
    }

    if compact {
        line.push_str(&level.as_str()[..1]);
    } else {
        line.push_str(&level_label(level, config.color));
    }
    line.push(' ');

    match (target.is_empty(), compact) {
        (true, _) => {}
        (false, true) => line.push_str(&format!("{}: ", target)),
        (false, false) => line.push_str(&format!("[{}] ", target)),
    }

    line.push_str(message);
    line
}

#[cfg(feature = "color")]
fn level_label(level: Level, color: bool) -> String {
    if color {
        format!("{:5}", level.colored())
    } else {
        format!("{:5}", level.as_str())
    }
}

#[cfg(not(feature = "color"))]
fn level_label(level: Level, _color: bool) -> String {
    format!("{:5}", level.as_str())
}

#[cfg(feature = "json")]
fn json_line(level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "level": level.as_str(),
        "target": target,
        "message": message,
    })
    .to_string()
}

#[cfg(not(feature = "json"))]
fn json_line(level: Level, target: &str, message: &str) -> String {
    format!(
        r#"{{"timestamp":"{}","level":"{}","target":{:?},"message":{:?}}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        target,
        message
    )
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::enabled($level) {
            $crate::log($level, $target, &format!($($arg)+));
        }
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__emit!($level, target: module_path!(), $($arg)+)
    };
}

/// Log a trace message: rules skipped, dependencies resolved.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Trace, $($arg)+) };
}

/// Log a debug message.
///
/// Emitted when `FORMGUARD_DEBUG=1` or `FORMGUARD_LOG_LEVEL=debug`.
///
/// ```rust
/// use formguard_log::debug;
///
/// let field = "email";
/// debug!("Field {} skipped: rule not checkable", field);
/// debug!(target: "formguard::messages", "Rebuilt table");
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Info, $($arg)+) };
}

/// Log a warning: a dependency failed or a submission was refused.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Warn, $($arg)+) };
}

/// Log an error: a method or callback panicked.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Error, $($arg)+) };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Tracing subscriber honoring the `FORMGUARD_*` level.

    use super::*;

    /// Create a tracing subscriber that uses the formguard level as its
    /// default filter.
    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let config = config();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str().to_lowercase()));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config.color))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("debug"), Some(Level::Debug));
        assert_eq!(Level::parse("WARNING"), Some(Level::Warn));
        assert_eq!(Level::parse("none"), Some(Level::Off));
        assert_eq!(Level::parse("loud"), None);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(Format::parse("Pretty"), Some(Format::Pretty));
        assert_eq!(Format::parse("compact"), Some(Format::Compact));
        assert_eq!(Format::parse("json"), Some(Format::Json));
        assert_eq!(Format::parse("xml"), None);
    }

    #[test]
    fn test_runtime_level_changes() {
        let original_level = current_level();
        let original_debug = is_debug_enabled();

        set_level(Level::Trace);
        assert!(is_level_enabled(Level::Error));
        assert!(!is_level_enabled(Level::Off));

        set_level(Level::Error);
        assert!(!is_level_enabled(Level::Warn));

        set_debug(true);
        assert!(is_debug_enabled());
        assert_eq!(current_level(), Level::Debug);

        set_debug(original_debug);
        set_level(original_level);
    }

    #[test]
    fn test_text_lines() {
        let pretty = LogConfig {
            format: Format::Pretty,
            timestamps: false,
            color: false,
            ..LogConfig::default()
        };
        assert_eq!(
            text_line(Level::Warn, "formguard::deps", "dependency failed", &pretty),
            "WARN  [formguard::deps] dependency failed"
        );

        let compact = LogConfig {
            format: Format::Compact,
            ..pretty
        };
        assert_eq!(text_line(Level::Error, "", "boom", &compact), "E boom");
    }

    #[test]
    fn test_json_line() {
        let line = json_line(Level::Info, "formguard", "ready");
        assert!(line.contains(r#""level":"INFO""#));
        assert!(line.contains(r#""message":"ready""#));
    }

    #[test]
    fn test_macros_compile() {
        trace!("trace message");
        debug!("debug message");
        info!("info message");
        warn!("warn message");
        error!("error message");

        debug!(target: "formguard::test", "with target {}", 1);
        warn!(target: "formguard::test", "with target");
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_tracing_subscriber() {
        let subscriber = tracing_compat::subscriber();
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(field = "email", "routed through the formguard filter");
        });
    }
}
