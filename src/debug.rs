//! Stderr backend for the `log` facade.
//!
//! Every record is printed as `[+0000ms] [LEVEL] [target] message`, with the
//! elapsed time counted from [`init`]. Warnings and errors are always shown;
//! debug and trace output needs `--debug` or `UNICORN_DEBUG=1`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

/// Environment variable that turns on debug output.
pub const DEBUG_ENV: &str = "UNICORN_DEBUG";

/// Global debug mode flag.
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Start time stored as millis since UNIX epoch (atomic-safe).
static START_TIME_MS: AtomicU64 = AtomicU64::new(0);

static LOGGER: StderrLogger = StderrLogger;

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Install the stderr logger.
///
/// `debug` (or a truthy [`DEBUG_ENV`]) raises the level to `trace`. Calling
/// this again only updates the level. Returns whether debug output is on.
pub fn init(debug: bool) -> bool {
    let enabled = debug || env_enabled();
    START_TIME_MS.store(now_ms(), Ordering::SeqCst);
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);

    // A logger may already be installed (tests, embedding apps); keep it.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(if enabled {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    });
    enabled
}

/// True if [`DEBUG_ENV`] is set to `1` or `true`.
#[must_use]
pub fn env_enabled() -> bool {
    std::env::var(DEBUG_ENV).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Returns true if debug mode is enabled.
#[inline]
pub fn is_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Gets elapsed time since the logger was initialised.
fn elapsed_ms() -> u64 {
    let start = START_TIME_MS.load(Ordering::Relaxed);
    if start == 0 {
        return 0;
    }
    now_ms().saturating_sub(start)
}

fn color_code(level: Level) -> &'static str {
    match level {
        Level::Trace => "\x1b[90m", // Gray
        Level::Debug => "\x1b[36m", // Cyan
        Level::Info => "\x1b[32m",  // Green
        Level::Warn => "\x1b[33m",  // Yellow
        Level::Error => "\x1b[31m", // Red
    }
}

fn format_line(elapsed: u64, level: Level, target: &str, message: &str) -> String {
    format!(
        "[+{:04}ms] {}[{:5}]\x1b[0m [{}] {}",
        elapsed,
        color_code(level),
        level.as_str(),
        target,
        message
    )
}

/// `log::Log` implementation writing to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Warn || is_enabled()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            elapsed_ms(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        let _ = writeln!(io::stderr(), "{line}");
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// RAII guard logging entry and exit (with duration) of a scope at trace
/// level.
pub struct TimingGuard {
    target: &'static str,
    operation: String,
    start: Instant,
}

impl TimingGuard {
    /// Creates a new timing guard.
    pub fn new(target: &'static str, operation: impl Into<String>) -> Self {
        let operation = operation.into();
        log::trace!(target: target, "-> {operation}");
        Self {
            target,
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::trace!(
            target: self.target,
            "<- {} ({:.2}ms)",
            self.operation,
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

/// Creates a timing guard for a scope.
#[macro_export]
macro_rules! time_scope {
    ($target:expr, $operation:expr) => {
        let _guard = $crate::debug::TimingGuard::new($target, $operation);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line(42, Level::Info, "render", "hello");
        assert!(line.starts_with("[+0042ms] "));
        assert!(line.contains("[INFO ]"));
        assert!(line.ends_with("[render] hello"));
    }

    #[test]
    fn test_level_has_color() {
        for level in [Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error] {
            assert!(color_code(level).starts_with("\x1b["));
        }
    }

    #[test]
    fn test_warnings_always_enabled() {
        let meta = Metadata::builder().level(Level::Warn).target("t").build();
        assert!(StderrLogger.enabled(&meta));
        let meta = Metadata::builder().level(Level::Error).target("t").build();
        assert!(StderrLogger.enabled(&meta));
    }

    #[test]
    fn test_init_with_debug() {
        assert!(init(true));
        assert!(is_enabled());
        let meta = Metadata::builder().level(Level::Trace).target("t").build();
        assert!(StderrLogger.enabled(&meta));
        log::debug!(target: "test", "debug output goes to stderr");
        {
            let _guard = TimingGuard::new("test", "scope");
        }
    }

    #[test]
    fn test_elapsed_after_init() {
        init(true);
        let t1 = elapsed_ms();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let t2 = elapsed_ms();
        assert!(t2 >= t1, "elapsed should increase: {t2} >= {t1}");
    }

    #[test]
    fn test_time_scope_macro() {
        time_scope!("test", "macro scope");
        let x = 1 + 1;
        assert_eq!(x, 2);
    }
}
