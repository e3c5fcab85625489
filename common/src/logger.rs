use std::io::Write;
use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

pub struct Logger {
    prefix: Option<String>,
    target: LogTarget,
}

impl Logger {
    fn new(prefix: Option<String>, target: LogTarget) -> Self {
        Self { prefix, target }
    }

    fn format(&self, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}] {}", timestamp, prefix, message),
            None => format!("[{}] {}", timestamp, message),
        }
    }

    pub fn log(&self, message: &str) {
        let line = self.format(message);
        let _ = match self.target {
            LogTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            LogTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }
}

pub fn init_logger(prefix: Option<String>, target: LogTarget) {
    LOGGER.get_or_init(|| Logger::new(prefix, target));
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

/// Messages logged before [`init_logger`] are dropped, so library users and
/// tests stay quiet unless they opt in.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::logger::is_initialized() {
            $crate::logger::log(&format!($($arg)*))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_prefix() {
        let logger = Logger::new(Some("Viper".to_string()), LogTarget::Stderr);
        let line = logger.format("food placed");
        assert!(line.ends_with("][Viper] food placed"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn test_format_without_prefix() {
        let logger = Logger::new(None, LogTarget::Stdout);
        let line = logger.format("tick");
        assert!(line.ends_with("] tick"));
        assert!(!line.contains("]["));
    }
}
