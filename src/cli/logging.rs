//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::domain::config::LogLevel;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the filter follows `level`.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(level.is_debug())
        .without_time()
        .try_init();
}

/// Filter directive scoped to this crate, with everything else at `warn`
fn default_directive(level: LogLevel) -> String {
    match level {
        LogLevel::Normal => "warn".to_string(),
        _ => format!("warn,clipctl={}", level.filter_directive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_per_level() {
        assert_eq!(default_directive(LogLevel::Normal), "warn");
        assert_eq!(default_directive(LogLevel::Verbose), "warn,clipctl=info");
        assert_eq!(default_directive(LogLevel::Debug), "warn,clipctl=debug");
    }
}
