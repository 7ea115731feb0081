use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: &str = "shipledger=info,shipledger_core=info";

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` decides what is logged when set; otherwise the shell's own crates
/// log at `info`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = build_filter(rust_log.as_deref());

        // Logs go to stderr so script output stays clean.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn build_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|err| {
            eprintln!("ignoring invalid RUST_LOG `{directives}`: {err}");
            EnvFilter::new(DEFAULT_DIRECTIVES)
        }),
        None => EnvFilter::new(DEFAULT_DIRECTIVES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_is_not_overridden_by_defaults() {
        let filter = build_filter(Some("shipledger=debug"));
        assert_eq!(filter.to_string(), "shipledger=debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let quiet = build_filter(Some("warn"));
        assert_eq!(quiet.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn defaults_apply_when_rust_log_is_unset_or_blank() {
        for rust_log in [None, Some(""), Some("  ")] {
            let filter = build_filter(rust_log);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
            assert!(filter.to_string().contains("shipledger=info"));
        }
    }

    #[test]
    fn invalid_rust_log_falls_back_to_defaults() {
        let filter = build_filter(Some("shipledger=loud"));
        assert!(filter.to_string().contains("shipledger_core=info"));
    }
}
