//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogFormat;

/// Filter used when `RUST_LOG` is not set
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,swaggen=info",
        2 => "info,swaggen=debug",
        _ => "debug,swaggen=trace",
    }
}

/// Install the global subscriber, logging to stderr
///
/// `RUST_LOG` wins over the `-v` count. Installing twice is a no-op.
pub fn init_tracing(verbose: u8, format: LogFormat) {
    let base_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| verbosity_filter(verbose).to_string());
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let installed = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(verbose >= 2)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init(),
    };

    // A subscriber may already be set when running inside tests
    if let Err(e) = installed {
        tracing::debug!("Tracing already initialised: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filter() {
        assert_eq!(verbosity_filter(0), "warn");
        assert_eq!(verbosity_filter(1), "warn,swaggen=info");
        assert_eq!(verbosity_filter(9), "debug,swaggen=trace");
    }

    #[test]
    fn test_filters_parse() {
        for verbose in 0..4 {
            assert!(EnvFilter::try_new(verbosity_filter(verbose)).is_ok());
        }
    }
}
