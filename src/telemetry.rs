//! Tracing setup for the service.
//!
//! - LOG_LEVEL: EnvFilter directives; defaults to `info` with debug output for
//!   the `exercise` (session events) and `matching_backend` (service) targets.
//! - LOG_FORMAT: "json" for structured lines, anything else for the pretty format.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVES: &str = "info,exercise=debug,matching_backend=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

fn filter_from(raw: Option<&str>) -> EnvFilter {
    raw.filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. A second call (tests, embedding) is a no-op.
pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let format = std::env::var("LOG_FORMAT").ok();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_from(level.as_deref()))
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let installed = match LogFormat::parse(format.as_deref()) {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    if installed.is_err() {
        tracing::debug!(target: "matching_backend", "Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_defaults_to_pretty() {
        assert_eq!(LogFormat::parse(None), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("text")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some(" JSON ")), LogFormat::Json);
    }

    #[test]
    fn bad_directives_fall_back_to_defaults() {
        assert_eq!(filter_from(Some("")).to_string(), EnvFilter::new(DEFAULT_DIRECTIVES).to_string());
        assert!(filter_from(Some("exercise=trace")).to_string().contains("exercise=trace"));
    }

    #[test]
    fn init_twice_is_harmless() {
        init_tracing();
        init_tracing();
    }
}
