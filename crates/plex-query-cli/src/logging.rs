use anyhow::Result;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Filter directive for a verbosity level.
/// stdout carries the report, so the default only lets warnings through to stderr.
pub fn filter_directive(verbose_level: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose_level {
        0 => "warn",
        1 => "info",
        // -vv: debug level but suppress noisy hyper logs
        2 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    }
}

pub fn init_logging(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let directive = filter_directive(verbose_level, quiet);
    let filter = if quiet {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or(false);

    let registry = Registry::default().with(filter);

    if let Some(log_path) = log_file {
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&log_dir)?;

        let log_filename = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename: {}", log_path.display()))?;

        // Daily rotation: plex-query.log -> plex-query.2026-01-17
        let log_prefix = log_filename
            .rsplitn(2, '.')
            .nth(1)
            .unwrap_or(log_filename);
        let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, log_prefix);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);
            registry.with(json_layer).try_init()?;
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);
            registry.with(fmt_layer).try_init()?;
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(json_layer).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(fmt_layer).try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_levels() {
        assert_eq!(filter_directive(0, false), "warn");
        assert_eq!(filter_directive(1, false), "info");
        assert!(filter_directive(2, false).starts_with("debug"));
        assert_eq!(filter_directive(3, false), "trace");
        assert_eq!(filter_directive(9, false), "trace");
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(filter_directive(3, true), "error");
    }
}
