use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable naming the log file for the terminal UI.
pub const LOG_ENV: &str = "REGISTRAR_LOG";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Full-screen UI: a file or nothing, never the terminal.
    File,
    /// Headless commands log to stderr.
    Stderr,
}

/// Initialize tracing.
///
/// `RUST_LOG` overrides the configured level. In [`LogTarget::File`] mode
/// logging stays off unless `REGISTRAR_LOG` or `[logging] file` names a
/// path; the file is created as `{path}.{timestamp}.{pid}` so concurrent
/// instances never share one.
pub fn init_tracing(config: &LoggingConfig, target: LogTarget) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match target {
        LogTarget::Stderr => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init();
        }
        LogTarget::File => {
            let configured = std::env::var(LOG_ENV)
                .ok()
                .filter(|path| !path.is_empty())
                .or_else(|| config.file.as_ref().map(|p| p.display().to_string()));
            let Some(log_path) = configured else {
                return;
            };

            let unique_path = unique_log_path(Path::new(&log_path));
            let Ok(file) = std::fs::File::create(&unique_path) else {
                eprintln!("Warning: Failed to create log file: {}", unique_path);
                return;
            };

            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_level(true);

            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .try_init();
        }
    }
}

fn unique_log_path(path: &Path) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", path.display(), timestamp, pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_gets_timestamp_and_pid() {
        let path = unique_log_path(Path::new("/tmp/registrar.log"));
        let pid = std::process::id().to_string();
        assert!(path.starts_with("/tmp/registrar.log."));
        assert!(path.ends_with(&pid));
        assert_eq!(path.matches('.').count(), 3);
    }
}
