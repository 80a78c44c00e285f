use std::io;
use std::path::Path;

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

pub const LOG_LEVEL_ENV: &str = "OPEN_WALLET_DEBUG";

fn marker_level(dir: &Path) -> Option<LevelFilter> {
    if dir.join("trace").exists() {
        return Some(LevelFilter::Trace);
    }
    if dir.join("debug").exists() {
        return Some(LevelFilter::Debug);
    }
    None
}

fn env_level(value: Option<&str>) -> LevelFilter {
    match value {
        Some("trace") => LevelFilter::Trace,
        Some("debug") => LevelFilter::Debug,
        Some("info") => LevelFilter::Info,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        Some("off") => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

fn logging_level() -> LevelFilter {
    // Marker files next to the executable win over the environment
    if let Some(level) = std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .and_then(marker_level)
    {
        return level;
    }
    env_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
}

/// Route `log` records to stderr; stdout is reserved for wallet contents.
pub fn setup_logger() {
    let level_filter = logging_level();

    if let Err(e) = Dispatch::new()
        .format(move |out, message, record| {
            let file = record.file().unwrap_or("unknown_file");
            let line = record.line().unwrap_or(0);

            if level_filter == LevelFilter::Info {
                out.finish(format_args!(
                    "[{}]: {} <{}:{}>",
                    record.level(),
                    message,
                    file,
                    line,
                ));
            } else {
                out.finish(format_args!(
                    "[{}][{}]: {} <{}:{}>",
                    Local::now().format("%b-%d-%Y %H:%M:%S.%f"),
                    record.level(),
                    message,
                    file,
                    line,
                ));
            }
        })
        .level(level_filter)
        .chain(io::stderr())
        .apply()
    {
        eprintln!("Logger initialization failed: {e}");
    }
    log::debug!("Enabled log {level_filter}.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_env_level() {
        assert_eq!(env_level(Some("trace")), LevelFilter::Trace);
        assert_eq!(env_level(Some("warn")), LevelFilter::Warn);
        assert_eq!(env_level(Some("off")), LevelFilter::Off);
        assert_eq!(env_level(Some("loud")), LevelFilter::Info);
        assert_eq!(env_level(None), LevelFilter::Info);
    }

    #[test]
    fn test_marker_files() {
        let dir = TempDir::new().unwrap();
        assert_eq!(marker_level(dir.path()), None);

        std::fs::write(dir.path().join("debug"), b"").unwrap();
        assert_eq!(marker_level(dir.path()), Some(LevelFilter::Debug));

        std::fs::write(dir.path().join("trace"), b"").unwrap();
        assert_eq!(marker_level(dir.path()), Some(LevelFilter::Trace));
    }
}
