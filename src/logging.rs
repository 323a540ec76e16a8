//! Process-wide log sink: one timestamped file per run.

use chrono::{DateTime, Local};
use env_logger::{Env, Target};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::LoggingConfig;

/// `log_%Y-%m-%d_%H-%M-%S.log` inside `dir`
pub fn log_file_path(dir: &Path, started: DateTime<Local>) -> PathBuf {
    dir.join(started.format("log_%Y-%m-%d_%H-%M-%S.log").to_string())
}

/// Initialize the global logger. Call once, before anything logs.
///
/// `RUST_LOG` overrides the configured level. Falls back to stderr when the
/// log file cannot be created. Returns the log file path when this call
/// installed a file logger; `None` if it fell back to stderr or a logger was
/// already installed.
pub fn init(config: &LoggingConfig) -> Option<PathBuf> {
    let mut builder =
        env_logger::Builder::from_env(Env::default().filter_or("RUST_LOG", config.level.as_str()));

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            record.level(),
            record.args()
        )
    });

    let path = log_file_path(&config.dir, Local::now());
    let file = std::fs::create_dir_all(&config.dir).and_then(|_| File::create(&path));

    let log_path = match file {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
            Some(path)
        }
        Err(e) => {
            eprintln!(
                "Cannot open log file {} ({}); logging to stderr",
                path.display(),
                e
            );
            builder.target(Target::Stderr);
            None
        }
    };

    // A second init (tests, embedding) keeps the first logger.
    match builder.try_init() {
        Ok(()) => log_path,
        Err(e) => {
            eprintln!("Logger already initialized ({}); keeping it", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_name() {
        let started = Local.with_ymd_and_hms(2024, 1, 3, 9, 5, 7).unwrap();
        let path = log_file_path(Path::new("logs"), started);
        assert_eq!(path, PathBuf::from("logs/log_2024-01-03_09-05-07.log"));
    }

    #[test]
    fn test_init_reports_path_only_once() {
        let first = tempfile::TempDir::new().unwrap();
        let second = tempfile::TempDir::new().unwrap();
        let config = |dir: &tempfile::TempDir| LoggingConfig {
            dir: dir.path().join("nested/logs"),
            level: "info".to_string(),
        };

        let path = init(&config(&first)).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(first.path()));

        // The global logger is taken, so the second file is not in use
        assert_eq!(init(&config(&second)), None);
    }
}
