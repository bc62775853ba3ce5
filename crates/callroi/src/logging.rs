use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "callroi.log";

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Size-based trimming of the log file, applied once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRotation {
    /// Size above which the log is trimmed
    pub max_bytes: u64,
    /// Approximate size of the recent tail that survives a trim
    pub keep_bytes: u64,
}

impl Default for LogRotation {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            keep_bytes: 1024 * 1024,
        }
    }
}

impl LogRotation {
    /// Trim `log_path` to its recent whole lines when it is over `max_bytes`.
    ///
    /// Returns whether the file was rewritten. A missing file is left alone.
    pub fn apply(&self, log_path: &Path) -> io::Result<bool> {
        let len = match fs::metadata(log_path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if len <= self.max_bytes {
            return Ok(false);
        }

        let tail = read_tail(log_path, self.keep_bytes)?;
        let body = match tail.iter().position(|&b| b == b'\n') {
            Some(newline) => &tail[newline + 1..],
            None => &tail[..],
        };

        fs::write(log_path, [ROTATION_MARKER, body].concat())?;
        Ok(true)
    }
}

fn read_tail(path: &Path, bytes: u64) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    file.seek(SeekFrom::Start(len.saturating_sub(bytes)))?;

    let mut tail = Vec::with_capacity(bytes.min(len) as usize);
    file.read_to_end(&mut tail)?;
    Ok(tail)
}

/// Default filter when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> String {
    format!("callroi={level},callroi_core=warn")
}

/// Initialize logging to `{data_dir}/callroi.log`.
///
/// The log is trimmed to its last 1MB whenever it exceeds 5MB. `RUST_LOG`
/// overrides `level`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<PathBuf> {
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE_NAME);

    if let Err(e) = LogRotation::default().apply(&log_path) {
        eprintln!("Warning: Failed to rotate log file: {e}");
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "callroi logging initialized");
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rotation(max_bytes: u64, keep_bytes: u64) -> LogRotation {
        LogRotation {
            max_bytes,
            keep_bytes,
        }
    }

    #[test]
    fn test_small_log_is_left_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, "one\ntwo\n").unwrap();

        assert!(!rotation(1024, 512).apply(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_missing_log_is_not_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        assert!(!rotation(10, 5).apply(&path).unwrap());
    }

    #[test]
    fn test_rotation_keeps_whole_recent_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let content: String = (0..100).map(|i| format!("line {i:03}\n")).collect();
        fs::write(&path, &content).unwrap();

        assert!(rotation(500, 100).apply(&path).unwrap());

        let rotated = fs::read_to_string(&path).unwrap();
        let mut lines = rotated.lines();
        assert_eq!(
            lines.next(),
            Some("--- Log rotated (older entries removed) ---")
        );
        let kept: Vec<&str> = lines.collect();
        assert!(kept.iter().all(|l| l.starts_with("line ") && l.len() == 8));
        assert_eq!(kept.last(), Some(&"line 099"));
        assert!(kept.len() < 100 / 9 + 1);
    }

    #[test]
    fn test_default_rotation_sizes() {
        let rotation = LogRotation::default();
        assert_eq!(rotation.max_bytes, 5 * 1024 * 1024);
        assert_eq!(rotation.keep_bytes, 1024 * 1024);
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "callroi=debug,callroi_core=warn");
    }
}
