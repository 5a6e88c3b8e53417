use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

const LOG_FILE: &str = "aquadeck.log";

/// Where the log file goes: the platform cache dir when there is one,
/// otherwise the working directory.
pub fn log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("aquadeck"))
        .and_then(|d| std::fs::create_dir_all(&d).ok().map(|_| d.join(LOG_FILE)))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE))
}

fn open_log(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the file logger. The presenter owns the terminal-less window, so
/// nothing is logged to stderr. Every run appends to the same file.
/// Failing to open the file leaves logging off.
pub fn init(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("aquadeck")
        .build();

    if let Ok(file) = open_log(&log_path()) {
        let _ = WriteLogger::init(level, config, file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reopening_the_log_keeps_earlier_runs() {
        let dir = std::env::temp_dir().join(format!("aquadeck-log-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(LOG_FILE);

        writeln!(open_log(&path).unwrap(), "presenting talk.md").unwrap();
        writeln!(open_log(&path).unwrap(), "config show").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "presenting talk.md\nconfig show\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
