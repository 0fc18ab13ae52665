use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::str::FromStr;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::Settings;

/// Send `log` output to the configured file; the terminal belongs to the UI.
///
/// Logging is optional: a file that cannot be opened leaves it disabled.
pub fn init(settings: &Settings) {
    let level = LevelFilter::from_str(&settings.log.level).unwrap_or(LevelFilter::Info);
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = open_log(&settings.log_file()) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

/// Open the log for appending so earlier runs stay in the file.
fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn log_file_keeps_earlier_runs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("tempo.log");

        writeln!(open_log(&path).unwrap(), "first run").unwrap();
        writeln!(open_log(&path).unwrap(), "second run").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "first run\nsecond run\n");
    }
}
