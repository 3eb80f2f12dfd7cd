use archon_core::record::Record;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A telemetry log in its own temp directory, written the way a monitor
/// would write it: appends, flushed per call.
pub struct LogFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl LogFixture {
    /// The file does not exist until something is written.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fsm_log.txt");
        Self { _dir: dir, path }
    }

    pub fn with_records(records: &[Record]) -> Self {
        let fixture = Self::new();
        fixture.append_records(records);
        fixture
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append_raw(&self, text: &str) {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file.flush().unwrap();
    }

    pub fn append_records(&self, records: &[Record]) {
        let text: String = records.iter().map(|r| format!("{r}\n")).collect();
        self.append_raw(&text);
    }

    /// Empty the file in place, the way `> fsm_log.txt` would.
    pub fn truncate(&self) {
        fs::write(&self.path, "").unwrap();
    }

    pub fn contents(&self) -> String {
        fs::read_to_string(&self.path).unwrap_or_default()
    }
}

impl Default for LogFixture {
    fn default() -> Self {
        Self::new()
    }
}
