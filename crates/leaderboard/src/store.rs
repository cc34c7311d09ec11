//! JSON-file backed leaderboard.
//!
//! The whole entry list is read and written at once. Writes go to a
//! temporary sibling file that is then renamed over the target, so readers
//! see either the old list or the new one.
//!
//! Entries are kept as raw JSON values. Ones that do not parse as a
//! [`Record`] are skipped for ranking but written back unchanged, so one odd
//! entry never costs the rest of the history.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::LeaderboardError;
use crate::record::Record;
use crate::types::Mode;

/// Rankings shown by default.
pub const DEFAULT_TOP_N: usize = 10;

/// Score file used when no path is configured.
pub const DEFAULT_PATH: &str = "scores.json";

#[derive(Debug)]
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<Value>,
    records: Vec<Record>,
    load_error: Option<LeaderboardError>,
}

impl Leaderboard {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty history. A damaged file is also treated as
    /// empty; the failure is kept for [`Leaderboard::take_load_error`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut board = Self {
            path: path.into(),
            entries: Vec::new(),
            records: Vec::new(),
            load_error: None,
        };
        board.reload();
        board
    }

    /// Load the readable records, surfacing read and parse failures.
    pub fn try_load(path: &Path) -> Result<Vec<Record>, LeaderboardError> {
        Ok(parse_records(&read_entries(path)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a damaged score file is moved before it is replaced.
    pub fn backup_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());
        self.path.with_file_name(format!("{}.bak", name))
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entries in the file that are not readable records.
    pub fn skipped(&self) -> usize {
        self.entries.len() - self.records.len()
    }

    /// The last load or recovery failure, if any, cleared on read.
    pub fn take_load_error(&mut self) -> Option<LeaderboardError> {
        self.load_error.take()
    }

    /// Re-read the file, picking up entries written by other sessions.
    pub fn reload(&mut self) {
        match read_entries(&self.path) {
            Ok(entries) => self.set_entries(entries),
            Err(e) => {
                self.set_entries(Vec::new());
                self.load_error = Some(e);
            }
        }
    }

    /// Validate and persist one record.
    ///
    /// The name is trimmed; a blank name is rejected with
    /// [`LeaderboardError::InvalidRecord`] and nothing is written. The file is
    /// re-read first so concurrent sessions do not drop each other's entries.
    /// A file that no longer parses is moved to [`Leaderboard::backup_path`]
    /// and the failure is kept for [`Leaderboard::take_load_error`].
    /// In-memory records change only after the write succeeded.
    pub fn append(&mut self, record: Record) -> Result<(), LeaderboardError> {
        let name = record.name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::InvalidRecord(
                "player name must not be empty".to_string(),
            ));
        }
        let record = Record {
            name: name.to_string(),
            ..record
        };

        let mut entries = match read_entries(&self.path) {
            Ok(entries) => entries,
            Err(e @ LeaderboardError::CorruptStore { .. }) => {
                let backup = self.backup_path();
                fs::rename(&self.path, &backup).map_err(|source| LeaderboardError::Io {
                    path: backup,
                    source,
                })?;
                self.load_error = Some(e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        entries.push(serde_json::to_value(&record).map_err(LeaderboardError::Encode)?);
        write_atomic(&self.path, &entries)?;

        self.set_entries(entries);
        Ok(())
    }

    /// Highest scores first, optionally for one mode only.
    ///
    /// Ties keep insertion order.
    pub fn top_n(&self, mode: Option<Mode>, n: usize) -> Vec<&Record> {
        let mut ranked: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| mode.map_or(true, |m| r.mode == m))
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(n);
        ranked
    }

    fn set_entries(&mut self, entries: Vec<Value>) {
        self.records = parse_records(&entries);
        self.entries = entries;
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::open(DEFAULT_PATH)
    }
}

/// Raw entries of the score file. Missing and blank files are empty.
fn read_entries(path: &Path) -> Result<Vec<Value>, LeaderboardError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path).map_err(|source| LeaderboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&text).map_err(|source| LeaderboardError::CorruptStore {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_records(entries: &[Value]) -> Vec<Record> {
    entries
        .iter()
        .filter_map(|entry| Record::deserialize(entry).ok())
        .collect()
}

fn write_atomic(path: &Path, entries: &[Value]) -> Result<(), LeaderboardError> {
    let text = serde_json::to_string_pretty(entries).map_err(LeaderboardError::Encode)?;

    let io_err = |source| LeaderboardError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }

    let tmp = temp_sibling(path);
    fs::write(&tmp, text.as_bytes()).map_err(io_err)?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(source));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PATH.to_string());
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static NEXT_TMP_ID: AtomicUsize = AtomicUsize::new(0);

    struct TempDir {
        root: PathBuf,
    }

    impl TempDir {
        fn new() -> Self {
            let nonce = NEXT_TMP_ID.fetch_add(1, Ordering::Relaxed);
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos();
            let root = std::env::temp_dir().join(format!(
                "tetris_ladder_store_{}_{}_{}",
                std::process::id(),
                ts,
                nonce
            ));
            fs::create_dir_all(&root).expect("create temp dir");
            Self { root }
        }

        fn file(&self, name: &str) -> PathBuf {
            self.root.join(name)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    fn rec(name: &str, mode: Mode, score: u32) -> Record {
        Record::new(name, mode, 1, score, 0)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new();
        let board = Leaderboard::open(dir.file("scores.json"));
        assert!(board.is_empty());
        assert!(Leaderboard::try_load(&dir.file("scores.json")).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = TempDir::new();
        let path = dir.file("scores.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Leaderboard::try_load(&path),
            Err(LeaderboardError::CorruptStore { .. })
        ));
        let mut board = Leaderboard::open(&path);
        assert!(board.is_empty());
        assert!(matches!(
            board.take_load_error(),
            Some(LeaderboardError::CorruptStore { .. })
        ));
        assert!(board.take_load_error().is_none());
    }

    #[test]
    fn test_unreadable_entries_survive_append() {
        let dir = TempDir::new();
        let path = dir.file("scores.json");
        fs::write(
            &path,
            r#"[
  {"timestamp": "2024-02-01T08:00:00", "name": "ana", "mode": "Hard", "score": 800},
  {"name": "nomode", "score": 50},
  {"name": "lower", "mode": "easy", "score": 60},
  {"name": "neg", "mode": "Normal", "score": -5}
]"#,
        )
        .unwrap();

        let mut board = Leaderboard::open(&path);
        assert!(board.take_load_error().is_none());
        assert_eq!(board.len(), 1);
        assert_eq!(board.skipped(), 3);

        board.append(rec("ben", Mode::Hard, 900)).unwrap();
        let names: Vec<&str> = board
            .top_n(Some(Mode::Hard), DEFAULT_TOP_N)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["ben", "ana"]);

        let text = fs::read_to_string(&path).unwrap();
        let written: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(written.len(), 5);
        assert_eq!(written[1]["name"], "nomode");
        assert_eq!(written[2]["mode"], "easy");
        assert_eq!(written[3]["score"], -5);
        assert_eq!(written[4]["name"], "ben");
    }

    #[test]
    fn test_corrupt_file_is_backed_up_on_append() {
        let dir = TempDir::new();
        let path = dir.file("scores.json");
        let mut board = Leaderboard::open(&path);
        fs::write(&path, "[{\"name\": \"half").unwrap();

        board.append(rec("kim", Mode::Normal, 100)).unwrap();
        assert_eq!(
            fs::read_to_string(board.backup_path()).unwrap(),
            "[{\"name\": \"half"
        );
        assert!(matches!(
            board.take_load_error(),
            Some(LeaderboardError::CorruptStore { .. })
        ));
        assert_eq!(Leaderboard::try_load(&path).unwrap().len(), 1);
        assert!(board.backup_path().ends_with("scores.json.bak"));
    }

    #[test]
    fn test_append_persists_pretty_json() {
        let dir = TempDir::new();
        let path = dir.file("scores.json");
        let mut board = Leaderboard::open(&path);

        board.append(rec("  Åsa  ", Mode::Easy, 300)).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board.records()[0].name, "Åsa");

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert!(text.contains("\"name\": \"Åsa\""));

        let reopened = Leaderboard::open(&path);
        assert_eq!(reopened.records(), board.records());
        // No temp file left behind.
        assert_eq!(fs::read_dir(&dir.root).unwrap().count(), 1);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let dir = TempDir::new();
        let path = dir.file("scores.json");
        let mut board = Leaderboard::open(&path);
        board.append(rec("kim", Mode::Normal, 100)).unwrap();

        let err = board.append(rec("  ", Mode::Normal, 500)).unwrap_err();
        assert!(err.is_invalid_record());
        assert_eq!(board.len(), 1);
        assert_eq!(Leaderboard::try_load(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_top_n_filters_and_sorts() {
        let dir = TempDir::new();
        let mut board = Leaderboard::open(dir.file("scores.json"));
        board.append(rec("a", Mode::Easy, 500)).unwrap();
        board.append(rec("b", Mode::Easy, 900)).unwrap();
        board.append(rec("c", Mode::Hard, 100)).unwrap();
        board.append(rec("d", Mode::Easy, 700)).unwrap();

        let scores: Vec<u32> = board
            .top_n(Some(Mode::Easy), 3)
            .iter()
            .map(|r| r.score)
            .collect();
        assert_eq!(scores, [900, 700, 500]);

        let all: Vec<&str> = board
            .top_n(None, DEFAULT_TOP_N)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(all, ["b", "d", "a", "c"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let dir = TempDir::new();
        let mut board = Leaderboard::open(dir.file("scores.json"));
        for name in ["first", "second", "third"] {
            board.append(rec(name, Mode::Normal, 400)).unwrap();
        }
        let names: Vec<&str> = board
            .top_n(Some(Mode::Normal), 2)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_append_merges_other_writers() {
        let dir = TempDir::new();
        let path = dir.file("scores.json");
        let mut one = Leaderboard::open(&path);
        let mut two = Leaderboard::open(&path);

        one.append(rec("one", Mode::Hard, 10)).unwrap();
        two.append(rec("two", Mode::Hard, 20)).unwrap();

        assert_eq!(two.len(), 2);
        one.reload();
        assert_eq!(one.len(), 2);
    }

    #[test]
    fn test_creates_missing_parent_dir() {
        let dir = TempDir::new();
        let path = dir.root.join("nested").join("scores.json");
        let mut board = Leaderboard::open(&path);
        board.append(rec("z", Mode::Easy, 1)).unwrap();
        assert!(path.exists());
    }
}
