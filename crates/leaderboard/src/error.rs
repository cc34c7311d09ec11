use std::fmt;
use std::path::PathBuf;

/// Leaderboard failures.
#[derive(Debug)]
pub enum LeaderboardError {
    /// Rejected before anything was written (e.g. blank player name).
    InvalidRecord(String),
    /// The score file exists but is not a valid record list.
    CorruptStore {
        path: PathBuf,
        source: serde_json::Error,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
}

impl LeaderboardError {
    pub fn is_invalid_record(&self) -> bool {
        matches!(self, LeaderboardError::InvalidRecord(_))
    }
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::InvalidRecord(reason) => write!(f, "invalid record: {}", reason),
            LeaderboardError::CorruptStore { path, source } => {
                write!(f, "corrupt score file {}: {}", path.display(), source)
            }
            LeaderboardError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            LeaderboardError::Encode(e) => write!(f, "failed to encode records: {}", e),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeaderboardError::InvalidRecord(_) => None,
            LeaderboardError::CorruptStore { source, .. } => Some(source),
            LeaderboardError::Io { source, .. } => Some(source),
            LeaderboardError::Encode(e) => Some(e),
        }
    }
}
