/// Number of hash characters shown in changelog entries
pub const SHORT_HASH_LEN: usize = 7;

/// A commit as reported by the history backend: full hash plus subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
}

impl CommitRecord {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        CommitRecord {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// First seven characters of the hash (or the whole hash if shorter)
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(SHORT_HASH_LEN) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }

    /// Parse one `hash|subject` log line, splitting on the first `|`.
    pub fn from_log_line(line: &str) -> Option<Self> {
        let (hash, message) = line.split_once('|')?;
        let hash = hash.trim();
        if hash.is_empty() {
            return None;
        }
        Some(CommitRecord::new(hash, message))
    }
}
