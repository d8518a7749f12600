//! Loader for the fingerprint table mapping original asset paths to hashed ones.
//!
//! The table is a line-oriented file where each line holds
//! `<original-relative-path> <hashed-relative-path>`. Lines without a separator
//! are ignored, later lines override earlier ones for the same original path and
//! every parsed line contributes to the basename index used for bare references.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::RelinkError;

/// Immutable original-to-hashed path table plus its derived basename index.
#[derive(Debug, Clone, Default)]
pub struct FingerprintMap {
    entries: BTreeMap<String, String>,
    basenames: BTreeMap<String, BasenameEntry>,
}

/// Number of parsed lines sharing a basename and the latest original path that owned it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BasenameEntry {
    count: usize,
    owner: String,
}

impl FingerprintMap {
    /// Read and parse the mapping file at `path`.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; only a missing or unreadable file
    /// is an error.
    pub fn load(path: &Path) -> Result<Self, RelinkError> {
        if !path.is_file() {
            return Err(RelinkError::MappingNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|source| RelinkError::MappingRead {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::parse(&String::from_utf8_lossy(&bytes));
        tracing::debug!(
            entries = map.len(),
            path = %path.display(),
            "loaded fingerprint mapping"
        );
        Ok(map)
    }

    /// Parse mapping text, silently skipping blank and malformed lines.
    pub fn parse(source: &str) -> Self {
        Self::from_pairs(source.lines().filter_map(split_line))
    }

    /// Build a mapping from already split `(original, hashed)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::default();
        for (original, hashed) in pairs {
            map.insert(original.into(), hashed.into());
        }
        map
    }

    fn insert(&mut self, original: String, hashed: String) {
        let basename = basename(&original).to_string();
        self.basenames
            .entry(basename)
            .and_modify(|entry| {
                entry.count += 1;
                entry.owner.clone_from(&original);
            })
            .or_insert_with(|| BasenameEntry {
                count: 1,
                owner: original.clone(),
            });
        self.entries.insert(original, hashed);
    }

    /// Hashed path recorded for a canonical original path.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    /// Number of parsed lines whose original path ends in `basename`.
    ///
    /// Overridden duplicate keys still count, so a repeated original path makes its
    /// basename ambiguous.
    pub fn basename_count(&self, basename: &str) -> usize {
        self.basenames.get(basename).map_or(0, |entry| entry.count)
    }

    /// Original path owning `basename` when exactly one line carries it.
    pub fn unique_owner(&self, basename: &str) -> Option<&str> {
        self.basenames
            .get(basename)
            .filter(|entry| entry.count == 1)
            .map(|entry| entry.owner.as_str())
    }

    /// Number of distinct original paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no line could be parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a trimmed mapping line at its first whitespace run.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (original, hashed) = line.split_once(char::is_whitespace)?;
    Some((original, hashed.trim_start()))
}

/// Final segment of a path, treating `\` like `/`.
pub(crate) fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
