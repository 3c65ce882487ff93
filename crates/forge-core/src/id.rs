//! Issue identifier allocation
//!
//! Sequential ids backed by a counter file: the counter is read,
//! incremented by one, and persisted before the id is handed out.
//! Format: ISSUE-NNN (zero-padded to 3 digits, widening past 999).

use crate::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Counter-backed allocator for issue identifiers
///
/// Within one process, ids are strictly increasing. There is no
/// cross-process mutual exclusion: concurrent invocations can race the
/// read-increment-write and allocate duplicates.
pub struct IdAllocator {
    path: PathBuf,
    prefix: String,
}

impl IdAllocator {
    pub fn new(path: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.to_string(),
        }
    }

    /// Allocate the next issue id
    ///
    /// The new counter value is persisted before the id is returned, so
    /// a crash after this call cannot reissue the same ordinal.
    pub fn next(&self) -> Result<String> {
        let value = self.read_counter()? + 1;
        fs::write(&self.path, value.to_string())?;
        tracing::debug!(value, "advanced issue counter");
        Ok(format_id(&self.prefix, value))
    }

    /// The last allocated ordinal (0 if nothing was allocated yet)
    pub fn last(&self) -> Result<u64> {
        self.read_counter()
    }

    fn read_counter(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }
        let raw = fs::read_to_string(&self.path)?;
        raw.trim()
            .parse::<u64>()
            .map_err(|_| Error::CounterCorrupt(format!("not an integer: {:?}", raw.trim())))
    }
}

/// Format an issue id from a prefix and ordinal
pub fn format_id(prefix: &str, value: u64) -> String {
    format!("{}-{:03}", prefix, value)
}

/// Split an id into prefix and ordinal
///
/// Returns None unless the part after the last hyphen is a number of at
/// least 3 digits.
pub fn parse_id(id: &str) -> Option<(&str, u64)> {
    let (prefix, digits) = id.rsplit_once('-')?;
    if prefix.is_empty() || digits.len() < 3 {
        return None;
    }
    let value = digits.parse().ok()?;
    Some((prefix, value))
}
