//! File-backed cache for discovered spec locations
//!
//! One JSON file per key under the cache directory, carrying the value and
//! an absolute expiry timestamp. Expired entries are deleted on read.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use openapi_scout_common::{Result, ScoutError, SpecCache};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open (and create if needed) a cache rooted at `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(FileCache {
            dir: dir.to_path_buf(),
        })
    }

    /// Keys are hostnames; anything outside a safe filename set is escaped
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl SpecCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            // corrupt entry, drop it
            Err(_) => {
                fs::remove_file(&path)?;
                return Ok(None);
            }
        };
        if entry.expires_at <= Utc::now() {
            fs::remove_file(&path)?;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let ttl = ChronoDuration::from_std(ttl)
            .map_err(|e| ScoutError::Upstream(format!("cache ttl out of range: {e}")))?;
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at: Utc::now() + ttl,
        };
        let serialized = serde_json::to_string(&entry)?;
        fs::write(self.path_for(key), serialized)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
