//! JsonFileCache - JSON ファイルによる CacheStore 実装
//!
//! # ファイル形式
//! ```json
//! {
//!   "2024-03-05": {
//!     "image_url": "https://...",
//!     "timestamp": "2024-03-05T01:23:45.678Z",
//!     "username": "account"
//!   }
//! }
//! ```
//!
//! # 実装詳細
//! - put は毎回ファイル全体を読み込み、1 件だけ差し替えて全体を書き戻す
//! - 他の日付のエントリは `serde_json::Value` のまま運ぶので、形が読めなくても失われない
//! - 書き込みは同じディレクトリの一時ファイル → rename（途中の状態は見えない）
//! - ファイルが無い・壊れている場合は空のマッピングとして扱う（warn ログのみ）
//! - 読めない場合（権限など）は put がエラーを返し、ファイルには触らない

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::domain::{CacheEntry, CacheError, DateQuery};
use crate::ports::{CacheStore, Clock};

/// Default cache file name, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = "menu_cache.json";

/// Whole cache document: ISO date -> stored entry.
type Document = Map<String, Value>;

/// On-disk shape of one entry.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    image_url: String,
    #[serde(rename = "timestamp")]
    recorded_at: DateTime<Utc>,
    #[serde(rename = "username")]
    source: String,
}

/// CacheStore backed by one JSON document on disk.
///
/// `recorded_at` comes from the injected Clock, so tests can pin it with
/// `FixedClock`.
pub struct JsonFileCache<C> {
    path: PathBuf,
    clock: C,
}

impl<C: Clock> JsonFileCache<C> {
    pub fn new(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole document. Missing or corrupt content yields an empty one.
    ///
    /// Any other read failure is an error: writing over a file we could not
    /// read would drop every other date.
    fn load(&self) -> Result<Document, CacheError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "cache file not found");
                return Ok(Document::new());
            }
            Err(source) => {
                return Err(CacheError::Io {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        match serde_json::from_slice::<Document>(&bytes) {
            Ok(document) => Ok(document),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cache file is corrupt, treating it as empty");
                Ok(Document::new())
            }
        }
    }

    fn write_atomically(&self, document: &Document) -> Result<(), CacheError> {
        let io_err = |source: io::Error| CacheError::Io {
            path: self.path.display().to_string(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(io_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        serde_json::to_writer_pretty(&mut tmp, document)?;
        tmp.write_all(b"\n").map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl<C: Clock> CacheStore for JsonFileCache<C> {
    fn get(&self, date: DateQuery) -> Option<CacheEntry> {
        let document = match self.load() {
            Ok(document) => document,
            Err(e) => {
                warn!(%date, error = %e, "could not read cache file");
                return None;
            }
        };
        let key = date.to_string();

        let Some(value) = document.get(&key) else {
            debug!(%date, "no cache entry for date");
            return None;
        };

        match serde_json::from_value::<StoredEntry>(value.clone()) {
            Ok(stored) => {
                debug!(%date, image_url = %stored.image_url, "cache hit");
                Some(CacheEntry {
                    date,
                    image_url: stored.image_url,
                    recorded_at: stored.recorded_at,
                    source: stored.source,
                })
            }
            Err(e) => {
                warn!(%date, error = %e, "cache entry is malformed, ignoring it");
                None
            }
        }
    }

    fn put(&self, date: DateQuery, image_url: &str, source: &str) -> Result<CacheEntry, CacheError> {
        let mut document = self.load()?;

        let stored = StoredEntry {
            image_url: image_url.to_string(),
            recorded_at: self.clock.now(),
            source: source.to_string(),
        };
        document.insert(date.to_string(), serde_json::to_value(&stored)?);
        self.write_atomically(&document)?;

        info!(%date, path = %self.path.display(), "cache saved");
        Ok(CacheEntry {
            date,
            image_url: stored.image_url,
            recorded_at: stored.recorded_at,
            source: stored.source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FixedClock;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> DateQuery {
        DateQuery::from_ymd(y, m, d).unwrap()
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 3, 0, 0).unwrap()
    }

    fn cache_in(dir: &TempDir) -> JsonFileCache<FixedClock> {
        JsonFileCache::new(dir.path().join(DEFAULT_CACHE_FILE), FixedClock::new(noon()))
    }

    #[test]
    fn put_then_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        let written = cache.put(date(2024, 3, 5), "X", "acct").unwrap();
        let read = cache.get(date(2024, 3, 5)).expect("entry");

        assert_eq!(read, written);
        assert_eq!(read.image_url, "X");
        assert_eq!(read.source, "acct");
        assert_eq!(read.recorded_at, noon());
    }

    #[test]
    fn put_keeps_other_dates() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        let first = cache.put(date(2024, 3, 5), "X", "acct").unwrap();
        cache.put(date(2024, 3, 6), "Y", "acct").unwrap();

        assert_eq!(cache.get(date(2024, 3, 5)), Some(first));
        assert_eq!(cache.get(date(2024, 3, 6)).unwrap().image_url, "Y");
    }

    #[test]
    fn put_overwrites_same_date() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        cache.put(date(2024, 3, 5), "old", "acct").unwrap();
        cache.put(date(2024, 3, 5), "new", "acct").unwrap();

        assert_eq!(cache.get(date(2024, 3, 5)).unwrap().image_url, "new");
    }

    #[test]
    fn get_on_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        assert_eq!(cache.get(date(2024, 3, 5)), None);
        assert!(!cache.path().exists());
    }

    #[test]
    fn get_on_corrupt_file_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        cache.put(date(2024, 3, 5), "X", "acct").unwrap();
        fs::write(cache.path(), b"{ this is not json").unwrap();

        assert_eq!(cache.get(date(2024, 3, 5)), None);
    }

    #[test]
    fn put_over_corrupt_file_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        fs::write(cache.path(), b"[1, 2, 3]").unwrap();

        cache.put(date(2024, 3, 5), "X", "acct").unwrap();

        assert_eq!(cache.get(date(2024, 3, 5)).unwrap().image_url, "X");
    }

    #[test]
    fn unreadable_entries_for_other_dates_survive_put() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        fs::write(
            cache.path(),
            r#"{ "2024-03-01": { "image_url": "legacy", "note": "no timestamp" } }"#,
        )
        .unwrap();

        assert_eq!(cache.get(date(2024, 3, 1)), None);
        cache.put(date(2024, 3, 5), "X", "acct").unwrap();

        let raw: Value = serde_json::from_slice(&fs::read(cache.path()).unwrap()).unwrap();
        assert_eq!(raw["2024-03-01"]["note"], "no timestamp");
        assert_eq!(raw["2024-03-05"]["image_url"], "X");
    }

    #[test]
    fn file_uses_the_shared_format() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        cache.put(date(2024, 3, 5), "https://img/menu.jpg", "식당").unwrap();

        let text = fs::read_to_string(cache.path()).unwrap();
        // non-ASCII is written as-is
        assert!(text.contains("식당"));

        let raw: Value = serde_json::from_str(&text).unwrap();
        let entry = &raw["2024-03-05"];
        assert_eq!(entry["image_url"], "https://img/menu.jpg");
        assert_eq!(entry["username"], "식당");
        assert_eq!(entry["timestamp"], "2024-03-05T03:00:00Z");
    }

    #[test]
    fn reads_offset_style_timestamps() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        fs::write(
            cache.path(),
            r#"{ "2024-03-05": { "image_url": "X", "timestamp": "2024-03-05T03:00:00.123456+00:00", "username": "acct" } }"#,
        )
        .unwrap();

        let entry = cache.get(date(2024, 3, 5)).expect("entry");
        assert_eq!(entry.recorded_at.timestamp(), noon().timestamp());
    }

    #[test]
    fn put_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/state/menu_cache.json");
        let cache = JsonFileCache::new(&path, FixedClock::new(noon()));

        cache.put(date(2024, 3, 5), "X", "acct").unwrap();

        assert!(path.exists());
        assert!(cache.get(date(2024, 3, 5)).is_some());
    }

    #[cfg(unix)]
    #[test]
    fn put_on_unreadable_file_fails_and_keeps_it() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        cache.put(date(2024, 3, 5), "X", "acct").unwrap();

        fs::set_permissions(cache.path(), fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(cache.path()).is_ok() {
            // permissions are not enforced (running as root)
            return;
        }

        assert_eq!(cache.get(date(2024, 3, 5)), None);
        let err = cache.put(date(2024, 3, 6), "Y", "acct").unwrap_err();
        assert!(matches!(err, CacheError::Io { .. }));

        fs::set_permissions(cache.path(), fs::Permissions::from_mode(0o644)).unwrap();
        assert_eq!(cache.get(date(2024, 3, 5)).unwrap().image_url, "X");
        assert_eq!(cache.get(date(2024, 3, 6)), None);
    }
}
