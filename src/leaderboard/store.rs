//! The score document store: one record per player id, persisted as a JSON
//! file after every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// A single leaderboard document. Field names follow the wire format
/// (`_id`/`createdAt`) so the same struct serves the store file and the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub score: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// File-backed score collection, safe to share behind an `Arc` across the
/// server's connection tasks.
pub struct ScoreStore {
    path: PathBuf,
    records: Mutex<HashMap<String, ScoreRecord>>,
}

impl ScoreStore {
    /// Open the store at `path`, loading existing records if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(json) => {
                let list: Vec<ScoreRecord> = serde_json::from_str(&json)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                list.into_iter().map(|r| (r.id.clone(), r)).collect()
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Create a fresh record for `name` with score 0 and a new uuid.
    pub fn add_player(&self, name: &str) -> io::Result<ScoreRecord> {
        let record = ScoreRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            score: 0,
            created_at: Utc::now(),
        };
        let mut records = self.lock()?;
        records.insert(record.id.clone(), record.clone());
        self.persist(&records)?;
        Ok(record)
    }

    /// Upsert the score for `id`. Later submissions replace the stored value
    /// unconditionally, even when lower than what is already there.
    pub fn set_score(&self, id: &str, score: i64) -> io::Result<ScoreRecord> {
        let mut records = self.lock()?;
        let record = {
            let entry = records.entry(id.to_string()).or_insert_with(|| ScoreRecord {
                id: id.to_string(),
                name: "Unknown".to_string(),
                score: 0,
                created_at: Utc::now(),
            });
            entry.score = score;
            entry.clone()
        };
        self.persist(&records)?;
        Ok(record)
    }

    /// All records, sorted by score descending.
    pub fn all_scores(&self) -> io::Result<Vec<ScoreRecord>> {
        let records = self.lock()?;
        let mut list: Vec<ScoreRecord> = records.values().cloned().collect();
        list.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(list)
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, HashMap<String, ScoreRecord>>> {
        self.records
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "score store lock poisoned"))
    }

    fn persist(&self, records: &HashMap<String, ScoreRecord>) -> io::Result<()> {
        let mut list: Vec<&ScoreRecord> = records.values().collect();
        list.sort_by(|a, b| b.score.cmp(&a.score));
        let json = serde_json::to_string_pretty(&list)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (ScoreStore, PathBuf) {
        let path = std::env::temp_dir().join(format!("skyflap_store_{}.json", Uuid::new_v4()));
        let store = ScoreStore::open(&path).expect("open should succeed");
        (store, path)
    }

    #[test]
    fn test_add_player_creates_zero_score_record() {
        let (store, path) = temp_store();
        let record = store.add_player("Ada").unwrap();
        assert_eq!(record.name, "Ada");
        assert_eq!(record.score, 0);
        assert!(!record.id.is_empty());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_set_score_overwrites_even_with_lower_value() {
        let (store, path) = temp_store();
        let record = store.add_player("Grace").unwrap();

        store.set_score(&record.id, 50).unwrap();
        let updated = store.set_score(&record.id, 30).unwrap();

        // Stored value is whatever came last, not the maximum
        assert_eq!(updated.score, 30);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_set_score_upserts_unknown_id() {
        let (store, path) = temp_store();
        let record = store.set_score("no-such-id", 12).unwrap();
        assert_eq!(record.id, "no-such-id");
        assert_eq!(record.name, "Unknown");
        assert_eq!(record.score, 12);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_all_scores_sorted_descending() {
        let (store, path) = temp_store();
        let a = store.add_player("A").unwrap();
        let b = store.add_player("B").unwrap();
        let c = store.add_player("C").unwrap();
        store.set_score(&a.id, 10).unwrap();
        store.set_score(&b.id, 99).unwrap();
        store.set_score(&c.id, 42).unwrap();

        let scores = store.all_scores().unwrap();
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].score, 99);
        assert_eq!(scores[1].score, 42);
        assert_eq!(scores[2].score, 10);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_records_survive_reopen() {
        let (store, path) = temp_store();
        let record = store.add_player("Persist").unwrap();
        store.set_score(&record.id, 7).unwrap();
        drop(store);

        let reopened = ScoreStore::open(&path).unwrap();
        let scores = reopened.all_scores().unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, "Persist");
        assert_eq!(scores[0].score, 7);
        fs::remove_file(path).ok();
    }
}
