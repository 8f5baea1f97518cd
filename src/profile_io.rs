//*** START FILE: src/profile_io.rs ***//
use crate::error::Result;
use crate::profile::{Achievement, Progression, StudyStats, UserProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub const USER_KEY: &str = "studybuddy_user";
pub const STATS_KEY: &str = "studybuddy_stats";
pub const ACHIEVEMENTS_KEY: &str = "studybuddy_achievements";

/// Flat string key-value storage for the persisted JSON blobs.
pub trait ProgressStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl ProgressStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        for key in [USER_KEY, STATS_KEY, ACHIEVEMENTS_KEY] {
            let path = self.key_path(key);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

/// Saves the three progression blobs.
pub fn save_progression(progression: &Progression, store: &mut dyn ProgressStore) -> Result<()> {
    store.set(USER_KEY, &serde_json::to_string(&progression.user)?)?;
    store.set(STATS_KEY, &serde_json::to_string(&progression.stats)?)?;
    store.set(ACHIEVEMENTS_KEY, &serde_json::to_string(&progression.achievements)?)?;
    Ok(())
}

/// Loads progression by laying each saved object over the defaults.
/// A blob that fails to parse is skipped and its defaults kept.
pub fn load_progression(store: &dyn ProgressStore) -> Result<Progression> {
    let mut progression = Progression::new();

    if let Some(saved) = store.get(USER_KEY)? {
        match merge_onto::<UserProfile>(&progression.user, &saved) {
            Ok(user) => progression.user = user,
            Err(e) => log::warn!("Ignoring saved user profile: {}", e),
        }
    }
    if let Some(saved) = store.get(STATS_KEY)? {
        match merge_onto::<StudyStats>(&progression.stats, &saved) {
            Ok(stats) => progression.stats = stats,
            Err(e) => log::warn!("Ignoring saved statistics: {}", e),
        }
    }
    if let Some(saved) = store.get(ACHIEVEMENTS_KEY)? {
        match serde_json::from_str::<Vec<Achievement>>(&saved) {
            Ok(achievements) => progression.achievements = achievements,
            Err(e) => log::warn!("Ignoring saved achievements: {}", e),
        }
    }

    Ok(progression)
}

/// Shallow merge: top-level keys of `saved` replace those of `defaults`.
fn merge_onto<T>(defaults: &T, saved: &str) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut base = serde_json::to_value(defaults)?;
    let saved: Value = serde_json::from_str(saved)?;
    if let (Value::Object(base_map), Value::Object(saved_map)) = (&mut base, saved) {
        for (key, value) in saved_map {
            if base_map.contains_key(&key) {
                base_map.insert(key, value);
            }
        }
    }
    Ok(serde_json::from_value(base)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::StatEvent;

    #[test]
    fn test_round_trip_through_memory_store() {
        let mut p = Progression::new();
        p.start_journey("Grace", "exam", "graduate").unwrap();
        p.record_event(StatEvent::Notes(3));
        p.record_event(StatEvent::QuizScore(0.75));

        let mut store = MemoryStore::new();
        save_progression(&p, &mut store).unwrap();
        let loaded = load_progression(&store).unwrap();

        assert_eq!(loaded.user, p.user);
        assert_eq!(loaded.stats, p.stats);
        assert_eq!(loaded.achievements, p.achievements);
    }

    #[test]
    fn test_partial_blob_keeps_defaults() {
        let mut store = MemoryStore::new();
        store.set(USER_KEY, r#"{"xp": 120, "levelNumber": 2, "bogus": true}"#).unwrap();
        store.set(STATS_KEY, r#"{"notesCreated": 4}"#).unwrap();

        let loaded = load_progression(&store).unwrap();
        assert_eq!(loaded.user.xp, 120);
        assert_eq!(loaded.user.level_number, 2);
        assert_eq!(loaded.user.avatar, "JD");
        assert_eq!(loaded.stats.notes_created, 4);
        assert_eq!(loaded.stats.focus_score, 85);
        assert!(loaded.achievements.is_empty());
    }

    #[test]
    fn test_corrupt_blob_is_skipped() {
        let mut store = MemoryStore::new();
        store.set(STATS_KEY, "{not json").unwrap();
        store.set(USER_KEY, r#"{"streak": 3}"#).unwrap();
        let loaded = load_progression(&store).unwrap();
        assert_eq!(loaded.stats, StudyStats::default());
        assert_eq!(loaded.user.streak, 3);
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = MemoryStore::new();
        save_progression(&Progression::new(), &mut store).unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }
}
//*** END FILE: src/profile_io.rs ***//
