//! Save slots: one JSON record per pet name in a save directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SaveError;

pub const SAVE_VERSION: u32 = 1;
const SLOT_EXT: &str = "json";
/// Slot stem used when a name has no usable characters.
const FALLBACK_STEM: &str = "pet";

/// Everything needed to rebuild a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    pub age: u32,
    pub hunger_level: f32,
    pub boredom_level: f32,
    /// Food portions per refill.
    pub quantity: u32,
    pub remaining: u32,
    /// Food refill cooldown left, ms.
    pub cooldown: f32,
    /// Play session length, seconds.
    pub playtime: u32,
    pub playtime_remaining: f32,
    pub in_cooldown: bool,
    pub cooldown_timer: f32,
    /// When the record was written.
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
}

fn default_version() -> u32 {
    SAVE_VERSION
}

/// Directory of save slots, capped at `max_saves` files.
pub struct SaveStore {
    dir: PathBuf,
    max_saves: usize,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>, max_saves: usize) -> Self {
        Self {
            dir: dir.into(),
            max_saves: max_saves.max(1),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a pet's slot. Anything but ASCII letters, digits, `-`
    /// and `_` becomes `_`, so the slot always lands directly in the save
    /// directory.
    pub fn slot_name(pet_name: &str) -> String {
        let stem: String = pet_name
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let stem = if stem.is_empty() { FALLBACK_STEM } else { stem.as_str() };
        format!("{stem}.{SLOT_EXT}")
    }

    /// Write `record` to its slot, evicting the oldest slot if a new slot
    /// would exceed the cap. Returns the written path.
    pub fn save(&self, record: &SaveRecord) -> Result<PathBuf, SaveError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::slot_name(&record.name));

        if !path.exists() {
            let slots = self.slots_newest_first()?;
            if slots.len() >= self.max_saves {
                if let Some((oldest, _)) = slots.last() {
                    match fs::remove_file(oldest) {
                        Ok(()) => log::info!("Evicted oldest save {}", oldest.display()),
                        Err(e) => log::warn!("Could not evict {}: {e}", oldest.display()),
                    }
                }
            }
        }

        let mut record = record.clone();
        record.timestamp = Utc::now();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&record)?)?;
        fs::rename(&tmp, &path)?;
        log::info!("Saved {} to {}", record.name, path.display());
        Ok(path)
    }

    /// Load a slot by file name as returned from `recent`.
    pub fn load(&self, slot: &str) -> Result<SaveRecord, SaveError> {
        let path = self.dir.join(slot);
        let data = match fs::read_to_string(&path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SaveError::NotFound(slot.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_str::<SaveRecord>(&data)?;
        log::info!("Loaded {} from {}", record.name, path.display());
        Ok(record)
    }

    /// Slot file names, newest first, at most `max_saves`.
    pub fn recent(&self) -> Vec<String> {
        match self.slots_newest_first() {
            Ok(slots) => slots
                .into_iter()
                .take(self.max_saves)
                .filter_map(|(p, _)| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .collect(),
            Err(e) => {
                log::warn!("Could not list saves in {}: {e}", self.dir.display());
                Vec::new()
            }
        }
    }

    fn slots_newest_first(&self) -> Result<Vec<(PathBuf, SystemTime)>, SaveError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SLOT_EXT) {
                continue;
            }
            let modified = fs::metadata(&path)?.modified()?;
            slots.push((path, modified));
        }
        slots.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_store(tag: &str, max: usize) -> SaveStore {
        let dir = std::env::temp_dir().join(format!(
            "petpal-save-{tag}-{}-{}",
            std::process::id(),
            fastrand::u64(..)
        ));
        SaveStore::new(dir, max)
    }

    fn record(name: &str) -> SaveRecord {
        SaveRecord {
            version: SAVE_VERSION,
            name: name.to_string(),
            age: 3,
            hunger_level: 42.5,
            boredom_level: 7.25,
            quantity: 4,
            remaining: 1,
            cooldown: 0.0,
            playtime: 5,
            playtime_remaining: 0.0,
            in_cooldown: true,
            cooldown_timer: 1234.0,
            timestamp: DateTime::<Utc>::default(),
        }
    }

    fn backdate(path: &Path, secs_ago: u64) {
        let t = SystemTime::now() - Duration::from_secs(secs_ago);
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(t)
            .unwrap();
    }

    #[test]
    fn save_then_load_restores_fields() {
        let store = temp_store("load", 5);
        let before = Utc::now();
        let path = store.save(&record("Hello Kitty")).unwrap();
        assert!(path.ends_with("Hello_Kitty.json"));
        let loaded = store.load("Hello_Kitty.json").unwrap();
        assert_eq!(loaded.name, "Hello Kitty");
        assert_eq!(loaded.hunger_level, 42.5);
        assert!(loaded.in_cooldown);
        assert!(loaded.timestamp >= before);
        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn missing_slot_is_not_found() {
        let store = temp_store("missing", 5);
        assert!(matches!(store.load("nobody.json"), Err(SaveError::NotFound(_))));
    }

    #[test]
    fn malformed_slot_is_format_error() {
        let store = temp_store("bad", 5);
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join("bad.json"), "name=Mochi\nage=3\n").unwrap();
        assert!(matches!(store.load("bad.json"), Err(SaveError::Format(_))));
        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn oldest_slot_is_evicted_at_cap() {
        let store = temp_store("evict", 2);
        let a = store.save(&record("A")).unwrap();
        backdate(&a, 100);
        let b = store.save(&record("B")).unwrap();
        backdate(&b, 50);

        // Overwriting an existing slot never evicts.
        let a = store.save(&record("A")).unwrap();
        backdate(&a, 10);
        assert_eq!(store.recent(), vec!["A.json".to_string(), "B.json".to_string()]);

        store.save(&record("C")).unwrap();
        let recent = store.recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0], "C.json");
        assert!(!recent.contains(&"B.json".to_string()));
        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn slot_names_stay_inside_the_save_dir() {
        assert_eq!(SaveStore::slot_name("Hello Kitty"), "Hello_Kitty.json");
        assert_eq!(SaveStore::slot_name("../etc/x"), "___etc_x.json");
        assert_eq!(SaveStore::slot_name(""), "pet.json");
        assert_eq!(SaveStore::slot_name("   "), "pet.json");
    }

    #[test]
    fn odd_names_still_count_toward_the_cap() {
        let store = temp_store("odd", 2);
        let a = store.save(&record("")).unwrap();
        backdate(&a, 100);
        let b = store.save(&record("a/b")).unwrap();
        assert_eq!(b.parent(), Some(store.dir()));
        backdate(&b, 50);
        store.save(&record("C")).unwrap();
        let recent = store.recent();
        assert_eq!(recent, vec!["C.json".to_string(), "a_b.json".to_string()]);
        let _ = fs::remove_dir_all(store.dir());
    }
}
