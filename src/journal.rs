// --------------------------------------------------
// MoodJournal: the one owner of entries, gratitude notes and settings.
//
// Responsibilities:
// - Load the three collections from a KvStore (bad data -> empty/default)
// - Record entries newest-first and persist after every mutation
// - Search / filter / page history
// - Derive analytics, JSON and CSV exports, import, clear
//
// There are no subscriptions: callers re-fetch after a mutation.
// --------------------------------------------------

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::csv_export;
use crate::error::Result;
use crate::insights::{self, Insight};
use crate::models::{
    AppSettings, EXPORT_VERSION, ExportData, GratitudeEntry, MoodEntry, NewMoodEntry,
    SettingsPatch,
};
use crate::patterns::{self, DayPattern, MoodShare};
use crate::stats::{self, MoodStats, StreakCounting};
use crate::store::{ENTRIES_KEY, GRATITUDE_KEY, KvStore, SETTINGS_KEY};

pub const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_LEVEL: i64 = 5;

#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub mood: Option<String>, // None or "all" means every mood
    pub query: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub entries: Vec<MoodEntry>,
    pub total: usize,
    pub has_more: bool,
}

pub struct MoodJournal<'a> {
    store: &'a dyn KvStore,
    entries: Vec<MoodEntry>,
    gratitude: Vec<GratitudeEntry>,
    settings: AppSettings,
}

impl<'a> MoodJournal<'a> {
    pub fn load(store: &'a dyn KvStore) -> Self {
        Self {
            store,
            entries: load_or_default(store, ENTRIES_KEY),
            gratitude: load_or_default(store, GRATITUDE_KEY),
            settings: load_or_default(store, SETTINGS_KEY),
        }
    }

    // Newest first.
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn gratitude(&self) -> &[GratitudeEntry] {
        &self.gratitude
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn add_mood_entry(&mut self, new: NewMoodEntry, now: DateTime<FixedOffset>) -> Result<MoodEntry> {
        let entry = MoodEntry {
            id: new_id(),
            mood: new.mood,
            note: new.note,
            timestamp: now,
            intensity: new.intensity.unwrap_or(DEFAULT_LEVEL),
            energy_level: new.energy_level.unwrap_or(DEFAULT_LEVEL),
            sleep_quality: new.sleep_quality,
            triggers: new.triggers,
            activities: new.activities,
            location: new.location,
            weather: new.weather,
            voice_note: new.voice_note,
            photo_url: new.photo_url,
        };

        self.entries.insert(0, entry.clone());
        self.save(ENTRIES_KEY, &self.entries)?;
        tracing::debug!(id = %entry.id, mood = %entry.mood, "mood entry recorded");
        Ok(entry)
    }

    pub fn add_gratitude(&mut self, text: String, now: DateTime<FixedOffset>) -> Result<GratitudeEntry> {
        let entry = GratitudeEntry {
            id: new_id(),
            text,
            timestamp: now,
        };

        self.gratitude.insert(0, entry.clone());
        self.save(GRATITUDE_KEY, &self.gratitude)?;
        tracing::debug!(id = %entry.id, "gratitude entry recorded");
        Ok(entry)
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<&AppSettings> {
        self.settings.apply(patch);
        self.save(SETTINGS_KEY, &self.settings)?;
        Ok(&self.settings)
    }

    pub fn stats(&self, now: DateTime<FixedOffset>, counting: StreakCounting) -> MoodStats {
        stats::compute_stats(&self.entries, now, counting)
    }

    pub fn distribution(&self) -> Vec<MoodShare> {
        patterns::mood_distribution(&self.entries)
    }

    pub fn weekly_pattern(&self, now: DateTime<FixedOffset>) -> Vec<DayPattern> {
        patterns::weekly_pattern(&self.entries, now)
    }

    pub fn insights(&self, now: DateTime<FixedOffset>, counting: StreakCounting) -> Vec<Insight> {
        insights::generate_insights(&self.stats(now, counting))
    }

    // Case-insensitive match on note, triggers and activities.
    pub fn search(&self, query: &str) -> Vec<&MoodEntry> {
        let q = query.to_lowercase();
        self.entries.iter().filter(|e| matches_query(e, &q)).collect()
    }

    pub fn history(&self, filter: &HistoryFilter) -> HistoryPage {
        let mood = filter.mood.as_deref().filter(|m| *m != "all");
        let query = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let matching: Vec<&MoodEntry> = self
            .entries
            .iter()
            .filter(|e| mood.is_none_or(|m| e.mood == m))
            .filter(|e| query.as_deref().is_none_or(|q| matches_query(e, q)))
            .collect();

        let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        HistoryPage {
            total: matching.len(),
            has_more: limit < matching.len(),
            entries: matching.into_iter().take(limit).cloned().collect(),
        }
    }

    // Inclusive on both ends.
    pub fn entries_between(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Vec<&MoodEntry> {
        self.entries
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect()
    }

    pub fn export_data(&self, now: DateTime<FixedOffset>) -> ExportData {
        ExportData {
            entries: Some(self.entries.clone()),
            gratitude: Some(self.gratitude.clone()),
            settings: Some(self.settings.clone()),
            export_date: Some(now),
            version: Some(EXPORT_VERSION.to_string()),
        }
    }

    pub fn export_csv(&self, offset: FixedOffset) -> Result<String> {
        csv_export::export_csv(&self.entries, &self.gratitude, offset)
    }

    // Each section present in `data` replaces what is stored. Either the
    // whole backup lands or the journal is left as it was.
    pub fn import_data(&mut self, data: ExportData) -> Result<()> {
        let mut entries = data.entries;
        let mut gratitude = data.gratitude;
        if let Some(list) = entries.as_mut() {
            list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
        if let Some(list) = gratitude.as_mut() {
            list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }

        let mut writes: Vec<(&str, String)> = Vec::new();
        if let Some(list) = &entries {
            writes.push((ENTRIES_KEY, serde_json::to_string(list)?));
        }
        if let Some(list) = &gratitude {
            writes.push((GRATITUDE_KEY, serde_json::to_string(list)?));
        }
        if let Some(settings) = &data.settings {
            writes.push((SETTINGS_KEY, serde_json::to_string(settings)?));
        }
        self.write_all(&writes)?;

        if let Some(list) = entries {
            self.entries = list;
        }
        if let Some(list) = gratitude {
            self.gratitude = list;
        }
        if let Some(settings) = data.settings {
            self.settings = settings;
        }
        tracing::info!(
            entries = self.entries.len(),
            gratitude = self.gratitude.len(),
            "journal data imported"
        );
        Ok(())
    }

    // Drops both entry collections. Settings stay.
    pub fn clear_all(&mut self) -> Result<()> {
        self.entries.clear();
        self.gratitude.clear();
        self.store.clear(ENTRIES_KEY)?;
        self.store.clear(GRATITUDE_KEY)?;
        tracing::info!("all journal entries cleared");
        Ok(())
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.save(key, &json).map_err(|e| {
            tracing::error!(key, error = %e, "failed to persist journal data");
            e.into()
        })
    }

    // Saves each (key, json) pair in order. On failure the keys already
    // written get their previous contents back before the error returns.
    fn write_all(&self, writes: &[(&str, String)]) -> Result<()> {
        let previous = writes
            .iter()
            .map(|(key, _)| self.store.load(key))
            .collect::<std::io::Result<Vec<_>>>()?;

        for (done, (key, json)) in writes.iter().enumerate() {
            let Err(e) = self.store.save(key, json) else {
                continue;
            };
            tracing::error!(key = *key, error = %e, "failed to persist journal data, rolling back");
            for ((key, _), before) in writes[..done].iter().zip(&previous) {
                let restored = match before {
                    Some(text) => self.store.save(key, text),
                    None => self.store.clear(key),
                };
                if let Err(e) = restored {
                    tracing::error!(key = *key, error = %e, "failed to restore journal data");
                }
            }
            return Err(e.into());
        }
        Ok(())
    }
}

fn matches_query(e: &MoodEntry, lowercase_query: &str) -> bool {
    e.note.to_lowercase().contains(lowercase_query)
        || e.triggers.iter().any(|t| t.to_lowercase().contains(lowercase_query))
        || e.activities.iter().any(|a| a.to_lowercase().contains(lowercase_query))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Missing key -> default. Unreadable or malformed data is logged and
// replaced by the default; it never stops the app.
fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> T {
    match store.load(key) {
        Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "stored data is malformed, using defaults");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored data, using defaults");
            T::default()
        }
    }
}
