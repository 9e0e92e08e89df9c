use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// Field names stay camelCase so exports from earlier versions load as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub mood: String, // label, see mood::Mood
    #[serde(default)]
    pub note: String,
    pub timestamp: DateTime<FixedOffset>,
    pub intensity: i64,    // 1..=10
    pub energy_level: i64, // 1..=10
    #[serde(default)]
    pub sleep_quality: Option<i64>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

// What a caller submits; the journal fills in id and timestamp.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMoodEntry {
    pub mood: String,
    #[serde(default)]
    pub note: String,
    pub intensity: Option<i64>,
    pub energy_level: Option<i64>,
    pub sleep_quality: Option<i64>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    pub location: Option<String>,
    pub weather: Option<String>,
    pub voice_note: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GratitudeEntry {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<FixedOffset>,
}

// Missing fields in stored or imported settings are filled from defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub daily_reminder: bool,
    pub reminder_time: String, // "HH:MM"
    pub weekly_reflection: bool,
    pub streak_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            daily_reminder: true,
            reminder_time: "20:00".to_string(),
            weekly_reflection: true,
            streak_notifications: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub dark_mode: bool,
    pub theme: String,
    pub notifications: NotificationSettings,
    pub data_retention: i64, // days
    pub privacy_mode: bool,
    pub auto_backup: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            theme: "default".to_string(),
            notifications: NotificationSettings::default(),
            data_retention: 365,
            privacy_mode: false,
            auto_backup: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPatch {
    pub daily_reminder: Option<bool>,
    pub reminder_time: Option<String>,
    pub weekly_reflection: Option<bool>,
    pub streak_notifications: Option<bool>,
}

// Partial settings update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub dark_mode: Option<bool>,
    pub theme: Option<String>,
    pub notifications: Option<NotificationPatch>,
    pub data_retention: Option<i64>,
    pub privacy_mode: Option<bool>,
    pub auto_backup: Option<bool>,
}

impl AppSettings {
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.dark_mode {
            self.dark_mode = v;
        }
        if let Some(v) = patch.theme {
            self.theme = v;
        }
        if let Some(n) = patch.notifications {
            let target = &mut self.notifications;
            if let Some(v) = n.daily_reminder {
                target.daily_reminder = v;
            }
            if let Some(v) = n.reminder_time {
                target.reminder_time = v;
            }
            if let Some(v) = n.weekly_reflection {
                target.weekly_reflection = v;
            }
            if let Some(v) = n.streak_notifications {
                target.streak_notifications = v;
            }
        }
        if let Some(v) = patch.data_retention {
            self.data_retention = v;
        }
        if let Some(v) = patch.privacy_mode {
            self.privacy_mode = v;
        }
        if let Some(v) = patch.auto_backup {
            self.auto_backup = v;
        }
    }
}

pub const EXPORT_VERSION: &str = "2.0.0";

// Full JSON backup. Sections missing on import are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    #[serde(default)]
    pub entries: Option<Vec<MoodEntry>>,
    #[serde(default)]
    pub gratitude: Option<Vec<GratitudeEntry>>,
    #[serde(default)]
    pub settings: Option<AppSettings>,
    #[serde(default)]
    pub export_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub version: Option<String>,
}
