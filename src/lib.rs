// Define data modules
pub mod models;  // Data structures (MoodEntry, GratitudeEntry, AppSettings, ...)
pub mod mood;    // Mood labels and their ordinal scores
pub mod store;   // Key-value persistence (one JSON document per key)
pub mod clock;   // Injectable "now"
pub mod error;   // JournalError

// Core analytics, independent of HTTP / Axum
pub mod stats;      // Averages, most common mood, streaks, weekly trend
pub mod patterns;   // Distribution and 7-day pattern
pub mod insights;   // Threshold-based observations and trend badge
pub mod wellness;   // Recommendations and affirmations
pub mod reminders;  // Reminder times and streak milestones
pub mod csv_export; // Two-section CSV export

pub mod journal; // Owns the collections; loads, mutates and persists them
pub mod config;  // MOOD_JOURNAL_* settings

pub mod app;              // Router and shared state
pub mod routes_entries;   // HTTP handlers for entries, gratitude, settings, backup
pub mod routes_analytics; // HTTP handlers for analytics and wellness content
