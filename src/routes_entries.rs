// --------------------------------------------------
// Handles API endpoints for journal data.
//
// Responsibilities:
// - List / create / clear mood entries
// - List / create gratitude entries
// - Get / patch app settings
// - JSON backup export & import, CSV export
// -------------------------------------------------

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    Json,
};
use chrono::DateTime;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::JournalError;
use crate::journal::{HistoryFilter, MoodJournal};
use crate::models::{ExportData, MoodEntry, NewMoodEntry, SettingsPatch};
use crate::mood::Mood;

const NOTE_MAX_CHARS: usize = 200;
const GRATITUDE_MAX_CHARS: usize = 150;

// Log the cause, return a short reason.
fn failed(what: &'static str, e: JournalError) -> Response {
    tracing::error!(error = %e, "{what}");
    (StatusCode::INTERNAL_SERVER_ERROR, what).into_response()
}

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    pub mood: Option<String>,
    pub q: Option<String>,
    pub limit: Option<usize>,
}

// -----------------------------
// GET /api/entries
// Newest-first history, filtered by mood and search text, paged by limit
// -----------------------------
pub async fn get_entries(
    State(state): State<AppState>,
    Query(q): Query<EntriesQuery>,
) -> impl IntoResponse {
    let journal = MoodJournal::load(state.store.as_ref());
    let page = journal.history(&HistoryFilter {
        mood: q.mood,
        query: q.q,
        limit: q.limit,
    });
    Json(page)
}

// Trim, drop blanks, keep the first of any duplicates.
fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        if !label.is_empty() && !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}

fn in_scale(value: Option<i64>) -> bool {
    value.is_none_or(|v| (1..=10).contains(&v))
}

fn validate_entry(input: &mut NewMoodEntry) -> Result<(), &'static str> {
    if Mood::from_label(&input.mood).is_none() {
        return Err("unknown mood");
    }
    if input.note.chars().count() > NOTE_MAX_CHARS {
        return Err("note must be at most 200 characters");
    }
    if !in_scale(input.intensity) {
        return Err("intensity must be 1..=10");
    }
    if !in_scale(input.energy_level) {
        return Err("energyLevel must be 1..=10");
    }
    if !in_scale(input.sleep_quality) {
        return Err("sleepQuality must be 1..=10");
    }
    input.triggers = normalize_labels(std::mem::take(&mut input.triggers));
    input.activities = normalize_labels(std::mem::take(&mut input.activities));
    Ok(())
}

// -----------------------------
// POST /api/entries
// Records a new mood entry (timestamped now) and saves it
// -----------------------------
pub async fn create_entry(
    State(state): State<AppState>,
    Json(mut input): Json<NewMoodEntry>,
) -> impl IntoResponse {
    if let Err(reason) = validate_entry(&mut input) {
        return (StatusCode::BAD_REQUEST, reason).into_response();
    }

    let now = state.clock.now();
    let _guard = state.write_lock.lock().await;
    let mut journal = MoodJournal::load(state.store.as_ref());

    match journal.add_mood_entry(input, now) {
        Ok(entry) => Json(entry).into_response(),
        Err(e) => failed("failed to save entries", e),
    }
}

// -----------------------------
// DELETE /api/entries
// Removes every mood and gratitude entry; settings are kept
// -----------------------------
pub async fn clear_entries(State(state): State<AppState>) -> impl IntoResponse {
    let _guard = state.write_lock.lock().await;
    let mut journal = MoodJournal::load(state.store.as_ref());
    if let Err(e) = journal.clear_all() {
        return failed("failed to clear entries", e);
    }
    Json(serde_json::json!({ "ok": true })).into_response()
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: String, // RFC3339
    pub end: String,   // RFC3339
}

// -----------------------------
// GET /api/entries/range
// Entries with start <= timestamp <= end
// -----------------------------
pub async fn get_entries_in_range(
    State(state): State<AppState>,
    Query(q): Query<RangeQuery>,
) -> impl IntoResponse {
    let start = match DateTime::parse_from_rfc3339(&q.start) {
        Ok(dt) => dt,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid start").into_response(),
    };
    let end = match DateTime::parse_from_rfc3339(&q.end) {
        Ok(dt) => dt,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid end").into_response(),
    };

    let journal = MoodJournal::load(state.store.as_ref());
    let entries: Vec<MoodEntry> = journal
        .entries_between(start, end)
        .into_iter()
        .cloned()
        .collect();
    Json(entries).into_response()
}

// -----------------------------
// GET /api/gratitude
// -----------------------------
pub async fn get_gratitude(State(state): State<AppState>) -> impl IntoResponse {
    let journal = MoodJournal::load(state.store.as_ref());
    Json(journal.gratitude().to_vec())
}

#[derive(Debug, Deserialize)]
pub struct GratitudeInput {
    pub text: String,
}

// -----------------------------
// POST /api/gratitude
// -----------------------------
pub async fn create_gratitude(
    State(state): State<AppState>,
    Json(input): Json<GratitudeInput>,
) -> impl IntoResponse {
    let text = input.text.trim();
    if text.is_empty() {
        return (StatusCode::BAD_REQUEST, "text required").into_response();
    }
    if text.chars().count() > GRATITUDE_MAX_CHARS {
        return (StatusCode::BAD_REQUEST, "text must be at most 150 characters").into_response();
    }

    let now = state.clock.now();
    let _guard = state.write_lock.lock().await;
    let mut journal = MoodJournal::load(state.store.as_ref());

    match journal.add_gratitude(text.to_string(), now) {
        Ok(entry) => Json(entry).into_response(),
        Err(e) => failed("failed to save gratitude", e),
    }
}

// -----------------------------
// GET /api/settings
// -----------------------------
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    let journal = MoodJournal::load(state.store.as_ref());
    Json(journal.settings().clone())
}

// -----------------------------
// PUT /api/settings
// Applies only the fields present in the body
// -----------------------------
pub async fn put_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> impl IntoResponse {
    let _guard = state.write_lock.lock().await;
    let mut journal = MoodJournal::load(state.store.as_ref());
    match journal.update_settings(patch) {
        Ok(settings) => Json(settings.clone()).into_response(),
        Err(e) => failed("failed to save settings", e),
    }
}

// -----------------------------
// GET /api/export
// Full JSON backup
// -----------------------------
pub async fn export_json(State(state): State<AppState>) -> impl IntoResponse {
    let journal = MoodJournal::load(state.store.as_ref());
    Json(journal.export_data(state.clock.now()))
}

// -----------------------------
// GET /api/export.csv
// -----------------------------
pub async fn export_csv(State(state): State<AppState>) -> impl IntoResponse {
    let now = state.clock.now();
    let journal = MoodJournal::load(state.store.as_ref());

    let csv = match journal.export_csv(*now.offset()) {
        Ok(text) => text,
        Err(e) => return failed("failed to build csv", e),
    };

    let disposition = format!(
        "attachment; filename=\"mood-tracker-export-{}.csv\"",
        now.format("%Y-%m-%d")
    );
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response()
}

// -----------------------------
// POST /api/import
// Replaces each section present in the backup
// -----------------------------
pub async fn import_json(
    State(state): State<AppState>,
    Json(data): Json<ExportData>,
) -> impl IntoResponse {
    let _guard = state.write_lock.lock().await;
    let mut journal = MoodJournal::load(state.store.as_ref());
    if let Err(e) = journal.import_data(data) {
        return failed("failed to import data", e);
    }
    Json(serde_json::json!({
        "ok": true,
        "entries": journal.entries().len(),
        "gratitude": journal.gratitude().len(),
    }))
    .into_response()
}
