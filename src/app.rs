use std::{path::Path, sync::Arc};

// Import axum routing utilities and Router
use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::services::ServeDir; // Serves the frontend (HTML/CSS/JS)

use crate::clock::Clock;
use crate::routes_analytics;
use crate::routes_entries;
use crate::stats::StreakCounting;
use crate::store::KvStore;

// Shared by every handler. Each request loads a fresh MoodJournal from
// the store. Handlers that save hold `write_lock` from load to save so
// concurrent requests cannot overwrite each other's changes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub clock: Arc<dyn Clock>,
    pub streak_counting: StreakCounting,
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KvStore>,
        clock: Arc<dyn Clock>,
        streak_counting: StreakCounting,
    ) -> Self {
        Self {
            store,
            clock,
            streak_counting,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // entries
        .route(
            "/entries",
            get(routes_entries::get_entries)
                .post(routes_entries::create_entry)
                .delete(routes_entries::clear_entries),
        )
        .route("/entries/range", get(routes_entries::get_entries_in_range))
        // gratitude
        .route(
            "/gratitude",
            get(routes_entries::get_gratitude).post(routes_entries::create_gratitude),
        )
        // settings
        .route(
            "/settings",
            get(routes_entries::get_settings).put(routes_entries::put_settings),
        )
        // backup
        .route("/export", get(routes_entries::export_json))
        .route("/export.csv", get(routes_entries::export_csv))
        .route("/import", post(routes_entries::import_json))
        // analytics & wellness
        .route("/analytics", get(routes_analytics::get_analytics))
        .route("/recommendations", get(routes_analytics::get_recommendations))
        .route("/affirmations", get(routes_analytics::get_affirmations))
        .route("/affirmations/random", get(routes_analytics::get_random_affirmation))
        .route("/presets", get(routes_analytics::get_presets))
        .route("/reminders/next", get(routes_analytics::get_next_reminder))
        .with_state(state)
}

pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .nest("/api", api_router(state))
        .fallback_service(ServeDir::new(static_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use chrono::Duration;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::clock::FixedClock;
    use crate::stats::tests::at;
    use crate::models::MoodEntry;
    use crate::store::{ENTRIES_KEY, FileStore, MemoryStore};

    fn test_state() -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            store.clone(),
            Arc::new(FixedClock(at(2026, 10, 19, 12))),
            StreakCounting::PerEntry,
        );
        (state, store)
    }

    async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = api_router(state.clone()).oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(state, method, uri, body).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn create_then_list_entries() {
        let (state, _) = test_state();
        let (status, created) = send_json(
            &state,
            "POST",
            "/entries",
            Some(json!({
                "mood": "okay",
                "note": "walked to work",
                "intensity": 6,
                "triggers": [" Work stress ", "Work stress", ""],
                "activities": ["Exercising"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["energyLevel"], 5);
        assert_eq!(created["triggers"], json!(["Work stress"]));
        assert_eq!(created["timestamp"], "2026-10-19T12:00:00+00:00");

        let (status, page) = send_json(&state, "GET", "/entries?q=WORK", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 1);
        assert_eq!(page["hasMore"], false);
    }

    #[tokio::test]
    async fn create_rejects_bad_input() {
        let (state, store) = test_state();
        let cases = [
            json!({"mood": "ecstatic"}),
            json!({"mood": "sad", "intensity": 11}),
            json!({"mood": "sad", "sleepQuality": 0}),
            json!({"mood": "sad", "note": "x".repeat(201)}),
        ];
        for body in cases {
            let (status, _) = send(&state, "POST", "/entries", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
        assert_eq!(store.load(ENTRIES_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn gratitude_validation_and_listing() {
        let (state, _) = test_state();
        let (status, _) = send(&state, "POST", "/gratitude", Some(json!({"text": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&state, "POST", "/gratitude", Some(json!({"text": "  warm soup "}))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, list) = send_json(&state, "GET", "/gratitude", None).await;
        assert_eq!(list[0]["text"], "warm soup");
    }

    #[tokio::test]
    async fn settings_patch_roundtrip() {
        let (state, _) = test_state();
        let (status, s) = send_json(
            &state,
            "PUT",
            "/settings",
            Some(json!({"darkMode": true, "notifications": {"reminderTime": "09:00"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(s["darkMode"], true);
        assert_eq!(s["notifications"]["reminderTime"], "09:00");
        assert_eq!(s["notifications"]["dailyReminder"], true);

        let (_, s) = send_json(&state, "GET", "/settings", None).await;
        assert_eq!(s["dataRetention"], 365);

        let (_, next) = send_json(&state, "GET", "/reminders/next", None).await;
        assert_eq!(next["nextReminderAt"], "2026-10-20T09:00:00+00:00");
    }

    #[tokio::test]
    async fn analytics_for_a_seeded_journal() {
        let (state, _) = test_state();
        let now = at(2026, 10, 19, 12);
        let entries: Vec<Value> = (1..=3)
            .flat_map(|d| {
                [
                    json!({"id": format!("a{d}"), "mood": "happy", "timestamp": now - Duration::days(d), "intensity": 5, "energyLevel": 5}),
                    json!({"id": format!("b{d}"), "mood": "neutral", "timestamp": now - Duration::days(7 + d), "intensity": 5, "energyLevel": 5}),
                ]
            })
            .collect();
        let (status, _) = send(&state, "POST", "/import", Some(json!({"entries": entries}))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, a) = send_json(&state, "GET", "/analytics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(a["stats"]["weeklyTrend"], 2.0);
        assert_eq!(a["stats"]["totalEntries"], 6);
        assert_eq!(a["trend"]["text"], "+2.0");
        assert_eq!(a["insights"][0]["id"], "trend-up");
        assert_eq!(a["weeklyPattern"].as_array().unwrap().len(), 7);
        assert_eq!(a["weeklyPattern"][6]["score"], 3.0);
        assert_eq!(a["weeklyPattern"][6]["mood"], "neutral");
        assert_eq!(a["distribution"].as_array().unwrap().len(), 5);

        // latest entry is happy, which has no recommendations
        let (_, recs) = send_json(&state, "GET", "/recommendations", None).await;
        assert_eq!(recs, json!([]));
        let (_, recs) = send_json(&state, "GET", "/recommendations?mood=verysad&limit=2", None).await;
        assert_eq!(recs.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn csv_export_and_clear() {
        let (state, store) = test_state();
        send(&state, "POST", "/entries", Some(json!({"mood": "sad", "note": "He said, \"hi\""}))).await;

        let (status, bytes) = send(&state, "GET", "/export.csv", None).await;
        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("MOOD ENTRIES\n"));
        assert!(text.contains(r#""He said, ""hi""""#));

        let (status, _) = send(&state, "DELETE", "/entries", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.load(ENTRIES_KEY).unwrap(), None);

        let (_, export) = send_json(&state, "GET", "/export", None).await;
        assert_eq!(export["entries"], json!([]));
        assert_eq!(export["version"], "2.0.0");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_posts_are_all_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path()));
        let state = AppState::new(
            store.clone(),
            Arc::new(FixedClock(at(2026, 10, 19, 12))),
            StreakCounting::PerEntry,
        );

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..40 {
            let state = state.clone();
            tasks.spawn(async move {
                let body = json!({"mood": "good", "note": format!("entry {i}")});
                send(&state, "POST", "/entries", Some(body)).await.0
            });
        }

        let mut ok = 0;
        while let Some(status) = tasks.join_next().await {
            assert_eq!(status.unwrap(), StatusCode::OK);
            ok += 1;
        }
        assert_eq!(ok, 40);

        let text = store.load(ENTRIES_KEY).unwrap().unwrap();
        let stored: Vec<MoodEntry> = serde_json::from_str(&text).unwrap();
        assert_eq!(stored.len(), 40);

        let (_, page) = send_json(&state, "GET", "/entries?limit=100", None).await;
        assert_eq!(page["total"], 40);
    }

    #[tokio::test]
    async fn range_requires_valid_timestamps() {
        let (state, _) = test_state();
        let (status, _) = send(&state, "GET", "/entries/range?start=yesterday&end=today", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, list) = send_json(
            &state,
            "GET",
            "/entries/range?start=2026-10-01T00:00:00Z&end=2026-10-31T00:00:00Z",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn catalog_endpoints() {
        let (state, _) = test_state();
        let (_, presets) = send_json(&state, "GET", "/presets", None).await;
        assert_eq!(presets["moods"][4]["value"], "verysad");
        assert_eq!(presets["triggers"].as_array().unwrap().len(), 12);

        let (_, found) = send_json(&state, "GET", "/affirmations?category=strength", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (status, one) = send_json(&state, "GET", "/affirmations/random", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(one["text"].is_string());
    }
}
