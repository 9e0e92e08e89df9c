use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::insights::{self, Insight, TrendBadge};
use crate::journal::MoodJournal;
use crate::mood::{COMMON_ACTIVITIES, COMMON_TRIGGERS, Mood};
use crate::patterns::{DayPattern, MoodShare};
use crate::reminders::{self, Notice};
use crate::stats::MoodStats;
use crate::wellness::{self, AFFIRMATIONS, Affirmation, Recommendation};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub now: DateTime<FixedOffset>,
    pub stats: MoodStats,
    pub trend: TrendBadge,
    pub distribution: Vec<MoodShare>,
    pub weekly_pattern: Vec<DayPattern>,
    pub insights: Vec<Insight>,
}

// -----------------------------
// GET /api/analytics
// Stats, trend badge, distribution, 7-day pattern and insights,
// all recomputed from the stored entries
// -----------------------------
pub async fn get_analytics(State(state): State<AppState>) -> impl IntoResponse {
    let now = state.clock.now();
    let journal = MoodJournal::load(state.store.as_ref());

    let stats = journal.stats(now, state.streak_counting);

    Json(AnalyticsResponse {
        now,
        trend: insights::trend_badge(stats.weekly_trend),
        distribution: journal.distribution(),
        weekly_pattern: journal.weekly_pattern(now),
        insights: insights::generate_insights(&stats),
        stats,
    })
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub mood: Option<String>,
    pub limit: Option<usize>,
}

// -----------------------------
// GET /api/recommendations
// For `mood`, or for the latest entry's mood when omitted
// -----------------------------
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(q): Query<RecommendationsQuery>,
) -> impl IntoResponse {
    let mood = match q.mood {
        Some(m) => Some(m),
        None => {
            let journal = MoodJournal::load(state.store.as_ref());
            journal.entries().first().map(|e| e.mood.clone())
        }
    };

    let recs: Vec<&'static Recommendation> = match mood {
        Some(m) => wellness::recommendations_for_mood(&m)
            .into_iter()
            .take(q.limit.unwrap_or(usize::MAX))
            .collect(),
        None => Vec::new(),
    };
    Json(recs)
}

#[derive(Debug, Deserialize)]
pub struct AffirmationsQuery {
    pub category: Option<String>,
}

// -----------------------------
// GET /api/affirmations
// All affirmations, or those in `category`
// -----------------------------
pub async fn get_affirmations(Query(q): Query<AffirmationsQuery>) -> impl IntoResponse {
    let list: Vec<&'static Affirmation> = match q.category {
        Some(c) => wellness::affirmations_by_category(&c),
        None => AFFIRMATIONS.iter().collect(),
    };
    Json(list)
}

// -----------------------------
// GET /api/affirmations/random
// -----------------------------
pub async fn get_random_affirmation() -> impl IntoResponse {
    let pick = wellness::random_affirmation(&mut rand::thread_rng());
    Json(pick)
}

#[derive(Debug, Serialize)]
pub struct MoodOption {
    pub value: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
    pub score: u8,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub moods: Vec<MoodOption>,
    pub triggers: &'static [&'static str],
    pub activities: &'static [&'static str],
}

// -----------------------------
// GET /api/presets
// Mood options and the quick-pick trigger/activity chips
// -----------------------------
pub async fn get_presets() -> impl IntoResponse {
    let moods = Mood::ALL
        .into_iter()
        .map(|m| MoodOption {
            value: m.label(),
            label: m.display_name(),
            emoji: m.emoji(),
            score: m.score(),
        })
        .collect();

    Json(PresetsResponse {
        moods,
        triggers: &COMMON_TRIGGERS,
        activities: &COMMON_ACTIVITIES,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub next_reminder_at: Option<DateTime<FixedOffset>>,
    pub reminder: Option<Notice>,
    pub weekly_reflection: Option<Notice>,
    pub streak_milestone: Option<Notice>,
}

// -----------------------------
// GET /api/reminders/next
// When the frontend should fire its next notifications
// -----------------------------
pub async fn get_next_reminder(State(state): State<AppState>) -> impl IntoResponse {
    let now = state.clock.now();
    let journal = MoodJournal::load(state.store.as_ref());
    let notifications = &journal.settings().notifications;

    let next_reminder_at = reminders::next_reminder_at(notifications, now);
    let streak_milestone = if notifications.streak_notifications {
        let stats = journal.stats(now, state.streak_counting);
        reminders::streak_milestone(stats.current_streak)
    } else {
        None
    };

    Json(ReminderResponse {
        next_reminder_at,
        reminder: next_reminder_at.map(|_| reminders::daily_reminder_notice()),
        weekly_reflection: notifications
            .weekly_reflection
            .then(reminders::weekly_reflection_notice),
        streak_milestone,
    })
}
