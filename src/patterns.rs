// Distribution and 7-day pattern for the analytics dashboard.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::models::MoodEntry;
use crate::mood::{DEFAULT_SCORE, Mood};
use crate::stats::average_score;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodShare {
    pub mood: Mood,
    pub label: &'static str,
    pub emoji: &'static str,
    pub count: usize,
    pub percentage: f64, // 0..=100
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPattern {
    pub date: NaiveDate,
    pub day_name: String, // "Mon"
    pub score: f64,
    pub mood: Mood,
    pub emoji: &'static str,
    pub entry_count: usize,
    pub tooltip: String,
}

// One row per catalog mood. Empty input gives no rows rather than zeros.
pub fn mood_distribution(entries: &[MoodEntry]) -> Vec<MoodShare> {
    if entries.is_empty() {
        return Vec::new();
    }
    let total = entries.len() as f64;

    Mood::ALL
        .into_iter()
        .map(|mood| {
            let count = entries.iter().filter(|e| e.mood == mood.label()).count();
            MoodShare {
                mood,
                label: mood.display_name(),
                emoji: mood.emoji(),
                count,
                percentage: count as f64 / total * 100.0,
            }
        })
        .collect()
}

// Today and the six days before it, oldest first.
// Entries are grouped by calendar date in the offset of `now`.
pub fn weekly_pattern(entries: &[MoodEntry], now: DateTime<FixedOffset>) -> Vec<DayPattern> {
    let offset = *now.offset();
    let today = now.date_naive();

    (0..=6)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            let day_entries: Vec<&MoodEntry> = entries
                .iter()
                .filter(|e| e.timestamp.with_timezone(&offset).date_naive() == date)
                .collect();

            let score = average_score(day_entries.iter().copied())
                .unwrap_or(f64::from(DEFAULT_SCORE));
            let mood = Mood::from_score(score.round() as i64).unwrap_or(Mood::Neutral);

            DayPattern {
                date,
                day_name: date.format("%a").to_string(),
                score,
                mood,
                emoji: mood.emoji(),
                entry_count: day_entries.len(),
                tooltip: format!(
                    "{}: {:.1}/5 ({} entries)",
                    date.format("%b %-d"),
                    score,
                    day_entries.len()
                ),
            }
        })
        .collect()
}
