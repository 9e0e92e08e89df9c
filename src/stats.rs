/*
Statistics engine.
Pure functions over the entry list; "now" is always passed in so
streaks and trends can be pinned in tests.
*/

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::MoodEntry;
use crate::mood::mood_score;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// How consecutive entries advance a streak.
//
// PerEntry:       every entry within one day of the previous one adds 1,
//                 so two entries on the same day add 2.
// PerCalendarDay: at most one increment per local calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakCounting {
    #[default]
    PerEntry,
    PerCalendarDay,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub average_mood: f64,
    pub most_common_mood: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_entries: usize,
    pub weekly_trend: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
}

// Entries may come in any order.
pub fn compute_stats(
    entries: &[MoodEntry],
    now: DateTime<FixedOffset>,
    counting: StreakCounting,
) -> MoodStats {
    if entries.is_empty() {
        return MoodStats::default();
    }

    let streaks = calculate_streaks(entries, now, counting);

    MoodStats {
        average_mood: average_score(entries).unwrap_or(0.0),
        most_common_mood: most_common_mood(entries),
        current_streak: streaks.current,
        longest_streak: streaks.longest,
        total_entries: entries.len(),
        weekly_trend: weekly_trend(entries, now),
    }
}

// Mean ordinal score, None for an empty input.
pub fn average_score<'a>(entries: impl IntoIterator<Item = &'a MoodEntry>) -> Option<f64> {
    let (sum, count) = entries
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), e| {
            (sum + u64::from(mood_score(&e.mood)), count + 1)
        });
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

// Label with the highest count.
// Counts are kept in first-seen order; on a tie the first label to reach
// the max during that scan wins.
pub fn most_common_mood(entries: &[MoodEntry]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for e in entries {
        match counts.iter_mut().find(|(label, _)| *label == e.mood) {
            Some((_, count)) => *count += 1,
            None => counts.push((e.mood.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        if best.is_none_or(|(_, max)| count > max) {
            best = Some((label, count));
        }
    }

    best.map(|(label, _)| label.to_string()).unwrap_or_default()
}

pub fn calculate_streaks(
    entries: &[MoodEntry],
    now: DateTime<FixedOffset>,
    counting: StreakCounting,
) -> Streaks {
    match counting {
        StreakCounting::PerEntry => {
            let mut stamps: Vec<DateTime<FixedOffset>> =
                entries.iter().map(|e| e.timestamp).collect();
            stamps.sort_by(|a, b| b.cmp(a));

            let mut last = now;
            let gaps = stamps.into_iter().map(|ts| {
                let gap = whole_days(last, ts);
                last = ts;
                gap
            });
            walk_streaks(gaps)
        }
        StreakCounting::PerCalendarDay => {
            let offset = *now.offset();
            let mut days: Vec<NaiveDate> = entries
                .iter()
                .map(|e| e.timestamp.with_timezone(&offset).date_naive())
                .collect();
            days.sort_by(|a, b| b.cmp(a));
            days.dedup();

            let mut last = now.date_naive();
            let gaps = days.into_iter().map(|day| {
                let gap = (last - day).num_days();
                last = day;
                gap
            });
            walk_streaks(gaps)
        }
    }
}

// Whole days from `earlier` to `later`, floored.
fn whole_days(later: DateTime<FixedOffset>, earlier: DateTime<FixedOffset>) -> i64 {
    (later - earlier).num_milliseconds().div_euclid(MS_PER_DAY)
}

// Gaps are in days, newest first, the first one measured from "now".
// A gap of 2+ days ends a run. The current streak is the most recent
// run and is frozen once that run ends.
fn walk_streaks(gaps: impl IntoIterator<Item = i64>) -> Streaks {
    let mut current = 0u32;
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut current_frozen = false;

    for gap in gaps {
        if gap <= 1 {
            run += 1;
            if !current_frozen {
                current = run;
            }
        } else {
            longest = longest.max(run);
            run = 1;
            current_frozen = true;
        }
    }

    Streaks {
        current,
        longest: longest.max(run),
    }
}

// Mean score of the last 7 days minus the mean of the 7 days before.
// 0 when either window is empty.
pub fn weekly_trend(entries: &[MoodEntry], now: DateTime<FixedOffset>) -> f64 {
    let one_week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let this_week = entries.iter().filter(|e| e.timestamp >= one_week_ago);
    let last_week = entries
        .iter()
        .filter(|e| e.timestamp >= two_weeks_ago && e.timestamp < one_week_ago);

    match (average_score(this_week), average_score(last_week)) {
        (Some(this), Some(last)) => this - last,
        _ => 0.0,
    }
}
