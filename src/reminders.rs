/*
Reminder scheduling arithmetic.
Delivery and timers belong to the frontend; this only answers "when".
*/

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use serde::Serialize;

use crate::models::NotificationSettings;

const MILESTONE_EVERY: u32 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub tag: &'static str,
}

// Parse a "HH:MM" string into a DateTime on the given date.
fn parse_hhmm_on(
    date: NaiveDate,
    hhmm: &str,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let (h, m) = hhmm.split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    let naive = date.and_hms_opt(h, m, 0)?;
    offset.from_local_datetime(&naive).single()
}

// Next daily reminder: today at reminder_time if still ahead, else tomorrow.
// None when reminders are off or the time does not parse.
pub fn next_reminder_at(
    settings: &NotificationSettings,
    now: DateTime<FixedOffset>,
) -> Option<DateTime<FixedOffset>> {
    if !settings.daily_reminder {
        return None;
    }
    let today = parse_hhmm_on(now.date_naive(), &settings.reminder_time, *now.offset())?;
    if today <= now {
        Some(today + Duration::days(1))
    } else {
        Some(today)
    }
}

pub fn daily_reminder_notice() -> Notice {
    Notice {
        title: "Mood Check-in".to_string(),
        body: "How are you feeling today? Take a moment to log your mood.".to_string(),
        tag: "daily-reminder",
    }
}

pub fn weekly_reflection_notice() -> Notice {
    Notice {
        title: "Weekly Reflection".to_string(),
        body: "Take a moment to reflect on your week. How have you been feeling?".to_string(),
        tag: "weekly-reflection",
    }
}

// Celebrate every full week of streak.
pub fn streak_milestone(streak: u32) -> Option<Notice> {
    if streak == 0 || streak % MILESTONE_EVERY != 0 {
        return None;
    }
    Some(Notice {
        title: "Streak Achievement! 🎉".to_string(),
        body: format!("Amazing! You've tracked your mood for {streak} days in a row!"),
        tag: "streak-notification",
    })
}
