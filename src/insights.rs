// Threshold rules over MoodStats.
// Every matching rule adds one insight; an empty list means no banner.

use serde::Serialize;

use crate::stats::MoodStats;

const STREAK_THRESHOLD: u32 = 7;
const TREND_THRESHOLD: f64 = 0.5;
const POSITIVE_AVERAGE: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub id: &'static str,
    pub text: String,
}

pub fn generate_insights(stats: &MoodStats) -> Vec<Insight> {
    let mut insights = Vec::new();

    if stats.current_streak >= STREAK_THRESHOLD {
        insights.push(Insight {
            id: "streak",
            text: format!(
                "Great job! You've been consistently tracking your mood for {} days.",
                stats.current_streak
            ),
        });
    }

    match trend_direction(stats.weekly_trend) {
        TrendDirection::Up => insights.push(Insight {
            id: "trend-up",
            text: "Your mood has been trending upward this week compared to last week!".to_string(),
        }),
        TrendDirection::Down => insights.push(Insight {
            id: "trend-down",
            text: "Your mood has been lower this week. Consider practicing some self-care activities."
                .to_string(),
        }),
        TrendDirection::Flat => {}
    }

    if stats.average_mood >= POSITIVE_AVERAGE {
        insights.push(Insight {
            id: "positive",
            text: "You've been maintaining a positive mood overall. Keep up the great work!"
                .to_string(),
        });
    }

    insights
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

pub fn trend_direction(weekly_trend: f64) -> TrendDirection {
    if weekly_trend > TREND_THRESHOLD {
        TrendDirection::Up
    } else if weekly_trend < -TREND_THRESHOLD {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    }
}

// Badge text: "+1.2", "-0.8", or "0.0" inside the dead band.
pub fn trend_text(weekly_trend: f64) -> String {
    match trend_direction(weekly_trend) {
        TrendDirection::Up => format!("+{weekly_trend:.1}"),
        TrendDirection::Down => format!("{weekly_trend:.1}"),
        TrendDirection::Flat => "0.0".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBadge {
    pub direction: TrendDirection,
    pub text: String,
    pub emoji: &'static str,
}

pub fn trend_badge(weekly_trend: f64) -> TrendBadge {
    let direction = trend_direction(weekly_trend);
    TrendBadge {
        direction,
        text: trend_text(weekly_trend),
        emoji: match direction {
            TrendDirection::Up => "📈",
            TrendDirection::Down => "📉",
            TrendDirection::Flat => "➡️",
        },
    }
}
