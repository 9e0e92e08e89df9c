// Mood scoring table.
//
// Closed set of mood labels, each mapped to an ordinal score 1..=5.
// Entries store the label as a plain string, so anything outside the
// table scores as neutral instead of failing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Okay,
    Neutral,
    Sad,
    VerySad,
}

// Score used for labels the table does not know.
pub const DEFAULT_SCORE: u8 = 3;

impl Mood {
    // Catalog order. Used for distribution rows and tie resolution.
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Okay, Mood::Neutral, Mood::Sad, Mood::VerySad];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Okay => "okay",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::VerySad => "verysad",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Okay => "Okay",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::VerySad => "Very Sad",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😀",
            Mood::Okay => "🙂",
            Mood::Neutral => "😐",
            Mood::Sad => "🙁",
            Mood::VerySad => "😢",
        }
    }

    pub fn score(self) -> u8 {
        match self {
            Mood::Happy => 5,
            Mood::Okay => 4,
            Mood::Neutral => 3,
            Mood::Sad => 2,
            Mood::VerySad => 1,
        }
    }

    pub fn from_label(label: &str) -> Option<Mood> {
        Mood::ALL.into_iter().find(|m| m.label() == label)
    }

    // First mood in catalog order whose score equals `score`.
    pub fn from_score(score: i64) -> Option<Mood> {
        Mood::ALL.into_iter().find(|m| i64::from(m.score()) == score)
    }
}

// Ordinal score for a stored label (unknown -> 3)
pub fn mood_score(label: &str) -> u8 {
    Mood::from_label(label).map_or(DEFAULT_SCORE, Mood::score)
}

// Quick-pick chips offered by the entry form.
pub const COMMON_TRIGGERS: [&str; 12] = [
    "Work stress", "Relationship", "Health", "Money", "Family", "Weather",
    "Social media", "News", "Traffic", "Lack of sleep", "Exercise", "Food",
];

pub const COMMON_ACTIVITIES: [&str; 12] = [
    "Working", "Exercising", "Socializing", "Reading", "Watching TV", "Cooking",
    "Shopping", "Traveling", "Gaming", "Music", "Art", "Meditation",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_follow_the_table() {
        assert_eq!(mood_score("happy"), 5);
        assert_eq!(mood_score("okay"), 4);
        assert_eq!(mood_score("neutral"), 3);
        assert_eq!(mood_score("sad"), 2);
        assert_eq!(mood_score("verysad"), 1);
    }

    #[test]
    fn unknown_label_scores_neutral() {
        assert_eq!(mood_score("ecstatic"), DEFAULT_SCORE);
        assert_eq!(mood_score(""), DEFAULT_SCORE);
        assert_eq!(mood_score("Happy"), DEFAULT_SCORE);
    }

    #[test]
    fn from_score_maps_back_to_catalog() {
        assert_eq!(Mood::from_score(5), Some(Mood::Happy));
        assert_eq!(Mood::from_score(1), Some(Mood::VerySad));
        assert_eq!(Mood::from_score(0), None);
    }

    #[test]
    fn serde_uses_stored_labels() {
        let json = serde_json::to_string(&Mood::VerySad).unwrap();
        assert_eq!(json, "\"verysad\"");
        let back: Mood = serde_json::from_str("\"okay\"").unwrap();
        assert_eq!(back, Mood::Okay);
    }
}
