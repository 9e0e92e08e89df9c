// Static wellness content: recommendations keyed by mood, and affirmations.

use rand::seq::SliceRandom;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Breathing,
    Activity,
    Mindfulness,
    Gratitude,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub mood_trigger: &'static [&'static str],
}

pub static RECOMMENDATIONS: [Recommendation; 6] = [
    Recommendation {
        id: "1",
        title: "Deep Breathing Exercise",
        description: "Take 5 deep breaths, inhaling for 4 counts and exhaling for 6 counts",
        kind: RecommendationKind::Breathing,
        mood_trigger: &["sad", "verysad", "neutral"],
    },
    Recommendation {
        id: "2",
        title: "Take a Walk",
        description: "A 10-minute walk can boost your mood and energy levels",
        kind: RecommendationKind::Activity,
        mood_trigger: &["sad", "neutral"],
    },
    Recommendation {
        id: "3",
        title: "Practice Gratitude",
        description: "Write down 3 things you're grateful for today",
        kind: RecommendationKind::Gratitude,
        mood_trigger: &["sad", "verysad", "neutral"],
    },
    Recommendation {
        id: "4",
        title: "Mindful Moment",
        description: "Take 2 minutes to focus on your surroundings using your 5 senses",
        kind: RecommendationKind::Mindfulness,
        mood_trigger: &["sad", "verysad", "neutral"],
    },
    Recommendation {
        id: "5",
        title: "Listen to Music",
        description: "Play your favorite uplifting song and really listen to it",
        kind: RecommendationKind::Activity,
        mood_trigger: &["sad", "neutral"],
    },
    Recommendation {
        id: "6",
        title: "Progressive Muscle Relaxation",
        description: "Tense and release each muscle group for 5 seconds",
        kind: RecommendationKind::Breathing,
        mood_trigger: &["sad", "verysad"],
    },
];

// Catalog entries tagged with `mood`, in catalog order.
pub fn recommendations_for_mood(mood: &str) -> Vec<&'static Recommendation> {
    RECOMMENDATIONS
        .iter()
        .filter(|r| r.mood_trigger.iter().any(|m| *m == mood))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Affirmation {
    pub id: &'static str,
    pub text: &'static str,
    pub category: &'static str,
}

pub static AFFIRMATIONS: [Affirmation; 8] = [
    Affirmation { id: "1", text: "I am worthy of love and happiness", category: "self-love" },
    Affirmation { id: "2", text: "This feeling is temporary and will pass", category: "resilience" },
    Affirmation { id: "3", text: "I have overcome challenges before and I can do it again", category: "strength" },
    Affirmation { id: "4", text: "I choose to focus on what I can control", category: "mindfulness" },
    Affirmation { id: "5", text: "I am grateful for the good things in my life", category: "gratitude" },
    Affirmation { id: "6", text: "I deserve to take care of myself", category: "self-care" },
    Affirmation { id: "7", text: "Every day is a new opportunity to grow", category: "growth" },
    Affirmation { id: "8", text: "I am enough, just as I am", category: "self-acceptance" },
];

pub fn affirmations_by_category(category: &str) -> Vec<&'static Affirmation> {
    AFFIRMATIONS.iter().filter(|a| a.category == category).collect()
}

pub fn random_affirmation<R: rand::Rng + ?Sized>(rng: &mut R) -> &'static Affirmation {
    // AFFIRMATIONS is never empty
    AFFIRMATIONS.choose(rng).unwrap_or(&AFFIRMATIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn sad_matches_every_recommendation() {
        let ids: Vec<&str> = recommendations_for_mood("sad").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn very_sad_keeps_catalog_order() {
        let ids: Vec<&str> = recommendations_for_mood("verysad").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "3", "4", "6"]);
    }

    #[test]
    fn happy_gets_nothing() {
        assert!(recommendations_for_mood("happy").is_empty());
        assert!(recommendations_for_mood("unknown").is_empty());
    }

    #[test]
    fn affirmation_lookup() {
        let found = affirmations_by_category("growth");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "7");
        assert!(affirmations_by_category("nope").is_empty());

        let mut rng = StdRng::seed_from_u64(7);
        let pick = random_affirmation(&mut rng);
        assert!(AFFIRMATIONS.iter().any(|a| a.id == pick.id));
    }

    #[test]
    fn recommendation_serializes_kind_as_type() {
        let v = serde_json::to_value(&RECOMMENDATIONS[1]).unwrap();
        assert_eq!(v["type"], "activity");
        assert_eq!(v["moodTrigger"][0], "sad");
    }
}
