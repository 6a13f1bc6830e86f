//! Canned follow-up suggestions keyed on a sentiment score.

use crate::sentiment::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD, SentimentResult};

/// Suggestions for scores below 0.4.
pub const LOW_MOOD: [&str; 3] = [
    "Consider practicing gratitude - write down 3 things you're thankful for",
    "Try some deep breathing exercises to help manage difficult emotions",
    "Remember that challenging times are temporary and you have overcome difficulties before",
];

/// Suggestions for scores above 0.6.
pub const HIGH_MOOD: [&str; 2] = [
    "Great to see you're feeling positive! Consider what specific actions contributed to this mood",
    "This positive energy could be a great time to tackle a goal or help someone else",
];

/// Suggestions for everything in between.
pub const NEUTRAL_MOOD: [&str; 2] = [
    "Neutral feelings are completely normal. Consider what small step could improve your day",
    "Try engaging in an activity you enjoy or connecting with someone you care about",
];

/// Maps a sentiment to its suggestion bracket.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionEngine;

impl SuggestionEngine {
    /// Create the engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Suggestions for `sentiment`, in display order.
    #[must_use]
    pub fn suggest(&self, sentiment: &SentimentResult) -> Vec<&'static str> {
        let bank: &[&'static str] = if sentiment.score < NEGATIVE_THRESHOLD {
            &LOW_MOOD
        } else if sentiment.score > POSITIVE_THRESHOLD {
            &HIGH_MOOD
        } else {
            &NEUTRAL_MOOD
        };
        bank.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_score_gets_three_low_mood_suggestions() {
        let out = SuggestionEngine::new().suggest(&SentimentResult::from_score(0.2));
        assert_eq!(out, LOW_MOOD.to_vec());
        assert_eq!(
            out[0],
            "Consider practicing gratitude - write down 3 things you're thankful for"
        );
    }

    #[test]
    fn high_score_gets_two_high_mood_suggestions() {
        let out = SuggestionEngine::new().suggest(&SentimentResult::from_score(0.8));
        assert_eq!(out.len(), 2);
        assert_eq!(out, HIGH_MOOD.to_vec());
    }

    #[test]
    fn thresholds_are_exclusive() {
        let engine = SuggestionEngine::new();
        assert_eq!(engine.suggest(&SentimentResult::from_score(0.4)), NEUTRAL_MOOD.to_vec());
        assert_eq!(engine.suggest(&SentimentResult::from_score(0.6)), NEUTRAL_MOOD.to_vec());
        assert_eq!(engine.suggest(&SentimentResult::NEUTRAL), NEUTRAL_MOOD.to_vec());
    }
}
