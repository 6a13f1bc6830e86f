//! Journal sentiment heuristic.
//!
//! A keyword counter, not NLP: each whitespace token is checked for a
//! substring hit against a small positive and a small negative lexicon, and
//! the difference moves a score away from 0.5 in steps of 0.1.
//!
//! ```text
//! pos > neg  →  score = min(0.9, 0.5 + (pos - neg) * 0.1)
//! neg > pos  →  score = max(0.1, 0.5 - (neg - pos) * 0.1)
//! otherwise  →  score = 0.5
//! confidence = clamp((pos + neg) * 20, 60, 100)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Words whose presence inside a token counts as a positive hit.
pub const POSITIVE_WORDS: [&str; 8] = [
    "happy", "joy", "great", "amazing", "wonderful", "excited", "love", "blessed",
];

/// Words whose presence inside a token counts as a negative hit.
pub const NEGATIVE_WORDS: [&str; 7] = [
    "sad", "angry", "frustrated", "worried", "anxious", "depressed", "upset",
];

const NEUTRAL_SCORE: f64 = 0.5;
const STEP: f64 = 0.1;
const MAX_SCORE: f64 = 0.9;
const MIN_SCORE: f64 = 0.1;
const MIN_CONFIDENCE: u32 = 60;
const MAX_CONFIDENCE: u32 = 100;
const CONFIDENCE_PER_HIT: u32 = 20;

/// Scores above this are labelled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.6;
/// Scores below this are labelled negative.
pub const NEGATIVE_THRESHOLD: f64 = 0.4;

/// Qualitative sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Score above 0.6.
    Positive,
    /// Score in [0.4, 0.6].
    Neutral,
    /// Score below 0.4.
    Negative,
}

impl SentimentLabel {
    /// Label for a score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Display text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Score in [0.1, 0.9]; 0.5 is neutral.
    pub score: f64,
    /// Confidence percentage in [60, 100].
    pub confidence: u32,
    /// Qualitative label derived from `score`.
    pub label: SentimentLabel,
}

impl SentimentResult {
    /// A neutral result, as produced for empty text.
    pub const NEUTRAL: Self = Self {
        score: NEUTRAL_SCORE,
        confidence: MIN_CONFIDENCE,
        label: SentimentLabel::Neutral,
    };

    /// Build a result from a bare score; confidence is the minimum.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        let score = score.clamp(0.0, 1.0);
        Self {
            score,
            confidence: MIN_CONFIDENCE,
            label: SentimentLabel::from_score(score),
        }
    }

    /// Score as a rounded percentage, as drawn inside the progress ring.
    #[must_use]
    pub fn percent(&self) -> u32 {
        // score is within [0, 1], so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = (self.score * 100.0).round() as u32;
        pct
    }

    /// Colour band for the progress ring; same cut-offs as the label.
    #[must_use]
    pub fn band(&self) -> SentimentLabel {
        self.label
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Raw lexicon hit counts for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexiconHits {
    /// Tokens containing a positive word.
    pub positive: u32,
    /// Tokens containing a negative word.
    pub negative: u32,
}

/// Keyword-based sentiment estimator.
///
/// Stateless apart from its lexicons, so `analyze` is idempotent.
#[derive(Debug, Clone)]
pub struct SentimentEngine {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Default for SentimentEngine {
    fn default() -> Self {
        Self::with_lexicons(POSITIVE_WORDS, NEGATIVE_WORDS)
    }
}

impl SentimentEngine {
    /// Engine with the stock lexicons.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom lexicons. Words are lowercased.
    #[must_use]
    pub fn with_lexicons<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            positive: positive.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            negative: negative.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Count lexicon hits. A token may count toward both lists.
    #[must_use]
    pub fn count_hits(&self, text: &str) -> LexiconHits {
        let lowered = text.to_lowercase();
        let mut hits = LexiconHits::default();
        for token in lowered.split_whitespace() {
            if self.positive.iter().any(|w| token.contains(w.as_str())) {
                hits.positive += 1;
            }
            if self.negative.iter().any(|w| token.contains(w.as_str())) {
                hits.negative += 1;
            }
        }
        hits
    }

    /// Score `text`.
    #[must_use]
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let hits = self.count_hits(text);
        let (pos, neg) = (hits.positive, hits.negative);

        let score = if pos > neg {
            (NEUTRAL_SCORE + f64::from(pos - neg) * STEP).min(MAX_SCORE)
        } else if neg > pos {
            (NEUTRAL_SCORE - f64::from(neg - pos) * STEP).max(MIN_SCORE)
        } else {
            NEUTRAL_SCORE
        };

        let confidence = (pos.saturating_add(neg))
            .saturating_mul(CONFIDENCE_PER_HIT)
            .clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

        let result = SentimentResult {
            score,
            confidence,
            label: SentimentLabel::from_score(score),
        };
        debug!(positive = pos, negative = neg, score, confidence, label = %result.label, "Analyzed journal text");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_and_blessed_is_positive() {
        let r = SentimentEngine::new().analyze("I am so happy and blessed");
        assert!(r.score >= 0.7);
        assert_eq!(r.label, SentimentLabel::Positive);
        assert!(r.confidence >= 60);
    }

    #[test]
    fn sad_anxious_upset_is_negative() {
        let r = SentimentEngine::new().analyze("I feel sad and anxious and upset");
        assert!(r.score <= 0.3);
        assert_eq!(r.label, SentimentLabel::Negative);
        assert_eq!(r.confidence, 60);
    }

    #[test]
    fn empty_text_is_neutral() {
        let r = SentimentEngine::new().analyze("");
        assert_eq!(r, SentimentResult::NEUTRAL);
        let r = SentimentEngine::new().analyze("   \n\t ");
        assert_eq!(r, SentimentResult::NEUTRAL);
    }

    #[test]
    fn single_positive_hit_stays_neutral() {
        // 0.5 + 0.1 sits exactly on the threshold, which is not "above" it.
        let r = SentimentEngine::new().analyze("great");
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert!((r.score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn substring_and_case_matching() {
        let engine = SentimentEngine::new();
        let hits = engine.count_hits("UNHAPPY Joyful lovely");
        assert_eq!(hits.positive, 3);
        assert_eq!(hits.negative, 0);
    }

    #[test]
    fn token_can_hit_both_lists() {
        let hits = SentimentEngine::new().count_hits("sadjoy");
        assert_eq!(hits, LexiconHits { positive: 1, negative: 1 });
    }

    #[test]
    fn score_is_capped() {
        let text = "happy joy great amazing wonderful excited love blessed";
        let r = SentimentEngine::new().analyze(text);
        assert!((r.score - 0.9).abs() < 1e-9);
        assert_eq!(r.confidence, 100);

        let r = SentimentEngine::new().analyze("sad angry frustrated worried anxious depressed upset");
        assert!((r.score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn confidence_scales_with_hits() {
        let engine = SentimentEngine::new();
        assert_eq!(engine.analyze("happy").confidence, 60);
        assert_eq!(engine.analyze("happy great joy").confidence, 60);
        assert_eq!(engine.analyze("happy great joy love").confidence, 80);
        assert_eq!(engine.analyze("happy sad happy sad").confidence, 80);
    }

    #[test]
    fn analyze_is_idempotent() {
        let engine = SentimentEngine::new();
        let text = "Worried about work but excited for the weekend";
        assert_eq!(engine.analyze(text), engine.analyze(text));
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(SentimentResult::from_score(0.7).percent(), 70);
        assert_eq!(SentimentResult::NEUTRAL.percent(), 50);
    }
}
