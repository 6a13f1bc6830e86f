//! Dashboard and editor read-outs: mood trend summary and text counts.

use serde::Serialize;

use crate::catalog::mood_by_value;
use crate::types::MoodEntry;

/// Label used when no catalog mood matches the average.
const FALLBACK_MOOD: &str = "Neutral";

/// Summary of a run of mood values (typically one week).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodInsights {
    /// Arithmetic mean of the values, or 0 when there are none.
    pub average: f64,
    /// Catalog label whose value equals the rounded average.
    pub most_common: &'static str,
}

impl MoodInsights {
    /// Summarise `values`.
    #[must_use]
    pub fn from_values(values: &[u8]) -> Self {
        if values.is_empty() {
            return Self {
                average: 0.0,
                most_common: FALLBACK_MOOD,
            };
        }
        let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = f64::from(sum) / values.len() as f64;

        // average lies within [0, 255].
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = average.round() as u8;
        let most_common = mood_by_value(rounded).map_or(FALLBACK_MOOD, |m| m.label);

        Self { average, most_common }
    }

    /// Summarise stored mood entries.
    #[must_use]
    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        let values: Vec<u8> = entries.iter().map(|e| e.mood).collect();
        Self::from_values(&values)
    }

    /// The `x.y/5` read-out.
    #[must_use]
    pub fn average_display(&self) -> String {
        format!("{:.1}/5", self.average)
    }
}

/// Word and character counts for the journal editor footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextCounts {
    /// Whitespace-separated, non-empty words.
    pub words: usize,
    /// Characters (Unicode scalar values), whitespace included.
    pub chars: usize,
}

impl TextCounts {
    /// Count `text`.
    #[must_use]
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
        }
    }
}
