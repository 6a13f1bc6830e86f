//! Static content catalog: mood options, discovery feed, journal prompts.

use serde::{Deserialize, Serialize};

/// One selectable mood on the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodOption {
    /// Emoji shown on the button.
    pub emoji: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Numeric value, 1 (lowest) to 5 (highest).
    pub value: u8,
}

/// The mood tracker's options, in display order.
pub const MOOD_OPTIONS: [MoodOption; 5] = [
    MoodOption { emoji: "😊", label: "Happy", value: 5 },
    MoodOption { emoji: "😐", label: "Neutral", value: 3 },
    MoodOption { emoji: "😢", label: "Sad", value: 1 },
    MoodOption { emoji: "😰", label: "Anxious", value: 2 },
    MoodOption { emoji: "😌", label: "Calm", value: 4 },
];

/// Look up a mood option by its value.
#[must_use]
pub fn mood_by_value(value: u8) -> Option<&'static MoodOption> {
    MOOD_OPTIONS.iter().find(|m| m.value == value)
}

/// Kind of discovery content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A short guided video.
    Video,
    /// A reading piece.
    Article,
}

/// An item on the discovery feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryItem {
    /// Stable id.
    pub id: &'static str,
    /// Video or article.
    pub kind: ContentKind,
    /// Headline.
    pub title: &'static str,
    /// Playback length for videos (`m:ss`).
    pub duration: Option<&'static str>,
    /// Thumbnail image URL.
    pub thumbnail: &'static str,
    /// Editor-curated content is badged in the feed.
    pub curated: bool,
    /// Engagement counters.
    pub likes: u32,
    /// Engagement counters.
    pub comments: u32,
    /// Engagement counters.
    pub shares: u32,
}

/// The discovery feed.
pub const DISCOVERY_CONTENT: [DiscoveryItem; 3] = [
    DiscoveryItem {
        id: "1",
        kind: ContentKind::Video,
        title: "5-Minute Morning Meditation",
        duration: Some("5:32"),
        thumbnail: "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?w=400",
        curated: true,
        likes: 2043,
        comments: 128,
        shares: 56,
    },
    DiscoveryItem {
        id: "2",
        kind: ContentKind::Article,
        title: "10 Tips for Managing Anxiety",
        duration: None,
        thumbnail: "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400",
        curated: true,
        likes: 1456,
        comments: 67,
        shares: 23,
    },
    DiscoveryItem {
        id: "3",
        kind: ContentKind::Article,
        title: "Better Sleep Hygiene Habits",
        duration: None,
        thumbnail: "https://images.unsplash.com/photo-1541781774459-bb2af2f05b55?w=400",
        curated: false,
        likes: 892,
        comments: 34,
        shares: 18,
    },
];

/// Curated items only, in feed order.
pub fn curated_content() -> impl Iterator<Item = &'static DiscoveryItem> {
    DISCOVERY_CONTENT.iter().filter(|item| item.curated)
}

/// Writing prompts offered above the journal editor.
pub const JOURNAL_PROMPTS: [&str; 5] = [
    "What are three things you're grateful for today?",
    "How did you handle stress today?",
    "What made you smile this week?",
    "Describe a moment when you felt completely at peace.",
    "What challenge did you overcome recently?",
];

/// Pick a prompt for the given day, cycling through the list.
#[must_use]
pub fn prompt_for_day(day_index: usize) -> &'static str {
    JOURNAL_PROMPTS[day_index % JOURNAL_PROMPTS.len()]
}
