//! Core type definitions shared across the MDVita crates.
//!
//! All records are serializable so the application layer can hand them to
//! any [`DocumentStore`](crate::store::DocumentStore) as JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Identifier of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Create a fresh demo user id (`demo-user-<uuid>`).
    #[must_use]
    pub fn new() -> Self {
        Self(format!("demo-user-{}", Uuid::new_v4().simple()))
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl DocumentId {
    /// Generate a new document id (`doc_<uuid>`).
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("doc_{}", Uuid::new_v4().simple()))
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Collection holding one profile-and-stats document per user.
pub const USERS: &str = "users";
/// Collection holding logged moods.
pub const MOODS: &str = "moods";
/// Collection holding journal entries.
pub const JOURNAL: &str = "journal";

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// A single logged mood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Who logged it.
    pub user_id: UserId,
    /// Mood value, 1–5.
    pub mood: u8,
    /// Catalog label for the value.
    pub label: String,
    /// When it was logged.
    pub timestamp: DateTime<Utc>,
}

/// A saved journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Author.
    pub user_id: UserId,
    /// Raw text of the entry.
    pub content: String,
    /// When it was saved.
    pub timestamp: DateTime<Utc>,
}

/// Aggregate per-user statistics shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    /// Consecutive days with at least one logged activity.
    pub streak: u32,
    /// Number of saved journal entries.
    pub journal_entries: u32,
    /// Running mean of logged mood values.
    pub mood_average: f64,
    /// Number of moods folded into `mood_average`.
    pub mood_count: u32,
    /// Last time a mood or journal entry was recorded.
    pub last_activity: Option<DateTime<Utc>>,
}

impl UserStats {
    /// Fold a newly logged mood into the running average.
    pub fn record_mood(&mut self, value: u8) {
        let n = f64::from(self.mood_count);
        self.mood_average = (self.mood_average * n + f64::from(value)) / (n + 1.0);
        self.mood_count += 1;
    }

    /// Count a saved journal entry.
    pub fn record_journal_entry(&mut self) {
        self.journal_entries += 1;
    }

    /// Update the streak and `last_activity` for activity at `now`.
    ///
    /// Same-day activity keeps the streak and next-day activity extends it.
    /// A later gap restarts it at 1. Activity older than `last_activity`
    /// (a backdated entry) leaves both untouched.
    pub fn record_activity(&mut self, now: DateTime<Utc>) {
        if self.last_activity.is_some_and(|last| now < last) {
            return;
        }
        let today = now.date_naive();
        self.streak = match self.last_activity.map(|t| t.date_naive()) {
            Some(last) if last == today => self.streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.streak + 1,
            _ => 1,
        };
        self.last_activity = Some(now);
    }

    /// Dashboard rendering of the mood average (one decimal place).
    #[must_use]
    pub fn mood_average_display(&self) -> String {
        format!("{:.1}", self.mood_average)
    }

    /// Date of the last activity, if any.
    #[must_use]
    pub fn last_active_day(&self) -> Option<NaiveDate> {
        self.last_activity.map(|t| t.date_naive())
    }
}

/// Profile document stored under [`USERS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Dashboard statistics, flattened into the same document.
    #[serde(flatten)]
    pub stats: UserStats,
}

impl UserProfile {
    /// A fresh profile with zeroed stats.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
            stats: UserStats::default(),
        }
    }

    /// Display name derived from an email address (the part before `@`).
    #[must_use]
    pub fn display_name_from_email(email: &str) -> &str {
        email.split('@').next().unwrap_or(email)
    }
}
