//! Application controller.
//!
//! [`WellnessApp`] is the one object the shell talks to. It owns the
//! engines, the configuration and a handle to the document store, validates
//! user input, and keeps the per-user statistics document up to date.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mdvita_core::catalog::{self, DiscoveryItem};
use mdvita_core::config::{PersistenceConfig, RemoteConfig, StoreBackend, VitaConfig};
use mdvita_core::error::{Result, VitaError};
use mdvita_core::insights::{MoodInsights, TextCounts};
use mdvita_core::sentiment::{SentimentEngine, SentimentResult};
use mdvita_core::store::{self, DocumentStore, MemoryStore, SqliteStore};
use mdvita_core::suggestion::SuggestionEngine;
use mdvita_core::types::{JOURNAL, JournalEntry, MOODS, MoodEntry, USERS, UserId, UserProfile, UserStats};
use mdvita_remote::RemoteStore;
use serde::Serialize;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use crate::breathing_session::BreathingSession;
use crate::events::GameEvent;
use crate::memory_session::MemoryGameSession;

/// Number of recent moods summarised on the dashboard.
pub const INSIGHT_WINDOW: usize = 7;

/// Sentiment read-out plus follow-up suggestions for one journal draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalAnalysis {
    /// Heuristic sentiment.
    pub sentiment: SentimentResult,
    /// Suggestions for that sentiment bracket, in display order.
    pub suggestions: Vec<&'static str>,
}

/// Open the document store selected by `persistence.backend`.
///
/// # Errors
/// Fails if the SQLite file cannot be opened or the remote URL is invalid.
pub fn open_store(persistence: &PersistenceConfig, remote: &RemoteConfig) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match persistence.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Sqlite => Arc::new(SqliteStore::open(&persistence.db_path, persistence)?),
        StoreBackend::Remote => Arc::new(RemoteStore::new(remote)?),
    };
    info!(backend = ?persistence.backend, "Document store ready");
    Ok(store)
}

/// The wellness application for one signed-in user.
pub struct WellnessApp {
    config: VitaConfig,
    store: Arc<dyn DocumentStore>,
    user: UserId,
    sentiment: SentimentEngine,
    suggestions: SuggestionEngine,
    /// Serialises read-modify-write of the stats document.
    stats_lock: AsyncMutex<()>,
}

impl WellnessApp {
    /// An app for `user` over an existing store.
    #[must_use]
    pub fn new(config: VitaConfig, store: Arc<dyn DocumentStore>, user: UserId) -> Self {
        Self {
            config,
            store,
            user,
            sentiment: SentimentEngine::new(),
            suggestions: SuggestionEngine::new(),
            stats_lock: AsyncMutex::new(()),
        }
    }

    /// Open the configured store and start a session for a fresh demo user.
    ///
    /// # Errors
    /// See [`open_store`].
    pub fn from_config(config: VitaConfig) -> Result<Self> {
        let store = open_store(&config.persistence, &config.remote)?;
        Ok(Self::new(config, store, UserId::new()))
    }

    /// Signed-in user.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &VitaConfig {
        &self.config
    }

    /// Store handle.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    // -- Profile & stats ------------------------------------------------------

    /// Create (or overwrite) the user's profile with zeroed stats.
    ///
    /// # Errors
    /// Store failures.
    pub async fn create_profile(&self, name: &str, email: &str) -> Result<UserProfile> {
        let name = if name.trim().is_empty() {
            UserProfile::display_name_from_email(email)
        } else {
            name.trim()
        };
        let profile = UserProfile::new(name, email);
        store::write_record(self.store.as_ref(), USERS, Some(self.user.as_str()), &profile).await?;
        info!(user = %self.user, "Profile created");
        Ok(profile)
    }

    /// The user's profile, if one was created.
    ///
    /// # Errors
    /// Store failures, or a profile document that does not decode.
    pub async fn load_profile(&self) -> Result<Option<UserProfile>> {
        store::read_record(self.store.as_ref(), USERS, self.user.as_str()).await
    }

    /// Dashboard statistics; zeroed if nothing was recorded yet.
    ///
    /// # Errors
    /// Store failures, or a stats document that does not decode.
    pub async fn load_user_stats(&self) -> Result<UserStats> {
        let stats: Option<UserStats> = store::read_record(self.store.as_ref(), USERS, self.user.as_str()).await?;
        Ok(stats.unwrap_or_default())
    }

    async fn update_stats<F>(&self, now: DateTime<Utc>, apply: F) -> Result<UserStats>
    where
        F: FnOnce(&mut UserStats) + Send,
    {
        let _guard = self.stats_lock.lock().await;
        let mut stats = self.load_user_stats().await?;
        apply(&mut stats);
        stats.record_activity(now);
        self.store
            .merge(USERS, self.user.as_str(), serde_json::to_value(&stats)?)
            .await?;
        debug!(user = %self.user, streak = stats.streak, "Stats updated");
        Ok(stats)
    }

    // -- Mood -----------------------------------------------------------------

    /// Record a mood from the picker.
    ///
    /// # Errors
    /// [`VitaError::InvalidMood`] if `value` is not one of the catalog
    /// values, otherwise store failures.
    pub async fn log_mood(&self, value: u8) -> Result<MoodEntry> {
        self.log_mood_at(value, Utc::now()).await
    }

    /// [`log_mood`](Self::log_mood) with an explicit timestamp.
    ///
    /// # Errors
    /// As for `log_mood`.
    pub async fn log_mood_at(&self, value: u8, now: DateTime<Utc>) -> Result<MoodEntry> {
        let option = catalog::mood_by_value(value).ok_or(VitaError::InvalidMood(value))?;
        let entry = MoodEntry {
            user_id: self.user.clone(),
            mood: option.value,
            label: option.label.to_string(),
            timestamp: now,
        };
        store::write_record(self.store.as_ref(), MOODS, None, &entry).await?;
        self.update_stats(now, |s| s.record_mood(value)).await?;
        info!(user = %self.user, mood = option.label, "Mood logged");
        Ok(entry)
    }

    /// This user's moods, oldest first.
    ///
    /// # Errors
    /// Store or decoding failures.
    pub async fn mood_history(&self) -> Result<Vec<MoodEntry>> {
        let all: Vec<MoodEntry> = store::list_records(self.store.as_ref(), MOODS).await?;
        Ok(all.into_iter().filter(|m| m.user_id == self.user).collect())
    }

    /// Summary of the most recent [`INSIGHT_WINDOW`] moods.
    ///
    /// # Errors
    /// Store or decoding failures.
    pub async fn mood_insights(&self) -> Result<MoodInsights> {
        let history = self.mood_history().await?;
        let start = history.len().saturating_sub(INSIGHT_WINDOW);
        Ok(MoodInsights::from_entries(&history[start..]))
    }

    // -- Journal --------------------------------------------------------------

    /// Run sentiment and suggestions over a draft.
    ///
    /// # Errors
    /// [`VitaError::EmptyEntry`] if the draft is blank.
    pub fn analyze_journal(&self, text: &str) -> Result<JournalAnalysis> {
        if text.trim().is_empty() {
            return Err(VitaError::EmptyEntry);
        }
        let sentiment = self.sentiment.analyze(text);
        let suggestions = self.suggestions.suggest(&sentiment);
        Ok(JournalAnalysis { sentiment, suggestions })
    }

    /// Word and character counts for the editor footer.
    #[must_use]
    pub fn journal_counts(&self, text: &str) -> TextCounts {
        TextCounts::of(text)
    }

    /// Persist a journal entry.
    ///
    /// # Errors
    /// [`VitaError::NothingToSave`] if the text is blank, otherwise store
    /// failures.
    pub async fn save_journal_entry(&self, text: &str) -> Result<JournalEntry> {
        if text.trim().is_empty() {
            return Err(VitaError::NothingToSave);
        }
        let now = Utc::now();
        let entry = JournalEntry {
            user_id: self.user.clone(),
            content: text.to_string(),
            timestamp: now,
        };
        let id = store::write_record(self.store.as_ref(), JOURNAL, None, &entry).await?;
        self.update_stats(now, UserStats::record_journal_entry).await?;
        info!(user = %self.user, %id, words = TextCounts::of(text).words, "Journal entry saved");
        Ok(entry)
    }

    // -- Content & games ------------------------------------------------------

    /// Prompt shown in the journal editor on the given day.
    #[must_use]
    pub fn journal_prompt(&self, day_index: usize) -> &'static str {
        catalog::prompt_for_day(day_index)
    }

    /// Discovery feed, in catalog order. Curated items carry a badge but
    /// are not the only ones shown.
    #[must_use]
    pub fn discovery(&self) -> Vec<&'static DiscoveryItem> {
        catalog::DISCOVERY_CONTENT.iter().collect()
    }

    /// A memory game using the configured symbols and delay.
    #[must_use]
    pub fn memory_game(&self) -> (MemoryGameSession, tokio::sync::mpsc::UnboundedReceiver<GameEvent>) {
        MemoryGameSession::from_entropy(&self.config.memory_game)
    }

    /// A breathing exercise using the configured pattern.
    #[must_use]
    pub fn breathing(&self) -> BreathingSession {
        BreathingSession::new(&self.config.breathing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> WellnessApp {
        WellnessApp::new(VitaConfig::default(), Arc::new(MemoryStore::new()), UserId::new())
    }

    #[test]
    fn blank_draft_is_refused() {
        let err = app().analyze_journal("   \n").expect_err("blank");
        assert_eq!(err.to_string(), "Please write something first.");
    }

    #[tokio::test]
    async fn unknown_mood_is_refused() {
        let app = app();
        assert!(matches!(app.log_mood(0).await, Err(VitaError::InvalidMood(0))));
        assert!(matches!(app.log_mood(6).await, Err(VitaError::InvalidMood(6))));
        assert!(app.mood_history().await.expect("history").is_empty());
    }

    #[test]
    fn discovery_shows_every_item() {
        let feed = app().discovery();
        let titles: Vec<&str> = feed.iter().map(|i| i.title).collect();
        assert_eq!(feed.len(), 3);
        assert!(titles.contains(&"Better Sleep Hygiene Habits"), "{titles:?}");
        assert!(feed.iter().any(|i| !i.curated));
    }

    #[tokio::test]
    async fn blank_save_is_refused() {
        let err = app().save_journal_entry("").await.expect_err("blank");
        assert!(matches!(err, VitaError::NothingToSave));
    }
}
