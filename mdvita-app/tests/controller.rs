//! End-to-end controller tests over the in-memory and SQLite stores.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use mdvita_app::{WellnessApp, open_store};
use mdvita_core::config::{StoreBackend, VitaConfig};
use mdvita_core::error::VitaError;
use mdvita_core::sentiment::SentimentLabel;
use mdvita_core::store::MemoryStore;
use mdvita_core::suggestion::{HIGH_MOOD, LOW_MOOD};
use mdvita_core::types::UserId;

fn memory_app() -> WellnessApp {
    WellnessApp::new(VitaConfig::default(), Arc::new(MemoryStore::new()), UserId::new())
}

#[tokio::test]
async fn profile_then_moods_update_stats() {
    let app = memory_app();
    let profile = app.create_profile("", "river@example.com").await.expect("profile");
    assert_eq!(profile.name, "river");

    for mood in [5, 1, 3, 4] {
        app.log_mood(mood).await.expect("log mood");
    }

    let stats = app.load_user_stats().await.expect("stats");
    assert_eq!(stats.mood_count, 4);
    assert!((stats.mood_average - 3.25).abs() < 1e-9);
    assert_eq!(stats.streak, 1);
    assert!(stats.last_activity.is_some());

    // Stats are merged into the profile, not written over it.
    let reloaded = app.load_profile().await.expect("load").expect("exists");
    assert_eq!(reloaded.email, "river@example.com");
    assert_eq!(reloaded.stats, stats);
}

#[tokio::test]
async fn streak_follows_calendar_days() {
    let app = memory_app();
    let day = |d: u32| Utc.with_ymd_and_hms(2026, 5, d, 20, 0, 0).single().expect("date");

    app.log_mood_at(4, day(1)).await.expect("log");
    app.log_mood_at(4, day(2)).await.expect("log");
    app.log_mood_at(5, day(2) + Duration::hours(1)).await.expect("log");
    assert_eq!(app.load_user_stats().await.expect("stats").streak, 2);

    app.log_mood_at(3, day(6)).await.expect("log");
    assert_eq!(app.load_user_stats().await.expect("stats").streak, 1);

    // A backdated mood still counts but does not rewind the streak.
    app.log_mood_at(2, day(3)).await.expect("log");
    let stats = app.load_user_stats().await.expect("stats");
    assert_eq!(stats.mood_count, 5);
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.last_activity, Some(day(6)));
}

#[tokio::test]
async fn journal_analysis_and_save() {
    let app = memory_app();

    let low = app.analyze_journal("worried and sad all week").expect("analysis");
    assert_eq!(low.sentiment.label, SentimentLabel::Negative);
    assert_eq!(low.suggestions, LOW_MOOD.to_vec());

    let high = app.analyze_journal("an amazing, wonderful morning").expect("analysis");
    assert_eq!(high.suggestions, HIGH_MOOD.to_vec());

    assert!(matches!(app.analyze_journal(""), Err(VitaError::EmptyEntry)));
    assert!(matches!(app.save_journal_entry("  ").await, Err(VitaError::NothingToSave)));

    let entry = app.save_journal_entry("an amazing, wonderful morning").await.expect("save");
    assert_eq!(entry.user_id, *app.user_id());
    assert_eq!(app.load_user_stats().await.expect("stats").journal_entries, 1);

    let counts = app.journal_counts("an amazing, wonderful morning");
    assert_eq!((counts.words, counts.chars), (4, 29));
}

#[tokio::test]
async fn insights_use_the_last_week_of_this_user() {
    let store = Arc::new(MemoryStore::new());
    let me = WellnessApp::new(VitaConfig::default(), store.clone(), UserId::new());
    let someone_else = WellnessApp::new(VitaConfig::default(), store, UserId::new());

    // An old low mood that falls outside the window.
    me.log_mood(1).await.expect("log");
    for mood in [4, 3, 5, 2, 4, 5, 3] {
        me.log_mood(mood).await.expect("log");
    }
    someone_else.log_mood(1).await.expect("log");

    let insights = me.mood_insights().await.expect("insights");
    assert_eq!(insights.average_display(), "3.7/5");
    assert_eq!(insights.most_common, "Calm");
    assert_eq!(me.mood_history().await.expect("history").len(), 8);
}

#[tokio::test]
async fn sqlite_backend_survives_a_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = VitaConfig::default();
    config.persistence.backend = StoreBackend::Sqlite;
    config.persistence.db_path = dir.path().join("mdvita.db").to_string_lossy().into_owned();

    let user = UserId::new();
    {
        let store = open_store(&config.persistence, &config.remote).expect("open");
        let app = WellnessApp::new(config.clone(), store, user.clone());
        app.create_profile("Noor", "noor@example.com").await.expect("profile");
        app.log_mood(5).await.expect("mood");
        app.save_journal_entry("feeling blessed").await.expect("journal");
    }

    let store = open_store(&config.persistence, &config.remote).expect("reopen");
    let app = WellnessApp::new(config, store, user);
    let profile = app.load_profile().await.expect("load").expect("exists");
    assert_eq!(profile.name, "Noor");
    assert_eq!(profile.stats.journal_entries, 1);
    assert_eq!(profile.stats.mood_count, 1);
    assert_eq!(app.mood_history().await.expect("history")[0].label, "Happy");
}

#[test]
fn remote_backend_rejects_a_bad_url() {
    let mut config = VitaConfig::default();
    config.persistence.backend = StoreBackend::Remote;
    config.remote.base_url = "::not a url::".into();
    assert!(matches!(WellnessApp::from_config(config), Err(VitaError::Config(_))));
}
