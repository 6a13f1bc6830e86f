//! Headless MDVita session: loads `mdvita.toml` (or the path given as the
//! first argument), records a mood and analyses a journal line, printing the
//! results as JSON.
//!
//! ```text
//! mdvita [config.toml] [mood 1-5] [journal text...]
//! ```

use std::path::Path;

use mdvita_app::{WellnessApp, telemetry};
use mdvita_core::config::VitaConfig;
use mdvita_core::error::Result;
use tracing::info;

const DEFAULT_CONFIG: &str = "mdvita.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = if Path::new(&config_path).exists() {
        VitaConfig::from_file(Path::new(&config_path))?
    } else {
        VitaConfig::default()
    };
    telemetry::init(&config.general);

    let mood: u8 = args.next().and_then(|m| m.parse().ok()).unwrap_or(4);
    let text: Vec<String> = args.collect();
    let text = if text.is_empty() {
        "Today was a great day and I feel blessed".to_string()
    } else {
        text.join(" ")
    };

    let app = WellnessApp::from_config(config)?;
    info!(user = %app.user_id(), "Demo session started");
    app.create_profile("", "demo@mdvita.app").await?;
    app.log_mood(mood).await?;
    let analysis = app.analyze_journal(&text)?;
    app.save_journal_entry(&text).await?;

    let stats = app.load_user_stats().await?;
    let insights = app.mood_insights().await?;
    let report = serde_json::json!({
        "user": app.user_id(),
        "analysis": analysis,
        "stats": stats,
        "insights": insights,
        "prompt": app.journal_prompt(0),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
