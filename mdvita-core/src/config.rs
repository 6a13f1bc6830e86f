//! Configuration for MDVita.
//!
//! Maps directly to `mdvita.toml`. Every section and field has a default, so
//! an empty file yields the stock behaviour.

use serde::{Deserialize, Serialize};

use crate::breathing::{BreathPhase, DEFAULT_CYCLES, default_phases};
use crate::memory_game::DEFAULT_SYMBOLS;

/// Top-level MDVita configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitaConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory Match settings.
    #[serde(default)]
    pub memory_game: MemoryGameConfig,
    /// Breathing exercise settings.
    #[serde(default)]
    pub breathing: BreathingConfig,
    /// Which document store to use and how.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Remote document store endpoint.
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl VitaConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `VitaError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::VitaError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

/// Memory Match settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryGameConfig {
    /// Card faces; each is dealt twice.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// How long a revealed pair stays visible before it is resolved.
    #[serde(default = "default_resolve_delay")]
    pub resolve_delay_ms: u64,
}

impl Default for MemoryGameConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            resolve_delay_ms: default_resolve_delay(),
        }
    }
}

/// Breathing exercise settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    /// Times the phase list is repeated.
    #[serde(default = "default_cycles")]
    pub cycles: u32,
    /// Phase list for one cycle.
    #[serde(default = "default_phases")]
    pub phases: Vec<BreathPhase>,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            phases: default_phases(),
        }
    }
}

/// Document store selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map; nothing survives a restart.
    #[default]
    Memory,
    /// SQLite file on disk.
    Sqlite,
    /// HTTP document service.
    Remote,
}

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Which store to open.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Database file for the SQLite backend.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Use WAL mode for concurrent reads.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Detect document corruption via checksums.
    #[serde(default = "default_true")]
    pub checksum_enabled: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            db_path: default_db_path(),
            wal_mode: true,
            checksum_enabled: true,
        }
    }
}

/// Remote document service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Service root, e.g. `https://api.example.com`.
    #[serde(default = "default_remote_url")]
    pub base_url: String,
    /// Bearer token, if the service requires one.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout.
    #[serde(default = "default_30000")]
    pub timeout_ms: u64,
    /// Retries after the first failed attempt.
    #[serde(default = "default_2")]
    pub max_retries: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_remote_url(),
            api_key: None,
            timeout_ms: 30_000,
            max_retries: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_symbols() -> Vec<String> { DEFAULT_SYMBOLS.iter().map(ToString::to_string).collect() }
fn default_resolve_delay() -> u64 { 1000 }
fn default_cycles() -> u32 { DEFAULT_CYCLES }
fn default_db_path() -> String { "mdvita.db".to_string() }
fn default_remote_url() -> String { "http://localhost:8080".to_string() }
fn default_30000() -> u64 { 30_000 }
fn default_2() -> u32 { 2 }
