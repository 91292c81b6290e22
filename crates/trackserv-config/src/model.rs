use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_language_value")]
    pub language: String,
    #[serde(default = "Config::default_currency_value")]
    pub currency: String,
    #[serde(default = "Config::default_commission_rate_value")]
    pub default_commission_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_book: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for provider books. Defaults to
    /// `~/Documents/TrackServ`.
    pub data_root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for backups. Defaults to the data
    /// root.
    pub backup_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Self::default_language_value(),
            currency: Self::default_currency_value(),
            default_commission_rate: Self::default_commission_rate_value(),
            last_opened_book: None,
            data_root: None,
            backup_root: None,
        }
    }
}

impl Config {
    pub fn default_language_value() -> String {
        "pt".into()
    }

    pub fn default_currency_value() -> String {
        "BRL".into()
    }

    pub fn default_commission_rate_value() -> f64 {
        15.0
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("TrackServ")
    }

    pub fn resolve_backup_root(&self) -> PathBuf {
        if let Some(path) = &self.backup_root {
            return path.clone();
        }

        self.resolve_data_root().join("backups")
    }
}
