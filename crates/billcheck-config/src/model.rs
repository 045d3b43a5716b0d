use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf, time::Duration};

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "BILLCHECK_HOME";

/// Stores user preferences and where the bill ledger lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Slot key the ledger is persisted under.
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    /// Quiet period before an edit is written to disk.
    #[serde(default = "Config::default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom data directory. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: Self::default_storage_key(),
            autosave_delay_ms: Self::default_autosave_delay_ms(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_storage_key() -> String {
        "bills".into()
    }

    pub fn default_autosave_delay_ms() -> u64 {
        500
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Resolves where slot files are kept.
    ///
    /// `BILLCHECK_HOME` wins, then `data_dir`, then the platform data directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.resolve_data_dir_with(env::var_os(HOME_ENV).map(PathBuf::from))
    }

    /// Same as [`Config::resolve_data_dir`] with the home override passed in.
    pub fn resolve_data_dir_with(&self, home: Option<PathBuf>) -> PathBuf {
        if let Some(custom) = home {
            return custom;
        }
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        dirs::data_dir()
            .map(|base| base.join("billcheck"))
            .unwrap_or_else(|| PathBuf::from(".billcheck"))
    }
}
