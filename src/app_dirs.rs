use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "keyrace";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("keyrace_config.json"))
    }

    /// Default log file used when `--log-file` is given without a path.
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("keyrace.log");
        }
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.data_local_dir().join("keyrace.log"))
            .unwrap_or_else(|| PathBuf::from("keyrace.log"))
    }
}
