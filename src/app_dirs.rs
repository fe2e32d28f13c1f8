use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "focusguard";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the session log and application logs live
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }
}
