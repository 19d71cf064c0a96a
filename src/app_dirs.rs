use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn settings_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "moveit") {
            pd.config_dir().join("settings.json")
        } else {
            PathBuf::from("moveit_settings.json")
        }
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("moveit");
            Some(state_dir.join("moveit.log"))
        } else {
            ProjectDirs::from("", "", "moveit")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("moveit.log"))
        }
    }
}
