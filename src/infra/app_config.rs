use crate::application::feed::PAGE_SIZE;
use crate::domain::Coordinates;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Feed service URL.
    pub endpoint: String,
    pub api_key: String,
    /// Account identifier sent with every request.
    pub client: String,
    /// Messages per page and per "load more".
    pub page_size: usize,
    pub request_timeout_secs: u64,
    /// Last known device fix, used for distances and attached to new posts.
    pub device_location: Option<Coordinates>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            client: String::new(),
            page_size: PAGE_SIZE,
            request_timeout_secs: 30,
            device_location: None,
        }
    }
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|err| {
        log::warn!("Ignoring unreadable config {}: {}", path.display(), err);
        AppConfig::default()
    })
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("CHITCHAT_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

pub(crate) fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("CHITCHAT_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("ChitChat");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("ChitChat");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("chitchat");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("chitchat");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".chitchat")
}
