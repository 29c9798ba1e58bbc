use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// One tracked bookmaker.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub id: String,
    pub name: String,
    pub url: String,
    pub active: bool,
}

impl SiteConfig {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("https://www.{}.com", id),
            active: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub prefs_path: PathBuf,
    pub export_dir: PathBuf,
    pub sites: Vec<SiteConfig>,
    /// Delay before the stored league filter is re-applied at startup.
    pub league_restore_delay: Duration,
    /// Delay before notification permission is requested at startup.
    pub permission_request_delay: Duration,
    pub auto_refresh_default: bool,
}

impl AppConfig {
    pub fn builtin() -> Self {
        Self {
            prefs_path: PathBuf::from("assets/preferences.json"),
            export_dir: PathBuf::from("exports"),
            sites: vec![
                SiteConfig::new("betika", "Betika"),
                SiteConfig::new("sportpesa", "SportPesa"),
                SiteConfig::new("betway", "Betway"),
                SiteConfig::new("odibets", "Odibets"),
            ],
            league_restore_delay: Duration::from_millis(1000),
            permission_request_delay: Duration::from_millis(5000),
            auto_refresh_default: true,
        }
    }

    /// Builtin defaults with path overrides picked up from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::builtin();
        if let Some(path) = env_path("ODDS_CLI_PREFS") {
            config.prefs_path = path;
        }
        if let Some(dir) = env_path("ODDS_CLI_EXPORT_DIR") {
            config.export_dir = dir;
        }
        config
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}
