use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub tick_rate: Duration,
    pub export_dir: PathBuf,
}

impl AppConfig {
    /// Reads `IPL_TICK_MS` and `IPL_EXPORT_DIR`. Call after the dotenv files are loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tick_ms = lookup("IPL_TICK_MS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(250)
            .clamp(50, 2000);
        let export_dir = lookup("IPL_EXPORT_DIR")
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            tick_rate: Duration::from_millis(tick_ms),
            export_dir,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
