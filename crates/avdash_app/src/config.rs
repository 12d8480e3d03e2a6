use std::time::Duration;

use avdash_core::DEFAULT_UP_NEXT_LIMIT;

/// Runtime configuration for the dashboard app.
///
/// Poll cadences are tunables, not invariants; defaults match what the
/// controller is sized for.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub pipeline_interval: Duration,
    pub priority_interval: Duration,
    pub action_interval: Duration,
    pub up_next_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            pipeline_interval: Duration::from_secs(3),
            priority_interval: Duration::from_secs(10),
            action_interval: Duration::from_secs(2),
            up_next_limit: DEFAULT_UP_NEXT_LIMIT,
        }
    }
}

impl AppConfig {
    /// Builds config from the environment, with `base_url` from the command
    /// line taking precedence over `AVDASH_URL`.
    pub fn from_env(base_url_arg: Option<String>) -> Self {
        let mut config = AppConfig::default();
        if let Ok(url) = std::env::var("AVDASH_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        if let Some(url) = base_url_arg {
            config.base_url = url;
        }
        if let Some(secs) = env_u64("AVDASH_PIPELINE_POLL_SECS") {
            config.pipeline_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = env_u64("AVDASH_PRIORITY_POLL_SECS") {
            config.priority_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = env_u64("AVDASH_ACTION_POLL_SECS") {
            config.action_interval = Duration::from_secs(secs);
        }
        if let Some(limit) = env_u64("AVDASH_UP_NEXT_LIMIT") {
            config.up_next_limit = limit as usize;
        }
        config
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
