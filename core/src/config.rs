use serde::{Deserialize, Serialize};
use std::time::Duration;

use labcred_webclient::driver::DriverConfig;
use labcred_webclient::LabSite;

pub fn credentials_filename(site: LabSite) -> String {
    format!("{}-credentials.json", site.lowercase())
}

/// Tunables of the retry driver, as they appear in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub max_attempts: u32,
    pub poll_interval_ms: u64,
    pub nudge_cooldown_ms: u64,
    pub observe_timeout_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        let d = DriverConfig::default();
        Self {
            max_attempts: d.max_attempts,
            poll_interval_ms: d.poll_interval.as_millis() as u64,
            nudge_cooldown_ms: d.nudge_cooldown.as_millis() as u64,
            observe_timeout_ms: d.observe_timeout.as_millis() as u64,
        }
    }
}

impl WatchConfig {
    pub fn to_driver_config(&self) -> DriverConfig {
        DriverConfig {
            max_attempts: self.max_attempts,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            nudge_cooldown: Duration::from_millis(self.nudge_cooldown_ms),
            observe_timeout: Duration::from_millis(self.observe_timeout_ms),
        }
    }
}

/// Defaults for the generated `aws configure` one-liner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub region: String,
    pub output: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            region: "ap-southeast-1".to_owned(),
            output: "json".to_owned(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn watch_defaults_mirror_the_driver_defaults() {
        let cfg = WatchConfig::default();
        assert_eq!(cfg.max_attempts, 10);
        assert_eq!(cfg.poll_interval_ms, 500);
        assert_eq!(cfg.nudge_cooldown_ms, 2000);
        assert_eq!(cfg.observe_timeout_ms, 30_000);

        let d = cfg.to_driver_config();
        assert_eq!(d.poll_interval, Duration::from_millis(500));
        assert_eq!(d.observe_timeout, Duration::from_secs(30));
    }

    #[test]
    fn credentials_filename_is_per_site() {
        assert_eq!(
            credentials_filename(LabSite::Poridhi),
            "poridhi-credentials.json"
        );
    }
}
