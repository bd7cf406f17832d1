use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::PathBuf};

use labcred_core::config::{ConsoleConfig, WatchConfig};

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "labcred";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "GlobalConfig::default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub console: ConsoleConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            cache_dir: Self::default_cache_dir(),
            watch: WatchConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl GlobalConfig {
    pub const FILENAME: &str = "labcred.toml";

    pub fn filepath() -> PathBuf {
        let dir = dirs::config_dir().expect("Failed to get user's config dir path");
        dir.join(APP_NAME).join(Self::FILENAME)
    }

    fn default_cache_dir() -> PathBuf {
        let dir = dirs::cache_dir().expect("Failed to get user's cache dir path");
        dir.join(APP_NAME)
    }

    pub fn from_file_or_default() -> Self {
        let path = Self::filepath();
        let toml_str = match File::open(&path).and_then(io::read_to_string) {
            Ok(toml) => toml,
            _ => return GlobalConfig::default(),
        };
        toml::from_str(&toml_str).unwrap_or_else(|e| {
            log::error!(
                "Invalid config '{:?}': {:#}",
                util::replace_homedir_to_tilde(path),
                e
            );
            std::process::exit(1)
        })
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            subcmd: _,
            site: _,
            cache_dir,
        } = args;

        if let Some(dir) = cache_dir {
            self.cache_dir = dir.clone();
        }
        self
    }

    pub fn from_file_and_args(args: &GlobalArgs) -> Self {
        Self::from_file_or_default().with_args(args)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_toml_falls_back_to_defaults() {
        let cfg: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.watch, WatchConfig::default());
        assert_eq!(cfg.console, ConsoleConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg: GlobalConfig = toml::from_str(
            "cache_dir = \"/tmp/labcred\"\n\n[watch]\nmax_attempts = 3\n\n[console]\nregion = \"us-east-1\"\n",
        )
        .unwrap();
        assert_eq!(cfg.cache_dir, PathBuf::from("/tmp/labcred"));
        assert_eq!(cfg.watch.max_attempts, 3);
        assert_eq!(cfg.watch.poll_interval_ms, 500);
        assert_eq!(cfg.console.region, "us-east-1");
        assert_eq!(cfg.console.output, "json");
    }
}
