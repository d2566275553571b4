//! Configuration file support for prospector.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `PROSPECTOR_`, e.g.,
//!    `PROSPECTOR_GITHUB_TOKEN`)
//! 3. Config file (~/.config/prospector/config.toml or ./prospector.toml)
//! 4. Built-in defaults
//!
//! The state files default to `repositories.json` and `users.json` under
//! `~/.local/state/prospector` on Linux (the XDG state directory) if not
//! explicitly configured.
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."  # or use PROSPECTOR_GITHUB_TOKEN env var
//!
//! [state]
//! repositories = "/var/lib/prospector/repositories.json"  # optional
//! users = "/var/lib/prospector/users.json"                # optional
//!
//! [harvest]
//! retry_delay_secs = 60
//! time_zone = "-05:00"  # UTC offset used for resume-time display only
//! ```

use std::path::PathBuf;
use std::time::Duration;

use chrono::FixedOffset;
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use prospector::StateFiles;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// State file locations.
    pub state: StateConfig,
    /// Harvest loop tuning.
    pub harvest: HarvestConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via PROSPECTOR_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
}

/// State file locations.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Path of the repositories checkpoint file.
    pub repositories: Option<PathBuf>,
    /// Path of the users checkpoint file.
    pub users: Option<PathBuf>,
}

/// Harvest loop tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Seconds to sleep after hitting the rate limit.
    pub retry_delay_secs: u64,
    /// UTC offset (e.g. "-05:00") used when displaying the resume time.
    /// Display only; no behavioral effect.
    pub time_zone: Option<String>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            retry_delay_secs: 60,
            time_zone: None,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/prospector/config.toml)
    /// 3. Local config file (./prospector.toml)
    /// 4. Environment variables with PROSPECTOR_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "prospector") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let local_config = PathBuf::from("prospector.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./prospector.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // PROSPECTOR_GITHUB_TOKEN -> github.token, etc.
        builder = builder.add_source(
            Environment::with_prefix("PROSPECTOR")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub token.
    pub fn github_token(&self) -> Option<String> {
        self.github.token.clone()
    }

    /// Resolve the pair of state file paths, falling back to the default
    /// state directory for whichever is unset.
    pub fn state_files(&self) -> Option<StateFiles> {
        match (&self.state.repositories, &self.state.users) {
            (Some(repositories), Some(users)) => {
                Some(StateFiles::new(repositories.clone(), users.clone()))
            }
            _ => {
                let dir = Self::default_state_dir()?;
                let defaults = StateFiles::under(&dir);
                Some(StateFiles::new(
                    self.state
                        .repositories
                        .clone()
                        .unwrap_or(defaults.repositories),
                    self.state.users.clone().unwrap_or(defaults.users),
                ))
            }
        }
    }

    /// The configured rate-limit retry delay.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.harvest.retry_delay_secs)
    }

    /// The configured display offset for resume-time logging, if any.
    ///
    /// An unparseable offset is ignored (falls back to UTC display).
    pub fn display_offset(&self) -> Option<FixedOffset> {
        let raw = self.harvest.time_zone.as_deref()?;
        match raw.parse::<FixedOffset>() {
            Ok(offset) => Some(offset),
            Err(e) => {
                tracing::warn!(offset = raw, error = %e, "ignoring unparseable time_zone");
                None
            }
        }
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/prospector` or
    /// `~/.local/state/prospector`. On macOS/Windows, falls back to the
    /// data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "prospector").map(|dirs| {
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_content: &str) -> Config {
        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        settings.try_deserialize().unwrap()
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert!(config.state.repositories.is_none());
        assert!(config.state.users.is_none());
        assert_eq!(config.harvest.retry_delay_secs, 60);
        assert!(config.harvest.time_zone.is_none());
    }

    #[test]
    fn full_config_parsing() {
        let config = parse(
            r#"
            [github]
            token = "ghp_test123"

            [state]
            repositories = "/tmp/repos.json"
            users = "/tmp/users.json"

            [harvest]
            retry_delay_secs = 120
            time_zone = "-05:00"
        "#,
        );

        assert_eq!(config.github_token(), Some("ghp_test123".to_string()));
        let files = config.state_files().unwrap();
        assert_eq!(files.repositories, PathBuf::from("/tmp/repos.json"));
        assert_eq!(files.users, PathBuf::from("/tmp/users.json"));
        assert_eq!(config.retry_delay(), Duration::from_secs(120));
        assert_eq!(
            config.display_offset(),
            Some(FixedOffset::west_opt(5 * 3600).unwrap())
        );
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse(
            r#"
            [harvest]
            retry_delay_secs = 90
        "#,
        );
        assert_eq!(config.retry_delay(), Duration::from_secs(90));
        assert!(config.github_token().is_none());
    }

    #[test]
    fn state_files_fall_back_to_state_dir() {
        let config = Config::default();
        let files = config.state_files().unwrap();
        assert!(files.repositories.ends_with("repositories.json"));
        assert!(files.users.ends_with("users.json"));
    }

    #[test]
    fn single_state_path_override_keeps_the_other_default() {
        let config = parse(
            r#"
            [state]
            users = "/tmp/custom-users.json"
        "#,
        );
        let files = config.state_files().unwrap();
        assert_eq!(files.users, PathBuf::from("/tmp/custom-users.json"));
        assert!(files.repositories.ends_with("repositories.json"));
    }

    #[test]
    fn unparseable_time_zone_is_ignored() {
        let config = parse(
            r#"
            [harvest]
            time_zone = "not-an-offset"
        "#,
        );
        assert!(config.display_offset().is_none());
    }

    #[test]
    fn positive_offset_parses() {
        let config = parse(
            r#"
            [harvest]
            time_zone = "+09:00"
        "#,
        );
        assert_eq!(
            config.display_offset(),
            Some(FixedOffset::east_opt(9 * 3600).unwrap())
        );
    }

    #[test]
    fn default_state_dir_contains_app_name() {
        let dir = Config::default_state_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().to_string_lossy().contains("prospector"));
    }
}
