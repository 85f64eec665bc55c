use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GitHub API URL cannot be empty")]
    EmptyGitHubUrl,

    #[error("Issue end state cannot be empty")]
    EmptyEndState,

    #[error("Issue reopen state cannot be empty")]
    EmptyReopenState,

    #[error("End state and reopen state must differ, both are {0:?}")]
    IndistinguishableStates(String),

    #[error("--state-file and --state-issue are mutually exclusive")]
    ConflictingStateBackends,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. gh2tracker.yaml in the working directory (optional)
    /// 3. Environment variables (`GH2TRACKER_*` prefix)
    ///
    /// CLI flags are applied on top by the command layer.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("gh2tracker.yaml"))
            .merge(Env::prefixed("GH2TRACKER_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.url.is_empty() {
            return Err(ConfigError::EmptyGitHubUrl);
        }

        if config.tracker.end_state.is_empty() {
            return Err(ConfigError::EmptyEndState);
        }
        if config.tracker.reopen_state.is_empty() {
            return Err(ConfigError::EmptyReopenState);
        }
        // Issue state derives from a name comparison against the end state;
        // identical names would make every issue read as closed.
        if config.tracker.end_state == config.tracker.reopen_state {
            return Err(ConfigError::IndistinguishableStates(
                config.tracker.end_state.clone(),
            ));
        }

        if config.sync.state_file.is_some() && config.sync.state_issue.is_some() {
            return Err(ConfigError::ConflictingStateBackends);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ConfigLoader::validate(&Config::default()).is_ok());
    }

    #[test]
    fn equal_states_are_rejected() {
        let mut config = Config::default();
        config.tracker.reopen_state = "Done".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::IndistinguishableStates(_))
        ));
    }

    #[test]
    fn both_state_backends_are_rejected() {
        let mut config = Config::default();
        config.sync.state_file = Some("states.json".to_string());
        config.sync.state_issue = Some("-".to_string());
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::ConflictingStateBackends)
        ));
    }
}
