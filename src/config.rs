//! Arena settings, loadable from a JSON file.

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::model::Fleet;

/// Runtime settings. Missing fields take their defaults, so `{}` is a
/// valid configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Time a bot may take per move, in milliseconds.
    pub bot_timeout_ms: u64,
    pub games_per_tournament: usize,
    /// Tournament games run at once.
    pub concurrency: usize,
    pub fleet: Fleet,
    /// Base seed for ship layouts; random when absent.
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            bot_timeout_ms: 10_000,
            games_per_tournament: 10,
            concurrency: 4,
            fleet: Fleet::standard(),
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ArenaConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.bot_timeout_ms > 0, "bot_timeout_ms must be positive");
        ensure!(
            self.games_per_tournament > 0,
            "games_per_tournament must be positive"
        );
        ensure!(self.concurrency > 0, "concurrency must be positive");
        Ok(())
    }

    pub fn bot_timeout(&self) -> Duration {
        Duration::from_millis(self.bot_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: ArenaConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.bot_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn fleet_is_validated_while_parsing() {
        let config: ArenaConfig =
            serde_json::from_str(r#"{"fleet": [4, 1], "seed": 9}"#).unwrap();
        assert_eq!(config.fleet.lengths(), &[4, 1]);
        assert_eq!(config.seed, Some(9));

        assert!(serde_json::from_str::<ArenaConfig>(r#"{"fleet": []}"#).is_err());
        assert!(serde_json::from_str::<ArenaConfig>(r#"{"fleet": [11]}"#).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<ArenaConfig>(r#"{"timeout": 5}"#).is_err());
    }

    #[test]
    fn zero_concurrency_fails_validation() {
        let config = ArenaConfig {
            concurrency: 0,
            ..ArenaConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
