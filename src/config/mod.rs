use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::checks::policy::Policy;
use crate::checks::MAX_RESULT_SCORE;
use crate::error::{GuardError, Result};

/// Top-level configuration from `.branchguard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Show debug-level details (settings that could not be read).
    #[serde(default)]
    pub show_debug: bool,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.policy.min_score > MAX_RESULT_SCORE {
            return Err(GuardError::Config(format!(
                "policy.min_score must be between 0 and {MAX_RESULT_SCORE}, got {}",
                self.policy.min_score
            )));
        }
        Ok(())
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# BranchGuard configuration

[policy]
# Minimum Branch-Protection score (0-10) to pass.
min_score = 8

# Fail when no development/release branch could be found to score.
# fail_on_inconclusive = false

[output]
# Include settings that could not be read (usually needs an admin token).
# show_debug = false
"#
    }
}
