pub mod branch_protection;
pub mod policy;
pub mod result;

use serde::{Deserialize, Serialize};

use crate::client::RepoClient;

pub use result::{
    CheckResult, Detail, DetailCollector, DetailKind, DetailLogger, Outcome, ScoreReasons,
    MAX_RESULT_SCORE, MIN_RESULT_SCORE,
};

/// Everything a check needs for one run.
pub struct CheckRequest<'a> {
    pub client: &'a dyn RepoClient,
    pub logger: &'a dyn DetailLogger,
}

/// A check scores one aspect of a repository.
pub trait Check: Send + Sync {
    /// Metadata about this check (name, risk, rubric).
    fn metadata(&self) -> CheckMetadata;

    /// Run the check. Failures are reported in the result, never returned.
    fn run(&self, request: &CheckRequest<'_>) -> CheckResult;
}

/// Metadata about a check, used for `list-checks` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckMetadata {
    pub name: String,
    pub description: String,
    pub risk: String,
    /// Scoring tiers in evaluation order, with their weights.
    pub tiers: Vec<TierMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierMetadata {
    pub name: String,
    pub weight: u8,
}

/// Runs every registered check against a repository.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Create a registry with all built-in checks.
    pub fn new() -> Self {
        Self {
            checks: vec![Box::new(branch_protection::BranchProtectionCheck)],
        }
    }

    /// Run all checks, each with its own detail log.
    pub fn run(&self, client: &dyn RepoClient) -> Vec<CheckResult> {
        self.checks
            .iter()
            .map(|check| {
                let logger = DetailCollector::new();
                let request = CheckRequest {
                    client,
                    logger: &logger,
                };
                check.run(&request).with_details(logger.flush())
            })
            .collect()
    }

    /// List metadata for all registered checks.
    pub fn list_checks(&self) -> Vec<CheckMetadata> {
        self.checks.iter().map(|c| c.metadata()).collect()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}
