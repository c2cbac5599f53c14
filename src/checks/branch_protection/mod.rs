//! Branch-Protection check.
//!
//! Scores the protection settings of the default branch and every branch a
//! release was cut from. Branches are selected by `selector`, scored tier by
//! tier in `evaluator`, and combined into a single 0-10 score by
//! `aggregator`.

pub mod aggregator;
pub mod evaluator;
pub mod selector;

use crate::checks::{
    Check, CheckMetadata, CheckRequest, CheckResult, DetailLogger, ScoreReasons,
};
use crate::client::RepoClient;
use crate::error::{GuardError, Result};

use aggregator::Tier;
use selector::BranchMap;

pub const CHECK_NAME: &str = "Branch-Protection";

const REASONS: ScoreReasons = ScoreReasons {
    min: "branch protection not enabled on development/release branches",
    partial: "branch protection is not maximal on development and all release branches",
    max: "branch protection is fully enabled on development and all release branches",
};

const NO_BRANCHES: &str = "unable to detect any development/release branches";

pub struct BranchProtectionCheck;

impl Check for BranchProtectionCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            name: CHECK_NAME.into(),
            description: "Determines if the default and release branches are protected".into(),
            risk: "High".into(),
            tiers: Tier::metadata(),
        }
    }

    fn run(&self, request: &CheckRequest<'_>) -> CheckResult {
        evaluate(request.client, request.logger)
    }
}

/// Score a repository's branch protection.
///
/// Never fails: retrieval and data errors become a runtime-error result, and
/// a repository with no branch to score is inconclusive.
pub fn evaluate(client: &dyn RepoClient, dl: &dyn DetailLogger) -> CheckResult {
    match score_branches(client, dl) {
        Ok(Some(score)) => CheckResult::scored(CHECK_NAME, score, &REASONS),
        Ok(None) => CheckResult::inconclusive(CHECK_NAME, NO_BRANCHES),
        Err(e) => {
            tracing::warn!(check = CHECK_NAME, error = %e, "check failed");
            CheckResult::runtime_error(CHECK_NAME, &e)
        }
    }
}

/// `None` when no required branch could be found to score.
fn score_branches(client: &dyn RepoClient, dl: &dyn DetailLogger) -> Result<Option<u8>> {
    let branches = BranchMap::from_branches(client.list_branches()?);
    let releases = client.list_releases()?;
    let default_branch = client.default_branch()?;

    let required = selector::required_branches(&branches, &releases, default_branch.as_ref())?;

    let mut scores = Vec::with_capacity(required.len());
    for name in &required {
        let branch = match branches.get(name) {
            Ok(branch) => branch,
            // Selected but not listed: the branch went away after selection.
            Err(GuardError::BranchNotFound(_)) => {
                tracing::debug!(branch = %name, "skipping branch missing from listing");
                continue;
            }
            Err(e) => return Err(e),
        };

        let protected = branch.is_protected();
        if !protected {
            dl.warn(format!("branch protection not enabled for branch '{name}'"));
        }
        scores.push(evaluator::evaluate_branch(name, &branch.rule, dl, protected));
    }

    if scores.is_empty() {
        return Ok(None);
    }

    aggregator::compute_score(&scores).map(Some)
}
