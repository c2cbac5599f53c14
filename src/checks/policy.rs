use serde::{Deserialize, Serialize};

use super::{CheckResult, Outcome};

/// Policy verdict: the final pass/fail decision for a check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub score: Option<u8>,
    pub min_score: u8,
    pub outcome: Outcome,
}

/// Policy configuration loaded from `.branchguard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Scores below this fail.
    #[serde(default = "default_min_score")]
    pub min_score: u8,
    /// Treat "nothing to score" as a failure.
    #[serde(default)]
    pub fail_on_inconclusive: bool,
}

fn default_min_score() -> u8 {
    8
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            fail_on_inconclusive: false,
        }
    }
}

impl Policy {
    /// Evaluate a check result against this policy and produce a verdict.
    pub fn evaluate(&self, result: &CheckResult) -> PolicyVerdict {
        let pass = match (result.outcome, result.score) {
            (Outcome::RuntimeError, _) => false,
            (Outcome::Inconclusive, _) => !self.fail_on_inconclusive,
            (_, Some(score)) => score >= self.min_score,
            (_, None) => false,
        };

        PolicyVerdict {
            pass,
            score: result.score,
            min_score: self.min_score,
            outcome: result.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::ScoreReasons;
    use crate::error::GuardError;

    const REASONS: ScoreReasons = ScoreReasons {
        min: "min",
        partial: "partial",
        max: "max",
    };

    #[test]
    fn default_policy_fails_below_eight() {
        let policy = Policy::default();
        assert!(!policy.evaluate(&CheckResult::scored("x", 7, &REASONS)).pass);
        assert!(policy.evaluate(&CheckResult::scored("x", 8, &REASONS)).pass);
    }

    #[test]
    fn runtime_error_never_passes() {
        let mut policy = Policy::default();
        policy.min_score = 0;
        let err = GuardError::Retrieval("boom".into());
        let verdict = policy.evaluate(&CheckResult::runtime_error("x", &err));
        assert!(!verdict.pass);
        assert_eq!(verdict.score, None);
    }

    #[test]
    fn inconclusive_passes_unless_configured() {
        let mut policy = Policy::default();
        let result = CheckResult::inconclusive("x", "no branches");
        assert!(policy.evaluate(&result).pass);
        policy.fail_on_inconclusive = true;
        assert!(!policy.evaluate(&result).pass);
    }

    #[test]
    fn zero_threshold_accepts_minimum_score() {
        let policy = Policy {
            min_score: 0,
            fail_on_inconclusive: false,
        };
        let verdict = policy.evaluate(&CheckResult::scored("x", 0, &REASONS));
        assert!(verdict.pass);
        assert_eq!(verdict.outcome, Outcome::Min);
    }
}
