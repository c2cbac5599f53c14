//! Per-branch rubric.
//!
//! Each tier yields a `(score, max)` pair, split into a non-admin track
//! (settings any reader can see) and an admin track (settings only visible
//! to repository administrators). A setting that could not be read adds to
//! neither score nor max, except where noted.

use crate::checks::DetailLogger;
use crate::model::BranchProtectionRule;

/// Required approving reviews for the thorough-review tier.
pub const MIN_REVIEWS: u32 = 2;

/// One `u32` per rubric field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoresInfo {
    pub basic: u32,
    pub admin_basic: u32,
    pub review: u32,
    pub admin_review: u32,
    pub context: u32,
    pub thorough_review: u32,
    pub admin_thorough_review: u32,
}

/// Points earned and points possible for one branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelScore {
    pub scores: ScoresInfo,
    pub maxes: ScoresInfo,
}

/// Forwards rationale to a `DetailLogger` only while enabled.
pub(crate) struct Gated<'a> {
    logger: &'a dyn DetailLogger,
    enabled: bool,
}

impl<'a> Gated<'a> {
    pub(crate) fn new(logger: &'a dyn DetailLogger, enabled: bool) -> Self {
        Self { logger, enabled }
    }

    fn info(&self, message: impl FnOnce() -> String) {
        if self.enabled {
            self.logger.info(message());
        }
    }

    fn warn(&self, message: impl FnOnce() -> String) {
        if self.enabled {
            self.logger.warn(message());
        }
    }

    fn debug(&self, message: impl FnOnce() -> String) {
        if self.enabled {
            self.logger.debug(message());
        }
    }
}

/// Score one branch against every tier.
///
/// `do_logging` is false for branches the platform reports as unprotected:
/// the points are computed the same way, but the per-setting rationale is
/// left out since the caller already warned about the branch as a whole.
pub fn evaluate_branch(
    branch: &str,
    rule: &BranchProtectionRule,
    logger: &dyn DetailLogger,
    do_logging: bool,
) -> LevelScore {
    let log = Gated::new(logger, do_logging);
    let mut level = LevelScore::default();

    (level.scores.basic, level.maxes.basic) = basic_non_admin(rule, branch, &log);
    (level.scores.admin_basic, level.maxes.admin_basic) = basic_admin(rule, branch, &log);
    (level.scores.review, level.maxes.review) = non_admin_review(rule);
    (level.scores.admin_review, level.maxes.admin_review) = admin_review(rule, branch, &log);
    (level.scores.context, level.maxes.context) = non_admin_context(rule, branch, &log);
    (level.scores.thorough_review, level.maxes.thorough_review) =
        non_admin_thorough_review(rule, branch, &log);
    (level.scores.admin_thorough_review, level.maxes.admin_thorough_review) =
        admin_thorough_review(rule, branch, &log);

    level
}

fn basic_non_admin(rule: &BranchProtectionRule, branch: &str, log: &Gated<'_>) -> (u32, u32) {
    let mut score = 0;
    let mut max = 0;

    match rule.allow_force_pushes {
        Some(true) => {
            max += 1;
            log.warn(|| format!("'force pushes' enabled on branch '{branch}'"));
        }
        Some(false) => {
            max += 1;
            score += 1;
            log.info(|| format!("'force pushes' disabled on branch '{branch}'"));
        }
        None => log.debug(|| {
            format!("unable to retrieve whether force pushes are allowed on branch '{branch}'")
        }),
    }

    match rule.allow_deletions {
        Some(true) => {
            max += 1;
            log.warn(|| format!("'allow deletion' enabled on branch '{branch}'"));
        }
        Some(false) => {
            max += 1;
            score += 1;
            log.info(|| format!("'allow deletion' disabled on branch '{branch}'"));
        }
        None => log.debug(|| {
            format!("unable to retrieve whether deletion is allowed on branch '{branch}'")
        }),
    }

    (score, max)
}

fn basic_admin(rule: &BranchProtectionRule, branch: &str, log: &Gated<'_>) -> (u32, u32) {
    match rule.enforce_admins {
        Some(true) => {
            log.info(|| format!("settings apply to administrators on branch '{branch}'"));
            (1, 1)
        }
        Some(false) => {
            log.warn(|| format!("settings do not apply to administrators on branch '{branch}'"));
            (0, 1)
        }
        None => {
            log.debug(|| {
                format!(
                    "unable to retrieve whether or not settings apply to administrators on branch '{branch}'"
                )
            });
            (0, 0)
        }
    }
}

/// Rationale for the review count is logged by the thorough-review tier.
fn non_admin_review(rule: &BranchProtectionRule) -> (u32, u32) {
    match rule.required_approving_review_count {
        Some(count) if count > 0 => (1, 1),
        _ => (0, 1),
    }
}

fn admin_review(rule: &BranchProtectionRule, branch: &str, log: &Gated<'_>) -> (u32, u32) {
    match rule.require_up_to_date_before_merge {
        Some(true) => {
            log.info(|| format!("status checks require up-to-date branches for '{branch}'"));
            (1, 1)
        }
        Some(false) => {
            log.warn(|| format!("status checks do not require up-to-date branches for '{branch}'"));
            (0, 1)
        }
        None => {
            log.debug(|| {
                format!(
                    "unable to retrieve whether up-to-date branches are needed to merge on branch '{branch}'"
                )
            });
            (0, 0)
        }
    }
}

/// Requiring status checks without naming any is the same as requiring none.
fn non_admin_context(rule: &BranchProtectionRule, branch: &str, log: &Gated<'_>) -> (u32, u32) {
    if rule.required_status_contexts.is_empty() {
        log.warn(|| format!("no status checks found to merge onto branch '{branch}'"));
        (0, 1)
    } else {
        log.info(|| format!("status check found to merge onto on branch '{branch}'"));
        (1, 1)
    }
}

/// Unlike the review tier, an unknown review count still counts toward max.
fn non_admin_thorough_review(
    rule: &BranchProtectionRule,
    branch: &str,
    log: &Gated<'_>,
) -> (u32, u32) {
    match rule.required_approving_review_count {
        Some(count) if count >= MIN_REVIEWS => {
            log.info(|| format!("number of required reviewers is {count} on branch '{branch}'"));
            (1, 1)
        }
        Some(count) => {
            log.warn(|| {
                format!("number of required reviewers is only {count} on branch '{branch}'")
            });
            (0, 1)
        }
        None => {
            log.warn(|| format!("number of required reviewers is 0 on branch '{branch}'"));
            (0, 1)
        }
    }
}

fn admin_thorough_review(rule: &BranchProtectionRule, branch: &str, log: &Gated<'_>) -> (u32, u32) {
    match rule.dismiss_stale_reviews {
        Some(true) => {
            log.info(|| format!("Stale review dismissal enabled on branch '{branch}'"));
            (1, 1)
        }
        Some(false) => {
            log.warn(|| format!("Stale review dismissal disabled on branch '{branch}'"));
            (0, 1)
        }
        None => {
            log.debug(|| format!("unable to retrieve review dismissal on branch '{branch}'"));
            (0, 0)
        }
    }
}
