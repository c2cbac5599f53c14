use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GuardError, Result};
use crate::model::{BranchRef, Release};

/// A release cut from a raw commit rather than a branch.
static COMMIT_SHA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]{40}$").unwrap());

/// Branches indexed by name.
#[derive(Debug, Default)]
pub struct BranchMap {
    branches: HashMap<String, BranchRef>,
}

impl BranchMap {
    /// Index branches by name. Unnamed branches are dropped; on duplicate
    /// names the last one wins.
    pub fn from_branches(branches: Vec<BranchRef>) -> Self {
        let branches = branches
            .into_iter()
            .filter(|b| !b.name.is_empty())
            .map(|b| (b.name.clone(), b))
            .collect();
        Self { branches }
    }

    /// Look up a branch, following the `master` -> `main` rename.
    ///
    /// Only that one rename is handled; other branch redirects are not
    /// resolved.
    pub fn get(&self, name: &str) -> Result<&BranchRef> {
        if let Some(branch) = self.branches.get(name) {
            return Ok(branch);
        }
        if name == "master" {
            if let Some(branch) = self.branches.get("main") {
                return Ok(branch);
            }
        }
        Err(GuardError::BranchNotFound(name.to_string()))
    }

    pub(crate) fn len(&self) -> usize {
        self.branches.len()
    }
}

/// Names of the branches that must be protected: every branch a release was
/// cut from, plus the default branch.
///
/// Releases pointing at a commit SHA are skipped since the owning branch
/// cannot be recovered from the SHA. A release naming a branch that does not
/// exist fails the whole selection.
pub fn required_branches(
    branches: &BranchMap,
    releases: &[Release],
    default_branch: Option<&BranchRef>,
) -> Result<BTreeSet<String>> {
    let mut required = BTreeSet::new();
    tracing::debug!(
        branches = branches.len(),
        releases = releases.len(),
        "selecting branches to score"
    );

    for release in releases {
        let commitish = release.target_commitish.as_str();
        if commitish.is_empty() {
            return Err(GuardError::CommitishMissing);
        }

        // TODO: resolve the owning branch of a SHA once the client can list
        // branches containing a commit.
        if COMMIT_SHA_RE.is_match(commitish) {
            tracing::debug!(commitish, "skipping release targeting a commit");
            continue;
        }

        let branch = branches.get(commitish)?;
        required.insert(branch.name.clone());
    }

    if let Some(default) = default_branch.filter(|b| !b.name.is_empty()) {
        match branches.get(&default.name) {
            Ok(branch) => {
                required.insert(branch.name.clone());
            }
            Err(_) => {
                tracing::debug!(branch = %default.name, "default branch not in branch listing");
                required.insert(default.name.clone());
            }
        }
    }

    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BranchProtectionRule;
    use pretty_assertions::assert_eq;

    fn map(names: &[&str]) -> BranchMap {
        BranchMap::from_branches(
            names
                .iter()
                .map(|n| BranchRef::new(*n, BranchProtectionRule::default()))
                .collect(),
        )
    }

    fn names(set: BTreeSet<String>) -> Vec<String> {
        set.into_iter().collect()
    }

    #[test]
    fn last_duplicate_wins() {
        let mut first = BranchRef::new("main", BranchProtectionRule::default());
        first.protected = Some(false);
        let second = BranchRef::new("main", BranchProtectionRule::strict());
        let branches = BranchMap::from_branches(vec![first, second]);
        assert_eq!(branches.len(), 1);
        assert_eq!(branches.get("main").unwrap().rule, BranchProtectionRule::strict());
    }

    #[test]
    fn unnamed_branches_are_dropped() {
        let branches = map(&["", "dev"]);
        assert_eq!(branches.len(), 1);
        assert!(branches.get("").is_err());
    }

    #[test]
    fn master_falls_back_to_main() {
        let branches = map(&["main"]);
        assert_eq!(branches.get("master").unwrap().name, "main");
    }

    #[test]
    fn fallback_is_master_only() {
        let branches = map(&["main"]);
        assert!(matches!(
            branches.get("trunk"),
            Err(GuardError::BranchNotFound(name)) if name == "trunk"
        ));
        let branches = map(&["master"]);
        assert!(branches.get("main").is_err());
    }

    #[test]
    fn default_and_release_branches_are_required() {
        let branches = map(&["main", "release/1.x", "feature"]);
        let default = branches.get("main").unwrap().clone();
        let releases = vec![Release::new("release/1.x"), Release::new("release/1.x")];
        let required = required_branches(&branches, &releases, Some(&default)).unwrap();
        assert_eq!(names(required), vec!["main", "release/1.x"]);
    }

    #[test]
    fn release_on_master_resolves_to_main() {
        let branches = map(&["main"]);
        let releases = vec![Release::new("master")];
        let required = required_branches(&branches, &releases, None).unwrap();
        assert_eq!(names(required), vec!["main"]);
    }

    #[test]
    fn sha_release_is_skipped() {
        let branches = map(&["main"]);
        let releases = vec![Release::new("0123456789abcdef0123456789abcdef01234567")];
        let required = required_branches(&branches, &releases, None).unwrap();
        assert!(required.is_empty());
    }

    #[test]
    fn uppercase_sha_is_treated_as_branch_name() {
        let branches = map(&["main"]);
        let releases = vec![Release::new("0123456789ABCDEF0123456789ABCDEF01234567")];
        assert!(required_branches(&branches, &releases, None).is_err());
    }

    #[test]
    fn unknown_release_branch_fails() {
        let branches = map(&["main"]);
        let releases = vec![Release::new("release/2.x")];
        let err = required_branches(&branches, &releases, None).unwrap_err();
        assert!(matches!(err, GuardError::BranchNotFound(_)));
    }

    #[test]
    fn empty_commitish_fails() {
        let branches = map(&["main"]);
        let releases = vec![Release::new("")];
        let err = required_branches(&branches, &releases, None).unwrap_err();
        assert!(matches!(err, GuardError::CommitishMissing));
    }

    #[test]
    fn unlisted_default_branch_is_still_required() {
        let branches = map(&[]);
        let default = BranchRef::new("main", BranchProtectionRule::default());
        let required = required_branches(&branches, &[], Some(&default)).unwrap();
        assert_eq!(names(required), vec!["main"]);
    }

    #[test]
    fn default_master_resolves_to_main() {
        let branches = map(&["main"]);
        let default = BranchRef::new("master", BranchProtectionRule::default());
        let required = required_branches(&branches, &[], Some(&default)).unwrap();
        assert_eq!(names(required), vec!["main"]);
    }

    #[test]
    fn unnamed_default_branch_adds_nothing() {
        let branches = map(&["main"]);
        let default = BranchRef::default();
        let required = required_branches(&branches, &[], Some(&default)).unwrap();
        assert!(required.is_empty());
    }
}
