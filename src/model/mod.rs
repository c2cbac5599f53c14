//! Repository metadata as reported by the hosting platform.
//!
//! Every protection setting is an `Option`: `None` means the setting could
//! not be read (usually a token without admin rights), which is not the same
//! thing as the setting being disabled.

use serde::{Deserialize, Serialize};

/// Protection configuration of a single branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchProtectionRule {
    #[serde(default)]
    pub allow_force_pushes: Option<bool>,
    #[serde(default)]
    pub allow_deletions: Option<bool>,
    /// Admin-only.
    #[serde(default)]
    pub enforce_admins: Option<bool>,
    #[serde(default)]
    pub required_approving_review_count: Option<u32>,
    /// Admin-only.
    #[serde(default)]
    pub dismiss_stale_reviews: Option<bool>,
    /// Status checks that must pass before merging, in platform order.
    #[serde(default)]
    pub required_status_contexts: Vec<String>,
    /// Admin-only.
    #[serde(default)]
    pub require_up_to_date_before_merge: Option<bool>,
}

impl BranchProtectionRule {
    /// The strictest rule the rubric knows about.
    pub fn strict() -> Self {
        Self {
            allow_force_pushes: Some(false),
            allow_deletions: Some(false),
            enforce_admins: Some(true),
            required_approving_review_count: Some(2),
            dismiss_stale_reviews: Some(true),
            required_status_contexts: vec!["ci".into()],
            require_up_to_date_before_merge: Some(true),
        }
    }
}

/// A branch together with its protection state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: String,
    /// `Some(false)` only when the platform explicitly reports the branch
    /// as unprotected.
    #[serde(default)]
    pub protected: Option<bool>,
    #[serde(default, alias = "protection")]
    pub rule: BranchProtectionRule,
}

impl BranchRef {
    pub fn new(name: impl Into<String>, rule: BranchProtectionRule) -> Self {
        Self {
            name: name.into(),
            protected: Some(true),
            rule,
        }
    }

    /// Whether the platform has not explicitly reported the branch as
    /// unprotected. A protected branch may still have every setting off.
    pub fn is_protected(&self) -> bool {
        self.protected != Some(false)
    }
}

/// A published release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Branch name or 40-hex commit SHA the release was cut from.
    pub target_commitish: String,
}

impl Release {
    pub fn new(target_commitish: impl Into<String>) -> Self {
        Self {
            target_commitish: target_commitish.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_unless_explicitly_false() {
        let mut branch = BranchRef::new("main", BranchProtectionRule::default());
        assert!(branch.is_protected());
        branch.protected = None;
        assert!(branch.is_protected());
        branch.protected = Some(false);
        assert!(!branch.is_protected());
    }

    #[test]
    fn missing_fields_deserialize_as_unknown() {
        let branch: BranchRef = serde_json::from_str(
            r#"{"name": "main", "protection": {"allow_force_pushes": false}}"#,
        )
        .unwrap();
        assert_eq!(branch.rule.allow_force_pushes, Some(false));
        assert_eq!(branch.rule.enforce_admins, None);
        assert!(branch.rule.required_status_contexts.is_empty());
        assert_eq!(branch.protected, None);
    }
}
