use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, Result};
use crate::model::{BranchRef, Release};

use super::RepoClient;

/// Branch and release metadata for one repository, captured ahead of time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoSnapshot {
    /// Repository name, e.g. `owner/repo`.
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub branches: Vec<BranchRef>,
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// A `RepoClient` that serves a `RepoSnapshot` from memory.
#[derive(Debug, Clone)]
pub struct SnapshotClient {
    snapshot: RepoSnapshot,
}

impl SnapshotClient {
    pub fn new(snapshot: RepoSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a JSON snapshot from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: RepoSnapshot =
            serde_json::from_str(&content).map_err(|e| GuardError::Snapshot {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(
            repo = %snapshot.repo,
            branches = snapshot.branches.len(),
            releases = snapshot.releases.len(),
            "loaded repository snapshot"
        );
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &RepoSnapshot {
        &self.snapshot
    }
}

impl RepoClient for SnapshotClient {
    fn list_branches(&self) -> Result<Vec<BranchRef>> {
        Ok(self.snapshot.branches.clone())
    }

    fn list_releases(&self) -> Result<Vec<Release>> {
        Ok(self.snapshot.releases.clone())
    }

    fn default_branch(&self) -> Result<Option<BranchRef>> {
        let Some(name) = self.snapshot.default_branch.as_deref() else {
            return Ok(None);
        };
        // The platform reports the default branch by name only; attach the
        // listed branch when there is one.
        let branch = self
            .snapshot
            .branches
            .iter()
            .find(|b| b.name == name)
            .cloned()
            .unwrap_or_else(|| BranchRef {
                name: name.to_string(),
                ..Default::default()
            });
        Ok(Some(branch))
    }
}
