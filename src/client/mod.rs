pub mod snapshot;

use crate::error::Result;
use crate::model::{BranchRef, Release};

pub use snapshot::{RepoSnapshot, SnapshotClient};

/// Read access to the repository metadata a check needs.
///
/// Implementations do their own fetching and retrying; any failure is
/// reported as `GuardError::Retrieval` and ends the run.
pub trait RepoClient: Send + Sync {
    /// All branches, including their protection rules.
    fn list_branches(&self) -> Result<Vec<BranchRef>>;

    /// All published releases.
    fn list_releases(&self) -> Result<Vec<Release>>;

    /// The default branch, if the repository has one.
    fn default_branch(&self) -> Result<Option<BranchRef>>;
}
