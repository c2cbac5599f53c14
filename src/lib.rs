//! BranchGuard — branch protection scorer for supply-chain risk assessment.
//!
//! Takes a repository's branch and release metadata, decides which branches
//! must be protected (the default branch plus every release branch), and
//! reduces their protection settings to a 0-10 score using a tiered rubric.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use branchguard::{check, CheckOptions};
//!
//! let options = CheckOptions::default();
//! let (report, _config) = check(Path::new("./snapshot.json"), &options).unwrap();
//! println!("Pass: {}", report.pass);
//! ```

pub mod checks;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod output;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use checks::policy::PolicyVerdict;
use checks::{CheckRegistry, CheckResult, DetailLogger};
use client::{RepoClient, SnapshotClient};
use config::Config;
use error::Result;
use output::OutputFormat;

/// Score a repository's branch protection. See
/// [`checks::branch_protection::evaluate`].
pub fn evaluate(client: &dyn RepoClient, logger: &dyn DetailLogger) -> CheckResult {
    checks::branch_protection::evaluate(client, logger)
}

/// Options for a check invocation.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Path to config file (defaults to `.branchguard.toml` next to the snapshot).
    pub config_path: Option<PathBuf>,
    /// CLI override for the minimum passing score.
    pub min_score_override: Option<u8>,
}

/// One check's result and the policy's decision on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub result: CheckResult,
    pub verdict: PolicyVerdict,
}

/// Complete check report for one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub repo: String,
    pub entries: Vec<ReportEntry>,
    /// True when every entry passed.
    pub pass: bool,
}

/// Load a snapshot and config, run every check, and apply the policy.
///
/// The resolved config is returned alongside the report so callers can
/// honour its output settings.
pub fn check(snapshot_path: &Path, options: &CheckOptions) -> Result<(Report, Config)> {
    let config = load_config(snapshot_path, options)?;
    let client = SnapshotClient::load(snapshot_path)?;
    let report = run_checks(&client, &client.snapshot().repo, &config);
    Ok((report, config))
}

/// Resolve the config for a snapshot, applying CLI overrides.
pub fn load_config(snapshot_path: &Path, options: &CheckOptions) -> Result<Config> {
    let config_path = options.config_path.clone().unwrap_or_else(|| {
        snapshot_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(".branchguard.toml")
    });
    let mut config = Config::load(&config_path)?;

    if let Some(min_score) = options.min_score_override {
        config.policy.min_score = min_score.min(checks::MAX_RESULT_SCORE);
    }
    Ok(config)
}

/// Run every registered check against `client` and apply the policy.
pub fn run_checks(client: &dyn RepoClient, repo: &str, config: &Config) -> Report {
    let entries: Vec<ReportEntry> = CheckRegistry::new()
        .run(client)
        .into_iter()
        .map(|result| {
            let verdict = config.policy.evaluate(&result);
            ReportEntry { result, verdict }
        })
        .collect();

    let pass = entries.iter().all(|e| e.verdict.pass);

    Report {
        repo: repo.to_string(),
        entries,
        pass,
    }
}

/// Render a report in the specified format.
pub fn render_report(report: &Report, format: OutputFormat, show_debug: bool) -> Result<String> {
    output::render(report, format, show_debug)
}
