use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::error::GuardError;

/// Lowest score a check can award.
pub const MIN_RESULT_SCORE: u8 = 0;
/// Highest score a check can award.
pub const MAX_RESULT_SCORE: u8 = 10;

/// Result of running one check against one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name (e.g., "Branch-Protection").
    pub name: String,
    /// Score in `[0, 10]`; absent for inconclusive and errored runs.
    pub score: Option<u8>,
    pub outcome: Outcome,
    /// Human-readable summary of the outcome.
    pub reason: String,
    /// Rationale recorded while the check ran.
    pub details: Vec<Detail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Min,
    Partial,
    Max,
    Inconclusive,
    RuntimeError,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Min => write!(f, "minimum"),
            Self::Partial => write!(f, "partial"),
            Self::Max => write!(f, "maximum"),
            Self::Inconclusive => write!(f, "inconclusive"),
            Self::RuntimeError => write!(f, "runtime error"),
        }
    }
}

impl CheckResult {
    /// Classify a score into min / max / partial with the matching reason.
    pub fn scored(name: &str, score: u8, reasons: &ScoreReasons) -> Self {
        let score = score.min(MAX_RESULT_SCORE);
        let (outcome, reason) = match score {
            MIN_RESULT_SCORE => (Outcome::Min, reasons.min),
            MAX_RESULT_SCORE => (Outcome::Max, reasons.max),
            _ => (Outcome::Partial, reasons.partial),
        };
        Self {
            name: name.into(),
            score: Some(score),
            outcome,
            reason: reason.into(),
            details: Vec::new(),
        }
    }

    pub fn inconclusive(name: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: None,
            outcome: Outcome::Inconclusive,
            reason: reason.into(),
            details: Vec::new(),
        }
    }

    pub fn runtime_error(name: &str, error: &GuardError) -> Self {
        Self {
            name: name.into(),
            score: None,
            outcome: Outcome::RuntimeError,
            reason: error.to_string(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<Detail>) -> Self {
        self.details = details;
        self
    }
}

/// Fixed rationale strings for the three scored outcomes.
#[derive(Debug, Clone, Copy)]
pub struct ScoreReasons {
    pub min: &'static str,
    pub partial: &'static str,
    pub max: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    Debug,
    Info,
    Warn,
}

impl std::fmt::Display for DetailKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
        }
    }
}

/// One line of rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub kind: DetailKind,
    pub message: String,
}

/// Sink for check rationale. Write-only: nothing reads details back while a
/// check is running.
pub trait DetailLogger {
    fn info(&self, message: String);
    fn warn(&self, message: String);
    fn debug(&self, message: String);
}

/// `DetailLogger` that keeps details in order and mirrors them to `tracing`.
#[derive(Debug, Default)]
pub struct DetailCollector {
    details: RefCell<Vec<Detail>>,
}

impl DetailCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: DetailKind, message: String) {
        self.details.borrow_mut().push(Detail { kind, message });
    }

    /// Take everything recorded so far.
    pub fn flush(&self) -> Vec<Detail> {
        std::mem::take(&mut *self.details.borrow_mut())
    }
}

impl DetailLogger for DetailCollector {
    fn info(&self, message: String) {
        tracing::info!(detail = %message);
        self.push(DetailKind::Info, message);
    }

    fn warn(&self, message: String) {
        tracing::warn!(detail = %message);
        self.push(DetailKind::Warn, message);
    }

    fn debug(&self, message: String) {
        tracing::debug!(detail = %message);
        self.push(DetailKind::Debug, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REASONS: ScoreReasons = ScoreReasons {
        min: "none",
        partial: "some",
        max: "all",
    };

    #[test]
    fn classifies_scores() {
        assert_eq!(CheckResult::scored("x", 0, &REASONS).outcome, Outcome::Min);
        assert_eq!(CheckResult::scored("x", 5, &REASONS).outcome, Outcome::Partial);
        let max = CheckResult::scored("x", 10, &REASONS);
        assert_eq!(max.outcome, Outcome::Max);
        assert_eq!(max.reason, "all");
        assert_eq!(max.score, Some(10));
    }

    #[test]
    fn inconclusive_has_no_score() {
        let result = CheckResult::inconclusive("x", "nothing to check");
        assert_eq!(result.score, None);
        assert_eq!(result.outcome, Outcome::Inconclusive);
    }

    #[test]
    fn collector_keeps_order_and_flushes() {
        let dl = DetailCollector::new();
        dl.warn("first".into());
        dl.debug("second".into());
        dl.info("third".into());
        let kinds: Vec<_> = dl.flush().into_iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DetailKind::Warn, DetailKind::Debug, DetailKind::Info]);
        assert!(dl.flush().is_empty());
    }
}
