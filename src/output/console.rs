use crate::checks::{DetailKind, Outcome};
use crate::Report;

/// Render a report as plain console output, one block per check.
pub fn render(report: &Report, show_debug: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n  Repository: {}\n\n", display_repo(&report.repo)));

    for entry in &report.entries {
        let result = &entry.result;
        let score = match result.outcome {
            Outcome::Inconclusive => "?".to_string(),
            Outcome::RuntimeError => "error".to_string(),
            _ => result
                .score
                .map(|s| format!("{s} / 10"))
                .unwrap_or_else(|| "-".into()),
        };

        output.push_str(&format!("  {:<20} {}\n", result.name, score));
        output.push_str(&format!("           reason: {}\n", result.reason));

        for detail in &result.details {
            let tag = match detail.kind {
                DetailKind::Warn => "[WARN] ",
                DetailKind::Info => "[INFO] ",
                DetailKind::Debug if show_debug => "[DEBUG]",
                DetailKind::Debug => continue,
            };
            output.push_str(&format!("           {} {}\n", tag, detail.message));
        }

        let status = if entry.verdict.pass { "PASS" } else { "FAIL" };
        output.push_str(&format!(
            "           Result: {} (outcome: {}, threshold: {})\n\n",
            status, entry.verdict.outcome, entry.verdict.min_score,
        ));
    }

    output
}

fn display_repo(repo: &str) -> &str {
    if repo.is_empty() {
        "(unnamed)"
    } else {
        repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::policy::Policy;
    use crate::checks::{CheckResult, Detail, ScoreReasons};
    use crate::ReportEntry;

    fn report() -> Report {
        let reasons = ScoreReasons {
            min: "min",
            partial: "not maximal",
            max: "max",
        };
        let result = CheckResult::scored("Branch-Protection", 6, &reasons).with_details(vec![
            Detail {
                kind: DetailKind::Warn,
                message: "'force pushes' enabled on branch 'main'".into(),
            },
            Detail {
                kind: DetailKind::Debug,
                message: "unable to retrieve review dismissal on branch 'main'".into(),
            },
        ]);
        let verdict = Policy::default().evaluate(&result);
        Report {
            repo: "acme/widget".into(),
            entries: vec![ReportEntry { result, verdict }],
            pass: false,
        }
    }

    #[test]
    fn shows_score_and_verdict() {
        let out = render(&report(), false);
        assert!(out.contains("acme/widget"));
        assert!(out.contains("6 / 10"));
        assert!(out.contains("[WARN]  'force pushes' enabled"));
        assert!(out.contains("Result: FAIL"));
    }

    #[test]
    fn debug_details_are_opt_in() {
        assert!(!render(&report(), false).contains("review dismissal"));
        assert!(render(&report(), true).contains("[DEBUG] unable to retrieve review dismissal"));
    }
}
