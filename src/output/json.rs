use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::Report;

#[derive(Serialize)]
struct JsonReport<'a> {
    run_id: String,
    evaluated_at: String,
    tool_version: &'static str,
    #[serde(flatten)]
    report: &'a Report,
}

/// Render a report as JSON.
pub fn render(report: &Report) -> Result<String> {
    let json = JsonReport {
        run_id: Uuid::new_v4().to_string(),
        evaluated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        tool_version: env!("CARGO_PKG_VERSION"),
        report,
    };
    let json = serde_json::to_string_pretty(&json)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::policy::Policy;
    use crate::checks::CheckResult;
    use crate::ReportEntry;

    #[test]
    fn includes_run_metadata_and_entries() {
        let result = CheckResult::inconclusive("Branch-Protection", "no branches");
        let verdict = Policy::default().evaluate(&result);
        let report = Report {
            repo: "acme/widget".into(),
            entries: vec![ReportEntry { result, verdict }],
            pass: true,
        };
        let value: serde_json::Value = serde_json::from_str(&render(&report).unwrap()).unwrap();
        assert_eq!(value["repo"], "acme/widget");
        assert_eq!(value["entries"][0]["result"]["outcome"], "inconclusive");
        assert!(value["entries"][0]["result"]["score"].is_null());
        assert_eq!(value["run_id"].as_str().unwrap().len(), 36);
        assert!(value["evaluated_at"].as_str().unwrap().ends_with('Z'));
    }
}
