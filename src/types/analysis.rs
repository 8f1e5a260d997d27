use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::query::QueryParams;
use super::severity::Severity;

/// AI-generated annotation of a single log entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEntry {
    pub id: Option<String>,
    pub log_entry_id: Option<String>,
    pub severity: Option<Severity>,
    pub category: Option<String>,
    pub summarized_issue: Option<String>,
    pub likely_cause: Option<String>,
    pub recommendation: Option<String>,
    pub anomaly_score: Option<f64>,
    pub analyzed_at: Option<DateTime<Utc>>,
}

/// Filters for `api/analysis`. Every field is optional and unset fields are
/// not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFilter {
    pub id: Option<String>,
    pub log_entry_id: Option<String>,
    pub severity: Option<Severity>,
    pub category: Option<String>,
    pub summarized_issue: Option<String>,
    pub likely_cause: Option<String>,
    pub recommendation: Option<String>,
    pub anomaly_score: Option<f64>,
    pub analyzed_at: Option<DateTime<Utc>>,
}

impl AnalysisFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.text("id", self.id.as_deref())
            .text("logEntryId", self.log_entry_id.as_deref())
            .display("severity", self.severity)
            .text("category", self.category.as_deref())
            .text("summarizedIssue", self.summarized_issue.as_deref())
            .text("likelyCause", self.likely_cause.as_deref())
            .text("recommendation", self.recommendation.as_deref())
            .display("anomalyScore", self.anomaly_score)
            .instant("analyzedAt", self.analyzed_at.as_ref());
        q
    }

    /// Build a filter from `key=value` arguments using the wire key names.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut filter = AnalysisFilter::default();
        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("Expected key=value, got '{}'", pair))?;
            let value = value.to_string();
            match key {
                "id" => filter.id = Some(value),
                "logEntryId" => filter.log_entry_id = Some(value),
                "severity" => filter.severity = Some(value.parse()?),
                "category" => filter.category = Some(value),
                "summarizedIssue" => filter.summarized_issue = Some(value),
                "likelyCause" => filter.likely_cause = Some(value),
                "recommendation" => filter.recommendation = Some(value),
                "anomalyScore" => {
                    filter.anomaly_score = Some(
                        value
                            .parse()
                            .map_err(|e| format!("Invalid anomalyScore '{}': {}", value, e))?,
                    )
                }
                "analyzedAt" => {
                    filter.analyzed_at = Some(
                        DateTime::parse_from_rfc3339(&value)
                            .map_err(|e| format!("Invalid analyzedAt '{}': {}", value, e))?
                            .with_timezone(&Utc),
                    )
                }
                _ => return Err(format!("Unknown analysis filter: '{}'", key)),
            }
        }
        Ok(filter)
    }
}
