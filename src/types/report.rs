use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::Alert;
use super::analysis::AnalysisEntry;
use super::log::LogEntry;
use super::null_to_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_logs: Option<u64>,
    pub total_alerts: Option<u64>,
    pub total_analysis: Option<u64>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub logs_per_source: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopIssue {
    pub example: Option<String>,
    pub count: Option<u64>,
}

/// Aggregated report for one day.
///
/// Top-level fields this client does not know about land in `extra` and are
/// written back unchanged on serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub period: Option<Period>,
    pub summary: Option<Summary>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub logs: Vec<LogEntry>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub alerts: Vec<Alert>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub analysis: Vec<AnalysisEntry>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub top_issues: Vec<TopIssue>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Output format of `api/report/daily`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}
