use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::query::QueryParams;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub ingestion_time: Option<DateTime<Utc>>,
    pub level: Option<String>,
    pub analyzed: Option<bool>,
    pub has_anomaly: Option<bool>,
    pub source_id: Option<String>,
    pub raw_text: Option<String>,
}

/// Optional filters accepted by `api/logs` and `api/logs/page`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    pub source_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub level: Option<String>,
    pub contains_text: Option<String>,
    pub analyzed_only: Option<bool>,
    pub has_anomaly: Option<bool>,
}

impl LogFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.text("sourceId", self.source_id.as_deref())
            .date("from", self.from.as_ref())
            .date("to", self.to.as_ref())
            .text("level", self.level.as_deref())
            .text("containsText", self.contains_text.as_deref())
            .display("analyzedOnly", self.analyzed_only)
            .display("hasAnomaly", self.has_anomaly);
        q
    }

    /// Build a filter from `key=value` arguments using the wire key names.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut filter = LogFilter::default();
        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("Expected key=value, got '{}'", pair))?;
            match key {
                "sourceId" => filter.source_id = Some(value.to_string()),
                "from" => filter.from = Some(parse_date(key, value)?),
                "to" => filter.to = Some(parse_date(key, value)?),
                "level" => filter.level = Some(value.to_string()),
                "containsText" => filter.contains_text = Some(value.to_string()),
                "analyzedOnly" => filter.analyzed_only = Some(parse_bool(key, value)?),
                "hasAnomaly" => filter.has_anomaly = Some(parse_bool(key, value)?),
                _ => return Err(format!("Unknown log filter: '{}'", key)),
            }
        }
        Ok(filter)
    }
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("Invalid {} '{}': {}", key, value, e))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid {} '{}': expected true or false", key, value))
}
