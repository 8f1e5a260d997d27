use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_to_default;
use super::query::QueryParams;
use super::severity::Severity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub severity: Option<Severity>,
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub rule_names: Vec<String>,
    pub active: Option<bool>,
    pub source_id: Option<String>,
    pub log_entry_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFilter {
    pub id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub severity: Option<Severity>,
    pub message: Option<String>,
    #[serde(default)]
    pub rule_names: Vec<String>,
    pub active: Option<bool>,
    pub source_id: Option<String>,
    pub log_entry_id: Option<String>,
}

impl AlertFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.text("id", self.id.as_deref())
            .instant("createdAt", self.created_at.as_ref())
            .display("severity", self.severity)
            .text("message", self.message.as_deref())
            .repeated("ruleNames", &self.rule_names)
            .display("active", self.active)
            .text("sourceId", self.source_id.as_deref())
            .text("logEntryId", self.log_entry_id.as_deref());
        q
    }

    /// Build a filter from `key=value` arguments. `ruleNames` may repeat.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut filter = AlertFilter::default();
        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("Expected key=value, got '{}'", pair))?;
            match key {
                "id" => filter.id = Some(value.to_string()),
                "createdAt" => {
                    filter.created_at = Some(
                        DateTime::parse_from_rfc3339(value)
                            .map_err(|e| format!("Invalid createdAt '{}': {}", value, e))?
                            .with_timezone(&Utc),
                    )
                }
                "severity" => filter.severity = Some(value.parse()?),
                "message" => filter.message = Some(value.to_string()),
                "ruleNames" => filter.rule_names.push(value.to_string()),
                "active" => {
                    filter.active = Some(value.parse().map_err(|_| {
                        format!("Invalid active '{}': expected true or false", value)
                    })?)
                }
                "sourceId" => filter.source_id = Some(value.to_string()),
                "logEntryId" => filter.log_entry_id = Some(value.to_string()),
                _ => return Err(format!("Unknown alert filter: '{}'", key)),
            }
        }
        Ok(filter)
    }
}
