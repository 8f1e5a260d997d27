use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Ordered query parameters. Absent and empty values are never added, so an
/// empty filter produces no query string at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.0.push((key, v.to_string()));
        }
        self
    }

    pub fn display<T: ToString>(&mut self, key: &'static str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            let v = v.to_string();
            self.text(key, Some(v.as_str()));
        }
        self
    }

    pub fn instant(&mut self, key: &'static str, value: Option<&DateTime<Utc>>) -> &mut Self {
        self.display(
            key,
            value.map(|t| t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        )
    }

    pub fn date(&mut self, key: &'static str, value: Option<&NaiveDate>) -> &mut Self {
        self.display(key, value.map(|d| d.format("%Y-%m-%d")))
    }

    /// Repeats `key` once per non-empty value, the way Spring binds lists.
    pub fn repeated(&mut self, key: &'static str, values: &[String]) -> &mut Self {
        for v in values {
            self.text(key, Some(v.as_str()));
        }
        self
    }

    pub fn extend(&mut self, other: QueryParams) -> &mut Self {
        self.0.extend(other.0);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}
