use serde::{Deserialize, Serialize};

use super::alert::Alert;
use super::null_to_default;
use super::query::QueryParams;

/// Spring-style page envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    pub total_pages: Option<u32>,
    pub total_elements: Option<u64>,
    pub size: Option<u32>,
    #[serde(default = "Vec::new", deserialize_with = "null_to_default")]
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: Option<u32>,
    pub number_of_elements: Option<u32>,
    pub first: Option<bool>,
    pub last: Option<bool>,
}

impl<T> Page<T> {
    /// Whether the backend reports another page after this one.
    pub fn has_next(&self) -> bool {
        match (self.last, self.number, self.total_pages) {
            (Some(last), _, _) => !last,
            (None, Some(n), Some(total)) => n + 1 < total,
            _ => false,
        }
    }
}

pub type PagedAlerts = Page<Alert>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    /// `field` or `field,asc|desc`, one entry per sort key.
    pub sort: Vec<String>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.display("page", Some(self.page))
            .display("size", Some(self.size))
            .repeated("sort", &self.sort);
        q
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 20)
    }
}
