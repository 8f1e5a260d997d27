use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{ApiError, ApiResult};
use crate::types::alert::{Alert, AlertFilter};
use crate::types::analysis::{AnalysisEntry, AnalysisFilter};
use crate::types::auth::{LoginRequest, LoginResponse};
use crate::types::log::{LogEntry, LogFilter};
use crate::types::page::{Page, PageRequest, PagedAlerts};
use crate::types::query::QueryParams;
use crate::types::report::{DailyReport, ReportFormat};

pub const DEFAULT_BACKEND_BASE: &str = "http://localhost:8080/";

/// Typed access to the LogWatch REST API.
///
/// Every call returns `ApiError` on a non-success status or transport
/// failure. Authenticated calls attach the bearer token held by
/// [`Credentials`] at the time the request is built.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(base_url: &str, credentials: Credentials) -> ApiResult<Self> {
        Self::with_http(base_url, credentials, reqwest::Client::new())
    }

    /// Build a client whose requests time out after `timeout`.
    pub fn with_timeout(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_http(base_url, credentials, http)
    }

    pub fn with_http(
        base_url: &str,
        credentials: Credentials,
        http: reqwest::Client,
    ) -> ApiResult<Self> {
        let base = parse_base_url(base_url)?;
        Ok(Self {
            http,
            base,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // --- auth ---

    /// POST `auth/login`. Never sends an Authorization header.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let url = self.endpoint(&["auth", "login"], None)?;
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        debug!(url = %url, username, "POST login");
        let response = self.send(self.http.post(url).json(&body), false).await?;
        decode(response, "login response").await
    }

    // --- logs ---

    pub async fn get_logs(&self) -> ApiResult<Vec<LogEntry>> {
        self.get_json(self.endpoint(&["api", "logs"], None)?, "log entries")
            .await
    }

    pub async fn get_logs_filtered(&self, filter: &LogFilter) -> ApiResult<Vec<LogEntry>> {
        let url = self.endpoint(&["api", "logs"], Some(filter.to_query()))?;
        self.get_json(url, "log entries").await
    }

    pub async fn get_logs_page(
        &self,
        filter: &LogFilter,
        page: &PageRequest,
    ) -> ApiResult<Page<LogEntry>> {
        let mut query = filter.to_query();
        query.extend(page.to_query());
        let url = self.endpoint(&["api", "logs", "page"], Some(query))?;
        self.get_json(url, "log entry page").await
    }

    pub async fn get_log_by_id(&self, id: &str) -> ApiResult<LogEntry> {
        self.get_json(self.endpoint(&["api", "logs", id], None)?, "log entry")
            .await
    }

    // --- health ---

    /// GET `health`, returning the body verbatim.
    pub async fn get_health(&self) -> ApiResult<String> {
        self.get_text(self.endpoint(&["health"], None)?).await
    }

    // --- alerts ---

    pub async fn get_alerts(&self) -> ApiResult<Vec<Alert>> {
        self.get_json(self.endpoint(&["api", "alerts"], None)?, "alerts")
            .await
    }

    pub async fn get_alerts_filtered(&self, filter: &AlertFilter) -> ApiResult<Vec<Alert>> {
        let url = self.endpoint(&["api", "alerts"], Some(filter.to_query()))?;
        self.get_json(url, "alerts").await
    }

    pub async fn get_alerts_page(
        &self,
        filter: &AlertFilter,
        page: &PageRequest,
    ) -> ApiResult<PagedAlerts> {
        let mut query = filter.to_query();
        query.extend(page.to_query());
        let url = self.endpoint(&["api", "alerts", "page"], Some(query))?;
        self.get_json(url, "alert page").await
    }

    pub async fn get_alert_by_id(&self, id: &str) -> ApiResult<Alert> {
        self.get_json(self.endpoint(&["api", "alerts", id], None)?, "alert")
            .await
    }

    // --- reports ---

    /// GET `api/report/daily` for `date` (`yyyy-MM-dd`). The date is sent
    /// as given; the backend validates it.
    pub async fn get_daily_report(&self, date: &str) -> ApiResult<DailyReport> {
        let url = self.report_url(date, ReportFormat::Json)?;
        self.get_json(url, "daily report").await
    }

    pub async fn get_daily_report_csv(&self, date: &str) -> ApiResult<String> {
        let url = self.report_url(date, ReportFormat::Csv)?;
        self.get_text(url).await
    }

    // --- analysis ---

    pub async fn get_analysis(&self, filter: &AnalysisFilter) -> ApiResult<Vec<AnalysisEntry>> {
        let url = self.endpoint(&["api", "analysis"], Some(filter.to_query()))?;
        self.get_json(url, "analysis entries").await
    }

    pub async fn get_analysis_page(
        &self,
        filter: &AnalysisFilter,
        page: &PageRequest,
    ) -> ApiResult<Page<AnalysisEntry>> {
        let mut query = filter.to_query();
        query.extend(page.to_query());
        let url = self.endpoint(&["api", "analysis", "page"], Some(query))?;
        self.get_json(url, "analysis page").await
    }

    pub async fn get_analysis_by_id(&self, id: &str) -> ApiResult<AnalysisEntry> {
        let url = self.endpoint(&["api", "analysis", id], None)?;
        self.get_json(url, "analysis entry").await
    }

    // --- plumbing ---

    /// Join path segments onto the base URL. Each segment is percent-encoded,
    /// so ids cannot escape their path position.
    pub fn endpoint(&self, segments: &[&str], query: Option<QueryParams>) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(segments);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    fn report_url(&self, date: &str, format: ReportFormat) -> ApiResult<Url> {
        let mut query = QueryParams::new();
        query
            .text("date", Some(date))
            .text("format", Some(format.as_str()));
        self.endpoint(&["api", "report", "daily"], Some(query))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &'static str) -> ApiResult<T> {
        debug!(url = %url, "GET");
        let response = self.send(self.http.get(url), true).await?;
        decode(response, context).await
    }

    async fn get_text(&self, url: Url) -> ApiResult<String> {
        debug!(url = %url, "GET");
        let response = self.send(self.http.get(url), true).await?;
        Ok(response.text().await?)
    }

    async fn send(&self, mut request: RequestBuilder, authorized: bool) -> ApiResult<Response> {
        if authorized {
            if let Some(value) = self.credentials.authorization() {
                request = request.header(AUTHORIZATION, value);
            }
        }
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(%status, "Request rejected by backend");
        Err(ApiError::from_status(status, body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response, context: &'static str) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { context, source })
}

/// Parse a base URL, adding the trailing slash that path joining relies on.
pub fn parse_base_url(base_url: &str) -> ApiResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ApiError::InvalidUrl(format!("'{}': {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("'{}' cannot be a base", base_url)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
