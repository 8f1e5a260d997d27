pub mod alerts;
pub mod analysis;
pub mod auth;
pub mod logs;
pub mod report;

use serde::Serialize;

use crate::state::AppState;
use crate::types::alert::AlertFilter;
use crate::types::analysis::AnalysisFilter;
use crate::types::log::LogFilter;
use crate::types::page::PageRequest;

pub const USAGE: &str = "usage: logwatch <command>

commands:
  login <user> <password>      log in and remember the session
  logout                       forget the stored session
  token                        show whether a session is stored
  health                       backend health check
  logs [<id>]                  list log entries, or fetch one
  logs key=value ...           list log entries matching the filters
  logs-page <page> <size>      one page of log entries
  alerts [<id>]                list alerts, or fetch one
  alerts key=value ...         list alerts matching the filters
  alerts-page <page> <size>    one page of alerts
  report <yyyy-MM-dd> [csv]    daily report as JSON (default) or CSV
  analysis [key=value ...]     list analyses, filtered by wire field names
  analysis-get <id>            fetch one analysis entry";

/// Result of a command, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Json(serde_json::Value),
    Text(String),
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| std::fmt::Error)?;
                f.write_str(&pretty)
            }
            Output::Text(text) => f.write_str(text),
        }
    }
}

fn json<T: Serialize>(value: T) -> Result<Output, String> {
    serde_json::to_value(value)
        .map(Output::Json)
        .map_err(|e| e.to_string())
}

fn parse_page(page: &str, size: &str) -> Result<PageRequest, String> {
    let page = page
        .parse()
        .map_err(|_| format!("Invalid page number: '{}'", page))?;
    let size = size
        .parse()
        .map_err(|_| format!("Invalid page size: '{}'", size))?;
    Ok(PageRequest::new(page, size))
}

pub async fn health_check(state: &AppState) -> Result<String, String> {
    Ok(state.client.get_health().await?)
}

/// Run one command line (without the program name) against `state`.
pub async fn dispatch(state: &AppState, args: &[String]) -> Result<Output, String> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["login", user, password] => json(auth::auth_login(state, user, password).await?),
        ["logout"] => json(auth::auth_logout(state)?),
        ["token"] => json(auth::auth_status(state)?),
        ["health"] => Ok(Output::Text(health_check(state).await?)),
        ["logs"] => json(logs::logs_list(state).await?),
        ["logs", id] if !id.contains('=') => json(logs::logs_get(state, id).await?),
        ["logs", filters @ ..] => {
            let filter = LogFilter::from_pairs(filters.iter().copied())?;
            json(logs::logs_search(state, &filter).await?)
        }
        ["logs-page", page, size] => {
            let page = parse_page(page, size)?;
            json(logs::logs_page(state, &LogFilter::default(), &page).await?)
        }
        ["alerts"] => json(alerts::alerts_list(state).await?),
        ["alerts", id] if !id.contains('=') => json(alerts::alerts_get(state, id).await?),
        ["alerts", filters @ ..] => {
            let filter = AlertFilter::from_pairs(filters.iter().copied())?;
            json(alerts::alerts_search(state, &filter).await?)
        }
        ["alerts-page", page, size] => {
            let page = parse_page(page, size)?;
            json(alerts::alerts_page(state, &AlertFilter::default(), &page).await?)
        }
        ["report", date] => json(report::report_daily(state, date).await?),
        ["report", date, "csv"] => Ok(Output::Text(report::report_daily_csv(state, date).await?)),
        ["report", date, "json"] => json(report::report_daily(state, date).await?),
        ["analysis", filters @ ..] => {
            let filter = AnalysisFilter::from_pairs(filters.iter().copied())?;
            json(analysis::analysis_list(state, &filter).await?)
        }
        ["analysis-get", id] => json(analysis::analysis_get(state, id).await?),
        [] => Err(USAGE.to_string()),
        [command, ..] => Err(format!("Unknown command or arguments: '{}'\n\n{}", command, USAGE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::credentials::Credentials;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn test_state() -> AppState {
        // Port 9 (discard) so an accidental network call fails fast.
        let client = ApiClient::new("http://127.0.0.1:9/", Credentials::new()).unwrap();
        AppState::new(client, Arc::new(MemoryStore::new()))
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_page_validates_numbers() {
        assert_eq!(parse_page("2", "10").unwrap(), PageRequest::new(2, 10));
        assert!(parse_page("x", "10").is_err());
        assert!(parse_page("1", "-5").is_err());
    }

    #[test]
    fn output_display() {
        assert_eq!(Output::Text("OK".to_string()).to_string(), "OK");
        let out = Output::Json(serde_json::json!({"a": 1}));
        assert!(out.to_string().contains("\"a\": 1"));
    }

    #[tokio::test]
    async fn empty_args_print_usage() {
        let err = dispatch(&test_state(), &[]).await.unwrap_err();
        assert!(err.starts_with("usage:"));
    }

    #[tokio::test]
    async fn unknown_command_rejected() {
        let err = dispatch(&test_state(), &args(&["frobnicate"])).await.unwrap_err();
        assert!(err.contains("frobnicate"));
    }

    #[tokio::test]
    async fn bad_analysis_filter_rejected_before_request() {
        let err = dispatch(&test_state(), &args(&["analysis", "severity=urgent"]))
            .await
            .unwrap_err();
        assert!(err.contains("Invalid severity"));
    }

    #[tokio::test]
    async fn token_and_logout_work_offline() {
        let state = test_state();
        state.auth.set_token("abcdefgh").unwrap();
        let out = dispatch(&state, &args(&["token"])).await.unwrap();
        assert_eq!(out, Output::Json(serde_json::json!({"loggedIn": true, "tokenHint": "abcdef…"})));
        dispatch(&state, &args(&["logout"])).await.unwrap();
        assert!(!state.auth.is_logged_in());
    }
}
