use crate::state::AppState;
use crate::types::log::{LogEntry, LogFilter};
use crate::types::page::{Page, PageRequest};

pub async fn logs_list(state: &AppState) -> Result<Vec<LogEntry>, String> {
    Ok(state.client.get_logs().await?)
}

pub async fn logs_search(state: &AppState, filter: &LogFilter) -> Result<Vec<LogEntry>, String> {
    Ok(state.client.get_logs_filtered(filter).await?)
}

pub async fn logs_page(
    state: &AppState,
    filter: &LogFilter,
    page: &PageRequest,
) -> Result<Page<LogEntry>, String> {
    Ok(state.client.get_logs_page(filter, page).await?)
}

pub async fn logs_get(state: &AppState, id: &str) -> Result<LogEntry, String> {
    Ok(state.client.get_log_by_id(id).await?)
}
