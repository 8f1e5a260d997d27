use crate::state::AppState;
use crate::types::alert::{Alert, AlertFilter};
use crate::types::page::{PageRequest, PagedAlerts};

pub async fn alerts_list(state: &AppState) -> Result<Vec<Alert>, String> {
    Ok(state.client.get_alerts().await?)
}

pub async fn alerts_search(state: &AppState, filter: &AlertFilter) -> Result<Vec<Alert>, String> {
    Ok(state.client.get_alerts_filtered(filter).await?)
}

pub async fn alerts_page(
    state: &AppState,
    filter: &AlertFilter,
    page: &PageRequest,
) -> Result<PagedAlerts, String> {
    Ok(state.client.get_alerts_page(filter, page).await?)
}

pub async fn alerts_get(state: &AppState, id: &str) -> Result<Alert, String> {
    Ok(state.client.get_alert_by_id(id).await?)
}
