use crate::state::AppState;
use crate::types::report::DailyReport;

pub async fn report_daily(state: &AppState, date: &str) -> Result<DailyReport, String> {
    Ok(state.client.get_daily_report(date).await?)
}

pub async fn report_daily_csv(state: &AppState, date: &str) -> Result<String, String> {
    Ok(state.client.get_daily_report_csv(date).await?)
}
