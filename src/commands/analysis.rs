use crate::state::AppState;
use crate::types::analysis::{AnalysisEntry, AnalysisFilter};

pub async fn analysis_list(
    state: &AppState,
    filter: &AnalysisFilter,
) -> Result<Vec<AnalysisEntry>, String> {
    Ok(state.client.get_analysis(filter).await?)
}

pub async fn analysis_get(state: &AppState, id: &str) -> Result<AnalysisEntry, String> {
    Ok(state.client.get_analysis_by_id(id).await?)
}
