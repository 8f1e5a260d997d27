use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::types::auth::LoginResponse;

/// Session status safe to print: never contains the full token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionMasked {
    pub logged_in: bool,
    pub token_hint: Option<String>,
}

pub async fn auth_login(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<SessionMasked, String> {
    let response: LoginResponse = state.auth.login(&state.client, username, password).await?;
    Ok(SessionMasked {
        logged_in: true,
        token_hint: Some(mask(&response.token)),
    })
}

pub fn auth_logout(state: &AppState) -> Result<SessionMasked, String> {
    state.auth.logout()?;
    Ok(SessionMasked {
        logged_in: false,
        token_hint: None,
    })
}

pub fn auth_status(state: &AppState) -> Result<SessionMasked, String> {
    let token = state.auth.get_token()?;
    Ok(SessionMasked {
        logged_in: token.is_some(),
        token_hint: token.as_deref().map(mask),
    })
}

fn mask(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    format!("{}…", prefix)
}
