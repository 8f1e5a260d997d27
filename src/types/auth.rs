use serde::{Deserialize, Serialize};

use super::null_to_default;

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Null or missing fields parse as empty strings. An empty `token` is
/// rejected by the auth layer, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "null_to_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub token: String,
    #[serde(rename = "type", default, deserialize_with = "null_to_default")]
    pub token_type: String,
}
