use std::sync::Arc;

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::credentials::Credentials;
use crate::error::{LoginError, StoreError};
use crate::store::TokenStore;
use crate::types::auth::LoginResponse;

/// Key under which the session token is persisted.
pub const TOKEN_KEY: &str = "jwt";

/// Owns the bearer token across restarts: persists it in a [`TokenStore`]
/// and mirrors it into the [`Credentials`] the API client reads.
///
/// No expiry check or refresh happens here; the backend decides whether a
/// token is still valid.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn TokenStore>,
    credentials: Credentials,
}

impl AuthService {
    pub fn new(store: Arc<dyn TokenStore>, credentials: Credentials) -> Self {
        Self { store, credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Persist and apply `token`, or clear both when it is empty.
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        if token.is_empty() {
            // The header goes even if the store cannot forget the token.
            self.credentials.clear();
            self.store.delete(TOKEN_KEY)?;
            debug!("Session token cleared");
        } else {
            self.store.set(TOKEN_KEY, token)?;
            self.credentials.set(token);
            debug!("Session token stored");
        }
        Ok(())
    }

    pub fn get_token(&self) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Apply a previously stored token. Call once at startup, before any
    /// request is made. Returns whether a session was restored.
    pub fn initialize_from_storage(&self) -> Result<bool, StoreError> {
        match self.get_token()? {
            Some(token) => {
                self.credentials.set(&token);
                info!("Restored session from storage");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Log in through `client` and keep the returned token.
    pub async fn login(
        &self,
        client: &ApiClient,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, LoginError> {
        let response = client.login(username, password).await?;
        if response.token.is_empty() {
            return Err(LoginError::MissingToken);
        }
        self.set_token(&response.token)?;
        info!(username = %response.username, role = %response.role, "Logged in");
        Ok(response)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.set_token("")
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.is_set()
    }
}
