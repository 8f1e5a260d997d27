use std::sync::{Arc, RwLock};

/// Bearer token shared between the auth service and the API client.
///
/// The client reads the token exactly once while building each request.
/// A `set` that has returned is therefore visible to every request built
/// afterwards; a request that was already built keeps the header it captured.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    token: Arc<RwLock<Option<String>>>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: &str) {
        let value = if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        };
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = value;
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_set(&self) -> bool {
        self.token.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Value for the `Authorization` header, if a token is present.
    pub fn authorization(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }
}
