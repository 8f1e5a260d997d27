use std::sync::Arc;

use crate::auth::AuthService;
use crate::client::ApiClient;
use crate::config::{AppConfig, TokenStoreKind};
use crate::credentials::Credentials;
use crate::error::StoreError;
use crate::store::{KeychainStore, LayeredStore, MemoryStore, SqliteStore, TokenStore};

/// Everything a command needs: the API client and the auth service, wired
/// to the same [`Credentials`].
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        let auth = AuthService::new(store, client.credentials().clone());
        Self { client, auth }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let credentials = Credentials::new();
        let client = match config.http_timeout {
            Some(timeout) => ApiClient::with_timeout(&config.backend_base, credentials, timeout)?,
            None => ApiClient::new(&config.backend_base, credentials)?,
        };
        let store = open_store(config)?;
        Ok(Self::new(client, store))
    }
}

pub fn open_store(config: &AppConfig) -> Result<Arc<dyn TokenStore>, StoreError> {
    let store: Arc<dyn TokenStore> = match config.token_store {
        TokenStoreKind::Keychain => Arc::new(KeychainStore::new()),
        TokenStoreKind::Sqlite => Arc::new(SqliteStore::open(&config.db_path())?),
        TokenStoreKind::Layered => Arc::new(LayeredStore::new(
            KeychainStore::new(),
            SqliteStore::open(&config.db_path())?,
        )),
        TokenStoreKind::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
