use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tokio::sync::{broadcast, Mutex};

use crate::auth::credentials::{ConfiguredAdmin, CredentialCheck};
use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::store::{PortfolioStore, StoreEvent};
use crate::uploads::UploadStore;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Buffered store events per SSE subscriber before it starts lagging.
const EVENT_BUFFER: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<PortfolioStore>>,
    pub config: Config,
    pub sessions: Arc<Mutex<SessionStore>>,
    pub credentials: Arc<dyn CredentialCheck>,
    pub uploads: Arc<UploadStore>,
    pub events: broadcast::Sender<StoreEvent>,
}

impl AppState {
    /// Wire the store into shared state, using the configured admin account.
    pub fn new(store: PortfolioStore, config: Config) -> Self {
        let credentials = Arc::new(ConfiguredAdmin::new(
            config.auth.admin_email.clone(),
            config.auth.admin_password_hash.clone(),
        ));
        Self::with_credentials(store, config, credentials)
    }

    pub fn with_credentials(
        mut store: PortfolioStore,
        config: Config,
        credentials: Arc<dyn CredentialCheck>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);

        // Forward every store event to SSE listeners. Sending fails only when
        // nobody is listening, which is fine.
        let tx = events.clone();
        store.subscribe(Box::new(move |event| {
            let _ = tx.send(event.clone());
        }));

        Self {
            store: Arc::new(Mutex::new(store)),
            sessions: Arc::new(Mutex::new(SessionStore::new(config.auth.session_hours))),
            credentials,
            uploads: Arc::new(UploadStore::new(
                config.uploads_path(),
                config.storage.max_upload_bytes,
            )),
            events,
            config,
        }
    }
}
