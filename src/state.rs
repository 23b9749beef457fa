use crate::store::ClientStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ClientStore>,
    pub access_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: ClientStore, access_token: Option<String>) -> Self {
        Self {
            store: Arc::new(store),
            access_token: access_token.map(Arc::from),
        }
    }
}
