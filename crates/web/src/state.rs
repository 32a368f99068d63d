use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;
use storage::store::CompetitionStore;

use crate::middleware::auth::ApiKeys;

pub type SharedStore = Arc<dyn CompetitionStore>;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub store: SharedStore,
    pub api_keys: ApiKeys,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for ApiKeys {
    fn from_ref(state: &AppState) -> Self {
        state.api_keys.clone()
    }
}
