pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rest;
pub mod session;
pub mod store;

use std::sync::Arc;

use session::SessionIssuer;
use store::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub issuer: Arc<SessionIssuer>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, issuer: SessionIssuer) -> Self {
        Self {
            store,
            issuer: Arc::new(issuer),
        }
    }
}
