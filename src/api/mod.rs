pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::{config::Config, links::Links, state::ActivityStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ActivityStore>,
    pub config: Arc<Config>,
    pub links: Links,
}

impl AppState {
    pub fn new(store: Arc<dyn ActivityStore>, config: Config) -> Self {
        let links = Links::new(config.server.public_url.clone());
        Self {
            store,
            config: Arc::new(config),
            links,
        }
    }
}
