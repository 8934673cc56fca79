use std::sync::Arc;

use crate::service::Service;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Service>,
}

impl AppState {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}
