use std::sync::Arc;
use urlie_service::LinkService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LinkService>,
}

impl AppState {
    pub fn new(service: Arc<LinkService>) -> Self {
        Self { service }
    }
}
