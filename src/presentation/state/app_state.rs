use std::sync::Arc;

use crate::application::services::ConversionService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub conversion_service: Arc<ConversionService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(conversion_service: Arc<ConversionService>, settings: Settings) -> Self {
        Self {
            conversion_service,
            settings: Arc::new(settings),
        }
    }
}
