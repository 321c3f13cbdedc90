use std::sync::Arc;

use crate::services::{Personalizer, RecommendationService, TripBackend};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommendations: RecommendationService,
}

impl AppState {
    /// Creates application state around a loaded engine and a backend
    pub fn new(engine: Personalizer, backend: Arc<dyn TripBackend>) -> Self {
        Self {
            recommendations: RecommendationService::new(engine, backend),
        }
    }
}
