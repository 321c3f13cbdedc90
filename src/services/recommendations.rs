use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    models::{InterestSelection, ScoredTrip, Trip, TripId},
    services::{backend::TripBackend, personalizer::Personalizer},
};

/// Everything the presentation layer renders for one visitor
#[derive(Debug, Clone, Serialize)]
pub struct PersonalizationSnapshot {
    pub interests: InterestSelection,
    pub viewed_ids: Vec<TripId>,
    pub recommended: Vec<ScoredTrip>,
    pub loading: bool,
    pub recently_viewed: Vec<Trip>,
    pub has_personalization: bool,
}

/// Drives a [`Personalizer`] against the trip backend
///
/// Backend calls never run while the engine lock is held.
#[derive(Clone)]
pub struct RecommendationService {
    engine: Arc<Mutex<Personalizer>>,
    backend: Arc<dyn TripBackend>,
}

impl RecommendationService {
    pub fn new(engine: Personalizer, backend: Arc<dyn TripBackend>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            backend,
        }
    }

    /// Supplies the trip catalog, running the cold-start fetch if this is
    /// the first non-empty catalog
    pub async fn load_catalog(&self, catalog: Vec<Trip>) {
        let request = self.engine.lock().await.set_catalog(catalog);
        let Some(request) = request else {
            return;
        };

        tracing::info!(backend = self.backend.name(), "Fetching recommendation candidates");
        let outcome = self
            .backend
            .fetch_candidate_pool(request.viewed_ids.clone())
            .await;

        self.engine.lock().await.complete_cold_start(request, outcome);
    }

    /// Reloads the catalog from the backend
    ///
    /// A failed fetch keeps the current catalog.
    pub async fn refresh_catalog(&self) {
        match self.backend.fetch_catalog().await {
            Ok(catalog) => self.load_catalog(catalog).await,
            Err(e) => {
                tracing::warn!(error = %e, "Catalog fetch failed, keeping current catalog");
            }
        }
    }

    pub async fn set_interests(&self, interests: InterestSelection) {
        self.engine.lock().await.set_interests(interests).await;
    }

    /// Records a view locally and notifies the backend in the background
    ///
    /// The notification is detached: its outcome and ordering relative to
    /// other notifications are never observed.
    pub async fn record_view(&self, trip_id: TripId) {
        self.engine.lock().await.record_view(trip_id).await;

        let backend = self.backend.clone();
        tokio::spawn(async move {
            if let Err(e) = backend.notify_view(trip_id).await {
                tracing::debug!(error = %e, trip_id = %trip_id, "View notification dropped");
            }
        });
    }

    pub async fn snapshot(&self) -> PersonalizationSnapshot {
        let engine = self.engine.lock().await;
        PersonalizationSnapshot {
            interests: engine.interests().clone(),
            viewed_ids: engine.viewed_ids().to_vec(),
            recommended: engine.recommended().to_vec(),
            loading: engine.is_loading(),
            recently_viewed: engine.recently_viewed().into_iter().cloned().collect(),
            has_personalization: engine.has_personalization(),
        }
    }
}
