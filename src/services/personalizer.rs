/// Per-visitor personalization state.
///
/// [`Personalizer`] owns the visitor's interests, viewed history, the trip
/// catalog, and the published recommendation list. It performs no network
/// I/O itself: the cold-start fetch is split into [`Personalizer::set_catalog`],
/// which hands out a [`ColdStartRequest`], and
/// [`Personalizer::complete_cold_start`], which applies whatever the backend
/// answered. Callers await the backend in between, without holding the engine.
use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{InterestSelection, ScoredTrip, Trip, TripId, ViewedHistory},
    services::scoring::{self, RECOMMENDATION_LIMIT},
    store::PreferenceStore,
};

/// Maximum number of entries in the recently viewed projection
pub const RECENTLY_VIEWED_LIMIT: usize = 6;

/// Lifecycle of the one-shot cold-start fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColdStart {
    NotStarted,
    InFlight,
    Done,
}

/// Everything the caller needs to run the cold-start backend fetch
#[derive(Debug, Clone, PartialEq)]
pub struct ColdStartRequest {
    /// Viewed ids to send to the backend, oldest first
    pub viewed_ids: Vec<TripId>,
    /// Average price of the recently viewed projection when the fetch began
    pub average_viewed_price: f64,
    generation: u64,
}

pub struct Personalizer {
    store: PreferenceStore,
    interests: InterestSelection,
    history: ViewedHistory,
    catalog: Vec<Trip>,
    recommended: Vec<ScoredTrip>,
    cold_start: ColdStart,
    loading: bool,
    /// Bumped on every interest-driven recompute; stale cold-start results
    /// carry an older value and are discarded
    generation: u64,
}

impl Personalizer {
    /// Restores interests and viewed history from the persisted slots
    pub async fn load(store: PreferenceStore) -> Self {
        let interests = store.load_interests().await;
        let history = store.load_viewed_history().await;

        tracing::info!(
            interest_count = interests.len(),
            viewed_count = history.len(),
            "Restored personalization state"
        );

        Self {
            store,
            interests,
            history,
            catalog: Vec::new(),
            recommended: Vec::new(),
            cold_start: ColdStart::NotStarted,
            loading: false,
            generation: 0,
        }
    }

    /// Replaces the trip catalog
    ///
    /// Returns a cold-start request the first time the catalog goes from
    /// empty to non-empty. Later calls only swap the catalog.
    pub fn set_catalog(&mut self, catalog: Vec<Trip>) -> Option<ColdStartRequest> {
        let became_available = self.catalog.is_empty() && !catalog.is_empty();
        self.catalog = catalog;

        if !became_available || self.cold_start != ColdStart::NotStarted {
            return None;
        }

        self.cold_start = ColdStart::InFlight;
        self.loading = true;

        let request = ColdStartRequest {
            viewed_ids: self.history.ids().to_vec(),
            average_viewed_price: scoring::average_price(self.recently_viewed()),
            generation: self.generation,
        };
        tracing::debug!(
            viewed_count = request.viewed_ids.len(),
            catalog_size = self.catalog.len(),
            "Cold start fetch issued"
        );
        Some(request)
    }

    /// Applies the outcome of a cold-start fetch
    ///
    /// A backend failure falls back to ranking the local catalog. A result
    /// that arrives after an interest change has already republished the
    /// list is dropped.
    pub fn complete_cold_start(
        &mut self,
        request: ColdStartRequest,
        outcome: AppResult<Vec<Trip>>,
    ) {
        if self.cold_start != ColdStart::InFlight {
            tracing::debug!("Ignoring cold start result with no fetch in flight");
            return;
        }
        self.cold_start = ColdStart::Done;
        self.loading = false;

        if request.generation != self.generation {
            tracing::debug!(
                issued_at = request.generation,
                current = self.generation,
                "Discarding stale cold start result"
            );
            return;
        }

        self.recommended = match outcome {
            Ok(pool) => {
                tracing::info!(candidate_count = pool.len(), "Ranking server candidates");
                scoring::rank(
                    &pool,
                    &self.interests,
                    request.average_viewed_price,
                    &self.history,
                    RECOMMENDATION_LIMIT,
                )
            }
            Err(e) => {
                tracing::warn!(error = %e, "Candidate fetch failed, ranking local catalog");
                self.rank_local()
            }
        };
    }

    /// Persists a new interest selection and reranks the local catalog
    pub async fn set_interests(&mut self, interests: InterestSelection) {
        self.interests = interests;
        self.store.save_interests(&self.interests).await;

        if self.catalog.is_empty() {
            return;
        }

        self.generation += 1;
        self.recommended = self.rank_local();
        tracing::debug!(
            interest_count = self.interests.len(),
            recommended = self.recommended.len(),
            "Recomputed recommendations"
        );
    }

    /// Records a trip view and drops the trip from the recommendation list
    pub async fn record_view(&mut self, trip_id: TripId) {
        self.history.record(trip_id);
        self.store.save_viewed_history(&self.history).await;
        self.recommended.retain(|scored| scored.id() != trip_id);
    }

    /// Client-side ranking of the full catalog
    fn rank_local(&self) -> Vec<ScoredTrip> {
        let by_id = self.catalog_index();
        let viewed_trips = self
            .history
            .most_recent_first()
            .filter_map(|id| by_id.get(&id).copied());

        scoring::rank(
            &self.catalog,
            &self.interests,
            scoring::average_price(viewed_trips),
            &self.history,
            RECOMMENDATION_LIMIT,
        )
    }

    fn catalog_index(&self) -> HashMap<TripId, &Trip> {
        self.catalog.iter().map(|trip| (trip.id, trip)).collect()
    }

    /// Viewed trips resolved against the catalog, most recent first
    ///
    /// Ids that no longer resolve are skipped.
    pub fn recently_viewed(&self) -> Vec<&Trip> {
        let by_id = self.catalog_index();
        self.history
            .most_recent_first()
            .filter_map(|id| by_id.get(&id).copied())
            .take(RECENTLY_VIEWED_LIMIT)
            .collect()
    }

    pub fn interests(&self) -> &InterestSelection {
        &self.interests
    }

    pub fn viewed_ids(&self) -> &[TripId] {
        self.history.ids()
    }

    pub fn recommended(&self) -> &[ScoredTrip] {
        &self.recommended
    }

    pub fn catalog(&self) -> &[Trip] {
        &self.catalog
    }

    /// True while the cold-start fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cold_start(&self) -> ColdStart {
        self.cold_start
    }

    pub fn has_personalization(&self) -> bool {
        !self.interests.is_empty() || !self.history.is_empty()
    }
}
