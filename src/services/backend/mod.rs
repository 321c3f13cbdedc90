/// Trip backend abstraction
///
/// The engine consumes three backend operations: the full trip catalog, a
/// candidate pool seeded with the visitor's viewed ids, and best-effort view
/// tracking.
use crate::{
    error::AppResult,
    models::{Trip, TripId},
};

pub mod http;

pub use http::HttpTripBackend;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TripBackend: Send + Sync {
    /// Fetch every active trip
    async fn fetch_catalog(&self) -> AppResult<Vec<Trip>>;

    /// Fetch recommendation candidates for a visitor
    ///
    /// The server may use `viewed_ids` to exclude or bias the pool. Any list,
    /// including an empty one, is a valid answer.
    async fn fetch_candidate_pool(&self, viewed_ids: Vec<TripId>) -> AppResult<Vec<Trip>>;

    /// Record that the visitor opened a trip
    async fn notify_view(&self, trip_id: TripId) -> AppResult<()>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
