pub mod backend;
pub mod personalizer;
pub mod recommendations;
pub mod scoring;

pub use backend::{HttpTripBackend, TripBackend};
pub use personalizer::{ColdStart, ColdStartRequest, Personalizer};
pub use recommendations::{PersonalizationSnapshot, RecommendationService};
