/// HTTP client for the trip backend
///
/// Endpoints, relative to the configured base URL:
/// 1. Catalog: `GET /v1/trips/`
/// 2. Candidates: `POST /v1/trips/recommendations/` with `{"viewed_ids": [...]}`
/// 3. View tracking: `POST /v1/trips/{id}/view/` with `{"viewed_at": ...}`
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client as HttpClient, Response};
use serde::Serialize;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{Trip, TripId},
    services::backend::TripBackend,
};

#[derive(Debug, Serialize)]
struct CandidatePoolRequest<'a> {
    viewed_ids: &'a [TripId],
}

#[derive(Debug, Serialize)]
struct ViewEvent {
    viewed_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct HttpTripBackend {
    http_client: HttpClient,
    api_url: String,
}

impl HttpTripBackend {
    /// Creates a backend client whose requests time out after `timeout`
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Turns non-2xx responses into `ExternalApi` errors
    async fn ensure_success(response: Response, operation: &str) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            operation,
            status = %status,
            body = %body,
            "Trip backend request failed"
        );
        Err(AppError::ExternalApi(format!(
            "Trip backend returned status {} for {}: {}",
            status, operation, body
        )))
    }
}

#[async_trait::async_trait]
impl TripBackend for HttpTripBackend {
    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> AppResult<Vec<Trip>> {
        let response = self.http_client.get(self.url("/v1/trips/")).send().await?;
        let trips: Vec<Trip> = Self::ensure_success(response, "catalog")
            .await?
            .json()
            .await?;

        tracing::info!(trip_count = trips.len(), "Fetched trip catalog");
        Ok(trips)
    }

    #[instrument(skip_all, fields(viewed_count = viewed_ids.len()))]
    async fn fetch_candidate_pool(&self, viewed_ids: Vec<TripId>) -> AppResult<Vec<Trip>> {
        let response = self
            .http_client
            .post(self.url("/v1/trips/recommendations/"))
            .json(&CandidatePoolRequest {
                viewed_ids: &viewed_ids,
            })
            .send()
            .await?;

        let pool: Vec<Trip> = Self::ensure_success(response, "recommendations")
            .await?
            .json()
            .await?;

        tracing::debug!(candidate_count = pool.len(), "Fetched candidate pool");
        Ok(pool)
    }

    #[instrument(skip_all, fields(trip_id = %trip_id))]
    async fn notify_view(&self, trip_id: TripId) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.url(&format!("/v1/trips/{}/view/", trip_id)))
            .json(&ViewEvent {
                viewed_at: Utc::now(),
            })
            .send()
            .await?;

        Self::ensure_success(response, "view").await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
