//! HTTP client for the incident API.
//!
//! [`IncidentApi`] is the seam the dashboard drives; [`HttpIncidentClient`]
//! implements it over [`reqwest`].

use async_trait::async_trait;
use mandlacx_core::types::DbId;

use crate::error::ClientError;
use crate::types::{Camera, GeneratedBatch, Incident, IncidentWithCamera};

/// Operations the dashboard needs from the backend.
#[async_trait]
pub trait IncidentApi: Send + Sync {
    /// `GET /cameras`
    async fn list_cameras(&self) -> Result<Vec<Camera>, ClientError>;

    /// `GET /incidents`: unresolved, newest first.
    async fn list_incidents(&self) -> Result<Vec<IncidentWithCamera>, ClientError>;

    /// `PATCH /incidents/{id}/resolve`
    async fn resolve_incident(&self, id: DbId) -> Result<Incident, ClientError>;

    /// `POST /incidents/add`. `None` lets the server pick its default count.
    async fn generate_incidents(&self, count: Option<usize>)
        -> Result<GeneratedBatch, ClientError>;
}

/// [`IncidentApi`] over HTTP.
pub struct HttpIncidentClient {
    client: reqwest::Client,
    api_url: String,
}

impl HttpIncidentClient {
    /// * `api_url` - Base URL including the `/api` prefix, e.g.
    ///   `http://localhost:3000/api`.
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    // ---- private helpers ----

    /// Return the response unchanged on a success status, or an
    /// [`ClientError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl IncidentApi for HttpIncidentClient {
    async fn list_cameras(&self) -> Result<Vec<Camera>, ClientError> {
        let response = self
            .client
            .get(format!("{}/cameras", self.api_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn list_incidents(&self) -> Result<Vec<IncidentWithCamera>, ClientError> {
        let response = self
            .client
            .get(format!("{}/incidents", self.api_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn resolve_incident(&self, id: DbId) -> Result<Incident, ClientError> {
        let response = self
            .client
            .patch(format!("{}/incidents/{}/resolve", self.api_url, id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn generate_incidents(
        &self,
        count: Option<usize>,
    ) -> Result<GeneratedBatch, ClientError> {
        let mut request = self.client.post(format!("{}/incidents/add", self.api_url));
        if let Some(count) = count {
            request = request.query(&[("count", count)]);
        }
        let response = request.send().await?;

        Self::parse_response(response).await
    }
}
