//! Reqwest-backed gateway for the livestock HTTP API.
//!
//! Thin transport layer: builds requests against the configured base URL,
//! attaches the Bearer token when one is configured, and triages responses
//! into the [`ApiError`] taxonomy. No domain state lives here.

use super::{ApiError, ApiGateway};
use hato_core::{
    Animal, AnimalId, AnimalPatch, EventId, MedicalEvent, MedicalEventPatch, NewAnimal,
    NewMedicalEvent, NewVaccination, Vaccination, VaccinationId, VaccinationPatch,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

// =============================================================================
// GATEWAY
// =============================================================================

/// HTTP client for the livestock API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    /// Create a gateway against `base_url` (e.g. `http://localhost:3001/api`).
    /// A trailing slash on the base URL is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "api request");
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        builder
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))
    }

    /// Pass 2xx responses through; turn everything else into
    /// [`ApiError::Rejected`], preferring the server's own `message` field.
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let status = status.as_u16();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        Err(ApiError::Rejected { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = Self::send(self.request(Method::GET, path).query(query)).await?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = Self::send(self.request(Method::POST, path).json(body)).await?;
        Self::decode(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = Self::send(self.request(Method::PUT, path).json(body)).await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = Self::send(self.request(Method::DELETE, path)).await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

// =============================================================================
// GATEWAY TRAIT IMPLEMENTATION
// =============================================================================

impl ApiGateway for HttpGateway {
    async fn fetch_animals(&self) -> Result<Vec<Animal>, ApiError> {
        self.get("/animals", &[]).await
    }

    async fn create_animal(&self, draft: &NewAnimal) -> Result<Animal, ApiError> {
        self.post("/animals", draft).await
    }

    async fn update_animal(&self, id: &AnimalId, patch: &AnimalPatch) -> Result<Animal, ApiError> {
        self.put(&format!("/animals/{}", id.as_str()), patch).await
    }

    async fn delete_animal(&self, id: &AnimalId) -> Result<(), ApiError> {
        self.delete(&format!("/animals/{}", id.as_str())).await
    }

    async fn fetch_medical_events(
        &self,
        animal: Option<&AnimalId>,
    ) -> Result<Vec<MedicalEvent>, ApiError> {
        match animal {
            Some(id) => {
                self.get("/medical-events", &[("bovineId", id.as_str())])
                    .await
            }
            None => self.get("/medical-events", &[]).await,
        }
    }

    async fn create_medical_event(
        &self,
        draft: &NewMedicalEvent,
    ) -> Result<MedicalEvent, ApiError> {
        self.post("/medical-events", draft).await
    }

    async fn update_medical_event(
        &self,
        id: &EventId,
        patch: &MedicalEventPatch,
    ) -> Result<MedicalEvent, ApiError> {
        self.put(&format!("/medical-events/{}", id.as_str()), patch)
            .await
    }

    async fn delete_medical_event(&self, id: &EventId) -> Result<(), ApiError> {
        self.delete(&format!("/medical-events/{}", id.as_str()))
            .await
    }

    async fn fetch_vaccinations(
        &self,
        animal: Option<&AnimalId>,
    ) -> Result<Vec<Vaccination>, ApiError> {
        match animal {
            Some(id) => {
                self.get("/vaccinations", &[("bovineId", id.as_str())])
                    .await
            }
            None => self.get("/vaccinations", &[]).await,
        }
    }

    async fn create_vaccination(&self, draft: &NewVaccination) -> Result<Vaccination, ApiError> {
        self.post("/vaccinations", draft).await
    }

    async fn update_vaccination(
        &self,
        id: &VaccinationId,
        patch: &VaccinationPatch,
    ) -> Result<Vaccination, ApiError> {
        self.put(&format!("/vaccinations/{}", id.as_str()), patch)
            .await
    }
}

// =============================================================================
// TESTS
// =============================================================================
