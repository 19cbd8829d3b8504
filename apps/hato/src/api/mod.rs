//! # API Gateway
//!
//! The seam between the herd store and the remote livestock API.
//!
//! [`ApiGateway`] is the trait the store is written against; [`HttpGateway`]
//! is the reqwest-backed production implementation. Tests drive the store
//! through an in-memory implementation of the same trait.

mod http;

pub use http::HttpGateway;

use hato_core::{
    Animal, AnimalId, AnimalPatch, EventId, MedicalEvent, MedicalEventPatch, NewAnimal,
    NewMedicalEvent, NewVaccination, Vaccination, VaccinationId, VaccinationPatch,
};
use thiserror::Error;

// =============================================================================
// ERROR TAXONOMY
// =============================================================================

/// Errors from the gateway layer.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never reached the server.
    #[error("Cannot reach the herd API: {0}")]
    Connection(String),

    /// The server rejected the request with a non-2xx status. `message` is
    /// the server's own wording when the body carried one.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response body could not be decoded into the expected shape.
    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

impl ApiError {
    /// The human-readable message the store records into its error state:
    /// server rejections verbatim, everything else as a generic connection
    /// failure.
    #[must_use]
    pub fn surface_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Connection(_) | Self::Parse(_) => {
                "Connection error: the request could not be completed".to_string()
            }
        }
    }
}

// =============================================================================
// GATEWAY TRAIT
// =============================================================================

/// One typed method per endpoint of the livestock API.
///
/// Implementations perform exactly the described request and no local state
/// changes; committing responses into the herd state is the store's job.
#[allow(async_fn_in_trait)]
pub trait ApiGateway {
    /// GET /animals
    async fn fetch_animals(&self) -> Result<Vec<Animal>, ApiError>;

    /// POST /animals
    async fn create_animal(&self, draft: &NewAnimal) -> Result<Animal, ApiError>;

    /// PUT /animals/{id}
    async fn update_animal(&self, id: &AnimalId, patch: &AnimalPatch) -> Result<Animal, ApiError>;

    /// DELETE /animals/{id}
    async fn delete_animal(&self, id: &AnimalId) -> Result<(), ApiError>;

    /// GET /medical-events, optionally scoped to one animal.
    async fn fetch_medical_events(
        &self,
        animal: Option<&AnimalId>,
    ) -> Result<Vec<MedicalEvent>, ApiError>;

    /// POST /medical-events
    async fn create_medical_event(
        &self,
        draft: &NewMedicalEvent,
    ) -> Result<MedicalEvent, ApiError>;

    /// PUT /medical-events/{id}
    async fn update_medical_event(
        &self,
        id: &EventId,
        patch: &MedicalEventPatch,
    ) -> Result<MedicalEvent, ApiError>;

    /// DELETE /medical-events/{id}
    async fn delete_medical_event(&self, id: &EventId) -> Result<(), ApiError>;

    /// GET /vaccinations, optionally scoped to one animal.
    async fn fetch_vaccinations(
        &self,
        animal: Option<&AnimalId>,
    ) -> Result<Vec<Vaccination>, ApiError>;

    /// POST /vaccinations
    async fn create_vaccination(&self, draft: &NewVaccination) -> Result<Vaccination, ApiError>;

    /// PUT /vaccinations/{id} — the API exposes no vaccination delete.
    async fn update_vaccination(
        &self,
        id: &VaccinationId,
        patch: &VaccinationPatch,
    ) -> Result<Vaccination, ApiError>;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_surface_verbatim() {
        let err = ApiError::Rejected {
            status: 400,
            message: "Tag number already in use".to_string(),
        };
        assert_eq!(err.surface_message(), "Tag number already in use");
    }

    #[test]
    fn transport_failures_surface_generically() {
        let err = ApiError::Connection("dns failure".to_string());
        assert_eq!(
            err.surface_message(),
            "Connection error: the request could not be completed"
        );

        let err = ApiError::Parse("unexpected token".to_string());
        assert_eq!(
            err.surface_message(),
            "Connection error: the request could not be completed"
        );
    }
}
