//! # Herd Store
//!
//! The asynchronous orchestration layer between the API gateway and the pure
//! reducer. The store owns the one live [`HerdState`] instance; every network
//! result enters the state as a single reducer commit.
//!
//! Contract for every remote operation:
//! - clear the previous error, then raise the loading flag
//! - exactly one network round trip
//! - exactly one atomic data (or error) commit, which lowers the flag
//!
//! Reads swallow failures into `state.error` and return `()`; writes record
//! the failure the same way AND surface it as `Err` so callers can react.
//! Concurrent writers are last-write-wins; there is no conflict detection.

use crate::api::{ApiError, ApiGateway};
use hato_core::{
    Animal, AnimalId, AnimalPatch, EventId, FilterSet, HerdAction, HerdState, MedicalEvent,
    MedicalEventPatch, NewAnimal, NewMedicalEvent, NewVaccination, SortKey, SortOrder,
    Vaccination, VaccinationId, VaccinationPatch, apply, filtered_animals,
};

// =============================================================================
// STORE
// =============================================================================

/// Owns the herd state and drives it through gateway calls and local commits.
#[derive(Debug)]
pub struct HerdStore<G: ApiGateway> {
    state: HerdState,
    gateway: G,
}

impl<G: ApiGateway> HerdStore<G> {
    /// Create a store with an empty state over the given gateway.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            state: HerdState::new(),
            gateway,
        }
    }

    /// The latest committed state.
    #[must_use]
    pub fn state(&self) -> &HerdState {
        &self.state
    }

    /// The filter/search/sort projection of the current animal collection.
    #[must_use]
    pub fn filtered_animals(&self) -> Vec<Animal> {
        filtered_animals(&self.state)
    }

    fn commit(&mut self, action: HerdAction) {
        apply(&mut self.state, action);
    }

    /// Start a remote operation: drop the stale error, raise the flag.
    fn begin(&mut self) {
        self.commit(HerdAction::SetError(None));
        self.commit(HerdAction::SetLoading(true));
    }

    /// Record a failed operation. Lowers the loading flag via `SetError`.
    fn fail(&mut self, operation: &str, err: &ApiError) {
        tracing::warn!(operation, error = %err, "herd operation failed");
        self.commit(HerdAction::SetError(Some(err.surface_message())));
    }

    // =========================================================================
    // LOADS (errors recorded, not returned)
    // =========================================================================

    /// Replace the animal collection from the server.
    pub async fn load_animals(&mut self) {
        self.begin();
        match self.gateway.fetch_animals().await {
            Ok(animals) => self.commit(HerdAction::SetAnimals(animals)),
            Err(err) => self.fail("load_animals", &err),
        }
    }

    /// Replace the medical-event collection, optionally scoped to one animal.
    pub async fn load_medical_events(&mut self, animal: Option<&AnimalId>) {
        self.begin();
        match self.gateway.fetch_medical_events(animal).await {
            Ok(events) => self.commit(HerdAction::SetMedicalEvents(events)),
            Err(err) => self.fail("load_medical_events", &err),
        }
    }

    /// Replace the vaccination collection, optionally scoped to one animal.
    pub async fn load_vaccinations(&mut self, animal: Option<&AnimalId>) {
        self.begin();
        match self.gateway.fetch_vaccinations(animal).await {
            Ok(vaccinations) => self.commit(HerdAction::SetVaccinations(vaccinations)),
            Err(err) => self.fail("load_vaccinations", &err),
        }
    }

    // =========================================================================
    // ANIMAL WRITES
    // =========================================================================

    /// Create an animal on the server and append the returned entity.
    pub async fn create_animal(&mut self, draft: &NewAnimal) -> Result<Animal, ApiError> {
        self.begin();
        match self.gateway.create_animal(draft).await {
            Ok(animal) => {
                self.commit(HerdAction::AddAnimal(animal.clone()));
                Ok(animal)
            }
            Err(err) => {
                self.fail("create_animal", &err);
                Err(err)
            }
        }
    }

    /// Patch an animal on the server and replace the local copy with the
    /// server's authoritative version.
    pub async fn update_animal(
        &mut self,
        id: &AnimalId,
        patch: &AnimalPatch,
    ) -> Result<Animal, ApiError> {
        self.begin();
        match self.gateway.update_animal(id, patch).await {
            Ok(animal) => {
                self.commit(HerdAction::UpdateAnimal(animal.clone()));
                Ok(animal)
            }
            Err(err) => {
                self.fail("update_animal", &err);
                Err(err)
            }
        }
    }

    /// Delete an animal on the server, then locally. Children are not
    /// cascaded; they stay until the next wholesale load.
    pub async fn delete_animal(&mut self, id: &AnimalId) -> Result<(), ApiError> {
        self.begin();
        match self.gateway.delete_animal(id).await {
            Ok(()) => {
                self.commit(HerdAction::DeleteAnimal(id.clone()));
                Ok(())
            }
            Err(err) => {
                self.fail("delete_animal", &err);
                Err(err)
            }
        }
    }

    // =========================================================================
    // MEDICAL-EVENT WRITES
    // =========================================================================

    /// Create a medical event; the commit also appends it to the owning
    /// animal's embedded history.
    pub async fn create_medical_event(
        &mut self,
        draft: &NewMedicalEvent,
    ) -> Result<MedicalEvent, ApiError> {
        self.begin();
        match self.gateway.create_medical_event(draft).await {
            Ok(event) => {
                self.commit(HerdAction::AddMedicalEvent(event.clone()));
                Ok(event)
            }
            Err(err) => {
                self.fail("create_medical_event", &err);
                Err(err)
            }
        }
    }

    /// Patch a medical event; the commit updates both stored locations.
    pub async fn update_medical_event(
        &mut self,
        id: &EventId,
        patch: &MedicalEventPatch,
    ) -> Result<MedicalEvent, ApiError> {
        self.begin();
        match self.gateway.update_medical_event(id, patch).await {
            Ok(event) => {
                self.commit(HerdAction::UpdateMedicalEvent(event.clone()));
                Ok(event)
            }
            Err(err) => {
                self.fail("update_medical_event", &err);
                Err(err)
            }
        }
    }

    /// Delete a medical event from the server and from both stored locations.
    pub async fn delete_medical_event(&mut self, id: &EventId) -> Result<(), ApiError> {
        self.begin();
        match self.gateway.delete_medical_event(id).await {
            Ok(()) => {
                self.commit(HerdAction::DeleteMedicalEvent(id.clone()));
                Ok(())
            }
            Err(err) => {
                self.fail("delete_medical_event", &err);
                Err(err)
            }
        }
    }

    // =========================================================================
    // VACCINATION WRITES (no delete endpoint upstream)
    // =========================================================================

    /// Create a vaccination; the commit also appends it to the owning
    /// animal's embedded record.
    pub async fn create_vaccination(
        &mut self,
        draft: &NewVaccination,
    ) -> Result<Vaccination, ApiError> {
        self.begin();
        match self.gateway.create_vaccination(draft).await {
            Ok(vaccination) => {
                self.commit(HerdAction::AddVaccination(vaccination.clone()));
                Ok(vaccination)
            }
            Err(err) => {
                self.fail("create_vaccination", &err);
                Err(err)
            }
        }
    }

    /// Patch a vaccination; the commit updates both stored locations.
    pub async fn update_vaccination(
        &mut self,
        id: &VaccinationId,
        patch: &VaccinationPatch,
    ) -> Result<Vaccination, ApiError> {
        self.begin();
        match self.gateway.update_vaccination(id, patch).await {
            Ok(vaccination) => {
                self.commit(HerdAction::UpdateVaccination(vaccination.clone()));
                Ok(vaccination)
            }
            Err(err) => {
                self.fail("update_vaccination", &err);
                Err(err)
            }
        }
    }

    // =========================================================================
    // LOCAL OPERATIONS (no network, immediate commit)
    // =========================================================================

    /// Select an animal by id from the loaded collection, or clear with `None`.
    /// Selecting an unknown id clears the selection.
    pub fn select_animal(&mut self, id: Option<&AnimalId>) {
        let selected = id.and_then(|id| self.state.animal_by_id(id).cloned());
        self.commit(HerdAction::SelectAnimal(selected));
    }

    /// Overlay a partial filter set onto the active filters.
    pub fn set_filters(&mut self, filters: FilterSet) {
        self.commit(HerdAction::SetFilters(filters));
    }

    /// Change the sort key and direction together.
    pub fn set_sorting(&mut self, sort_by: SortKey, sort_order: SortOrder) {
        self.commit(HerdAction::SetSort {
            sort_by,
            sort_order,
        });
    }

    /// Set the free-text search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.commit(HerdAction::SetSearchTerm(term.into()));
    }

    /// Drop all filters and the search term.
    pub fn clear_filters(&mut self) {
        self.commit(HerdAction::ClearFilters);
    }
}
