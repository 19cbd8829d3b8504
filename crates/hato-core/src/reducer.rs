//! # Reducer
//!
//! The closed mutation protocol for [`HerdState`]: every state transition in
//! the system is a named [`HerdAction`] applied by [`apply`]. Network calls
//! live outside this module; only their resolved results come in as actions.
//!
//! `apply` is synchronous and infallible: a commit is atomic in the sense
//! that no reader can observe a partially-applied action. Actions targeting
//! an id that is not present are no-ops, not errors.

use crate::state::HerdState;
use crate::types::{Animal, AnimalId, EventId, MedicalEvent, Vaccination};
use crate::view::{FilterSet, SortKey, SortOrder};

// =============================================================================
// ACTIONS
// =============================================================================

/// Every state transition the store can perform.
#[derive(Debug, Clone)]
pub enum HerdAction {
    /// Mark an operation as in flight (or finished).
    SetLoading(bool),
    /// Record (or clear) the last operation's failure message.
    SetError(Option<String>),

    /// Replace the animal collection wholesale.
    SetAnimals(Vec<Animal>),
    /// Append a freshly created animal.
    AddAnimal(Animal),
    /// Replace the matching animal by id, including the selection mirror.
    UpdateAnimal(Animal),
    /// Remove the matching animal by id.
    DeleteAnimal(AnimalId),
    /// Set or clear the selected animal.
    SelectAnimal(Option<Animal>),

    /// Replace the medical-event collection wholesale.
    SetMedicalEvents(Vec<MedicalEvent>),
    /// Append a medical event to the canonical collection AND the owning
    /// animal's embedded history, in one commit.
    AddMedicalEvent(MedicalEvent),
    /// Replace a medical event by id in both locations, in one commit.
    UpdateMedicalEvent(MedicalEvent),
    /// Remove a medical event by id from the canonical collection and from
    /// every animal's embedded history (the owner is unknown post-delete).
    DeleteMedicalEvent(EventId),

    /// Replace the vaccination collection wholesale.
    SetVaccinations(Vec<Vaccination>),
    /// Append a vaccination to both locations, in one commit.
    AddVaccination(Vaccination),
    /// Replace a vaccination by id in both locations, in one commit.
    UpdateVaccination(Vaccination),

    /// Overlay a partial filter set (present fields replace, absent keep).
    SetFilters(FilterSet),
    /// Change the sort key and direction together.
    SetSort {
        sort_by: SortKey,
        sort_order: SortOrder,
    },
    /// Set the free-text search term.
    SetSearchTerm(String),
    /// Drop all filters and the search term.
    ClearFilters,
}

// =============================================================================
// TRANSITION FUNCTION
// =============================================================================

/// Apply one action to the state. The single write path for `HerdState`.
pub fn apply(state: &mut HerdState, action: HerdAction) {
    match action {
        HerdAction::SetLoading(loading) => {
            state.is_loading = loading;
        }

        HerdAction::SetError(error) => {
            state.error = error;
            state.is_loading = false;
        }

        HerdAction::SetAnimals(animals) => {
            state.animals = animals;
            state.is_loading = false;
        }

        HerdAction::AddAnimal(animal) => {
            state.animals.push(animal);
            state.is_loading = false;
        }

        HerdAction::UpdateAnimal(updated) => {
            if let Some(existing) = state
                .animals
                .iter_mut()
                .find(|animal| animal.id == updated.id)
            {
                *existing = updated.clone();
            }
            if state
                .selected_animal
                .as_ref()
                .is_some_and(|selected| selected.id == updated.id)
            {
                state.selected_animal = Some(updated);
            }
            state.is_loading = false;
        }

        HerdAction::DeleteAnimal(id) => {
            state.animals.retain(|animal| animal.id != id);
            if state
                .selected_animal
                .as_ref()
                .is_some_and(|selected| selected.id == id)
            {
                state.selected_animal = None;
            }
            state.is_loading = false;
        }

        HerdAction::SelectAnimal(animal) => {
            state.selected_animal = animal;
        }

        HerdAction::SetMedicalEvents(events) => {
            state.medical_events = events;
            state.is_loading = false;
        }

        HerdAction::AddMedicalEvent(event) => {
            if let Some(owner) = state
                .animals
                .iter_mut()
                .find(|animal| animal.id == event.bovine_id)
            {
                owner.medical_history.push(event.clone());
            }
            state.medical_events.push(event);
            state.is_loading = false;
        }

        HerdAction::UpdateMedicalEvent(updated) => {
            if let Some(owner) = state
                .animals
                .iter_mut()
                .find(|animal| animal.id == updated.bovine_id)
            {
                if let Some(mirror) = owner
                    .medical_history
                    .iter_mut()
                    .find(|event| event.id == updated.id)
                {
                    *mirror = updated.clone();
                }
            }
            if let Some(existing) = state
                .medical_events
                .iter_mut()
                .find(|event| event.id == updated.id)
            {
                *existing = updated;
            }
            state.is_loading = false;
        }

        HerdAction::DeleteMedicalEvent(id) => {
            state.medical_events.retain(|event| event.id != id);
            for animal in &mut state.animals {
                animal.medical_history.retain(|event| event.id != id);
            }
            state.is_loading = false;
        }

        HerdAction::SetVaccinations(vaccinations) => {
            state.vaccinations = vaccinations;
            state.is_loading = false;
        }

        HerdAction::AddVaccination(vaccination) => {
            if let Some(owner) = state
                .animals
                .iter_mut()
                .find(|animal| animal.id == vaccination.bovine_id)
            {
                owner.vaccinations.push(vaccination.clone());
            }
            state.vaccinations.push(vaccination);
            state.is_loading = false;
        }

        HerdAction::UpdateVaccination(updated) => {
            if let Some(owner) = state
                .animals
                .iter_mut()
                .find(|animal| animal.id == updated.bovine_id)
            {
                if let Some(mirror) = owner
                    .vaccinations
                    .iter_mut()
                    .find(|vaccination| vaccination.id == updated.id)
                {
                    *mirror = updated.clone();
                }
            }
            if let Some(existing) = state
                .vaccinations
                .iter_mut()
                .find(|vaccination| vaccination.id == updated.id)
            {
                *existing = updated;
            }
            state.is_loading = false;
        }

        HerdAction::SetFilters(update) => {
            state.filters.merge(update);
        }

        HerdAction::SetSort {
            sort_by,
            sort_order,
        } => {
            state.sort_by = sort_by;
            state.sort_order = sort_order;
        }

        HerdAction::SetSearchTerm(term) => {
            state.search_term = term;
        }

        HerdAction::ClearFilters => {
            state.filters = FilterSet::default();
            state.search_term.clear();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
