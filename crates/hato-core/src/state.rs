//! # Herd State
//!
//! The single authoritative client-side copy of all livestock entities,
//! plus its pure read-only accessors.
//!
//! All mutation of `HerdState` goes through `reducer::apply`; nothing else
//! in the workspace writes to these fields. Reads may happen at any time on
//! the latest committed snapshot.

use crate::types::{Animal, AnimalId, AnimalStatus, MedicalEvent, Vaccination};
use crate::view::{FilterSet, SortKey, SortOrder};
use chrono::{DateTime, Duration, Utc};

// =============================================================================
// STATE CONTAINER
// =============================================================================

/// The full client-side domain state.
///
/// `filters`, `sort_by`/`sort_order`, and `search_term` are view-state: they
/// shape the derived projection and are never sent to the server.
#[derive(Debug, Clone, Default)]
pub struct HerdState {
    /// All loaded animals; replaced wholesale by a load, patched by writes.
    pub animals: Vec<Animal>,
    /// The animal currently selected in the UI, if any.
    pub selected_animal: Option<Animal>,
    /// Canonical top-level collection of medical events.
    pub medical_events: Vec<MedicalEvent>,
    /// Canonical top-level collection of vaccinations.
    pub vaccinations: Vec<Vaccination>,
    /// True while exactly one operation is in flight.
    pub is_loading: bool,
    /// Human-readable message of the last failed operation.
    pub error: Option<String>,
    /// Active equality/substring filters for the derived view.
    pub filters: FilterSet,
    /// Sort key for the derived view.
    pub sort_by: SortKey,
    /// Sort direction for the derived view.
    pub sort_order: SortOrder,
    /// Free-text search term for the derived view.
    pub search_term: String,
}

impl HerdState {
    /// Create an empty state with default view settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Find an animal by id. Unknown ids yield `None`, never an error.
    #[must_use]
    pub fn animal_by_id(&self, id: &AnimalId) -> Option<&Animal> {
        self.animals.iter().find(|animal| &animal.id == id)
    }

    /// All animals currently in the given status.
    #[must_use]
    pub fn animals_by_status(&self, status: AnimalStatus) -> Vec<&Animal> {
        self.animals
            .iter()
            .filter(|animal| animal.status == status)
            .collect()
    }

    // =========================================================================
    // WEAK-REFERENCE RESOLUTION
    // =========================================================================

    /// Resolve an animal's mother, tolerating absent or dangling ids.
    #[must_use]
    pub fn mother_of(&self, animal: &Animal) -> Option<&Animal> {
        self.resolve_parent(animal.mother_id.as_ref())
    }

    /// Resolve an animal's father, tolerating absent or dangling ids.
    #[must_use]
    pub fn father_of(&self, animal: &Animal) -> Option<&Animal> {
        self.resolve_parent(animal.father_id.as_ref())
    }

    fn resolve_parent(&self, id: Option<&AnimalId>) -> Option<&Animal> {
        id.and_then(|id| self.animal_by_id(id))
    }

    // =========================================================================
    // TIME-WINDOW QUERIES
    // =========================================================================

    /// Vaccinations whose `next_due_date` falls at or before `now + days`.
    ///
    /// Records without a due date are excluded; already-overdue dates are
    /// included, matching how reminders are surfaced upstream.
    #[must_use]
    pub fn upcoming_vaccinations(&self, days: i64) -> Vec<&Vaccination> {
        self.upcoming_vaccinations_at(Utc::now(), days)
    }

    /// `upcoming_vaccinations` with an explicit clock, for deterministic tests.
    #[must_use]
    pub fn upcoming_vaccinations_at(&self, now: DateTime<Utc>, days: i64) -> Vec<&Vaccination> {
        let cutoff = now + Duration::days(days);
        self.vaccinations
            .iter()
            .filter(|vaccination| {
                vaccination
                    .next_due_date
                    .is_some_and(|due| due <= cutoff)
            })
            .collect()
    }

    /// Medical events dated within the last `days` days.
    #[must_use]
    pub fn recent_medical_events(&self, days: i64) -> Vec<&MedicalEvent> {
        self.recent_medical_events_at(Utc::now(), days)
    }

    /// `recent_medical_events` with an explicit clock, for deterministic tests.
    #[must_use]
    pub fn recent_medical_events_at(&self, now: DateTime<Utc>, days: i64) -> Vec<&MedicalEvent> {
        let cutoff = now - Duration::days(days);
        self.medical_events
            .iter()
            .filter(|event| event.date >= cutoff)
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
