//! # hato-core
//!
//! The client-side domain layer for hato - THE LOGIC.
//!
//! This crate keeps a normalized in-memory model of livestock entities
//! (animals, medical events, vaccinations) and exposes the machinery to
//! mutate and project it:
//!
//! - entity shapes and their wire (de)serialization (`types`)
//! - the authoritative state container and its pure accessors (`state`)
//! - the closed action set and single transition function (`reducer`)
//! - the pure filter/search/sort projection (`view`)
//! - snapshot and export formats (`formats`, `export`)
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no network dependencies; the API gateway and the
//!   asynchronous store live in the app layer
//! - All mutation of `HerdState` goes through `reducer::apply`
//! - Commits are synchronous: no reader ever observes a half-applied action

// =============================================================================
// MODULES
// =============================================================================

pub mod export;
pub mod formats;
pub mod reducer;
pub mod state;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod testutil;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Animal, AnimalId, AnimalKind, AnimalPatch, AnimalStatus, EventId, EventKind, EventStatus,
    Gender, HatoError, Location, MedicalEvent, MedicalEventPatch, Medication, NewAnimal,
    NewMedicalEvent, NewVaccination, Severity, Vaccination, VaccinationId, VaccinationPatch,
    VaccinationStatus,
};

// =============================================================================
// RE-EXPORTS: Store Machinery
// =============================================================================

pub use reducer::{HerdAction, apply};
pub use state::HerdState;
pub use view::{FilterSet, SortKey, SortOrder, filtered_animals};

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use export::{animals_to_csv, animals_to_json};
pub use formats::{HerdSnapshot, snapshot_from_bytes, snapshot_to_bytes};
