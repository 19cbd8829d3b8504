//! # Core Type Definitions
//!
//! This module contains all domain types for the hato client:
//! - Entity identifiers (`AnimalId`, `EventId`, `VaccinationId`)
//! - Root entity (`Animal`) and child records (`MedicalEvent`, `Vaccination`)
//! - Draft shapes for creation (`NewAnimal`, `NewMedicalEvent`, `NewVaccination`)
//! - Patch shapes for partial updates (`AnimalPatch`, ...)
//! - Error types (`HatoError`)
//!
//! ## Wire Compatibility
//!
//! All entity shapes serialize with camelCase field names to match the
//! upstream REST API. Embedded child collections deserialize with a default
//! so older server payloads without them still parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ENTITY IDENTIFIERS
// =============================================================================

/// Server-assigned identifier of an `Animal`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(pub String);

/// Server-assigned identifier of a `MedicalEvent`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

/// Server-assigned identifier of a `Vaccination`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaccinationId(pub String);

macro_rules! string_id {
    ($id:ident) => {
        impl $id {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $id {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(AnimalId);
string_id!(EventId);
string_id!(VaccinationId);

// =============================================================================
// CLASSIFICATION ENUMS
// =============================================================================

/// Classification of an animal within the herd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Cow,
    Bull,
    Calf,
}

impl AnimalKind {
    /// Wire name of this kind, as sent by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cow => "cow",
            Self::Bull => "bull",
            Self::Calf => "calf",
        }
    }
}

/// Biological sex of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Wire name of this gender.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Mutually exclusive health/lifecycle status of an animal.
///
/// Drives status filtering in the view derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalStatus {
    Healthy,
    Sick,
    Quarantine,
    Pregnant,
    Deceased,
    Sold,
}

impl AnimalStatus {
    /// Wire name of this status. Sorting by status compares these strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Sick => "sick",
            Self::Quarantine => "quarantine",
            Self::Pregnant => "pregnant",
            Self::Deceased => "deceased",
            Self::Sold => "sold",
        }
    }
}

/// Category of a medical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Vaccination,
    Illness,
    Treatment,
    Checkup,
    Injury,
    Birth,
    Death,
}

impl EventKind {
    /// Wire name of this event kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vaccination => "vaccination",
            Self::Illness => "illness",
            Self::Treatment => "treatment",
            Self::Checkup => "checkup",
            Self::Injury => "injury",
            Self::Birth => "birth",
            Self::Death => "death",
        }
    }
}

/// Workflow status of a medical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl EventStatus {
    /// Wire name of this event status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Clinical severity attached to some medical events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Wire name of this severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Lifecycle status of a vaccination record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaccinationStatus {
    Administered,
    Due,
    Overdue,
    Scheduled,
}

impl VaccinationStatus {
    /// Wire name of this vaccination status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administered => "administered",
            Self::Due => "due",
            Self::Overdue => "overdue",
            Self::Scheduled => "scheduled",
        }
    }
}

// String parsing for CLI flags. Parsing accepts the wire names only.
macro_rules! parse_wire_enum {
    ($ty:ident, [$($variant:ident),+]) => {
        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(v if v == Self::$variant.as_str() => Ok(Self::$variant),)+
                    other => Err(format!(
                        "unknown {}: '{}' (expected one of: {})",
                        stringify!($ty),
                        other,
                        [$(Self::$variant.as_str()),+].join(", ")
                    )),
                }
            }
        }
    };
}

parse_wire_enum!(AnimalKind, [Cow, Bull, Calf]);
parse_wire_enum!(Gender, [Male, Female]);
parse_wire_enum!(
    AnimalStatus,
    [Healthy, Sick, Quarantine, Pregnant, Deceased, Sold]
);

// =============================================================================
// LOCATION
// =============================================================================

/// Geographic position of an animal or event, with optional descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub farm: Option<String>,
}

impl Location {
    /// Create a bare coordinate pair with no descriptive fields.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: None,
            zone: None,
            farm: None,
        }
    }
}

// =============================================================================
// MEDICATION
// =============================================================================

/// A medication administered as part of a medical event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub administered_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// MEDICAL EVENT
// =============================================================================

/// A medical event owned by exactly one animal via `bovine_id`.
///
/// The store owns the canonical record in its top-level collection; the
/// owning animal's embedded `medical_history` holds a mirror that the
/// reducer keeps consistent within each commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalEvent {
    pub id: EventId,
    pub bovine_id: AnimalId,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: Location,
    #[serde(default)]
    pub veterinarian_id: Option<String>,
    #[serde(default)]
    pub veterinarian_name: Option<String>,
    #[serde(default)]
    pub medications: Option<Vec<Medication>>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub next_appointment: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    pub status: EventStatus,
}

// =============================================================================
// VACCINATION
// =============================================================================

/// A vaccination record owned by exactly one animal via `bovine_id`.
///
/// `next_due_date` drives the "upcoming vaccinations" query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccination {
    pub id: VaccinationId,
    pub bovine_id: AnimalId,
    pub vaccine_name: String,
    pub vaccine_type: String,
    pub date_administered: DateTime<Utc>,
    #[serde(default)]
    pub next_due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub batch_number: Option<String>,
    pub veterinarian_id: String,
    pub veterinarian_name: String,
    pub location: Location,
    #[serde(default)]
    pub side_effects: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: VaccinationStatus,
}

// =============================================================================
// ANIMAL (ROOT ENTITY)
// =============================================================================

/// The root livestock entity tracked by the system.
///
/// `mother_id`/`father_id` are weak references: they may be absent, and a
/// present id may not resolve to a loaded animal. Resolution is a tolerant
/// read (`HerdState::mother_of`), never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: AnimalId,
    pub farm_id: String,
    /// Unique within a farm; uniqueness is enforced server-side and the
    /// client only surfaces the rejection.
    pub tag_number: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: AnimalKind,
    pub breed: String,
    pub gender: Gender,
    pub birth_date: DateTime<Utc>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    pub color: String,
    #[serde(default)]
    pub mother_id: Option<AnimalId>,
    #[serde(default)]
    pub father_id: Option<AnimalId>,
    pub current_location: Location,
    pub status: AnimalStatus,
    /// Embedded mirror of this animal's events from the top-level collection.
    #[serde(default)]
    pub medical_history: Vec<MedicalEvent>,
    /// Embedded mirror of this animal's vaccinations.
    #[serde(default)]
    pub vaccinations: Vec<Vaccination>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// DRAFT SHAPES (POST bodies)
// =============================================================================

/// Creation payload for an animal: the entity minus server-assigned fields
/// (`id`, `created_at`, `updated_at`) and the embedded mirrors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub farm_id: String,
    pub tag_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: AnimalKind,
    pub breed: String,
    pub gender: Gender,
    pub birth_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<AnimalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_id: Option<AnimalId>,
    pub current_location: Location,
    pub status: AnimalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Creation payload for a medical event: the entity minus `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalEvent {
    pub bovine_id: AnimalId,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinarian_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinarian_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub status: EventStatus,
}

/// Creation payload for a vaccination: the entity minus `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVaccination {
    pub bovine_id: AnimalId,
    pub vaccine_name: String,
    pub vaccine_type: String,
    pub date_administered: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    pub veterinarian_id: String,
    pub veterinarian_name: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: VaccinationStatus,
}

// =============================================================================
// PATCH SHAPES (PUT bodies)
// =============================================================================

/// Partial update for an animal. Absent fields are omitted from the JSON
/// body; the server merges and returns the full updated entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnimalKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<AnimalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_id: Option<AnimalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AnimalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update for a medical event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalEventPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_appointment: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
}

/// Partial update for a vaccination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaccine_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaccine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_administered: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VaccinationStatus>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors produced by the core domain layer.
///
/// - No silent failures
/// - Use `Result<T, HatoError>` for fallible operations
/// - The core never panics; all errors must be recoverable
#[derive(Debug, Error)]
pub enum HatoError {
    /// A snapshot payload failed structural validation.
    #[error("Snapshot format error: {0}")]
    SnapshotFormat(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Exporting the herd to an external format failed.
    #[error("Export error: {0}")]
    Export(String),
}

// =============================================================================
// TESTS
// =============================================================================
