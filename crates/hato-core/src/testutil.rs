//! Shared unit-test fixtures.

use crate::types::{
    Animal, AnimalId, AnimalKind, AnimalStatus, EventId, EventKind, EventStatus, Gender, Location,
    MedicalEvent, Vaccination, VaccinationId, VaccinationStatus,
};
use chrono::{DateTime, TimeZone, Utc};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date")
}

/// A healthy Angus cow with the given id and tag number.
pub fn animal(id: &str, tag_number: &str) -> Animal {
    Animal {
        id: AnimalId::new(id),
        farm_id: "farm-1".into(),
        tag_number: tag_number.into(),
        name: None,
        kind: AnimalKind::Cow,
        breed: "Angus".into(),
        gender: Gender::Female,
        birth_date: epoch(),
        weight: None,
        height: None,
        color: "black".into(),
        mother_id: None,
        father_id: None,
        current_location: Location::new(17.98, -92.93),
        status: AnimalStatus::Healthy,
        medical_history: Vec::new(),
        vaccinations: Vec::new(),
        notes: None,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// A pending checkup event owned by `bovine_id`.
pub fn medical_event(id: &str, bovine_id: &str) -> MedicalEvent {
    MedicalEvent {
        id: EventId::new(id),
        bovine_id: AnimalId::new(bovine_id),
        kind: EventKind::Checkup,
        title: "Checkup".into(),
        description: "Routine checkup".into(),
        date: epoch(),
        location: Location::new(17.98, -92.93),
        veterinarian_id: None,
        veterinarian_name: None,
        medications: None,
        diagnosis: None,
        treatment: None,
        next_appointment: None,
        cost: None,
        notes: None,
        severity: None,
        status: EventStatus::Pending,
    }
}

/// An administered vaccination owned by `bovine_id`, with an optional due date.
pub fn vaccination(id: &str, bovine_id: &str, next_due_date: Option<DateTime<Utc>>) -> Vaccination {
    Vaccination {
        id: VaccinationId::new(id),
        bovine_id: AnimalId::new(bovine_id),
        vaccine_name: "Clostridial 8-way".into(),
        vaccine_type: "bacterin".into(),
        date_administered: epoch(),
        next_due_date,
        batch_number: None,
        veterinarian_id: "vet-1".into(),
        veterinarian_name: "Dra. Rivera".into(),
        location: Location::new(17.98, -92.93),
        side_effects: None,
        notes: None,
        status: VaccinationStatus::Administered,
    }
}
