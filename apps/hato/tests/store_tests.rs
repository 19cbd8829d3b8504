//! # Store Integration Tests
//!
//! The herd store driven through a scripted in-memory gateway: success paths
//! commit exactly the server's entities, failure paths leave the data
//! untouched and record the surfaced message.

use chrono::{DateTime, Duration, TimeZone, Utc};
use hato::api::{ApiError, ApiGateway};
use hato::store::HerdStore;
use hato_core::{
    Animal, AnimalId, AnimalKind, AnimalPatch, AnimalStatus, EventId, EventKind, EventStatus,
    Gender, Location, MedicalEvent, MedicalEventPatch, NewAnimal, NewMedicalEvent, NewVaccination,
    Vaccination, VaccinationId, VaccinationPatch, VaccinationStatus,
};
use std::sync::{Arc, Mutex};

// =============================================================================
// FIXTURES
// =============================================================================

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn animal(id: &str, tag: &str) -> Animal {
    Animal {
        id: AnimalId::new(id),
        farm_id: "farm-1".into(),
        tag_number: tag.into(),
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

fn new_animal(tag: &str) -> NewAnimal {
    NewAnimal {
        farm_id: "farm-1".into(),
        tag_number: tag.into(),
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
        notes: None,
    }
}

fn new_event(owner: &str) -> NewMedicalEvent {
    NewMedicalEvent {
        bovine_id: AnimalId::new(owner),
        kind: EventKind::Checkup,
        title: "Routine checkup".into(),
        description: "General inspection".into(),
        date: epoch(),
        location: Location::new(17.98, -92.93),
        veterinarian_id: None,
        veterinarian_name: None,
        diagnosis: None,
        treatment: None,
        cost: None,
        notes: None,
        severity: None,
        status: EventStatus::Completed,
    }
}

fn new_vaccination(owner: &str, due: Option<DateTime<Utc>>) -> NewVaccination {
    NewVaccination {
        bovine_id: AnimalId::new(owner),
        vaccine_name: "Clostridial 8-way".into(),
        vaccine_type: "bacterin".into(),
        date_administered: epoch(),
        next_due_date: due,
        batch_number: None,
        veterinarian_id: "vet-1".into(),
        veterinarian_name: "Dr. Paredes".into(),
        location: Location::new(17.98, -92.93),
        notes: None,
        status: VaccinationStatus::Administered,
    }
}

// =============================================================================
// SCRIPTED GATEWAY
// =============================================================================

/// In-memory gateway: entities live in a shared mutex, ids are assigned
/// sequentially, and `fail_next` makes exactly one upcoming call fail.
/// Clones share the same state, so a test can keep a handle for scripting
/// after moving the gateway into the store.
#[derive(Default, Clone)]
struct MockGateway {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Default)]
struct MockInner {
    animals: Vec<Animal>,
    events: Vec<MedicalEvent>,
    vaccinations: Vec<Vaccination>,
    fail_next: Option<ApiError>,
    next_id: u32,
}

impl MockGateway {
    fn with_animals(animals: Vec<Animal>) -> Self {
        let gateway = Self::default();
        gateway.lock().animals = animals;
        gateway
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockInner> {
        self.inner.lock().expect("gateway mutex")
    }

    fn fail_next(&self, status: u16, message: &str) {
        self.lock().fail_next = Some(ApiError::Rejected {
            status,
            message: message.into(),
        });
    }

    fn fail_next_connection(&self) {
        self.lock().fail_next = Some(ApiError::Connection("connection refused".into()));
    }
}

impl MockInner {
    fn take_failure(&mut self) -> Result<(), ApiError> {
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn assign_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

fn apply_animal_patch(animal: &mut Animal, patch: &AnimalPatch) {
    if let Some(v) = &patch.tag_number {
        animal.tag_number = v.clone();
    }
    if let Some(v) = &patch.name {
        animal.name = Some(v.clone());
    }
    if let Some(v) = patch.kind {
        animal.kind = v;
    }
    if let Some(v) = &patch.breed {
        animal.breed = v.clone();
    }
    if let Some(v) = patch.gender {
        animal.gender = v;
    }
    if let Some(v) = patch.birth_date {
        animal.birth_date = v;
    }
    if let Some(v) = patch.weight {
        animal.weight = Some(v);
    }
    if let Some(v) = patch.height {
        animal.height = Some(v);
    }
    if let Some(v) = &patch.color {
        animal.color = v.clone();
    }
    if let Some(v) = &patch.mother_id {
        animal.mother_id = Some(v.clone());
    }
    if let Some(v) = &patch.father_id {
        animal.father_id = Some(v.clone());
    }
    if let Some(v) = &patch.current_location {
        animal.current_location = v.clone();
    }
    if let Some(v) = patch.status {
        animal.status = v;
    }
    if let Some(v) = &patch.notes {
        animal.notes = Some(v.clone());
    }
}

fn apply_event_patch(event: &mut MedicalEvent, patch: &MedicalEventPatch) {
    if let Some(v) = patch.kind {
        event.kind = v;
    }
    if let Some(v) = &patch.title {
        event.title = v.clone();
    }
    if let Some(v) = &patch.description {
        event.description = v.clone();
    }
    if let Some(v) = patch.date {
        event.date = v;
    }
    if let Some(v) = &patch.diagnosis {
        event.diagnosis = Some(v.clone());
    }
    if let Some(v) = &patch.treatment {
        event.treatment = Some(v.clone());
    }
    if let Some(v) = patch.next_appointment {
        event.next_appointment = Some(v);
    }
    if let Some(v) = patch.cost {
        event.cost = Some(v);
    }
    if let Some(v) = &patch.notes {
        event.notes = Some(v.clone());
    }
    if let Some(v) = patch.severity {
        event.severity = Some(v);
    }
    if let Some(v) = patch.status {
        event.status = v;
    }
}

fn apply_vaccination_patch(vaccination: &mut Vaccination, patch: &VaccinationPatch) {
    if let Some(v) = &patch.vaccine_name {
        vaccination.vaccine_name = v.clone();
    }
    if let Some(v) = &patch.vaccine_type {
        vaccination.vaccine_type = v.clone();
    }
    if let Some(v) = patch.date_administered {
        vaccination.date_administered = v;
    }
    if let Some(v) = patch.next_due_date {
        vaccination.next_due_date = Some(v);
    }
    if let Some(v) = &patch.batch_number {
        vaccination.batch_number = Some(v.clone());
    }
    if let Some(v) = &patch.side_effects {
        vaccination.side_effects = Some(v.clone());
    }
    if let Some(v) = &patch.notes {
        vaccination.notes = Some(v.clone());
    }
    if let Some(v) = patch.status {
        vaccination.status = v;
    }
}

fn not_found(entity: &str) -> ApiError {
    ApiError::Rejected {
        status: 404,
        message: format!("{entity} not found"),
    }
}

impl ApiGateway for MockGateway {
    async fn fetch_animals(&self) -> Result<Vec<Animal>, ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        Ok(inner.animals.clone())
    }

    async fn create_animal(&self, draft: &NewAnimal) -> Result<Animal, ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        let id = inner.assign_id("srv-a");
        let mut created = animal(&id, &draft.tag_number);
        created.farm_id = draft.farm_id.clone();
        created.name = draft.name.clone();
        created.kind = draft.kind;
        created.breed = draft.breed.clone();
        created.gender = draft.gender;
        created.birth_date = draft.birth_date;
        created.status = draft.status;
        inner.animals.push(created.clone());
        Ok(created)
    }

    async fn update_animal(&self, id: &AnimalId, patch: &AnimalPatch) -> Result<Animal, ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        let existing = inner
            .animals
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| not_found("Animal"))?;
        apply_animal_patch(existing, patch);
        Ok(existing.clone())
    }

    async fn delete_animal(&self, id: &AnimalId) -> Result<(), ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        let before = inner.animals.len();
        inner.animals.retain(|a| &a.id != id);
        if inner.animals.len() == before {
            return Err(not_found("Animal"));
        }
        Ok(())
    }

    async fn fetch_medical_events(
        &self,
        animal: Option<&AnimalId>,
    ) -> Result<Vec<MedicalEvent>, ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        Ok(inner
            .events
            .iter()
            .filter(|e| animal.is_none_or(|id| &e.bovine_id == id))
            .cloned()
            .collect())
    }

    async fn create_medical_event(
        &self,
        draft: &NewMedicalEvent,
    ) -> Result<MedicalEvent, ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        let id = inner.assign_id("srv-e");
        let created = MedicalEvent {
            id: EventId::new(id),
            bovine_id: draft.bovine_id.clone(),
            kind: draft.kind,
            title: draft.title.clone(),
            description: draft.description.clone(),
            date: draft.date,
            location: draft.location.clone(),
            veterinarian_id: draft.veterinarian_id.clone(),
            veterinarian_name: draft.veterinarian_name.clone(),
            medications: None,
            diagnosis: draft.diagnosis.clone(),
            treatment: draft.treatment.clone(),
            next_appointment: None,
            cost: draft.cost,
            notes: draft.notes.clone(),
            severity: draft.severity,
            status: draft.status,
        };
        inner.events.push(created.clone());
        Ok(created)
    }

    async fn update_medical_event(
        &self,
        id: &EventId,
        patch: &MedicalEventPatch,
    ) -> Result<MedicalEvent, ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        let existing = inner
            .events
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| not_found("Medical event"))?;
        apply_event_patch(existing, patch);
        Ok(existing.clone())
    }

    async fn delete_medical_event(&self, id: &EventId) -> Result<(), ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        let before = inner.events.len();
        inner.events.retain(|e| &e.id != id);
        if inner.events.len() == before {
            return Err(not_found("Medical event"));
        }
        Ok(())
    }

    async fn fetch_vaccinations(
        &self,
        animal: Option<&AnimalId>,
    ) -> Result<Vec<Vaccination>, ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        Ok(inner
            .vaccinations
            .iter()
            .filter(|v| animal.is_none_or(|id| &v.bovine_id == id))
            .cloned()
            .collect())
    }

    async fn create_vaccination(&self, draft: &NewVaccination) -> Result<Vaccination, ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        let id = inner.assign_id("srv-v");
        let created = Vaccination {
            id: VaccinationId::new(id),
            bovine_id: draft.bovine_id.clone(),
            vaccine_name: draft.vaccine_name.clone(),
            vaccine_type: draft.vaccine_type.clone(),
            date_administered: draft.date_administered,
            next_due_date: draft.next_due_date,
            batch_number: draft.batch_number.clone(),
            veterinarian_id: draft.veterinarian_id.clone(),
            veterinarian_name: draft.veterinarian_name.clone(),
            location: draft.location.clone(),
            side_effects: None,
            notes: draft.notes.clone(),
            status: draft.status,
        };
        inner.vaccinations.push(created.clone());
        Ok(created)
    }

    async fn update_vaccination(
        &self,
        id: &VaccinationId,
        patch: &VaccinationPatch,
    ) -> Result<Vaccination, ApiError> {
        let mut inner = self.lock();
        inner.take_failure()?;
        let existing = inner
            .vaccinations
            .iter_mut()
            .find(|v| &v.id == id)
            .ok_or_else(|| not_found("Vaccination"))?;
        apply_vaccination_patch(existing, patch);
        Ok(existing.clone())
    }
}

// =============================================================================
// LOAD PATHS
// =============================================================================

#[tokio::test]
async fn load_animals_replaces_the_collection() {
    let gateway = MockGateway::with_animals(vec![animal("a-1", "MX-001"), animal("a-2", "MX-002")]);
    let mut store = HerdStore::new(gateway);

    store.load_animals().await;

    assert_eq!(store.state().animals.len(), 2);
    assert!(!store.state().is_loading);
    assert!(store.state().error.is_none());
}

#[tokio::test]
async fn failed_load_keeps_data_and_records_message() {
    let gateway = MockGateway::with_animals(vec![animal("a-1", "MX-001")]);
    let handle = gateway.clone();
    let mut store = HerdStore::new(gateway);
    store.load_animals().await;

    handle.fail_next(500, "db down");
    store.load_animals().await;

    assert_eq!(store.state().animals.len(), 1);
    assert_eq!(store.state().error.as_deref(), Some("db down"));
    assert!(!store.state().is_loading);
}

#[tokio::test]
async fn next_operation_clears_a_stale_error() {
    let gateway = MockGateway::default();
    gateway.fail_next(500, "db down");
    let mut store = HerdStore::new(gateway);

    store.load_animals().await;
    assert!(store.state().error.is_some());

    store.load_animals().await;
    assert!(store.state().error.is_none());
}

#[tokio::test]
async fn connection_failure_surfaces_a_generic_message() {
    let gateway = MockGateway::default();
    gateway.fail_next_connection();
    let mut store = HerdStore::new(gateway);

    store.load_animals().await;

    assert_eq!(
        store.state().error.as_deref(),
        Some("Connection error: the request could not be completed")
    );
}

// =============================================================================
// ANIMAL WRITES
// =============================================================================

#[tokio::test]
async fn create_animal_appends_the_server_entity() {
    let mut store = HerdStore::new(MockGateway::default());

    let created = store
        .create_animal(&new_animal("MX-010"))
        .await
        .expect("create");

    assert_eq!(created.id.as_str(), "srv-a-1");
    assert_eq!(store.state().animals.len(), 1);
    assert_eq!(store.state().animals[0].tag_number, "MX-010");
    assert!(!store.state().is_loading);
}

#[tokio::test]
async fn rejected_create_returns_err_and_inserts_nothing() {
    let gateway = MockGateway::default();
    gateway.fail_next(400, "Tag number already in use");
    let mut store = HerdStore::new(gateway);

    let result = store.create_animal(&new_animal("MX-010")).await;

    assert!(result.is_err());
    assert!(store.state().animals.is_empty());
    assert_eq!(
        store.state().error.as_deref(),
        Some("Tag number already in use")
    );
    assert!(!store.state().is_loading);
}

#[tokio::test]
async fn crud_sequence_settles_on_the_expected_state() {
    let mut store = HerdStore::new(MockGateway::default());

    let first = store.create_animal(&new_animal("MX-001")).await.expect("create");
    let second = store.create_animal(&new_animal("MX-002")).await.expect("create");

    let patch = AnimalPatch {
        status: Some(AnimalStatus::Pregnant),
        ..AnimalPatch::default()
    };
    store.update_animal(&first.id, &patch).await.expect("update");
    store.delete_animal(&second.id).await.expect("delete");

    assert_eq!(store.state().animals.len(), 1);
    assert_eq!(store.state().animals[0].id, first.id);
    assert_eq!(store.state().animals[0].status, AnimalStatus::Pregnant);
    assert!(store.state().error.is_none());
}

#[tokio::test]
async fn deleting_the_selected_animal_clears_the_selection() {
    let mut store = HerdStore::new(MockGateway::default());
    let created = store.create_animal(&new_animal("MX-001")).await.expect("create");

    store.select_animal(Some(&created.id));
    assert!(store.state().selected_animal.is_some());

    store.delete_animal(&created.id).await.expect("delete");
    assert!(store.state().selected_animal.is_none());
}

#[tokio::test]
async fn selecting_an_unknown_id_clears_the_selection() {
    let mut store = HerdStore::new(MockGateway::default());
    let created = store.create_animal(&new_animal("MX-001")).await.expect("create");

    store.select_animal(Some(&created.id));
    store.select_animal(Some(&AnimalId::new("a-404")));

    assert!(store.state().selected_animal.is_none());
}

// =============================================================================
// DUAL-LOCATION CHILD RECORDS
// =============================================================================

#[tokio::test]
async fn created_event_lands_in_both_locations() {
    let mut store = HerdStore::new(MockGateway::default());
    let owner = store.create_animal(&new_animal("MX-001")).await.expect("create");

    let event = store
        .create_medical_event(&new_event(owner.id.as_str()))
        .await
        .expect("create event");

    assert_eq!(store.state().medical_events.len(), 1);
    let embedded = &store.state().animals[0].medical_history;
    assert_eq!(embedded.len(), 1);
    assert_eq!(embedded[0].id, event.id);
}

#[tokio::test]
async fn deleted_event_vanishes_from_both_locations() {
    let mut store = HerdStore::new(MockGateway::default());
    let owner = store.create_animal(&new_animal("MX-001")).await.expect("create");
    let event = store
        .create_medical_event(&new_event(owner.id.as_str()))
        .await
        .expect("create event");

    store.delete_medical_event(&event.id).await.expect("delete event");

    assert!(store.state().medical_events.is_empty());
    assert!(store.state().animals[0].medical_history.is_empty());
}

#[tokio::test]
async fn vaccination_update_keeps_the_mirror_in_sync() {
    let mut store = HerdStore::new(MockGateway::default());
    let owner = store.create_animal(&new_animal("MX-001")).await.expect("create");
    let vaccination = store
        .create_vaccination(&new_vaccination(owner.id.as_str(), None))
        .await
        .expect("create vaccination");

    let patch = VaccinationPatch {
        batch_number: Some("L-2025-03".into()),
        ..VaccinationPatch::default()
    };
    store
        .update_vaccination(&vaccination.id, &patch)
        .await
        .expect("update vaccination");

    assert_eq!(
        store.state().vaccinations[0].batch_number.as_deref(),
        Some("L-2025-03")
    );
    assert_eq!(
        store.state().animals[0].vaccinations[0]
            .batch_number
            .as_deref(),
        Some("L-2025-03")
    );
}

// =============================================================================
// DERIVED QUERIES THROUGH THE STORE
// =============================================================================

#[tokio::test]
async fn upcoming_vaccinations_include_overdue_records() {
    let mut store = HerdStore::new(MockGateway::default());
    let owner = store.create_animal(&new_animal("MX-001")).await.expect("create");

    let now = Utc::now();
    store
        .create_vaccination(&new_vaccination(
            owner.id.as_str(),
            Some(now + Duration::days(10)),
        ))
        .await
        .expect("create");
    store
        .create_vaccination(&new_vaccination(
            owner.id.as_str(),
            Some(now + Duration::days(60)),
        ))
        .await
        .expect("create");
    store
        .create_vaccination(&new_vaccination(
            owner.id.as_str(),
            Some(now - Duration::days(5)),
        ))
        .await
        .expect("create");

    let upcoming = store.state().upcoming_vaccinations(30);
    assert_eq!(upcoming.len(), 2);
}

#[tokio::test]
async fn filtered_view_follows_store_settings() {
    let gateway = MockGateway::with_animals(vec![
        animal("a-1", "MX-003"),
        animal("a-2", "MX-001"),
        animal("a-3", "MX-002"),
    ]);
    let mut store = HerdStore::new(gateway);
    store.load_animals().await;

    store.set_search_term("MX-00");
    let view = store.filtered_animals();
    let tags: Vec<&str> = view.iter().map(|a| a.tag_number.as_str()).collect();
    assert_eq!(tags, vec!["MX-001", "MX-002", "MX-003"]);

    store.clear_filters();
    assert_eq!(store.filtered_animals().len(), 3);
}
