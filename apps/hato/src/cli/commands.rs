//! # CLI Command Implementations
//!
//! Each command builds on the same skeleton: drive the store, check whether
//! the load recorded an error, then render either human-readable text or
//! JSON depending on `--json`.

use super::AppError;
use crate::api::ApiGateway;
use crate::store::HerdStore;
use hato_core::{
    Animal, AnimalId, AnimalPatch, EventId, FilterSet, MedicalEvent, MedicalEventPatch, NewAnimal,
    NewMedicalEvent, NewVaccination, SortKey, SortOrder, Vaccination, VaccinationId,
    VaccinationPatch, animals_to_csv, animals_to_json, snapshot_from_bytes, snapshot_to_bytes,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size for JSON input payloads (10 MB).
///
/// Creation and patch payloads are small; anything larger is a mistake.
const MAX_INPUT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum size for snapshot files (200 MB).
const MAX_SNAPSHOT_FILE_SIZE: u64 = 200 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), AppError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > max_size {
        return Err(AppError::InvalidArgument(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input path: canonicalize (resolving ".." and symlinks) and
/// require a regular file.
fn validate_input_path(path: &Path) -> Result<PathBuf, AppError> {
    let canonical = path.canonicalize().map_err(|e| {
        AppError::InvalidArgument(format!("Invalid file path '{}': {}", path.display(), e))
    })?;
    if !canonical.is_file() {
        return Err(AppError::InvalidArgument(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    Ok(canonical)
}

/// Validate an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, AppError> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let canonical_parent = parent.canonicalize().map_err(|e| {
        AppError::InvalidArgument(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;
    let filename = path.file_name().ok_or_else(|| {
        AppError::InvalidArgument("Output path has no filename".to_string())
    })?;
    Ok(canonical_parent.join(filename))
}

/// Read and parse a JSON payload file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let path = validate_input_path(path)?;
    validate_file_size(&path, MAX_INPUT_FILE_SIZE)?;
    let raw = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Loads swallow failures into the state; the CLI turns them back into a
/// hard error so the process exits non-zero.
fn check_load<G: ApiGateway>(store: &HerdStore<G>) -> Result<(), AppError> {
    match &store.state().error {
        Some(message) => Err(AppError::Load(message.clone())),
        None => Ok(()),
    }
}

fn parse_arg<T: std::str::FromStr<Err = String>>(value: &str) -> Result<T, AppError> {
    value.parse().map_err(AppError::InvalidArgument)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// RENDERING
// =============================================================================

fn print_animal_row(animal: &Animal) {
    println!(
        "{:<10} {:<14} {:<6} {:<12} {:<10} {}",
        animal.tag_number,
        animal.name.as_deref().unwrap_or("-"),
        animal.kind.as_str(),
        animal.breed,
        animal.status.as_str(),
        animal.id.as_str(),
    );
}

fn print_animal_header() {
    println!(
        "{:<10} {:<14} {:<6} {:<12} {:<10} {}",
        "TAG", "NAME", "TYPE", "BREED", "STATUS", "ID"
    );
}

fn print_event_row(event: &MedicalEvent) {
    println!(
        "{:<12} {:<12} {:<10} {:<10} {}",
        event.date.format("%Y-%m-%d"),
        event.kind.as_str(),
        event.status.as_str(),
        event.bovine_id.as_str(),
        event.title,
    );
}

fn print_vaccination_row(vaccination: &Vaccination) {
    let due = vaccination
        .next_due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:<12} {:<10} {:<10} {:<20} {}",
        vaccination.date_administered.format("%Y-%m-%d"),
        due,
        vaccination.bovine_id.as_str(),
        vaccination.vaccine_name,
        vaccination.status.as_str(),
    );
}

// =============================================================================
// ANIMAL COMMANDS
// =============================================================================

/// List animals through the filter/search/sort projection.
pub async fn cmd_list<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    status: Option<String>,
    kind: Option<String>,
    breed: Option<String>,
    search: Option<String>,
    sort_by: &str,
    sort_order: &str,
) -> Result<(), AppError> {
    let filters = FilterSet {
        status: status.as_deref().map(parse_arg).transpose()?,
        kind: kind.as_deref().map(parse_arg).transpose()?,
        breed,
    };
    let sort_by: SortKey = parse_arg(sort_by)?;
    let sort_order: SortOrder = parse_arg(sort_order)?;

    store.load_animals().await;
    check_load(store)?;

    store.set_filters(filters);
    store.set_sorting(sort_by, sort_order);
    if let Some(term) = search {
        store.set_search_term(term);
    }

    let animals = store.filtered_animals();
    if json_mode {
        return print_json(&animals);
    }

    print_animal_header();
    for animal in &animals {
        print_animal_row(animal);
    }
    println!();
    println!(
        "{} of {} animals shown",
        animals.len(),
        store.state().animals.len()
    );
    Ok(())
}

/// Show one animal together with its scoped medical and vaccination records.
pub async fn cmd_show<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    id: &str,
) -> Result<(), AppError> {
    let id = AnimalId::new(id);

    store.load_animals().await;
    check_load(store)?;
    store.load_medical_events(Some(&id)).await;
    check_load(store)?;
    store.load_vaccinations(Some(&id)).await;
    check_load(store)?;

    store.select_animal(Some(&id));
    let Some(animal) = store.state().selected_animal.clone() else {
        return Err(AppError::InvalidArgument(format!(
            "no animal with id '{}'",
            id.as_str()
        )));
    };

    if json_mode {
        return print_json(&serde_json::json!({
            "animal": animal,
            "medicalEvents": store.state().medical_events,
            "vaccinations": store.state().vaccinations,
        }));
    }

    println!("Animal {}", animal.tag_number);
    println!("=================");
    println!("Id:       {}", animal.id.as_str());
    println!("Name:     {}", animal.name.as_deref().unwrap_or("-"));
    println!("Type:     {}", animal.kind.as_str());
    println!("Breed:    {}", animal.breed);
    println!("Gender:   {}", animal.gender.as_str());
    println!("Born:     {}", animal.birth_date.format("%Y-%m-%d"));
    println!("Status:   {}", animal.status.as_str());
    println!("Color:    {}", animal.color);
    if let Some(mother) = store.state().mother_of(&animal) {
        println!("Mother:   {}", mother.tag_number);
    }
    if let Some(father) = store.state().father_of(&animal) {
        println!("Father:   {}", father.tag_number);
    }

    println!();
    println!("Medical events ({}):", store.state().medical_events.len());
    for event in &store.state().medical_events {
        print_event_row(event);
    }
    println!();
    println!("Vaccinations ({}):", store.state().vaccinations.len());
    for vaccination in &store.state().vaccinations {
        print_vaccination_row(vaccination);
    }
    Ok(())
}

/// Create an animal from a JSON payload file.
pub async fn cmd_add<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    file: &Path,
) -> Result<(), AppError> {
    let draft: NewAnimal = read_json(file)?;
    let created = store.create_animal(&draft).await?;

    if json_mode {
        return print_json(&created);
    }
    println!(
        "Created animal {} ({})",
        created.tag_number,
        created.id.as_str()
    );
    Ok(())
}

/// Patch an animal from a JSON payload file.
pub async fn cmd_update<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    id: &str,
    file: &Path,
) -> Result<(), AppError> {
    let patch: AnimalPatch = read_json(file)?;
    let updated = store.update_animal(&AnimalId::new(id), &patch).await?;

    if json_mode {
        return print_json(&updated);
    }
    println!(
        "Updated animal {} ({})",
        updated.tag_number,
        updated.id.as_str()
    );
    Ok(())
}

/// Delete an animal.
pub async fn cmd_remove<G: ApiGateway>(
    store: &mut HerdStore<G>,
    id: &str,
) -> Result<(), AppError> {
    store.delete_animal(&AnimalId::new(id)).await?;
    println!("Deleted animal {}", id);
    Ok(())
}

// =============================================================================
// MEDICAL-EVENT COMMANDS
// =============================================================================

/// List medical events, optionally scoped and windowed.
pub async fn cmd_events<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    animal: Option<&str>,
    recent: Option<i64>,
) -> Result<(), AppError> {
    let animal = animal.map(AnimalId::new);
    store.load_medical_events(animal.as_ref()).await;
    check_load(store)?;

    let events: Vec<MedicalEvent> = match recent {
        Some(days) => store
            .state()
            .recent_medical_events(days)
            .into_iter()
            .cloned()
            .collect(),
        None => store.state().medical_events.clone(),
    };

    if json_mode {
        return print_json(&events);
    }
    for event in &events {
        print_event_row(event);
    }
    println!();
    println!("{} medical events", events.len());
    Ok(())
}

/// Create a medical event from a JSON payload file.
pub async fn cmd_add_event<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    file: &Path,
) -> Result<(), AppError> {
    let draft: NewMedicalEvent = read_json(file)?;
    let created = store.create_medical_event(&draft).await?;

    if json_mode {
        return print_json(&created);
    }
    println!("Created medical event {}", created.id.as_str());
    Ok(())
}

/// Patch a medical event from a JSON payload file.
pub async fn cmd_update_event<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    id: &str,
    file: &Path,
) -> Result<(), AppError> {
    let patch: MedicalEventPatch = read_json(file)?;
    let updated = store
        .update_medical_event(&EventId::new(id), &patch)
        .await?;

    if json_mode {
        return print_json(&updated);
    }
    println!("Updated medical event {}", updated.id.as_str());
    Ok(())
}

/// Delete a medical event.
pub async fn cmd_remove_event<G: ApiGateway>(
    store: &mut HerdStore<G>,
    id: &str,
) -> Result<(), AppError> {
    store.delete_medical_event(&EventId::new(id)).await?;
    println!("Deleted medical event {}", id);
    Ok(())
}

// =============================================================================
// VACCINATION COMMANDS
// =============================================================================

/// List vaccinations, optionally scoped and limited to a due window.
pub async fn cmd_vaccinations<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    animal: Option<&str>,
    upcoming: Option<i64>,
) -> Result<(), AppError> {
    let animal = animal.map(AnimalId::new);
    store.load_vaccinations(animal.as_ref()).await;
    check_load(store)?;

    let vaccinations: Vec<Vaccination> = match upcoming {
        Some(days) => store
            .state()
            .upcoming_vaccinations(days)
            .into_iter()
            .cloned()
            .collect(),
        None => store.state().vaccinations.clone(),
    };

    if json_mode {
        return print_json(&vaccinations);
    }
    for vaccination in &vaccinations {
        print_vaccination_row(vaccination);
    }
    println!();
    println!("{} vaccinations", vaccinations.len());
    Ok(())
}

/// Create a vaccination from a JSON payload file.
pub async fn cmd_add_vaccination<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    file: &Path,
) -> Result<(), AppError> {
    let draft: NewVaccination = read_json(file)?;
    let created = store.create_vaccination(&draft).await?;

    if json_mode {
        return print_json(&created);
    }
    println!("Created vaccination {}", created.id.as_str());
    Ok(())
}

/// Patch a vaccination from a JSON payload file.
pub async fn cmd_update_vaccination<G: ApiGateway>(
    store: &mut HerdStore<G>,
    json_mode: bool,
    id: &str,
    file: &Path,
) -> Result<(), AppError> {
    let patch: VaccinationPatch = read_json(file)?;
    let updated = store
        .update_vaccination(&VaccinationId::new(id), &patch)
        .await?;

    if json_mode {
        return print_json(&updated);
    }
    println!("Updated vaccination {}", updated.id.as_str());
    Ok(())
}

// =============================================================================
// EXPORT / SNAPSHOT COMMANDS
// =============================================================================

/// Export the loaded herd to a JSON or CSV file.
pub async fn cmd_export<G: ApiGateway>(
    store: &mut HerdStore<G>,
    output: &Path,
    format: &str,
) -> Result<(), AppError> {
    store.load_animals().await;
    check_load(store)?;

    let content = match format {
        "json" => animals_to_json(&store.state().animals)?,
        "csv" => animals_to_csv(&store.state().animals)?,
        other => {
            return Err(AppError::InvalidArgument(format!(
                "unknown export format: '{other}' (expected json or csv)"
            )));
        }
    };

    let output = validate_output_path(output)?;
    std::fs::write(&output, content)?;
    println!(
        "Exported {} animals to {}",
        store.state().animals.len(),
        output.display()
    );
    Ok(())
}

/// Load the full herd and write a binary snapshot.
pub async fn cmd_snapshot<G: ApiGateway>(
    store: &mut HerdStore<G>,
    output: &Path,
) -> Result<(), AppError> {
    store.load_animals().await;
    check_load(store)?;
    store.load_medical_events(None).await;
    check_load(store)?;
    store.load_vaccinations(None).await;
    check_load(store)?;

    let bytes = snapshot_to_bytes(store.state())?;
    let output = validate_output_path(output)?;
    std::fs::write(&output, &bytes)?;
    println!(
        "Snapshot of {} animals, {} medical events, {} vaccinations ({} bytes) written to {}",
        store.state().animals.len(),
        store.state().medical_events.len(),
        store.state().vaccinations.len(),
        bytes.len(),
        output.display()
    );
    Ok(())
}

/// Decode a snapshot file and report its contents. Offline only; the state
/// is not pushed anywhere.
pub fn cmd_restore(json_mode: bool, input: &Path) -> Result<(), AppError> {
    let input = validate_input_path(input)?;
    validate_file_size(&input, MAX_SNAPSHOT_FILE_SIZE)?;
    let bytes = std::fs::read(&input)?;
    let state = snapshot_from_bytes(&bytes)?;

    if json_mode {
        return print_json(&serde_json::json!({
            "animals": state.animals.len(),
            "medicalEvents": state.medical_events.len(),
            "vaccinations": state.vaccinations.len(),
        }));
    }

    println!("Snapshot {}", input.display());
    println!("==================");
    println!("Animals:        {}", state.animals.len());
    println!("Medical events: {}", state.medical_events.len());
    println!("Vaccinations:   {}", state.vaccinations.len());
    println!();
    print_animal_header();
    for animal in &state.animals {
        print_animal_row(animal);
    }
    Ok(())
}
