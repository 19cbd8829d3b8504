//! # Herd Export
//!
//! Pure export of the animal collection to interchange formats. Writing the
//! result to disk is the app layer's job.

use crate::types::{Animal, HatoError};

/// Export animals as pretty-printed JSON (full entity shapes).
pub fn animals_to_json(animals: &[Animal]) -> Result<String, HatoError> {
    serde_json::to_string_pretty(animals).map_err(|e| HatoError::Export(e.to_string()))
}

/// Export animals as CSV, one row per animal with the flat scalar columns.
///
/// Embedded medical history and vaccinations are not flattened into rows;
/// use the JSON export for the full shapes.
pub fn animals_to_csv(animals: &[Animal]) -> Result<String, HatoError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "id",
            "tagNumber",
            "name",
            "type",
            "breed",
            "gender",
            "birthDate",
            "status",
            "weight",
            "height",
            "color",
            "farmId",
        ])
        .map_err(|e| HatoError::Export(e.to_string()))?;

    for animal in animals {
        writer
            .write_record([
                animal.id.as_str(),
                animal.tag_number.as_str(),
                animal.name.as_deref().unwrap_or(""),
                animal.kind.as_str(),
                animal.breed.as_str(),
                animal.gender.as_str(),
                &animal.birth_date.to_rfc3339(),
                animal.status.as_str(),
                &animal.weight.map(|w| w.to_string()).unwrap_or_default(),
                &animal.height.map(|h| h.to_string()).unwrap_or_default(),
                animal.color.as_str(),
                animal.farm_id.as_str(),
            ])
            .map_err(|e| HatoError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HatoError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| HatoError::Export(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
