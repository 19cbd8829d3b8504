//! # View Derivation
//!
//! Pure computation of the filtered, searched, sorted projection of the
//! animal collection. No side effects, no caching: callers invoke
//! [`filtered_animals`] on demand against the latest committed state.
//!
//! Pipeline order is fixed:
//! 1. status filter (exact)
//! 2. kind filter (exact)
//! 3. breed filter (case-insensitive substring; empty string = no filter)
//! 4. search term (case-insensitive substring over tag number, name, breed)
//! 5. stable sort; descending reverses the comparator, not the result array

use crate::state::HerdState;
use crate::types::{Animal, AnimalKind, AnimalStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// =============================================================================
// VIEW-STATE TYPES
// =============================================================================

/// Active filters over the animal collection. Absent field = no constraint;
/// present filters compose with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AnimalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnimalKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
}

impl FilterSet {
    /// True when no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.kind.is_none() && self.breed.is_none()
    }

    /// Overlay another filter set: present fields replace, absent fields
    /// keep their current value. Mirrors a partial-object merge.
    pub fn merge(&mut self, update: FilterSet) {
        if let Some(status) = update.status {
            self.status = Some(status);
        }
        if let Some(kind) = update.kind {
            self.kind = Some(kind);
        }
        if let Some(breed) = update.breed {
            self.breed = Some(breed);
        }
    }
}

/// Field the derived view is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    TagNumber,
    Name,
    BirthDate,
    Status,
    Breed,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tag" | "tagNumber" => Ok(Self::TagNumber),
            "name" => Ok(Self::Name),
            "birth" | "birthDate" => Ok(Self::BirthDate),
            "status" => Ok(Self::Status),
            "breed" => Ok(Self::Breed),
            other => Err(format!(
                "unknown sort key: '{other}' (expected tag, name, birth, status, or breed)"
            )),
        }
    }
}

/// Sort direction of the derived view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order: '{other}' (expected asc or desc)")),
        }
    }
}

// =============================================================================
// DERIVATION
// =============================================================================

/// Compute the filtered, searched, sorted animal projection.
///
/// Returns a fresh `Vec`; the store's own collection is never mutated and
/// the caller must not feed the result back into the state.
#[must_use]
pub fn filtered_animals(state: &HerdState) -> Vec<Animal> {
    let mut filtered: Vec<Animal> = state
        .animals
        .iter()
        .filter(|animal| matches_filters(animal, &state.filters))
        .filter(|animal| matches_search(animal, &state.search_term))
        .cloned()
        .collect();

    // Vec::sort_by is stable, so ties keep input order in both directions.
    filtered.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, state.sort_by);
        match state.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    filtered
}

fn matches_filters(animal: &Animal, filters: &FilterSet) -> bool {
    if let Some(status) = filters.status {
        if animal.status != status {
            return false;
        }
    }
    if let Some(kind) = filters.kind {
        if animal.kind != kind {
            return false;
        }
    }
    // An empty-string breed filter is treated as "no filter".
    if let Some(breed) = filters.breed.as_deref() {
        if !breed.is_empty()
            && !animal
                .breed
                .to_lowercase()
                .contains(&breed.to_lowercase())
        {
            return false;
        }
    }
    true
}

fn matches_search(animal: &Animal, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    animal.tag_number.to_lowercase().contains(&needle)
        || animal
            .name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
        || animal.breed.to_lowercase().contains(&needle)
}

fn compare_by_key(a: &Animal, b: &Animal, key: SortKey) -> Ordering {
    match key {
        SortKey::TagNumber => a.tag_number.cmp(&b.tag_number),
        // A missing name sorts as the empty string.
        SortKey::Name => a
            .name
            .as_deref()
            .unwrap_or("")
            .cmp(b.name.as_deref().unwrap_or("")),
        SortKey::BirthDate => a.birth_date.cmp(&b.birth_date),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        SortKey::Breed => a.breed.cmp(&b.breed),
    }
}

// =============================================================================
// TESTS
// =============================================================================
