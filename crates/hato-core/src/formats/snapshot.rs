//! # Snapshot Format
//!
//! Binary serialization of a loaded herd, used by the CLI to save and
//! restore a working set between invocations.
//!
//! Format: Header (5 bytes) + postcard-serialized herd data.
//! - 4 bytes: Magic ("HATO")
//! - 1 byte: Version
//!
//! Only entity data is captured. View-state (filters, sort, search term) and
//! the transient `is_loading`/`error` fields are never persisted; a restored
//! state starts with default view settings.
//!
//! Both size limits and the header are validated before the payload is
//! deserialized, so corrupted or oversized files fail fast.

use crate::state::HerdState;
use crate::types::{Animal, HatoError, MedicalEvent, Vaccination};
use serde::{Deserialize, Serialize};

// =============================================================================
// FORMAT CONSTANTS
// =============================================================================

/// Magic bytes identifying a hato snapshot file.
pub const MAGIC_BYTES: &[u8; 4] = b"HATO";

/// Current snapshot format version.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum allowed payload size for a snapshot.
///
/// Validated before deserialization to bound memory use on corrupted input.
pub const MAX_SNAPSHOT_PAYLOAD_SIZE: usize = 100 * 1024 * 1024; // 100 MB

/// Minimum valid file size (header only).
const MIN_FILE_SIZE: usize = 5;

// =============================================================================
// FILE HEADER
// =============================================================================

/// The snapshot header precedes all herd data.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SnapshotHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *MAGIC_BYTES,
            version: FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), HatoError> {
        if &self.magic != MAGIC_BYTES {
            return Err(HatoError::SnapshotFormat("Invalid magic bytes".to_string()));
        }
        if self.version != FORMAT_VERSION {
            return Err(HatoError::SnapshotFormat(format!(
                "Unsupported version: {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HatoError> {
        if bytes.len() < MIN_FILE_SIZE {
            return Err(HatoError::SnapshotFormat("Header too short".to_string()));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SNAPSHOT PAYLOAD
// =============================================================================

/// The persisted subset of [`HerdState`]: entity data only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerdSnapshot {
    pub animals: Vec<Animal>,
    pub medical_events: Vec<MedicalEvent>,
    pub vaccinations: Vec<Vaccination>,
}

impl From<&HerdState> for HerdSnapshot {
    fn from(state: &HerdState) -> Self {
        Self {
            animals: state.animals.clone(),
            medical_events: state.medical_events.clone(),
            vaccinations: state.vaccinations.clone(),
        }
    }
}

impl From<HerdSnapshot> for HerdState {
    fn from(snapshot: HerdSnapshot) -> Self {
        Self {
            animals: snapshot.animals,
            medical_events: snapshot.medical_events,
            vaccinations: snapshot.vaccinations,
            ..Self::default()
        }
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a herd state to bytes (header + payload). Pure, no file I/O.
pub fn snapshot_to_bytes(state: &HerdState) -> Result<Vec<u8>, HatoError> {
    let header = SnapshotHeader::new();
    let snapshot = HerdSnapshot::from(state);

    let payload =
        postcard::to_stdvec(&snapshot).map_err(|e| HatoError::Serialization(e.to_string()))?;

    let mut result = Vec::with_capacity(5 + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize a herd state from bytes. Pure, no file I/O.
///
/// Validates minimum size, maximum payload size, and the header before
/// touching the payload.
pub fn snapshot_from_bytes(bytes: &[u8]) -> Result<HerdState, HatoError> {
    if bytes.len() < MIN_FILE_SIZE {
        return Err(HatoError::SnapshotFormat(
            "Data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > MAX_SNAPSHOT_PAYLOAD_SIZE {
        return Err(HatoError::SnapshotFormat(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SNAPSHOT_PAYLOAD_SIZE
        )));
    }

    let header = SnapshotHeader::from_bytes(bytes)?;
    header.validate()?;

    let payload = &bytes[5..];
    let snapshot: HerdSnapshot = postcard::from_bytes(payload).map_err(|e| {
        HatoError::Serialization(format!("Failed to deserialize herd data: {}", e))
    })?;

    Ok(HerdState::from(snapshot))
}

// =============================================================================
// TESTS
// =============================================================================
