//! Persisted blob layout
//!
//! ```text
//! {"version":1,"checksum":<crc32 of the records array>,"records":[...]}
//! ```
//!
//! A bare JSON array of records (the layout written before the envelope
//! existed) is still accepted on read. Every decode failure maps to a
//! corruption error.

use std::collections::HashSet;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::record::StudentRecord;

use super::errors::{StoreError, StoreResult};

/// Current envelope version
pub const BLOB_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    checksum: u32,
    records: &'a [StudentRecord],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    checksum: u32,
    records: Vec<StudentRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedBlob {
    Envelope(Envelope),
    Legacy(Vec<StudentRecord>),
}

/// CRC32 (IEEE) over the canonical serialization of `records`
pub fn records_checksum(records: &[StudentRecord]) -> StoreResult<u32> {
    let bytes =
        serde_json::to_vec(records).map_err(|e| StoreError::Serialization(e.to_string()))?;
    let mut hasher = Hasher::new();
    hasher.update(&bytes);
    Ok(hasher.finalize())
}

/// Serialize the whole collection into a blob
pub fn encode(records: &[StudentRecord]) -> StoreResult<Vec<u8>> {
    let envelope = EnvelopeRef {
        version: BLOB_VERSION,
        checksum: records_checksum(records)?,
        records,
    };
    serde_json::to_vec(&envelope).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Parse a blob back into the collection, verifying its integrity
pub fn decode(bytes: &[u8]) -> StoreResult<Vec<StudentRecord>> {
    let blob: PersistedBlob =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;

    let records = match blob {
        PersistedBlob::Envelope(envelope) => {
            if envelope.version != BLOB_VERSION {
                return Err(StoreError::UnsupportedVersion(envelope.version));
            }
            let computed = records_checksum(&envelope.records)?;
            if computed != envelope.checksum {
                return Err(StoreError::ChecksumMismatch {
                    stored: envelope.checksum,
                    computed,
                });
            }
            envelope.records
        }
        PersistedBlob::Legacy(records) => records,
    };

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id.as_str()) {
            return Err(StoreError::DuplicateId(record.id.to_string()));
        }
    }

    Ok(records)
}
