//! # Record Store
//!
//! Persistence for the student collection:
//! - `BlobBackend`: named whole-value blobs (filesystem or memory)
//! - `RecordStore`: load/save of the full collection with degrade-on-failure
//! - Blob envelope with a CRC32 over the records

mod backend;
mod blob;
mod errors;
mod local;
mod memory;
mod record_store;

pub use backend::BlobBackend;
pub use blob::{decode, encode, records_checksum, BLOB_VERSION};
pub use errors::{StoreError, StoreResult};
pub use local::LocalBackend;
pub use memory::MemoryBackend;
pub use record_store::RecordStore;
