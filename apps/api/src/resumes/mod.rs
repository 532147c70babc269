// Resume intake: upload validation and storage, extraction with the
// empty-result fallback, persistence, and profile skill merging.

pub mod handlers;
pub mod ingest;
pub mod store;
pub mod upload;
