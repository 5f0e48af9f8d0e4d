//! Identifiers for newly created favorite and order records.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Client-generated identifier of a remote record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

/// Source of fresh record identifiers.
pub trait RecordIdGenerator: Send + Sync {
    fn next_id(&self) -> RecordId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl RecordIdGenerator for UuidGenerator {
    fn next_id(&self) -> RecordId {
        RecordId::from(Uuid::new_v4())
    }
}

/// Deterministic `prefix-N` identifiers, useful for dry runs and tests.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl RecordIdGenerator for SequentialIds {
    fn next_id(&self) -> RecordId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        RecordId(format!("{}-{n}", self.prefix))
    }
}
