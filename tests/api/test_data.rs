//! Shared test data constants to avoid magic strings across integration tests

pub const TEST_TOKEN: &str = "0f3c2b1a9d8e7f6a5b4c3d2e1f0a9b8c";

/// Ids handed out by the mock are this prefix plus a 1-based counter.
pub const TEST_NOTE_ID_PREFIX: &str = "note-";
