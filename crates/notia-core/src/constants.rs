//! Shared constants

/// Prefix for every owner-namespaced object-store key.
pub const STORAGE_KEY_PREFIX: &str = "uploads";

/// Inclusive bounds for `KeyPoint::importance_level`.
pub const MIN_IMPORTANCE_LEVEL: i32 = 1;
pub const MAX_IMPORTANCE_LEVEL: i32 = 5;

/// Upper bound on stored file names, matching the uploads table column.
pub const MAX_FILE_NAME_LENGTH: usize = 255;
