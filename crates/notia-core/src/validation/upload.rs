//! Validation for upload and folder fields that reach the store.

use regex::Regex;
use std::sync::OnceLock;

use crate::constants::{MAX_IMPORTANCE_LEVEL, MIN_IMPORTANCE_LEVEL};
use crate::error::AppError;

pub use crate::constants::MAX_FILE_NAME_LENGTH;

fn hex_color_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"))
}

/// Validate a stored file name: non-empty, bounded, no path separators or
/// traversal sequences (file names become blob names).
pub fn validate_file_name(file_name: &str) -> Result<(), AppError> {
    if file_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "File name must not be empty".to_string(),
        ));
    }

    if file_name.len() > MAX_FILE_NAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "File name exceeds {} characters",
            MAX_FILE_NAME_LENGTH
        )));
    }

    if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
        return Err(AppError::InvalidInput(
            "File name must not contain path separators".to_string(),
        ));
    }

    Ok(())
}

/// Validate a key-point importance level against its inclusive [1,5] range.
pub fn validate_importance_level(level: i32) -> Result<(), AppError> {
    if !(MIN_IMPORTANCE_LEVEL..=MAX_IMPORTANCE_LEVEL).contains(&level) {
        return Err(AppError::InvalidInput(format!(
            "Importance level {} outside [{}, {}]",
            level, MIN_IMPORTANCE_LEVEL, MAX_IMPORTANCE_LEVEL
        )));
    }
    Ok(())
}

/// Validate a folder color as a `#rrggbb` hex string.
pub fn validate_folder_color(color: &str) -> Result<(), AppError> {
    if !hex_color_regex().is_match(color) {
        return Err(AppError::InvalidInput(format!(
            "Folder color '{}' is not a #rrggbb hex value",
            color
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_rejects_empty_and_separators() {
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("   ").is_err());
        assert!(validate_file_name("a/b.m4a").is_err());
        assert!(validate_file_name("..\\evil").is_err());
        assert!(validate_file_name("meeting notes.m4a").is_ok());
    }

    #[test]
    fn file_name_rejects_overlong() {
        let long = "a".repeat(MAX_FILE_NAME_LENGTH + 1);
        assert!(validate_file_name(&long).is_err());
    }

    #[test]
    fn importance_level_bounds() {
        assert!(validate_importance_level(0).is_err());
        assert!(validate_importance_level(1).is_ok());
        assert!(validate_importance_level(5).is_ok());
        assert!(validate_importance_level(6).is_err());
    }

    #[test]
    fn folder_color_hex() {
        assert!(validate_folder_color("#3B82F6").is_ok());
        assert!(validate_folder_color("#3b82f6").is_ok());
        assert!(validate_folder_color("3B82F6").is_err());
        assert!(validate_folder_color("#3B82F").is_err());
        assert!(validate_folder_color("#GGGGGG").is_err());
    }
}
