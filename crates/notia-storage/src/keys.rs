//! Shared key generation for storage backends.
//!
//! Key format: `uploads/{owner_id}/{blob_name}`. The blob name is the trailing
//! path segment of an upload's `file_url`.

use uuid::Uuid;

/// Generate a storage key for the given owner and blob name.
///
/// All backends must use this format for consistency.
pub fn generate_storage_key(owner_id: Uuid, blob_name: &str) -> String {
    format!(
        "{}/{}/{}",
        notia_core::constants::STORAGE_KEY_PREFIX,
        owner_id,
        blob_name
    )
}

/// Extract the blob name from an upload's `file_url`: the trailing, non-empty
/// path segment.
pub fn blob_name_from_url(file_url: &str) -> &str {
    file_url
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(file_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_owner_scoped() {
        let owner = Uuid::new_v4();
        assert_eq!(
            generate_storage_key(owner, "abc.m4a"),
            format!("uploads/{}/abc.m4a", owner)
        );
    }

    #[test]
    fn blob_name_from_url_takes_trailing_segment() {
        assert_eq!(
            blob_name_from_url("https://blob.example.com/bucket/abc.m4a"),
            "abc.m4a"
        );
        assert_eq!(blob_name_from_url("abc.m4a"), "abc.m4a");
        assert_eq!(blob_name_from_url("bucket/abc.m4a/"), "abc.m4a");
    }
}
