//! Stored asset naming.
//!
//! Uploaded files are stored under a freshly generated name so that assets
//! are never overwritten and client-supplied filenames never reach the
//! filesystem. The only thing taken from the original name is the
//! extension, and even that is sanitized.

use uuid::Uuid;

/// Longest extension we will carry over from a client filename.
const MAX_EXTENSION_LEN: usize = 8;

/// Extension used when the client filename has none (or a junk one).
const FALLBACK_EXTENSION: &str = "bin";

/// Extract a safe, lowercase extension from a client filename.
///
/// Only ASCII alphanumeric extensions up to [`MAX_EXTENSION_LEN`] chars
/// qualify; anything else falls back to `bin`.
pub fn infer_extension(original_name: &str) -> String {
    let ext = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("");

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return FALLBACK_EXTENSION.to_string();
    }

    ext.to_ascii_lowercase()
}

/// Generate a stored filename for an upload: a random UUID plus the
/// extension inferred from `original_name`.
pub fn stored_file_name(original_name: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), infer_extension(original_name))
}
