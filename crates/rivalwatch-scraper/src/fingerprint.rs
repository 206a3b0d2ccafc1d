//! Content fingerprints for change detection.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the normalized body text.
///
/// Only ever compared for equality against the previously stored value.
#[must_use]
pub fn fingerprint(body_text: &str) -> String {
    format!("{:x}", Sha256::digest(body_text.as_bytes()))
}
