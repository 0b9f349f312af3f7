//! Checksum calculation for schedule snapshot deduplication.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of serialized snapshot content.
///
/// Saving a schedule stores this checksum in the planner session; an
/// identical re-save is detected and skipped.
///
/// # Arguments
/// * `content` - JSON string content of the snapshot
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}
