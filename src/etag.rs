use sha2::{Digest, Sha256};

use crate::models::ArtifactStore;

/// Content hash of a store used as the optimistic-concurrency ETag.
/// Validation errors are transient request state and never affect the hash.
pub fn etag_for(store: &ArtifactStore) -> String {
    let mut clean = store.clone();
    clean.errors.clear();

    let mut hasher = Sha256::new();
    // Struct field order is fixed, so this serialization is canonical.
    hasher.update(serde_json::to_string(&clean).unwrap_or_default());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    #[test]
    fn test_etag_matches_hash_of_serialized_store() {
        let store = ArtifactStore::new("s3", "cd.go.artifact.s3");

        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_string(&store).unwrap());
        let expected = format!("{:x}", hasher.finalize());

        assert_eq!(etag_for(&store), expected);
    }

    #[test]
    fn test_etag_ignores_attached_errors() {
        let clean = ArtifactStore::new("s3", "cd.go.artifact.s3");
        let mut with_errors = clean.clone();
        with_errors.add_error("id", "taken");

        assert_eq!(etag_for(&clean), etag_for(&with_errors));
    }

    #[test]
    fn test_etag_differs_for_different_stores() {
        let a = ArtifactStore::new("s3", "cd.go.artifact.s3");
        let b = ArtifactStore::new("docker", "cd.go.artifact.docker");
        assert_ne!(etag_for(&a), etag_for(&b));
    }
}
