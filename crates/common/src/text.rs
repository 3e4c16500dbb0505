use sha2::{Digest, Sha256};

/// Render-as-text interface for small closed enumerations.
///
/// The returned name is unique within the type, non-empty, and stable for the
/// lifetime of the program. `Display` impls forward to it so generic
/// formatting code never needs a per-type special case.
pub trait Named {
    fn name(&self) -> &'static str;
}

/// Stable-hash interface for values used as associative-container keys.
///
/// Unlike `std::hash::Hash` with a `RandomState`, the value is identical
/// across processes, platforms, and builds, so it can be persisted or sent
/// to other tools.
pub trait StableHash: Named {
    /// Namespace mixed into the digest so equal names in different types
    /// produce different hashes.
    const HASH_DOMAIN: &'static str;

    fn stable_hash(&self) -> u64 {
        stable_hash_of(Self::HASH_DOMAIN, self.name())
    }
}

/// SHA-256 over `domain`, a separator, and `name`; first 8 bytes as little-endian.
pub fn stable_hash_of(domain: &str, name: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update([0u8]);
    hasher.update(name.as_bytes());
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    u64::from_le_bytes(bytes)
}
