//! Request signature generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Generate a deterministic cache signature from an endpoint path and its
/// query parameters.
///
/// Parameters are sorted before hashing so the same request produces the
/// same signature regardless of parameter order.
pub fn request_signature(endpoint: &str, params: &[(&str, String)]) -> String {
    let mut hasher = Sha256::new();

    hasher.update(endpoint.as_bytes());
    hasher.update(b"|");

    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort_by_key(|(k, _)| *k);

    for (k, v) in sorted_params {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }

    format!("{:x}", hasher.finalize())
}
