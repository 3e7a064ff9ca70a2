//! Integrity digests for generated artifacts.

use appbuild_core::IntegrityToken;
use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha384};

/// SHA-384 of `content`, base64-encoded for an `integrity` attribute.
///
/// Must be given the exact bytes written to disk.
pub fn digest(content: impl AsRef<[u8]>) -> IntegrityToken {
    let hash = Sha384::digest(content.as_ref());
    IntegrityToken::from_base64(STANDARD.encode(hash))
}
