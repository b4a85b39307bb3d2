use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Authentication tag length in bytes, fixed by the SHA-256 digest size.
pub const TAG_SIZE: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Computes and verifies per-block HMAC-SHA256 tags under a fixed key.
///
/// The keyed state is prepared once and cloned per block, so tagging a block
/// never re-derives the key schedule.
#[derive(Clone)]
pub struct Authenticator {
    mac: HmacSha256,
}

impl Authenticator {
    pub fn new(key: &[u8]) -> Self {
        let mac = HmacSha256::new_from_slice(key)
            .expect("HMAC-SHA256 accepts keys of any length");
        Self { mac }
    }

    /// Compute the tag over a full block. Deterministic: the same key and
    /// block always yield the same tag.
    pub fn tag(&self, block: &[u8]) -> [u8; TAG_SIZE] {
        let mut mac = self.mac.clone();
        mac.update(block);
        mac.finalize().into_bytes().into()
    }

    /// Recompute the tag over `block` and compare it against `tag` in
    /// constant time. A length mismatch also fails.
    pub fn verify(&self, block: &[u8], tag: &[u8]) -> bool {
        let mut mac = self.mac.clone();
        mac.update(block);
        mac.verify_slice(tag).is_ok()
    }
}
