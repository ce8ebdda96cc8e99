//! Seed derivation for the channel sequencer.
//!
//! The seed is a plain 32-byte value passed explicitly into every operation,
//! so concurrent embeds/extracts never share RNG state.

use hkdf::Hkdf;
use sha2::Sha256;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Fixed HKDF salt. Changing it changes every channel order ever produced.
const SEED_SALT: &[u8] = b"steglsb-seed-v1";
/// HKDF info string (domain separation for the channel-order seed).
const SEED_INFO: &[u8] = b"channel-order";

/// Length of a [`Seed`] in bytes (one ChaCha20 key).
pub const SEED_LEN: usize = 32;

/// Deterministic value that fully determines the channel permutation.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Wrap raw seed bytes.
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Derive a seed from a passphrase.
    ///
    /// HKDF-SHA256, salt `steglsb-seed-v1`, IKM = UTF-8 passphrase,
    /// info `channel-order`, 32 bytes of output. Any string, including the
    /// empty one, is accepted.
    pub fn from_passphrase(passphrase: &str) -> Self {
        type HkdfSha256 = Hkdf<Sha256>;

        let hk = HkdfSha256::new(Some(SEED_SALT), passphrase.as_bytes());
        let mut okm = Zeroizing::new([0u8; SEED_LEN]);
        hk.expand(SEED_INFO, &mut *okm)
            .expect("HKDF expand should never fail with valid length");
        Self(*okm)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passphrase_derivation_is_deterministic() {
        assert_eq!(Seed::from_passphrase("k"), Seed::from_passphrase("k"));
        assert_ne!(Seed::from_passphrase("k"), Seed::from_passphrase("K"));
        assert_ne!(Seed::from_passphrase(""), Seed::from_passphrase(" "));
    }

    #[test]
    fn test_passphrase_known_answer() {
        // HKDF-SHA256(salt "steglsb-seed-v1", ikm "k", info "channel-order")
        let expected: [u8; SEED_LEN] = [
            0xcb, 0x74, 0x84, 0x88, 0x27, 0x97, 0x90, 0x6a, 0x75, 0xeb, 0xd4, 0x5e, 0xe8, 0xe6,
            0x52, 0xf1, 0xcd, 0xaa, 0xac, 0xfd, 0x52, 0x92, 0x3f, 0x4e, 0xb5, 0x2b, 0x4d, 0x16,
            0x09, 0x0f, 0x4e, 0xf1,
        ];
        assert_eq!(Seed::from_passphrase("k").as_bytes(), &expected);
    }

    #[test]
    fn test_debug_hides_bytes() {
        let seed = Seed::from_bytes([0xAB; SEED_LEN]);
        let printed = format!("{:?}", seed);
        assert_eq!(printed, "Seed(..)");
        assert_eq!(seed.as_bytes(), &[0xAB; SEED_LEN]);
    }
}
