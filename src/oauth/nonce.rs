//! Sources of the per-request nonce and timestamp.

use std::time::{SystemTime, UNIX_EPOCH};

const NONCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const NONCE_LEN: usize = 32;

/// Supplies the nonce and Unix timestamp embedded in each signature.
pub trait NonceSource: Send + Sync {
    /// Returns a fresh random token.
    fn nonce(&self) -> String;

    /// Returns the current Unix time in seconds.
    fn timestamp(&self) -> u64;
}

/// Random nonce and wall-clock timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNonceSource;

impl NonceSource for SystemNonceSource {
    fn nonce(&self) -> String {
        (0..NONCE_LEN)
            .map(|_| NONCE_ALPHABET[rand::random_range(0..NONCE_ALPHABET.len())] as char)
            .collect()
    }

    fn timestamp(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
    }
}

/// Always returns the same nonce and timestamp. Makes signatures reproducible.
#[derive(Debug, Clone)]
pub struct FixedNonceSource {
    nonce: String,
    timestamp: u64,
}

impl FixedNonceSource {
    pub fn new(nonce: impl Into<String>, timestamp: u64) -> Self {
        Self { nonce: nonce.into(), timestamp }
    }
}

impl NonceSource for FixedNonceSource {
    fn nonce(&self) -> String {
        self.nonce.clone()
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
