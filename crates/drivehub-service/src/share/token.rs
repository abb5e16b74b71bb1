//! Share link token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

/// Generates opaque, URL-safe share tokens from the thread-local CSPRNG.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    /// Random bytes per token before encoding.
    token_bytes: usize,
}

impl TokenGenerator {
    /// Creates a generator producing `token_bytes` bytes of entropy per token.
    pub fn new(token_bytes: usize) -> Self {
        Self { token_bytes }
    }

    /// Generates a fresh token.
    pub fn generate(&self) -> String {
        let mut bytes = vec![0u8; self.token_bytes];
        rand::rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new(32)
    }
}
