//! Random short code generation.

use base64::Engine as _;

// 6 random bytes encode to exactly 8 URL-safe characters, no padding.
const CODE_ENTROPY_BYTES: usize = 6;

/// Generates an 8-character URL-safe short code from OS entropy.
///
/// Codes are not checked for uniqueness here; allocation relies on the
/// store's unique constraint and retries on collision.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut entropy = [0u8; CODE_ENTROPY_BYTES];
    getrandom::fill(&mut entropy).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(entropy)
}
