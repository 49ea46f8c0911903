use chrono::Utc;
use rand::Rng;

/// Characters a nonce is drawn from.
pub const NONCE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Current Unix time in seconds as a decimal string.
pub fn timestamp() -> String {
    Utc::now().timestamp().to_string()
}

/// Random alphanumeric nonce of `len` characters.
///
/// Uses the thread-local generator, which is seeded from the OS once and
/// never re-seeded per call. Every character of `NONCE_ALPHABET` can occur.
pub fn generate_nonce(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(NONCE_ALPHABET[rng.random_range(0..NONCE_ALPHABET.len())]))
        .collect()
}
