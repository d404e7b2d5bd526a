//! Book id generation.

use rand::Rng;

const ALPHABET: &[u8; 64] = b"_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of generated ids. 21 symbols of 6 bits gives 126 bits of entropy.
pub const ID_LEN: usize = 21;

/// Returns a random, URL-safe id (`A-Za-z0-9_-`).
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generates ids until one is not `taken`.
pub fn generate_unique_id(mut taken: impl FnMut(&str) -> bool) -> String {
    loop {
        let id = generate_id();
        if !taken(&id) {
            return id;
        }
    }
}
