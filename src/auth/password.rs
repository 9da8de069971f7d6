// src/auth/password.rs
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::auth::token::hashes_equal;

pub const SALT_BYTES: usize = 16;

pub fn generate_salt() -> Vec<u8> {
    let mut salt = vec![0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Salted SHA-256 for the seeded operator password.
pub fn hash_password(password: &str, salt: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

pub fn verify_password(password: &str, salt: &[u8], expected_hash: &[u8]) -> bool {
    let candidate = hash_password(password, salt);
    hashes_equal(&candidate, expected_hash)
}
