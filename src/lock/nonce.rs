//! Ownership nonces.

use crate::error::Result;
use rand::RngCore;
use rand::rngs::OsRng;

/// Length of a lock nonce in bytes.
pub const NONCE_LEN: usize = 20;

pub(crate) type Nonce = [u8; NONCE_LEN];

/// Draw a fresh nonce from the OS random source.
pub(crate) fn generate() -> Result<Nonce> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.try_fill_bytes(&mut nonce)?;
    Ok(nonce)
}

/// Lowercase hex encoding, used to name staging directories.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
