use sha2::{Digest, Sha256};

/// One-way digest applied to every password before it leaves the process.
///
/// Lowercase hex SHA-256 of the UTF-8 bytes.
#[must_use]
pub fn hash_password(password: &str) -> String {
    hex_encode(&Sha256::digest(password.as_bytes()))
}

fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
    out
}
