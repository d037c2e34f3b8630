//! Content digests for catalog rows using BLAKE3
//!
//! Two independent digests are computed over the same buffer:
//!
//! - the primary digest samples the head, middle and tail of large buffers and
//!   folds the length into its leading bytes. It is cheap and tolerates
//!   collisions; it is stored for reference only.
//! - the secondary digest is BLAKE3 over the whole buffer and is the only
//!   digest used to decide that two files share content.

use blake3::Hasher;

/// Bytes taken from each of the three sample points.
pub const SAMPLE_SIZE: usize = 16 * 1024;

/// Buffers shorter than this are digested in full by the primary digest.
pub const SAMPLE_THRESHOLD: usize = 128 * 1024;

/// Length of the primary digest in bytes.
pub const PRIMARY_DIGEST_LEN: usize = 16;

/// Both digests of one buffer, rendered as lowercase hex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digests {
    pub primary: String,
    pub secondary: String,
}

/// Compute both digests for a byte buffer
pub fn compute_digests(content: &[u8]) -> Digests {
    Digests {
        primary: hex::encode(compute_primary_digest(content)),
        secondary: hex::encode(compute_secondary_digest(content)),
    }
}

/// Sampled digest
///
/// digest = varint(len) || hash(len || samples)[varint_len..16]
pub fn compute_primary_digest(content: &[u8]) -> [u8; PRIMARY_DIGEST_LEN] {
    let len = content.len();
    let mut hasher = Hasher::new();
    hasher.update(&(len as u64).to_le_bytes());

    if len < SAMPLE_THRESHOLD {
        hasher.update(content);
    } else {
        let middle = len / 2;
        hasher.update(&content[..SAMPLE_SIZE]);
        hasher.update(&content[middle..middle + SAMPLE_SIZE]);
        hasher.update(&content[len - SAMPLE_SIZE..]);
    }

    let mut digest = [0u8; PRIMARY_DIGEST_LEN];
    digest.copy_from_slice(&hasher.finalize().as_bytes()[..PRIMARY_DIGEST_LEN]);

    let prefix = encode_varint(len as u64);
    digest[..prefix.len()].copy_from_slice(&prefix);
    digest
}

/// Full-content BLAKE3 digest
pub fn compute_secondary_digest(content: &[u8]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}

/// Unsigned LEB128. A u64 needs at most 10 bytes.
fn encode_varint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(10);
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}
