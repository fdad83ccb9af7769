//! Submission correctness checking against a hidden solution fingerprint.
//!
//! The instructor's solution is fingerprinted once at open time and the raw
//! text is discarded; answers are judged by digest equality, never by
//! comparing plaintext. Both sides are trimmed first, so a stray trailing
//! newline does not fail a classroom answer.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use raceboard_types::Fingerprint;

type Blake2b256 = Blake2b<U32>;

/// Compute the one-way fingerprint of a solution or answer string.
pub fn fingerprint(text: &str) -> Fingerprint {
    let mut hasher = Blake2b256::new();
    hasher.update(text.trim().as_bytes());
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    Fingerprint::new(output)
}

/// Whether `answer` matches the stored fingerprint.
pub fn verify(answer: &str, expected: &Fingerprint) -> bool {
    fingerprint(answer) == *expected
}
