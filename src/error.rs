//! Error kinds returned at the public surface (section 7). Internal helpers use
//! `debug_assert!`/`unreachable!` for invariants that can only be violated by a bug in this
//! crate; only conditions reachable from untrusted input or the entropy source surface here.

use core::fmt;

/// Errors returned by the ML-KEM public API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The encapsulation key has the wrong length, or one of its 384-byte blocks decodes to a
    /// coefficient `>= q` (the modulus check from page 2 of FIPS 203).
    InvalidPublicKey,
    /// The decapsulation key has the wrong length, or the encoded `H(ek)` inside it does not
    /// match the hash of the encoded `ek` also inside it.
    InvalidSecretKey,
    /// The ciphertext has the wrong length.
    InvalidCiphertext,
    /// The configured entropy source failed to produce randomness.
    EntropyFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidPublicKey => "invalid public key: wrong length or coefficient >= q",
            Error::InvalidSecretKey => "invalid secret key: wrong length or ek hash mismatch",
            Error::InvalidCiphertext => "invalid ciphertext: wrong length",
            Error::EntropyFailure => "entropy source failed",
        };
        f.write_str(msg)
    }
}
