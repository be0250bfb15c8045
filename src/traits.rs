//! Traits covering key generation, encapsulation, decapsulation, and serialization, implemented
//! identically by each parameter-set module (see the `functionality!` macro in `lib.rs`). Defined
//! as traits rather than inherent methods so callers can hold a parameter set behind a trait
//! object if they don't need to fix it at compile time.

use rand_core::{CryptoRng, CryptoRngCore, RngCore};

#[cfg(feature = "default-rng")]
use rand_core::OsRng;

use crate::Error;

/// Generates an encapsulation/decapsulation key pair for a fixed parameter set.
pub trait KeyGen {
    /// The (public) encapsulation key sent from the originator to the remote party.
    type EncapsKey;
    /// The (private) decapsulation key used by the originator to recover the shared secret.
    type DecapsKey;

    /// Generates a key pair using the OS default random number generator.
    ///
    /// # Errors
    /// Returns an error if the random number generator fails.
    #[cfg(feature = "default-rng")]
    fn try_keygen() -> Result<(Self::EncapsKey, Self::DecapsKey), Error> {
        Self::try_keygen_with_rng(&mut OsRng)
    }

    /// Generates a key pair using a caller-supplied random number generator.
    ///
    /// # Errors
    /// Returns an error if the random number generator fails.
    fn try_keygen_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::EncapsKey, Self::DecapsKey), Error>;

    /// Generates a key pair deterministically from the two seeds consumed by
    /// `ML-KEM.KeyGen_internal` (`d` and `z`, FIPS 203 Algorithm 16). Exposed for known-answer
    /// testing; `try_keygen_with_rng` is the entry point for production use.
    #[must_use]
    fn keygen_from_seed(d: [u8; 32], z: [u8; 32]) -> (Self::EncapsKey, Self::DecapsKey);
}

/// Generates a shared secret and ciphertext from an encapsulation key.
pub trait Encaps {
    /// The shared secret key type produced alongside the ciphertext.
    type SharedSecretKey;
    /// The ciphertext type sent to the decapsulating party.
    type CipherText;

    /// Encapsulates using the OS default random number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails.
    #[cfg(feature = "default-rng")]
    fn try_encaps(&self) -> Result<(Self::SharedSecretKey, Self::CipherText), Error> {
        self.try_encaps_with_rng(&mut OsRng)
    }

    /// Encapsulates using a caller-supplied random number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails or the encapsulation key is
    /// malformed.
    fn try_encaps_with_rng(
        &self, rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::SharedSecretKey, Self::CipherText), Error>;

    /// Encapsulates deterministically from the 32-byte message consumed by
    /// `ML-KEM.Encaps_internal` (FIPS 203 Algorithm 17). Exposed for known-answer testing.
    ///
    /// # Errors
    /// Returns an error if the encapsulation key is malformed.
    fn encaps_from_seed(&self, m: &[u8; 32]) -> Result<(Self::SharedSecretKey, Self::CipherText), Error> {
        self.try_encaps_with_rng(&mut DeterministicRng { data: *m })
    }
}

/// Recovers the shared secret from a decapsulation key and a ciphertext.
pub trait Decaps {
    /// The ciphertext type received from the encapsulating party.
    type CipherText;
    /// The shared secret key type recovered from decapsulation.
    type SharedSecretKey;

    /// Recovers the shared secret. Invalid ciphertexts are never rejected outright (see the
    /// module docs on implicit rejection); only a malformed `ct` byte length is an `Err`.
    ///
    /// # Errors
    /// Returns an error only if the ciphertext fails its fixed-length/structural check.
    fn try_decaps(&self, ct: &Self::CipherText) -> Result<Self::SharedSecretKey, Error>;
}

/// Serializes and deserializes the fixed-size byte encodings of keys and ciphertexts.
pub trait SerDes {
    /// The fixed-size byte array type used for serialization.
    type ByteArray;

    /// Serializes `self` to its fixed-size byte encoding.
    fn into_bytes(self) -> Self::ByteArray;

    /// Deserializes a fixed-size byte encoding, validating it per FIPS 203 section 7.
    ///
    /// # Errors
    /// Returns an error on malformed input (e.g. a coefficient `>= q`, or an encaps/decaps key
    /// hash mismatch).
    fn try_from_bytes(bytes: Self::ByteArray) -> Result<Self, Error>
    where
        Self: Sized;
}

/// Feeds a fixed 32-byte value as RNG output, so [`Encaps::encaps_from_seed`] can reuse the
/// `try_encaps_with_rng` code path deterministically.
struct DeterministicRng {
    data: [u8; 32],
}

impl RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 { unimplemented!("only try_fill_bytes is used by this crate") }

    fn next_u64(&mut self) -> u64 { unimplemented!("only try_fill_bytes is used by this crate") }

    fn fill_bytes(&mut self, out: &mut [u8]) { out.copy_from_slice(&self.data); }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_core::Error> {
        out.copy_from_slice(&self.data);
        Ok(())
    }
}

impl CryptoRng for DeterministicRng {}
