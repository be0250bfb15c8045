#![no_std]
#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Implements FIPS 203: Module-Lattice-Based Key-Encapsulation Mechanism Standard.
//! See <https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.203.pdf>

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::traits::SerDes;

// Functionality map per FIPS 203:
//
// Keccak-p[1600, 24] permutation                           --> keccak.rs
// Sponge construction (pad10*1, domain separation)         --> sponge.rs
// SHA3-256/512, SHAKE-128/256, H/G/J/PRF/XOF                --> hash.rs
// Algorithm 2 BitsToBytes / Algorithm 3 BytesToBits         --> folded into byte_fns.rs
// Algorithm 4 ByteEncode_d / Algorithm 5 ByteDecode_d       --> byte_fns.rs
// Compress_d / Decompress_d (section 4.7)                  --> byte_fns.rs
// Algorithm 6 NTT(f) / Algorithm 7 NTT^-1(f_hat)            --> ntt.rs
// Algorithm 8 BaseCaseMultiply / Algorithm 9 MultiplyNTTs   --> ntt.rs
// vector/matrix algebra (2.11-2.14)                         --> linalg.rs
// Algorithm 7 SampleNTT / Algorithm 8 SamplePolyCBD_eta     --> sampling.rs
// Algorithm 13-15 K-PKE.KeyGen/Encrypt/Decrypt              --> k_pke.rs
// Algorithm 16-21 ML-KEM.KeyGen/Encaps/Decaps (+ _internal) --> ml_kem.rs
//
// The three parameter sets are modules in this file, with the common functionality injected by
// the `functionality!` macro below.

mod byte_fns;
mod error;
mod hash;
mod k_pke;
mod keccak;
mod linalg;
mod ml_kem;
mod ntt;
mod sampling;
mod sponge;
mod types;

/// All functionality is covered by traits, so consumers can use trait objects if desired.
pub mod traits;

/// Errors returned by the ML-KEM public API.
pub use error::Error;

// Shared across all three parameter sets.
const Q: u32 = 3329;
const ZETA: u32 = 17;

/// Length, in bytes, of the shared secret key produced by every ML-KEM parameter set.
pub const SSK_LEN: usize = 32;

/// The shared secret established by encapsulation/decapsulation.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecretKey([u8; SSK_LEN]);

impl SerDes for SharedSecretKey {
    type ByteArray = [u8; SSK_LEN];

    fn into_bytes(self) -> Self::ByteArray { self.0 }

    fn try_from_bytes(ssk: Self::ByteArray) -> Result<Self, Error> { Ok(SharedSecretKey(ssk)) }
}

// Constant-time comparison: a shared secret is exactly the kind of value an attacker should not
// be able to distinguish via timing.
impl PartialEq for SharedSecretKey {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for SharedSecretKey {}

// Injected into each parameter-set module below; wires the const-generic core algorithms in
// `k_pke`/`ml_kem` to parameter-set-specific, fixed-size key and ciphertext types.
macro_rules! functionality {
    () => {
        const ETA1_64: usize = ETA1 as usize * 64;
        const ETA2_64: usize = ETA2 as usize * 64;

        use crate::byte_fns::byte_decode;
        use crate::hash::h;
        use crate::ml_kem::{
            ml_kem_decaps, ml_kem_encaps, ml_kem_key_gen, ml_kem_key_gen_internal,
        };
        use crate::traits::{Decaps, Encaps, KeyGen, SerDes};
        use crate::types::Zq;
        use crate::{Error, SharedSecretKey};
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};

        /// Encapsulation key for this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct EncapsKey([u8; EK_LEN]);

        /// Decapsulation key for this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct DecapsKey([u8; DK_LEN]);

        /// Ciphertext for this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct CipherText([u8; CT_LEN]);

        /// Key-generation entry point for this parameter set; see [`KeyGen`].
        pub struct KG();

        impl KeyGen for KG {
            type DecapsKey = DecapsKey;
            type EncapsKey = EncapsKey;

            fn try_keygen_with_rng(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(EncapsKey, DecapsKey), Error> {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                ml_kem_key_gen::<K, ETA1_64>(rng, &mut ek, &mut dk)?;
                Ok((EncapsKey(ek), DecapsKey(dk)))
            }

            fn keygen_from_seed(d: [u8; 32], z: [u8; 32]) -> (EncapsKey, DecapsKey) {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                ml_kem_key_gen_internal::<K, ETA1_64>(d, z, &mut ek, &mut dk);
                (EncapsKey(ek), DecapsKey(dk))
            }
        }

        impl Encaps for EncapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;

            fn try_encaps_with_rng(
                &self, rng: &mut impl CryptoRngCore,
            ) -> Result<(SharedSecretKey, CipherText), Error> {
                let mut ct = [0u8; CT_LEN];
                let ssk = ml_kem_encaps::<K, ETA1_64, ETA2_64>(rng, DU, DV, &self.0, &mut ct)?;
                Ok((ssk, CipherText(ct)))
            }
        }

        impl Decaps for DecapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;

            fn try_decaps(&self, ct: &CipherText) -> Result<SharedSecretKey, Error> {
                ml_kem_decaps::<K, ETA1_64, ETA2_64, CT_LEN>(DU, DV, &self.0, &ct.0)
            }
        }

        impl SerDes for EncapsKey {
            type ByteArray = [u8; EK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ek: Self::ByteArray) -> Result<Self, Error> {
                // "the byte array containing the encapsulation key correctly decodes to an
                // array of integers modulo q without any modular reductions" (FIPS 203 section 7).
                for i in 0..K {
                    let _: [Zq; 256] =
                        byte_decode(12, &ek[384 * i..384 * (i + 1)]).map_err(|_| Error::InvalidPublicKey)?;
                }
                Ok(EncapsKey(ek))
            }
        }

        impl SerDes for DecapsKey {
            type ByteArray = [u8; DK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(dk: Self::ByteArray) -> Result<Self, Error> {
                // section 7: the encoded H(ek) inside dk must match the hash of the encoded ek
                // also inside dk.
                let len_ek_pke = 384 * K + 32;
                let ek_in_dk = &dk[384 * K..384 * K + len_ek_pke];
                let h_in_dk = &dk[384 * K + len_ek_pke..384 * K + len_ek_pke + 32];
                if h(ek_in_dk) != h_in_dk {
                    return Err(Error::InvalidSecretKey);
                }
                Ok(DecapsKey(dk))
            }
        }

        impl SerDes for CipherText {
            type ByteArray = [u8; CT_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ct: Self::ByteArray) -> Result<Self, Error> { Ok(CipherText(ct)) }
        }
    };
}

/// ML-KEM-512: security category 1 (FIPS 203 table 2).
#[cfg(feature = "ml-kem-512")]
pub mod ml_kem_512 {
    //! Typical usage:
    //! 1. The originator calls [`KG::try_keygen`](super::traits::KeyGen::try_keygen) to get an
    //!    encaps key and a decaps key.
    //! 2. The originator serializes and sends the encaps key to the remote party.
    //! 3. The remote party deserializes it and calls
    //!    [`try_encaps`](super::traits::Encaps::try_encaps) to get a shared secret and a
    //!    ciphertext.
    //! 4. The remote party serializes and sends the ciphertext to the originator.
    //! 5. The originator deserializes it and calls
    //!    [`try_decaps`](super::traits::Decaps::try_decaps) to recover the same shared secret.

    const K: usize = 2;
    const ETA1: u32 = 3;
    const ETA2: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;

    /// Serialized encapsulation key length, in bytes.
    pub const EK_LEN: usize = 800;
    /// Serialized decapsulation key length, in bytes.
    pub const DK_LEN: usize = 1632;
    /// Serialized ciphertext length, in bytes.
    pub const CT_LEN: usize = 768;

    functionality!();
}

/// ML-KEM-768: security category 3 (FIPS 203 table 2).
#[cfg(feature = "ml-kem-768")]
pub mod ml_kem_768 {
    //! See [`ml_kem_512`](super::ml_kem_512) for the usage flow; the types here are identical in
    //! shape but sized for this parameter set.

    const K: usize = 3;
    const ETA1: u32 = 2;
    const ETA2: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;

    /// Serialized encapsulation key length, in bytes.
    pub const EK_LEN: usize = 1184;
    /// Serialized decapsulation key length, in bytes.
    pub const DK_LEN: usize = 2400;
    /// Serialized ciphertext length, in bytes.
    pub const CT_LEN: usize = 1088;

    functionality!();
}

/// ML-KEM-1024: security category 5 (FIPS 203 table 2).
#[cfg(feature = "ml-kem-1024")]
pub mod ml_kem_1024 {
    //! See [`ml_kem_512`](super::ml_kem_512) for the usage flow; the types here are identical in
    //! shape but sized for this parameter set.

    const K: usize = 4;
    const ETA1: u32 = 2;
    const ETA2: u32 = 2;
    const DU: u32 = 11;
    const DV: u32 = 5;

    /// Serialized encapsulation key length, in bytes.
    pub const EK_LEN: usize = 1568;
    /// Serialized decapsulation key length, in bytes.
    pub const DK_LEN: usize = 3168;
    /// Serialized ciphertext length, in bytes.
    pub const CT_LEN: usize = 1568;

    functionality!();
}
