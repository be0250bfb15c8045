//! Algorithm 16-21: the Fujisaki-Okamoto-transformed ML-KEM built on top of [`crate::k_pke`].
//! Implicit rejection substitutes a pseudorandom key for a failed re-encryption check rather than
//! returning an error, via a constant-time conditional select, so a decapsulation failure is
//! indistinguishable from a match to an observer without the decapsulation key.

use rand_core::CryptoRngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};

use crate::byte_fns::{byte_decode, byte_encode};
use crate::hash::{g, h, j};
use crate::k_pke::{k_pke_decrypt, k_pke_encrypt, k_pke_key_gen};
use crate::{Error, SharedSecretKey};

/// Algorithm 16 `ML-KEM.KeyGen_internal(d, z)`: derive the encaps/decaps keys from the two
/// 32-byte seeds, deterministically.
pub(crate) fn ml_kem_key_gen_internal<const K: usize, const ETA1_64: usize>(
    d: [u8; 32], z: [u8; 32], ek: &mut [u8], dk: &mut [u8],
) {
    debug_assert_eq!(ek.len(), 384 * K + 32, "Alg 16: ek len not 384 * K + 32");
    debug_assert_eq!(dk.len(), 768 * K + 96, "Alg 16: dk len not 768 * K + 96");

    let p1 = 384 * K;
    k_pke_key_gen::<K, ETA1_64>(d, ek, &mut dk[..p1]);

    // dk <- dk_PKE || ek || H(ek) || z
    let h_ek = h(ek);
    let p2 = p1 + ek.len();
    let p3 = p2 + h_ek.len();
    dk[p1..p2].copy_from_slice(ek);
    dk[p2..p3].copy_from_slice(&h_ek);
    dk[p3..].copy_from_slice(&z);
}

/// Algorithm 17 `ML-KEM.Encaps_internal(ek, m)`: derive the shared secret and ciphertext from an
/// encapsulation key and a 32-byte message, deterministically.
fn ml_kem_encaps_internal<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    du: u32, dv: u32, m: &[u8; 32], ek: &[u8], ct: &mut [u8],
) -> Result<SharedSecretKey, Error> {
    let h_ek = h(ek);
    let (k, r) = g(&[m, &h_ek]);
    k_pke_encrypt::<K, ETA1_64, ETA2_64>(du, dv, ek, m, &r, ct)?;
    Ok(SharedSecretKey(k))
}

/// Algorithm 18 `ML-KEM.Decaps_internal(dk, c)`: recover the shared secret, implicitly rejecting
/// a `c` that does not re-encrypt to itself.
fn ml_kem_decaps_internal<const K: usize, const ETA1_64: usize, const ETA2_64: usize, const CT_LEN: usize>(
    du: u32, dv: u32, dk: &[u8], ct: &[u8; CT_LEN],
) -> Result<SharedSecretKey, Error> {
    debug_assert_eq!(dk.len(), 768 * K + 96, "Alg 18: dk len not 768 * K + 96");

    let dk_pke = &dk[0..384 * K];
    let ek_pke = &dk[384 * K..768 * K + 32];
    let h_slice = &dk[768 * K + 32..768 * K + 64];
    let z: &[u8; 32] = dk[768 * K + 64..768 * K + 96].try_into().expect("32-byte slice");

    let m_prime = k_pke_decrypt::<K>(du, dv, dk_pke, ct)?;
    let (mut k_prime, r_prime) = g(&[&m_prime, h_slice]);
    let k_bar = j(z, ct);

    let mut c_prime = [0u8; CT_LEN];
    k_pke_encrypt::<K, ETA1_64, ETA2_64>(du, dv, ek_pke, &m_prime, &r_prime, &mut c_prime[0..ct.len()])?;

    // If c != c', substitute the pseudorandom k_bar for k_prime; this select runs for every
    // decapsulation so timing does not reveal which branch was taken.
    k_prime.conditional_assign(&k_bar, ct.ct_ne(&c_prime));

    Ok(SharedSecretKey(k_prime))
}

/// Algorithm 19 `ML-KEM.KeyGen()`: draw fresh `d`/`z` seeds from `rng` and run key generation.
pub(crate) fn ml_kem_key_gen<const K: usize, const ETA1_64: usize>(
    rng: &mut impl CryptoRngCore, ek: &mut [u8], dk: &mut [u8],
) -> Result<(), Error> {
    let mut d = [0u8; 32];
    rng.try_fill_bytes(&mut d).map_err(|_| Error::EntropyFailure)?;
    let mut z = [0u8; 32];
    rng.try_fill_bytes(&mut z).map_err(|_| Error::EntropyFailure)?;

    ml_kem_key_gen_internal::<K, ETA1_64>(d, z, ek, dk);
    Ok(())
}

/// Algorithm 20 `ML-KEM.Encaps(ek)`: draw a fresh message from `rng` and encapsulate.
///
/// Confirms `ek` passes the modulus check (`ek == ByteEncode_12(ByteDecode_12(ek))`) before use;
/// an externally supplied `ek` is also validated by `EncapsKey::try_from_bytes`, but this keeps
/// the internal algorithm self-contained for direct callers.
pub(crate) fn ml_kem_encaps<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    rng: &mut impl CryptoRngCore, du: u32, dv: u32, ek: &[u8], ct: &mut [u8],
) -> Result<SharedSecretKey, Error> {
    debug_assert_eq!(ek.len(), 384 * K + 32, "Alg 20: ek len not 384 * K + 32");
    for i in 0..K {
        let mut re_encoded = [0u8; 384];
        let decoded = byte_decode(12, &ek[384 * i..384 * (i + 1)]).map_err(|_| Error::InvalidPublicKey)?;
        byte_encode(12, &decoded, &mut re_encoded);
        if re_encoded != ek[384 * i..384 * (i + 1)] {
            return Err(Error::InvalidPublicKey);
        }
    }

    let mut m = [0u8; 32];
    rng.try_fill_bytes(&mut m).map_err(|_| Error::EntropyFailure)?;
    ml_kem_encaps_internal::<K, ETA1_64, ETA2_64>(du, dv, &m, ek, ct)
}

/// Algorithm 21 `ML-KEM.Decaps(dk, c)`.
pub(crate) fn ml_kem_decaps<const K: usize, const ETA1_64: usize, const ETA2_64: usize, const CT_LEN: usize>(
    du: u32, dv: u32, dk: &[u8], ct: &[u8; CT_LEN],
) -> Result<SharedSecretKey, Error> {
    debug_assert_eq!(ct.len(), 32 * (du as usize * K + dv as usize), "Alg 21: ct len mismatch");
    debug_assert_eq!(dk.len(), 768 * K + 96, "Alg 21: dk len not 768 * K + 96");
    ml_kem_decaps_internal::<K, ETA1_64, ETA2_64, CT_LEN>(du, dv, dk, ct)
}

#[cfg(test)]
mod tests {
    use rand_core::SeedableRng;

    use super::{ml_kem_decaps, ml_kem_encaps, ml_kem_key_gen};

    const ETA1_64: usize = 3 * 64;
    const ETA2_64: usize = 2 * 64;
    const DU: u32 = 10;
    const DV: u32 = 4;
    const K: usize = 2;
    const EK_LEN: usize = 800;
    const DK_LEN: usize = 1632;
    const CT_LEN: usize = 768;

    #[test]
    fn full_round_trip_yields_matching_shared_secret() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        let mut ek = [0u8; EK_LEN];
        let mut dk = [0u8; DK_LEN];
        ml_kem_key_gen::<K, ETA1_64>(&mut rng, &mut ek, &mut dk).unwrap();

        let mut ct = [0u8; CT_LEN];
        let ssk_enc = ml_kem_encaps::<K, ETA1_64, ETA2_64>(&mut rng, DU, DV, &ek, &mut ct).unwrap();
        let ssk_dec = ml_kem_decaps::<K, ETA1_64, ETA2_64, CT_LEN>(DU, DV, &dk, &ct).unwrap();

        assert_eq!(ssk_enc, ssk_dec);
    }

    #[test]
    fn tampered_ciphertext_implicitly_rejects_without_error() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let mut ek = [0u8; EK_LEN];
        let mut dk = [0u8; DK_LEN];
        ml_kem_key_gen::<K, ETA1_64>(&mut rng, &mut ek, &mut dk).unwrap();

        let mut ct = [0u8; CT_LEN];
        let ssk_enc = ml_kem_encaps::<K, ETA1_64, ETA2_64>(&mut rng, DU, DV, &ek, &mut ct).unwrap();
        ct[0] ^= 0xFF;

        // decapsulation still succeeds structurally but returns an unrelated secret
        let ssk_dec = ml_kem_decaps::<K, ETA1_64, ETA2_64, CT_LEN>(DU, DV, &dk, &ct).unwrap();
        assert_ne!(ssk_enc, ssk_dec);
    }

    #[test]
    fn malformed_encaps_key_is_rejected() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        let ff_ek = [0xFFu8; EK_LEN];
        let mut ct = [0u8; CT_LEN];
        let res = ml_kem_encaps::<K, ETA1_64, ETA2_64>(&mut rng, DU, DV, &ff_ek, &mut ct);
        assert_eq!(res, Err(crate::Error::InvalidPublicKey));
    }
}
