//! Algorithm 13-15, K-PKE: the IND-CPA-secure public-key encryption scheme that ML-KEM wraps
//! with the Fujisaki-Okamoto transform (see [`crate::ml_kem`]).

use crate::byte_fns::{byte_decode, byte_encode, compress_vector, decompress_vector};
use crate::hash::{g, prf, Xof};
use crate::linalg::{add_vecs, dot_t_prod, mul_mat_t_vec, mul_mat_vec};
use crate::ntt::{ntt, ntt_inv};
use crate::sampling::{sample_ntt, sample_poly_cbd};
use crate::types::Zq;
use crate::Error;

/// Algorithm 13 `K-PKE.KeyGen(d)`: derive an encryption key and a decryption key from a 32-byte
/// seed.
pub(crate) fn k_pke_key_gen<const K: usize, const ETA1_64: usize>(
    d: [u8; 32], ek_pke: &mut [u8], dk_pke: &mut [u8],
) {
    debug_assert_eq!(ek_pke.len(), 384 * K + 32, "Alg 13: ek_pke not 384 * K + 32");
    debug_assert_eq!(dk_pke.len(), 384 * K, "Alg 13: dk_pke not 384 * K");

    // (rho, sigma) <- G(d || K); the trailing length byte domain-separates the parameter sets.
    let mut seed = [0u8; 33];
    seed[0..32].copy_from_slice(&d);
    seed[32] = K.to_le_bytes()[0];
    let (rho, sigma) = g(&[&seed]);

    let mut n = 0u8;
    let a_hat = gen_a_hat::<K>(&rho);

    let s: [[Zq; 256]; K] = core::array::from_fn(|_| {
        let x = sample_poly_cbd(ETA1_64 as u32 / 64, &prf::<ETA1_64>(&sigma, n));
        n += 1;
        x
    });
    let e: [[Zq; 256]; K] = core::array::from_fn(|_| {
        let x = sample_poly_cbd(ETA1_64 as u32 / 64, &prf::<ETA1_64>(&sigma, n));
        n += 1;
        x
    });

    let s_hat: [[Zq; 256]; K] = core::array::from_fn(|i| ntt(&s[i]));
    let e_hat: [[Zq; 256]; K] = core::array::from_fn(|i| ntt(&e[i]));

    let t_hat = add_vecs(&mul_mat_vec(&a_hat, &s_hat), &e_hat);

    for (i, chunk) in ek_pke.chunks_mut(384).enumerate().take(K) {
        byte_encode(12, &t_hat[i], chunk);
    }
    ek_pke[K * 384..].copy_from_slice(&rho);

    for (i, chunk) in dk_pke.chunks_mut(384).enumerate() {
        byte_encode(12, &s_hat[i], chunk);
    }
}

/// Shared matrix generation used by [`k_pke_key_gen`] (steps 3-7) and [`k_pke_encrypt`]
/// (steps 4-8). Note the swapped `(j, i)` argument order to [`Xof::new`]: `A_hat[i][j]` is
/// sampled from `rho || j || i`, per the normative index order in section 4.6.
fn gen_a_hat<const K: usize>(rho: &[u8; 32]) -> [[[Zq; 256]; K]; K] {
    core::array::from_fn(|i| {
        core::array::from_fn(|j| {
            sample_ntt(Xof::new(rho, j as u8, i as u8))
        })
    })
}

/// Algorithm 14 `K-PKE.Encrypt(ek_PKE, m, r)`: encrypt a 32-byte message under randomness `r`.
pub(crate) fn k_pke_encrypt<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    du: u32, dv: u32, ek_pke: &[u8], m: &[u8; 32], r: &[u8; 32], ct: &mut [u8],
) -> Result<(), Error> {
    debug_assert_eq!(ek_pke.len(), 384 * K + 32, "Alg 14: ek len not 384 * K + 32");

    let mut t_hat = [[Zq::default(); 256]; K];
    for (i, chunk) in ek_pke.chunks(384).enumerate().take(K) {
        t_hat[i] = byte_decode(12, chunk).map_err(|_| Error::InvalidPublicKey)?;
    }
    let rho: [u8; 32] = ek_pke[384 * K..384 * K + 32].try_into().expect("32-byte slice");

    let a_hat = gen_a_hat::<K>(&rho);

    let mut n = 0u8;
    let y: [[Zq; 256]; K] = core::array::from_fn(|_| {
        let x = sample_poly_cbd(ETA1_64 as u32 / 64, &prf::<ETA1_64>(r, n));
        n += 1;
        x
    });
    let e1: [[Zq; 256]; K] = core::array::from_fn(|_| {
        let x = sample_poly_cbd(ETA2_64 as u32 / 64, &prf::<ETA2_64>(r, n));
        n += 1;
        x
    });
    let e2 = sample_poly_cbd(ETA2_64 as u32 / 64, &prf::<ETA2_64>(r, n));

    let y_hat: [[Zq; 256]; K] = core::array::from_fn(|i| ntt(&y[i]));

    let mut u = mul_mat_t_vec(&a_hat, &y_hat);
    for u_i in &mut u {
        *u_i = ntt_inv(u_i);
    }
    u = add_vecs(&u, &e1);

    let mut mu = byte_decode(1, m).map_err(|_| Error::InvalidPublicKey)?;
    decompress_vector(1, &mut mu);

    let v_pre = ntt_inv(&dot_t_prod(&t_hat, &y_hat));
    let v = add_vecs(&[add_vecs(&[v_pre], &[e2])[0]], &[mu])[0];

    let step = 32 * du as usize;
    for (i, chunk) in ct.chunks_mut(step).enumerate().take(K) {
        let mut u_i = u[i];
        compress_vector(du, &mut u_i);
        byte_encode(du, &u_i, chunk);
    }

    let mut v_compressed = v;
    compress_vector(dv, &mut v_compressed);
    byte_encode(dv, &v_compressed, &mut ct[K * step..]);

    Ok(())
}

/// Algorithm 15 `K-PKE.Decrypt(dk_PKE, c)`: recover the plaintext message from a ciphertext.
pub(crate) fn k_pke_decrypt<const K: usize>(
    du: u32, dv: u32, dk_pke: &[u8], ct: &[u8],
) -> Result<[u8; 32], Error> {
    debug_assert_eq!(dk_pke.len(), 384 * K, "Alg 15: dk len not 384 * K");
    debug_assert_eq!(
        ct.len(),
        32 * (du as usize * K + dv as usize),
        "Alg 15: ct len not 32 * (DU * K + DV)"
    );

    let c1 = &ct[0..32 * du as usize * K];
    let c2 = &ct[32 * du as usize * K..32 * (du as usize * K + dv as usize)];

    let mut u = [[Zq::default(); 256]; K];
    for (i, chunk) in c1.chunks(32 * du as usize).enumerate().take(K) {
        u[i] = byte_decode(du, chunk).map_err(|_| Error::InvalidCiphertext)?;
        decompress_vector(du, &mut u[i]);
    }

    let mut v = byte_decode(dv, c2).map_err(|_| Error::InvalidCiphertext)?;
    decompress_vector(dv, &mut v);

    let mut s_hat = [[Zq::default(); 256]; K];
    for (i, chunk) in dk_pke.chunks(384).enumerate() {
        s_hat[i] = byte_decode(12, chunk).map_err(|_| Error::InvalidSecretKey)?;
    }

    let ntt_u: [[Zq; 256]; K] = core::array::from_fn(|i| ntt(&u[i]));
    let st_ntt_u = dot_t_prod(&s_hat, &ntt_u);
    let subtrahend = ntt_inv(&st_ntt_u);
    let mut w = [Zq::default(); 256];
    for i in 0..256 {
        w[i] = v[i].sub(subtrahend[i]);
    }

    compress_vector(1, &mut w);
    let mut m = [0u8; 32];
    byte_encode(1, &w, &mut m);
    Ok(m)
}
