//! The Number-Theoretic Transform in `Z_q[X]/(X^256+1)`, `q = 3329`.
//!
//! `ZETA_TABLE` holds `zeta^BitRev7(i)` for `i` in `0..128` at even indices and
//! `zeta^{2*BitRev7(i)+1}` (the spec's `zetas_mul`) at odd indices, computed once at
//! `BitRev7(i)`'s natural position by iterating the powers of `zeta` in order and scattering them
//! to their bit-reversed slot, exactly mirroring algorithms 9-11 (pages 22-24).

use crate::types::Zq;
use crate::{Q, ZETA};

/// Algorithm 9 `NTT(f)`: Cooley-Tukey forward transform, in place on a copy of `f`.
#[must_use]
pub(crate) fn ntt(array_f: &[Zq; 256]) -> [Zq; 256] {
    let mut f_hat: [Zq; 256] = *array_f;
    let mut i = 1usize;
    for len in [128, 64, 32, 16, 8, 4, 2] {
        for start in (0..256).step_by(2 * len) {
            let zeta = ZETA_TABLE[i << 1];
            i += 1;
            for j in start..(start + len) {
                let t = f_hat[j + len].mul(zeta);
                f_hat[j + len] = f_hat[j].sub(t);
                f_hat[j] = f_hat[j].add(t);
            }
        }
    }
    f_hat
}

/// Algorithm 10 `NTT^{-1}(f_hat)`: Gentleman-Sande inverse transform, in place on a copy of
/// `f_hat`, followed by scaling every coefficient by `3303 = 128^{-1} mod q`.
#[must_use]
pub(crate) fn ntt_inv(f_hat: &[Zq; 256]) -> [Zq; 256] {
    let mut f: [Zq; 256] = *f_hat;
    let mut i = 127usize;
    for len in [2, 4, 8, 16, 32, 64, 128] {
        for start in (0..256).step_by(2 * len) {
            let zeta = ZETA_TABLE[i << 1];
            i -= 1;
            for j in start..(start + len) {
                let t = f[j];
                f[j] = t.add(f[j + len]);
                f[j + len] = zeta.mul(f[j + len].sub(t));
            }
        }
    }
    let inv128 = Zq::from_u16(3303);
    for coeff in &mut f {
        *coeff = coeff.mul(inv128);
    }
    f
}

/// Algorithm 12 `BaseCaseMultiply(a0, a1, b0, b1, gamma)`: the product of `a0 + a1*X` and
/// `b0 + b1*X` modulo `X^2 - gamma`.
#[must_use]
fn base_case_multiply(a0: Zq, a1: Zq, b0: Zq, b1: Zq, gamma: Zq) -> (Zq, Zq) {
    let c0 = a0.mul(b0).add(a1.mul(b1).mul(gamma));
    let c1 = a0.mul(b1).add(a1.mul(b0));
    (c0, c1)
}

/// Algorithm 11 `MultiplyNTTs(f_hat, g_hat)`: 128 independent degree-1 products.
#[must_use]
pub(crate) fn multiply_ntts(f_hat: &[Zq; 256], g_hat: &[Zq; 256]) -> [Zq; 256] {
    let mut h_hat = [Zq::default(); 256];
    for i in 0..128 {
        let gamma = ZETA_TABLE[i ^ 0x80];
        let (c0, c1) = base_case_multiply(
            f_hat[2 * i],
            f_hat[2 * i + 1],
            g_hat[2 * i],
            g_hat[2 * i + 1],
            gamma,
        );
        h_hat[2 * i] = c0;
        h_hat[2 * i + 1] = c1;
    }
    h_hat
}

/// Pointwise vector addition in `T_q`.
#[must_use]
pub(crate) fn add_ntt(a: &[Zq; 256], b: &[Zq; 256]) -> [Zq; 256] {
    core::array::from_fn(|i| a[i].add(b[i]))
}

/// Pointwise vector subtraction in `T_q`.
#[must_use]
pub(crate) fn sub_ntt(a: &[Zq; 256], b: &[Zq; 256]) -> [Zq; 256] {
    core::array::from_fn(|i| a[i].sub(b[i]))
}

/// Table of `zeta^BitRev8(i)` for `i` in `0..256`, computed at compile time by walking the
/// powers of `zeta` in natural order and scattering each one to its bit-reversed slot. Indexing
/// with `i << 1` for `i` in `1..128` recovers `zetas[i] = zeta^BitRev7(i)` (the low bit reversed
/// is always zero for an even argument, so `BitRev8(2i) = BitRev7(i)`); indexing with `i ^ 0x80`
/// recovers `zetas_mul[i] = zeta^{2*BitRev7(i)+1}`.
const fn gen_zeta_table() -> [Zq; 256] {
    let mut result = [Zq::from_u16(0); 256];
    let mut x = 1u32;
    let mut i = 0u32;
    while i < 256 {
        result[(i as u8).reverse_bits() as usize] = Zq::from_u16(x as u16);
        x = (x * (ZETA as u32)) % (Q as u32);
        i += 1;
    }
    result
}

pub(crate) static ZETA_TABLE: [Zq; 256] = gen_zeta_table();
