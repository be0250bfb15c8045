//! Hash facade: H, G, J, PRF and the matrix-sampling XOF, built on the [`crate::sponge`] sponge
//! construction. Rates follow FIPS 202 Table 3 (SHA3-256 r=136B, SHA3-512 r=72B, SHAKE128
//! r=168B, SHAKE256 r=136B).

use crate::sponge::{Absorb, Squeeze, SHA3_SUFFIX, SHAKE_SUFFIX};

const SHA3_256_RATE: usize = 136;
const SHA3_512_RATE: usize = 72;
const SHAKE128_RATE: usize = 168;
const SHAKE256_RATE: usize = 136;

/// Function H on page 18 (4.4): SHA3-256, fixed 32-byte output.
#[must_use]
pub(crate) fn h(bytes: &[u8]) -> [u8; 32] {
    let mut a = Absorb::<SHA3_256_RATE>::new();
    a.absorb(bytes);
    let mut sq = a.finalize(SHA3_SUFFIX);
    let mut out = [0u8; 32];
    sq.squeeze(&mut out);
    out
}

/// Function G on page 19 (4.5): SHA3-512, split into two 32-byte halves.
#[must_use]
pub(crate) fn g(parts: &[&[u8]]) -> ([u8; 32], [u8; 32]) {
    let mut a = Absorb::<SHA3_512_RATE>::new();
    for part in parts {
        a.absorb(part);
    }
    let mut sq = a.finalize(SHA3_SUFFIX);
    let mut out = [0u8; 64];
    sq.squeeze(&mut out);
    let first = out[0..32].try_into().expect("g first half");
    let second = out[32..64].try_into().expect("g second half");
    (first, second)
}

/// Function J on page 18 (4.4), used for implicit rejection: SHAKE-256(z || c, 32).
#[must_use]
pub(crate) fn j(z: &[u8; 32], ct: &[u8]) -> [u8; 32] {
    let mut a = Absorb::<SHAKE256_RATE>::new();
    a.absorb(z);
    a.absorb(ct);
    let mut sq = a.finalize(SHAKE_SUFFIX);
    let mut out = [0u8; 32];
    sq.squeeze(&mut out);
    out
}

/// Function `PRF_eta` on page 18 (4.3): `SHAKE256(s || [b], 64*eta)`.
#[must_use]
pub(crate) fn prf<const ETA_64: usize>(s: &[u8; 32], b: u8) -> [u8; ETA_64] {
    let mut a = Absorb::<SHAKE256_RATE>::new();
    a.absorb(s);
    a.absorb(&[b]);
    let mut sq = a.finalize(SHAKE_SUFFIX);
    let mut out = [0u8; ETA_64];
    sq.squeeze(&mut out);
    out
}

/// A resumable SHAKE-128 output stream over `rho || j || i`, used to sample matrix cell `(i, j)`.
/// One fresh instance is constructed per `(i, j)` cell, per the independence requirement in
/// section 5.
pub(crate) struct Xof(Squeeze<SHAKE128_RATE>);

impl Xof {
    pub(crate) fn new(rho: &[u8; 32], j: u8, i: u8) -> Self {
        let mut a = Absorb::<SHAKE128_RATE>::new();
        a.absorb(rho);
        a.absorb(&[j, i]);
        Xof(a.finalize(SHAKE_SUFFIX))
    }

    pub(crate) fn squeeze(&mut self, out: &mut [u8]) { self.0.squeeze(out) }
}
