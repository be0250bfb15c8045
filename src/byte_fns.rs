//! Algorithm 4 `ByteEncode_d` and Algorithm 5 `ByteDecode_d` (page 19), plus the `Compress_d` /
//! `Decompress_d` rounding from section 4.7. `BitsToBytes`/`BytesToBits` (Algorithms 2-3) are
//! folded directly into the encode/decode loops below rather than materialized as an
//! intermediate bit array.

use crate::types::Zq;
use crate::{Error, Q};

/// `ByteEncode_d(F)`: pack 256 `d`-bit (little-endian per coefficient) integers into `32*d`
/// bytes. `d < 12` coefficients are in `[0, 2^d)`; `d == 12` coefficients are in `[0, q)`.
pub(crate) fn byte_encode(d: u32, integers_f: &[Zq; 256], bytes_b: &mut [u8]) {
    debug_assert_eq!(bytes_b.len(), 32 * d as usize);
    let mut temp: u64 = 0;
    let mut bit_index = 0usize;
    let mut byte_index = 0usize;
    for coeff in integers_f {
        let masked = u64::from(coeff.get()) & ((1u64 << d) - 1);
        temp |= masked << bit_index;
        bit_index += d as usize;
        while bit_index >= 8 {
            bytes_b[byte_index] = temp as u8;
            temp >>= 8;
            byte_index += 1;
            bit_index -= 8;
        }
    }
}

/// `ByteDecode_d(B)`: inverse of [`byte_encode`]. Returns [`Error::InvalidPublicKey`]-shaped
/// data as `Err` only through the caller's own context; this helper reports out-of-range
/// coefficients uniformly via [`Error::InvalidPublicKey`], which callers remap as needed.
pub(crate) fn byte_decode(d: u32, bytes_b: &[u8]) -> Result<[Zq; 256], Error> {
    debug_assert_eq!(bytes_b.len(), 32 * d as usize);
    let mut out = [Zq::default(); 256];
    let mut temp: u64 = 0;
    let mut bit_index = 0usize;
    let mut int_index = 0usize;
    for byte in bytes_b {
        temp |= u64::from(*byte) << bit_index;
        bit_index += 8;
        while bit_index >= d as usize {
            let mask = (1u64 << d) - 1;
            out[int_index].set((temp & mask) as u16);
            temp >>= d;
            bit_index -= d as usize;
            int_index += 1;
        }
    }
    let max = if d < 12 { 1u16 << d } else { Q as u16 };
    if out.iter().any(|e| e.get() >= max) {
        return Err(Error::InvalidPublicKey);
    }
    Ok(out)
}

/// `Compress_d(x) = round((2^d / q) * x) mod 2^d`, rounding half up.
pub(crate) fn compress_vector(d: u32, inout: &mut [Zq]) {
    // M = ceil(2^36 / q), so (y * M) >> 36 computes round(y / q) for y < q * 2^d.
    const M: u64 = ((1u64 << 36) + Q as u64 - 1) / Q as u64;
    for x_ref in inout.iter_mut() {
        let y = (u32::from(x_ref.get()) << d) + (Q >> 1);
        let result = (u64::from(y) * M) >> 36;
        x_ref.set(result as u16);
    }
}

/// `Decompress_d(y) = round((q / 2^d) * y)`, rounding half up.
pub(crate) fn decompress_vector(d: u32, inout: &mut [Zq]) {
    for y_ref in inout.iter_mut() {
        let qy = Q * u32::from(y_ref.get()) + (1 << (d - 1));
        y_ref.set((qy >> d) as u16);
    }
}
