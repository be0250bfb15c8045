//! `K`-dimensional vector and `K`-by-`K` matrix arithmetic over `T_q`, built on
//! [`crate::ntt::multiply_ntts`]/[`crate::ntt::add_ntt`]. See the commentary on 2.11-2.14 (page 10).

use crate::ntt::{add_ntt, multiply_ntts};
use crate::types::Zq;

/// `z_hat = u_hat + v_hat` (2.11).
#[must_use]
pub(crate) fn add_vecs<const K: usize>(
    vec_a: &[[Zq; 256]; K],
    vec_b: &[[Zq; 256]; K],
) -> [[Zq; 256]; K] {
    core::array::from_fn(|k| add_ntt(&vec_a[k], &vec_b[k]))
}

/// `w_hat = A_hat * u_hat` (2.12).
#[must_use]
pub(crate) fn mul_mat_vec<const K: usize>(
    a_hat: &[[[Zq; 256]; K]; K],
    u_hat: &[[Zq; 256]; K],
) -> [[Zq; 256]; K] {
    let mut w_hat = [[Zq::default(); 256]; K];
    for i in 0..K {
        for j in 0..K {
            let tmp = multiply_ntts(&a_hat[i][j], &u_hat[j]);
            w_hat[i] = add_ntt(&w_hat[i], &tmp);
        }
    }
    w_hat
}

/// `y_hat = A_hat^T * u_hat` (2.13). Swaps the matrix indices relative to [`mul_mat_vec`] rather
/// than materializing a transposed copy of `a_hat`.
#[must_use]
pub(crate) fn mul_mat_t_vec<const K: usize>(
    a_hat: &[[[Zq; 256]; K]; K],
    u_hat: &[[Zq; 256]; K],
) -> [[Zq; 256]; K] {
    let mut y_hat = [[Zq::default(); 256]; K];
    for i in 0..K {
        for j in 0..K {
            let tmp = multiply_ntts(&a_hat[j][i], &u_hat[j]);
            y_hat[i] = add_ntt(&y_hat[i], &tmp);
        }
    }
    y_hat
}

/// `z_hat = u_hat^T * v_hat` (2.14).
#[must_use]
pub(crate) fn dot_t_prod<const K: usize>(
    u_hat: &[[Zq; 256]; K],
    v_hat: &[[Zq; 256]; K],
) -> [Zq; 256] {
    let mut result = [Zq::default(); 256];
    for j in 0..K {
        let tmp = multiply_ntts(&u_hat[j], &v_hat[j]);
        result = add_ntt(&result, &tmp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{add_vecs, dot_t_prod, mul_mat_t_vec, mul_mat_vec};
    use crate::ntt::ntt;
    use crate::types::Zq;

    fn poly(seed: u16) -> [Zq; 256] {
        core::array::from_fn(|i| Zq::from_u16((seed.wrapping_mul(31).wrapping_add(i as u16)) % 3329))
    }

    #[test]
    fn add_vecs_is_commutative() {
        let a: [[Zq; 256]; 2] = [poly(1), poly(2)];
        let b: [[Zq; 256]; 2] = [poly(3), poly(4)];
        let ab = add_vecs(&a, &b);
        let ba = add_vecs(&b, &a);
        for k in 0..2 {
            for i in 0..256 {
                assert_eq!(ab[k][i].get(), ba[k][i].get());
            }
        }
    }

    #[test]
    fn mat_vec_matches_manual_sum() {
        const K: usize = 2;
        let a_hat: [[[Zq; 256]; K]; K] =
            [[ntt(&poly(10)), ntt(&poly(11))], [ntt(&poly(12)), ntt(&poly(13))]];
        let u_hat: [[Zq; 256]; K] = [ntt(&poly(20)), ntt(&poly(21))];
        let w_hat = mul_mat_vec(&a_hat, &u_hat);
        // row 0 manually
        let row0 = dot_t_prod::<K>(&[a_hat[0][0], a_hat[0][1]], &u_hat);
        for i in 0..256 {
            assert_eq!(w_hat[0][i].get(), row0[i].get());
        }
    }

    #[test]
    fn transpose_swaps_matrix_indices() {
        const K: usize = 2;
        let a_hat: [[[Zq; 256]; K]; K] =
            [[ntt(&poly(1)), ntt(&poly(2))], [ntt(&poly(3)), ntt(&poly(4))]];
        let u_hat: [[Zq; 256]; K] = [ntt(&poly(5)), ntt(&poly(6))];
        let direct = mul_mat_vec(&a_hat, &u_hat);
        let transposed_a: [[[Zq; 256]; K]; K] =
            [[a_hat[0][0], a_hat[1][0]], [a_hat[0][1], a_hat[1][1]]];
        let via_transpose_fn = mul_mat_t_vec(&a_hat, &u_hat);
        let via_manual_transpose = mul_mat_vec(&transposed_a, &u_hat);
        for k in 0..K {
            for i in 0..256 {
                assert_eq!(via_transpose_fn[k][i].get(), via_manual_transpose[k][i].get());
            }
        }
        // sanity: transpose actually changes the result for an asymmetric matrix
        assert!((0..K).any(|k| (0..256).any(|i| direct[k][i].get() != via_transpose_fn[k][i].get())));
    }
}
