//! Block operations over arrays of vector views.
//!
//! Krylov-style algorithms work on bundles of vectors that are not
//! necessarily contiguous in memory, so these take slices of views rather
//! than a matrix. The inner-product table and the linear-combination update
//! are the two primitives block solvers need.

use crate::traits::LinalgScalar;
use crate::view::{MatMut, MatRef, VecMut, VecRef};

/// `ip[i][j] := <x[i], y[j]>`, optionally conjugating the left factors.
///
/// With `conjugate` set this is the Hermitian inner product; for real
/// elements the flag has no effect.
pub fn pairwise_inner_product<T: LinalgScalar>(
    x: &[VecRef<T>],
    y: &[VecRef<T>],
    mut ip: MatMut<T>,
    conjugate: bool,
) {
    debug_assert_eq!(ip.rows(), x.len());
    debug_assert_eq!(ip.cols(), y.len());
    for (i, xi) in x.iter().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            debug_assert_eq!(xi.len(), yj.len());
            let mut acc = T::zero();
            if conjugate {
                for k in 0..xi.len() {
                    acc = acc + xi[k].conj() * yj[k];
                }
            } else {
                for k in 0..xi.len() {
                    acc = acc + xi[k] * yj[k];
                }
            }
            ip[(i, j)] = acc;
        }
    }
}

/// `x[i] += sum_j a[i][j] * y[j]` for every destination vector.
pub fn multi_vector_add<T: LinalgScalar>(x: &mut [VecMut<T>], y: &[VecRef<T>], a: MatRef<T>) {
    debug_assert_eq!(a.rows(), x.len());
    debug_assert_eq!(a.cols(), y.len());
    for (i, xi) in x.iter_mut().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            debug_assert_eq!(xi.len(), yj.len());
            let aij = a[(i, j)];
            for k in 0..xi.len() {
                xi[k] = xi[k] + aij * yj[k];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use num_complex::Complex;

    const TOL: f64 = 1e-12;

    #[test]
    fn inner_products_of_unit_vectors() {
        let e0 = [1.0, 0.0, 0.0];
        let e1 = [0.0, 1.0, 0.0];
        let mixed = [1.0, 1.0, 0.0];
        let x = [VecRef::from_slice(&e0), VecRef::from_slice(&e1)];
        let y = [
            VecRef::from_slice(&e0),
            VecRef::from_slice(&e1),
            VecRef::from_slice(&mixed),
        ];
        let mut ip = [0.0; 6];
        pairwise_inner_product(&x, &y, MatMut::from_slice(&mut ip, 2, 3), false);
        assert_eq!(ip, [1.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn conjugate_flag_conjugates_left_factor() {
        let i = Complex::new(0.0, 1.0);
        let u = [i, Complex::new(2.0, 0.0)];
        let v = [i, Complex::new(0.0, 0.0)];
        let x = [VecRef::from_slice(&u)];
        let y = [VecRef::from_slice(&v)];

        let mut plain = [Complex::new(0.0, 0.0)];
        pairwise_inner_product(&x, &y, MatMut::from_slice(&mut plain, 1, 1), false);
        assert_eq!(plain[0], Complex::new(-1.0, 0.0)); // i*i = -1

        let mut herm = [Complex::new(0.0, 0.0)];
        pairwise_inner_product(&x, &y, MatMut::from_slice(&mut herm, 1, 1), true);
        assert_eq!(herm[0], Complex::new(1.0, 0.0)); // conj(i)*i = 1
    }

    #[test]
    fn identity_coefficients_reproduce_sources() {
        let len = 5;
        let srcs: Vec<Vec<f64>> = (0..3)
            .map(|s| (0..len).map(|k| ((k * 3 + s) % 7) as f64 - 2.0).collect())
            .collect();
        let y: Vec<VecRef<f64>> = srcs.iter().map(|v| VecRef::from_slice(v)).collect();

        let mut ident = [0.0; 9];
        for d in 0..3 {
            ident[d * 3 + d] = 1.0;
        }

        let mut bufs = vec![vec![0.0; len]; 3];
        {
            let mut x: Vec<VecMut<f64>> = bufs.iter_mut().map(|v| VecMut::from_slice(v)).collect();
            multi_vector_add(&mut x, &y, MatRef::from_slice(&ident, 3, 3));
        }
        for s in 0..3 {
            for k in 0..len {
                assert!(
                    (bufs[s][k] - srcs[s][k]).abs() < TOL,
                    "round-trip s={s} k={k}: got {}, expected {}",
                    bufs[s][k],
                    srcs[s][k]
                );
            }
        }
    }

    #[test]
    fn computed_gram_of_orthonormal_set_reproduces_sources() {
        // orthonormal triple in R^4
        let h = 0.5_f64;
        let srcs = [[h, h, h, h], [h, -h, h, -h], [h, h, -h, -h]];
        let y: Vec<VecRef<f64>> = srcs.iter().map(|v| VecRef::from_slice(v)).collect();

        let mut ip = [0.0; 9];
        pairwise_inner_product(&y, &y, MatMut::from_slice(&mut ip, 3, 3), false);
        for i in 0..3 {
            for j in 0..3 {
                let want = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (ip[i * 3 + j] - want).abs() < TOL,
                    "gram entry ({i},{j}): got {}",
                    ip[i * 3 + j]
                );
            }
        }

        // Feeding the computed table back as coefficients reproduces the set.
        let mut bufs = vec![vec![0.0; 4]; 3];
        {
            let mut x: Vec<VecMut<f64>> = bufs.iter_mut().map(|v| VecMut::from_slice(v)).collect();
            multi_vector_add(&mut x, &y, MatRef::from_slice(&ip, 3, 3));
        }
        for s in 0..3 {
            for k in 0..4 {
                assert!(
                    (bufs[s][k] - srcs[s][k]).abs() < TOL,
                    "reproduced s={s} k={k}: got {}, expected {}",
                    bufs[s][k],
                    srcs[s][k]
                );
            }
        }
    }

    #[test]
    fn strided_destination_vectors() {
        let y0 = [1.0, 2.0];
        let y = [VecRef::from_slice(&y0)];
        let a = [3.0];
        let mut buf = [0.0; 4];
        {
            let mut x = [VecMut::from_strided(&mut buf, 2, 2)];
            multi_vector_add(&mut x, &y, MatRef::from_slice(&a, 1, 1));
        }
        assert_eq!(buf, [3.0, 0.0, 6.0, 0.0]);
    }
}
