//! Products against a transposed right factor: `C = A B^T` and friends.
//!
//! With both operands row-major, every output element is a dot product of
//! two contiguous rows, so this family carries the widest table: all
//! contraction sizes up to 24 are specialized and the entry points check the
//! bound themselves instead of keeping a fallback slot.
//!
//! Also hosts the symmetric variant (lower triangle only) and the mixed
//! real/complex accumulators used when real element matrices meet complex
//! coefficients.

use core::any::TypeId;

use num_complex::Complex;

use super::generic;
use super::kernel_table;
use super::small::mat_mat_abt as abt_k;
use super::MatMatFn;
use crate::traits::LinalgScalar;
use crate::view::{MatMut, MatRef};

static ABT_SET: [MatMatFn; 25] = kernel_table!(
    abt_k::<false, true>;
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24
);

static ABT_SET_NEG: [MatMatFn; 25] = kernel_table!(
    abt_k::<false, false>;
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24
);

static ABT_ADD: [MatMatFn; 25] = kernel_table!(
    abt_k::<true, true>;
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24
);

static ABT_SUB: [MatMatFn; 25] = kernel_table!(
    abt_k::<true, false>;
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24
);

#[inline]
fn abt_table<const ADD: bool, const POS: bool>() -> &'static [MatMatFn; 25] {
    match (ADD, POS) {
        (false, true) => &ABT_SET,
        (false, false) => &ABT_SET_NEG,
        (true, true) => &ABT_ADD,
        (true, false) => &ABT_SUB,
    }
}

/// `C (:|+)= (+|-) A B^T`, dispatched on the shared width of `A` and `B`.
pub fn mat_mat_abt<const ADD: bool, const POS: bool, T: LinalgScalar>(
    a: MatRef<T>,
    b: MatRef<T>,
    c: MatMut<T>,
) {
    if TypeId::of::<T>() == TypeId::of::<f64>() {
        let a = a.cast::<f64>();
        let b = b.cast::<f64>();
        let c = c.cast::<f64>();
        let table = abt_table::<ADD, POS>();
        let k = a.cols();
        if k < table.len() {
            table[k](a, b, c);
        } else {
            generic::mat_mat_abt::<f64, ADD, POS>(a, b, c);
        }
        return;
    }
    generic::mat_mat_abt::<T, ADD, POS>(a, b, c);
}

/// `C := A B^T`
#[inline]
pub fn mult_abt<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, c: MatMut<T>) {
    mat_mat_abt::<false, true, T>(a, b, c)
}

/// `C := -A B^T`
#[inline]
pub fn minus_mult_abt<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, c: MatMut<T>) {
    mat_mat_abt::<false, false, T>(a, b, c)
}

/// `C += A B^T`
#[inline]
pub fn add_abt<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, c: MatMut<T>) {
    mat_mat_abt::<true, true, T>(a, b, c)
}

/// `C -= A B^T`
#[inline]
pub fn sub_abt<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, c: MatMut<T>) {
    mat_mat_abt::<true, false, T>(a, b, c)
}

/// `C += A B^T`, writing only the lower triangle (diagonal included).
///
/// For symmetric updates the strict upper part of `C` is redundant; callers
/// that need it mirror afterwards. `C` must be square.
pub fn add_abt_sym<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, mut c: MatMut<T>) {
    debug_assert_eq!(a.cols(), b.cols());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.rows());
    debug_assert_eq!(c.rows(), c.cols());
    let k = a.cols();
    for i in 0..a.rows() {
        let ar = a.row(i);
        for j in 0..=i {
            let br = b.row(j);
            let mut acc = T::zero();
            for p in 0..k {
                acc = acc + ar[p] * br[p];
            }
            c[(i, j)] = c[(i, j)] + acc;
        }
    }
}

/// `C += A B^T` with real factors accumulating into a complex result.
///
/// Only the real parts of `C` change.
pub fn add_abt_to_complex(a: MatRef<f64>, b: MatRef<f64>, mut c: MatMut<Complex<f64>>) {
    debug_assert_eq!(a.cols(), b.cols());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.rows());
    let k = a.cols();
    for i in 0..a.rows() {
        let ar = a.row(i);
        for j in 0..b.rows() {
            let br = b.row(j);
            let mut acc = 0.0;
            for p in 0..k {
                acc += ar[p] * br[p];
            }
            c[(i, j)].re += acc;
        }
    }
}

/// Lower-triangle form of [`add_abt_to_complex`].
pub fn add_abt_sym_to_complex(a: MatRef<f64>, b: MatRef<f64>, mut c: MatMut<Complex<f64>>) {
    debug_assert_eq!(a.cols(), b.cols());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.rows());
    debug_assert_eq!(c.rows(), c.cols());
    let k = a.cols();
    for i in 0..a.rows() {
        let ar = a.row(i);
        for j in 0..=i {
            let br = b.row(j);
            let mut acc = 0.0;
            for p in 0..k {
                acc += ar[p] * br[p];
            }
            c[(i, j)].re += acc;
        }
    }
}

/// `C += A B^T` with a real left factor and a complex right factor.
pub fn add_abt_real_complex(a: MatRef<f64>, b: MatRef<Complex<f64>>, mut c: MatMut<Complex<f64>>) {
    debug_assert_eq!(a.cols(), b.cols());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.rows());
    let k = a.cols();
    for i in 0..a.rows() {
        let ar = a.row(i);
        for j in 0..b.rows() {
            let br = b.row(j);
            let mut acc = Complex::new(0.0, 0.0);
            for p in 0..k {
                acc += br[p] * ar[p];
            }
            c[(i, j)] += acc;
        }
    }
}

/// `C += A B^T` with a complex left factor and a real right factor.
pub fn add_abt_complex_real(a: MatRef<Complex<f64>>, b: MatRef<f64>, mut c: MatMut<Complex<f64>>) {
    debug_assert_eq!(a.cols(), b.cols());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.rows());
    let k = a.cols();
    for i in 0..a.rows() {
        let ar = a.row(i);
        for j in 0..b.rows() {
            let br = b.row(j);
            let mut acc = Complex::new(0.0, 0.0);
            for p in 0..k {
                acc += ar[p] * br[p];
            }
            c[(i, j)] += acc;
        }
    }
}

/// Lower-triangle form of [`add_abt_real_complex`].
pub fn add_abt_sym_real_complex(
    a: MatRef<f64>,
    b: MatRef<Complex<f64>>,
    mut c: MatMut<Complex<f64>>,
) {
    debug_assert_eq!(a.cols(), b.cols());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.rows());
    debug_assert_eq!(c.rows(), c.cols());
    let k = a.cols();
    for i in 0..a.rows() {
        let ar = a.row(i);
        for j in 0..=i {
            let br = b.row(j);
            let mut acc = Complex::new(0.0, 0.0);
            for p in 0..k {
                acc += br[p] * ar[p];
            }
            c[(i, j)] += acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn test_mat(rows: usize, cols: usize, seed: usize) -> Vec<f64> {
        (0..rows * cols).map(|i| ((i * 11 + seed) % 17) as f64 * 0.125 - 1.0).collect()
    }

    const TOL: f64 = 1e-10;

    #[test]
    fn abt_matches_generic_all_policies() {
        fn check<const ADD: bool, const POS: bool>(k: usize) {
            let m = k / 2 + 2;
            let n = k / 3 + 3;
            let a = test_mat(m, k, 1);
            let b = test_mat(n, k, 2);
            let mut got = test_mat(m, n, 3);
            let mut want = got.clone();
            mat_mat_abt::<ADD, POS, f64>(
                MatRef::from_slice(&a, m, k),
                MatRef::from_slice(&b, n, k),
                MatMut::from_slice(&mut got, m, n),
            );
            generic::mat_mat_abt::<f64, ADD, POS>(
                MatRef::from_slice(&a, m, k),
                MatRef::from_slice(&b, n, k),
                MatMut::from_slice(&mut want, m, n),
            );
            for i in 0..m * n {
                assert!(
                    (got[i] - want[i]).abs() < TOL,
                    "abt ADD={ADD} POS={POS} k={k} idx={i}: got {}, expected {}",
                    got[i],
                    want[i]
                );
            }
        }
        // every table slot, both sides of the k = 24 bound, and far beyond
        for k in 0..=52 {
            check::<false, true>(k);
            check::<false, false>(k);
            check::<true, true>(k);
            check::<true, false>(k);
        }
    }

    #[test]
    fn policy_tables_follow_their_flags() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        // A B^T = [[17, 23], [39, 53]], applied to C prefilled with ones
        for (table, want) in [
            (&ABT_SET, [17.0, 23.0, 39.0, 53.0]),
            (&ABT_SET_NEG, [-17.0, -23.0, -39.0, -53.0]),
            (&ABT_ADD, [18.0, 24.0, 40.0, 54.0]),
            (&ABT_SUB, [-16.0, -22.0, -38.0, -52.0]),
        ] {
            let mut c = [1.0; 4];
            table[2](
                MatRef::from_slice(&a, 2, 2),
                MatRef::from_slice(&b, 2, 2),
                MatMut::from_slice(&mut c, 2, 2),
            );
            assert_eq!(c, want);
        }
    }

    #[test]
    fn sym_fills_lower_triangle_like_full_product() {
        for n in [1, 2, 3, 5, 8] {
            let k = 6;
            let a = test_mat(n, k, 4);
            let b = test_mat(n, k, 4); // same factor: a true symmetric update
            let mut sym = vec![0.5; n * n];
            let mut full = vec![0.5; n * n];
            add_abt_sym(
                MatRef::from_slice(&a, n, k),
                MatRef::from_slice(&b, n, k),
                MatMut::from_slice(&mut sym, n, n),
            );
            add_abt(
                MatRef::from_slice(&a, n, k),
                MatRef::from_slice(&b, n, k),
                MatMut::from_slice(&mut full, n, n),
            );
            for i in 0..n {
                for j in 0..n {
                    if j <= i {
                        assert!(
                            (sym[i * n + j] - full[i * n + j]).abs() < TOL,
                            "lower triangle n={n} ({i},{j})"
                        );
                    } else {
                        assert_eq!(sym[i * n + j], 0.5, "upper triangle must be untouched ({i},{j})");
                    }
                }
            }
        }
    }

    #[test]
    fn real_factors_into_complex_result() {
        let a = test_mat(3, 4, 5);
        let b = test_mat(2, 4, 6);
        let mut c = vec![Complex::new(1.0, -2.0); 6];
        let mut expected_re = vec![1.0; 6];
        add_abt_to_complex(
            MatRef::from_slice(&a, 3, 4),
            MatRef::from_slice(&b, 2, 4),
            MatMut::from_slice(&mut c, 3, 2),
        );
        add_abt(
            MatRef::from_slice(&a, 3, 4),
            MatRef::from_slice(&b, 2, 4),
            MatMut::from_slice(&mut expected_re, 3, 2),
        );
        for i in 0..6 {
            assert!(
                (c[i].re - expected_re[i]).abs() < TOL,
                "re idx={i}: got {}, expected {}",
                c[i].re,
                expected_re[i]
            );
            assert_eq!(c[i].im, -2.0, "imaginary part must be untouched, idx={i}");
        }
    }

    #[test]
    fn sym_into_complex_leaves_upper_triangle() {
        let n = 4;
        let k = 3;
        let a = test_mat(n, k, 7);
        let mut c = vec![Complex::new(0.0, 1.0); n * n];
        add_abt_sym_to_complex(
            MatRef::from_slice(&a, n, k),
            MatRef::from_slice(&a, n, k),
            MatMut::from_slice(&mut c, n, n),
        );
        for i in 0..n {
            for j in 0..n {
                let v = c[i * n + j];
                assert_eq!(v.im, 1.0);
                if j > i {
                    assert_eq!(v.re, 0.0, "upper triangle written at ({i},{j})");
                }
            }
        }
    }

    fn test_mat_complex(rows: usize, cols: usize, seed: usize) -> Vec<Complex<f64>> {
        test_mat(rows, cols, seed)
            .iter()
            .zip(test_mat(rows, cols, seed + 1).iter())
            .map(|(&re, &im)| Complex::new(re, im))
            .collect()
    }

    fn widen(a: &[f64]) -> Vec<Complex<f64>> {
        a.iter().map(|&re| Complex::new(re, 0.0)).collect()
    }

    #[test]
    fn mixed_factors_agree_with_widened_product() {
        let (m, n, k) = (3, 4, 5);
        let ar = test_mat(m, k, 8);
        let aw = widen(&ar);
        let b = test_mat_complex(n, k, 9);

        let mut got = vec![Complex::new(0.25, -0.5); m * n];
        let mut want = got.clone();
        add_abt_real_complex(
            MatRef::from_slice(&ar, m, k),
            MatRef::from_slice(&b, n, k),
            MatMut::from_slice(&mut got, m, n),
        );
        add_abt(
            MatRef::from_slice(&aw, m, k),
            MatRef::from_slice(&b, n, k),
            MatMut::from_slice(&mut want, m, n),
        );
        for i in 0..m * n {
            assert!((got[i].re - want[i].re).abs() < TOL, "real*complex re idx={i}");
            assert!((got[i].im - want[i].im).abs() < TOL, "real*complex im idx={i}");
        }

        let mut got = vec![Complex::new(0.25, -0.5); n * m];
        let mut want = got.clone();
        add_abt_complex_real(
            MatRef::from_slice(&b, n, k),
            MatRef::from_slice(&ar, m, k),
            MatMut::from_slice(&mut got, n, m),
        );
        add_abt(
            MatRef::from_slice(&b, n, k),
            MatRef::from_slice(&aw, m, k),
            MatMut::from_slice(&mut want, n, m),
        );
        for i in 0..n * m {
            assert!((got[i].re - want[i].re).abs() < TOL, "complex*real re idx={i}");
            assert!((got[i].im - want[i].im).abs() < TOL, "complex*real im idx={i}");
        }
    }

    #[test]
    fn sym_mixed_matches_full_lower_triangle() {
        let (n, k) = (4, 3);
        let a = test_mat(n, k, 11);
        let b = test_mat_complex(n, k, 12);
        let mut sym = vec![Complex::new(0.0, 0.5); n * n];
        let mut full = vec![Complex::new(0.0, 0.5); n * n];
        add_abt_sym_real_complex(
            MatRef::from_slice(&a, n, k),
            MatRef::from_slice(&b, n, k),
            MatMut::from_slice(&mut sym, n, n),
        );
        add_abt_real_complex(
            MatRef::from_slice(&a, n, k),
            MatRef::from_slice(&b, n, k),
            MatMut::from_slice(&mut full, n, n),
        );
        for i in 0..n {
            for j in 0..n {
                let (s, f) = (sym[i * n + j], full[i * n + j]);
                if j <= i {
                    assert!((s.re - f.re).abs() < TOL && (s.im - f.im).abs() < TOL, "({i},{j})");
                } else {
                    assert_eq!(s, Complex::new(0.0, 0.5), "upper triangle written at ({i},{j})");
                }
            }
        }
    }
}
