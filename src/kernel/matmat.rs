//! Matrix-matrix products `A B` and `A^T B`, dispatched on the contraction
//! size with one table per update policy.
//!
//! The update policy is a pair of const flags: `ADD` accumulates into the
//! result instead of overwriting it, `POS` selects the sign of the product.
//! Each (policy, size) pair is a separate monomorphized kernel, so the flags
//! cost nothing at run time.
//!
//! Entries are element-type generic: `f64` views go through the tables,
//! anything else drops to [`generic`].

use core::any::TypeId;

use super::generic;
use super::small::{mat_mat as ab_k, mat_mat_atb as atb_k};
use super::{dispatch_table, MatMatFn};
use crate::traits::LinalgScalar;
use crate::view::{MatMut, MatRef};

static AB_SET: [MatMatFn; 14] = dispatch_table!(
    ab_k::<false, true>, generic::mat_mat::<f64, false, true>;
    0 1 2 3 4 5 6 7 8 9 10 11 12
);

static AB_SET_NEG: [MatMatFn; 14] = dispatch_table!(
    ab_k::<false, false>, generic::mat_mat::<f64, false, false>;
    0 1 2 3 4 5 6 7 8 9 10 11 12
);

static AB_ADD: [MatMatFn; 14] = dispatch_table!(
    ab_k::<true, true>, generic::mat_mat::<f64, true, true>;
    0 1 2 3 4 5 6 7 8 9 10 11 12
);

static AB_SUB: [MatMatFn; 14] = dispatch_table!(
    ab_k::<true, false>, generic::mat_mat::<f64, true, false>;
    0 1 2 3 4 5 6 7 8 9 10 11 12
);

static ATB_SET: [MatMatFn; 14] = dispatch_table!(
    atb_k::<false, true>, generic::mat_mat_atb::<f64, false, true>;
    0 1 2 3 4 5 6 7 8 9 10 11 12
);

static ATB_SET_NEG: [MatMatFn; 14] = dispatch_table!(
    atb_k::<false, false>, generic::mat_mat_atb::<f64, false, false>;
    0 1 2 3 4 5 6 7 8 9 10 11 12
);

static ATB_ADD: [MatMatFn; 14] = dispatch_table!(
    atb_k::<true, true>, generic::mat_mat_atb::<f64, true, true>;
    0 1 2 3 4 5 6 7 8 9 10 11 12
);

static ATB_SUB: [MatMatFn; 14] = dispatch_table!(
    atb_k::<true, false>, generic::mat_mat_atb::<f64, true, false>;
    0 1 2 3 4 5 6 7 8 9 10 11 12
);

#[inline]
fn ab_table<const ADD: bool, const POS: bool>() -> &'static [MatMatFn; 14] {
    match (ADD, POS) {
        (false, true) => &AB_SET,
        (false, false) => &AB_SET_NEG,
        (true, true) => &AB_ADD,
        (true, false) => &AB_SUB,
    }
}

#[inline]
fn atb_table<const ADD: bool, const POS: bool>() -> &'static [MatMatFn; 14] {
    match (ADD, POS) {
        (false, true) => &ATB_SET,
        (false, false) => &ATB_SET_NEG,
        (true, true) => &ATB_ADD,
        (true, false) => &ATB_SUB,
    }
}

/// `C (:|+)= (+|-) A B`, dispatched on the width of `A`.
///
/// Returns immediately when the result has zero rows or columns.
pub(crate) fn mat_mat_ab<const ADD: bool, const POS: bool, T: LinalgScalar>(
    a: MatRef<T>,
    b: MatRef<T>,
    c: MatMut<T>,
) {
    if a.rows() == 0 || b.cols() == 0 {
        return;
    }
    if TypeId::of::<T>() == TypeId::of::<f64>() {
        let a = a.cast::<f64>();
        let b = b.cast::<f64>();
        let c = c.cast::<f64>();
        let table = ab_table::<ADD, POS>();
        let k = a.cols().min(table.len() - 1);
        table[k](a, b, c);
        return;
    }
    generic::mat_mat::<T, ADD, POS>(a, b, c);
}

/// `C := A B`
///
/// ```
/// use elbla::{MatMut, MatRef, mult_mat_mat};
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [0.0, 1.0, 1.0, 0.0];
/// let mut c = [0.0; 4];
/// mult_mat_mat(
///     MatRef::from_slice(&a, 2, 2),
///     MatRef::from_slice(&b, 2, 2),
///     MatMut::from_slice(&mut c, 2, 2),
/// );
/// assert_eq!(c, [2.0, 1.0, 4.0, 3.0]);
/// ```
#[inline]
pub fn mult_mat_mat<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, c: MatMut<T>) {
    mat_mat_ab::<false, true, T>(a, b, c)
}

/// `C := -A B`
#[inline]
pub fn minus_mult_ab<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, c: MatMut<T>) {
    mat_mat_ab::<false, false, T>(a, b, c)
}

/// `C += A B`
#[inline]
pub fn add_ab<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, c: MatMut<T>) {
    mat_mat_ab::<true, true, T>(a, b, c)
}

/// `C -= A B`
#[inline]
pub fn sub_ab<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, c: MatMut<T>) {
    mat_mat_ab::<true, false, T>(a, b, c)
}

/// `C (:|+)= (+|-) A^T B` with both operands row-major, dispatched on the
/// contraction size (the shared height of `A` and `B`).
///
/// Returns immediately when the shared height or the width of `B` is zero;
/// `C` keeps its previous contents even in overwrite mode.
///
/// The policy is chosen by const flags, e.g. `mat_mat_atb::<true, false, f64>`
/// for `C -= A^T B`.
pub fn mat_mat_atb<const ADD: bool, const POS: bool, T: LinalgScalar>(
    a: MatRef<T>,
    b: MatRef<T>,
    c: MatMut<T>,
) {
    if a.rows() == 0 || b.cols() == 0 {
        return;
    }
    if TypeId::of::<T>() == TypeId::of::<f64>() {
        let a = a.cast::<f64>();
        let b = b.cast::<f64>();
        let c = c.cast::<f64>();
        let table = atb_table::<ADD, POS>();
        let k = a.rows().min(table.len() - 1);
        table[k](a, b, c);
        return;
    }
    generic::mat_mat_atb::<T, ADD, POS>(a, b, c);
}

/// `C := A^T B`
#[inline]
pub fn mult_atb<T: LinalgScalar>(a: MatRef<T>, b: MatRef<T>, c: MatMut<T>) {
    mat_mat_atb::<false, true, T>(a, b, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use num_complex::Complex;

    fn test_mat(rows: usize, cols: usize, seed: usize) -> Vec<f64> {
        (0..rows * cols).map(|i| ((i * 7 + seed) % 13) as f64 * 0.25 - 1.5).collect()
    }

    const TOL: f64 = 1e-10;

    fn check_policy<const ADD: bool, const POS: bool>(k: usize) {
        let m = k + 2;
        let n = k + 3;
        let a = test_mat(m, k, 1);
        let b = test_mat(k, n, 2);
        let mut got = test_mat(m, n, 3);
        let mut want = got.clone();
        mat_mat_ab::<ADD, POS, f64>(
            MatRef::from_slice(&a, m, k),
            MatRef::from_slice(&b, k, n),
            MatMut::from_slice(&mut got, m, n),
        );
        generic::mat_mat::<f64, ADD, POS>(
            MatRef::from_slice(&a, m, k),
            MatRef::from_slice(&b, k, n),
            MatMut::from_slice(&mut want, m, n),
        );
        for i in 0..m * n {
            assert!(
                (got[i] - want[i]).abs() < TOL,
                "ab ADD={ADD} POS={POS} k={k} idx={i}: got {}, expected {}",
                got[i],
                want[i]
            );
        }
    }

    // ── AB boundary sweeps across all four policies ─────────────────────────

    #[test]
    fn ab_matches_generic_all_policies() {
        // every specialized slot, the fallback slot, and well past the table
        for k in 0..=28 {
            check_policy::<false, true>(k);
            check_policy::<false, false>(k);
            check_policy::<true, true>(k);
            check_policy::<true, false>(k);
        }
    }

    #[test]
    fn atb_matches_generic_all_policies() {
        fn check<const ADD: bool, const POS: bool>(k: usize) {
            let m = k + 1;
            let n = k + 4;
            let a = test_mat(k, m, 4);
            let b = test_mat(k, n, 5);
            let mut got = test_mat(m, n, 6);
            let mut want = got.clone();
            mat_mat_atb::<ADD, POS, f64>(
                MatRef::from_slice(&a, k, m),
                MatRef::from_slice(&b, k, n),
                MatMut::from_slice(&mut got, m, n),
            );
            generic::mat_mat_atb::<f64, ADD, POS>(
                MatRef::from_slice(&a, k, m),
                MatRef::from_slice(&b, k, n),
                MatMut::from_slice(&mut want, m, n),
            );
            for i in 0..m * n {
                assert!(
                    (got[i] - want[i]).abs() < TOL,
                    "atb ADD={ADD} POS={POS} k={k} idx={i}: got {}, expected {}",
                    got[i],
                    want[i]
                );
            }
        }
        for k in 0..=28 {
            check::<false, true>(k);
            check::<false, false>(k);
            check::<true, true>(k);
            check::<true, false>(k);
        }
    }

    // ── Table wiring ─────────────────────────────────────────────────────────

    #[test]
    fn policy_tables_follow_their_flags() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        // A B = [[19, 22], [43, 50]], applied to C prefilled with ones
        for (table, want) in [
            (&AB_SET, [19.0, 22.0, 43.0, 50.0]),
            (&AB_SET_NEG, [-19.0, -22.0, -43.0, -50.0]),
            (&AB_ADD, [20.0, 23.0, 44.0, 51.0]),
            (&AB_SUB, [-18.0, -21.0, -42.0, -49.0]),
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

    // ── Degenerate shapes ───────────────────────────────────────────────────

    #[test]
    fn empty_result_returns_without_touching_anything() {
        let a: [f64; 0] = [];
        let b = [1.0, 2.0, 3.0, 4.0];
        let mut c: [f64; 0] = [];
        mult_mat_mat(
            MatRef::from_slice(&a, 0, 2),
            MatRef::from_slice(&b, 2, 2),
            MatMut::from_slice(&mut c, 0, 2),
        );

        let b0: [f64; 0] = [];
        mult_mat_mat(
            MatRef::from_slice(&b, 2, 2),
            MatRef::from_slice(&b0, 2, 0),
            MatMut::from_slice(&mut c, 2, 0),
        );
    }

    #[test]
    fn empty_contraction_overwrites_with_zero() {
        let a: [f64; 0] = [];
        let b: [f64; 0] = [];
        let mut c = [7.0; 4];
        mult_mat_mat(
            MatRef::from_slice(&a, 2, 0),
            MatRef::from_slice(&b, 0, 2),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, [0.0; 4]);

        let mut c = [7.0; 4];
        add_ab(
            MatRef::from_slice(&a, 2, 0),
            MatRef::from_slice(&b, 0, 2),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, [7.0; 4]);
    }

    #[test]
    fn atb_empty_contraction_leaves_output_untouched() {
        // A^T B differs from A B here: a zero shared height returns without
        // writing, in every policy
        let a: [f64; 0] = [];
        let b: [f64; 0] = [];
        let mut c = [7.0; 6];
        mult_atb(
            MatRef::from_slice(&a, 0, 2),
            MatRef::from_slice(&b, 0, 3),
            MatMut::from_slice(&mut c, 2, 3),
        );
        assert_eq!(c, [7.0; 6]);

        let mut c = [7.0; 6];
        generic::mat_mat_atb::<f64, false, true>(
            MatRef::from_slice(&a, 0, 2),
            MatRef::from_slice(&b, 0, 3),
            MatMut::from_slice(&mut c, 2, 3),
        );
        assert_eq!(c, [7.0; 6]);

        let az: [Complex<f64>; 0] = [];
        let mut c = [Complex::new(7.0, -1.0); 4];
        mat_mat_atb::<false, false, Complex<f64>>(
            MatRef::from_slice(&az, 0, 2),
            MatRef::from_slice(&az, 0, 2),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, [Complex::new(7.0, -1.0); 4]);
    }

    #[test]
    fn named_wrappers_agree() {
        let a = test_mat(3, 4, 1);
        let b = test_mat(4, 2, 2);
        let ar = MatRef::from_slice(&a, 3, 4);
        let br = MatRef::from_slice(&b, 4, 2);

        let mut c1 = vec![0.0; 6];
        mult_mat_mat(ar, br, MatMut::from_slice(&mut c1, 3, 2));
        let mut c2 = vec![0.0; 6];
        minus_mult_ab(ar, br, MatMut::from_slice(&mut c2, 3, 2));
        for i in 0..6 {
            assert!((c1[i] + c2[i]).abs() < TOL, "negated product idx={i}");
        }

        let mut c3 = c1.clone();
        sub_ab(ar, br, MatMut::from_slice(&mut c3, 3, 2));
        for i in 0..6 {
            assert!(c3[i].abs() < TOL, "C - AB after C := AB should vanish, idx={i}");
        }
    }

    #[test]
    fn complex_elements_use_generic_path() {
        let i = Complex::new(0.0, 1.0);
        let a = [i, Complex::new(1.0, 0.0), Complex::new(2.0, 0.0), i];
        let b = [Complex::new(1.0, 0.0), i, i, Complex::new(1.0, 0.0)];
        let mut c = [Complex::new(0.0, 0.0); 4];
        mult_mat_mat(
            MatRef::from_slice(&a, 2, 2),
            MatRef::from_slice(&b, 2, 2),
            MatMut::from_slice(&mut c, 2, 2),
        );
        // [[i,1],[2,i]] * [[1,i],[i,1]] = [[2i, i^2+1], [2+i^2, 2i+i]]
        assert_eq!(c[0], Complex::new(0.0, 2.0));
        assert_eq!(c[1], Complex::new(0.0, 0.0));
        assert_eq!(c[2], Complex::new(1.0, 0.0));
        assert_eq!(c[3], Complex::new(0.0, 3.0));
    }

    #[test]
    fn mult_atb_known_values() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [0.0; 4];
        mult_atb(
            MatRef::from_slice(&a, 2, 2),
            MatRef::from_slice(&b, 2, 2),
            MatMut::from_slice(&mut c, 2, 2),
        );
        assert_eq!(c, [26.0, 30.0, 38.0, 44.0]);
    }
}
