//! General implementations for arbitrary shapes and element types.
//!
//! Everything here is plain loops with no size specialization. The dispatch
//! tables use these functions as their trailing fallback slot, the typed
//! entry points route non-`f64` elements here, and the test suites treat
//! them as the reference the specialized kernels must agree with.

use crate::traits::LinalgScalar;
use crate::view::{MatMut, MatRef, Order, VecMut, VecRef};

/// `dest := src`
pub fn copy_vector<T: LinalgScalar>(src: VecRef<T>, mut dest: VecMut<T>) {
    debug_assert_eq!(src.len(), dest.len());
    for i in 0..src.len() {
        dest[i] = src[i];
    }
}

/// `dest += alpha * src`
pub fn add_vector<T: LinalgScalar>(alpha: T, src: VecRef<T>, mut dest: VecMut<T>) {
    debug_assert_eq!(src.len(), dest.len());
    for i in 0..src.len() {
        dest[i] = dest[i] + alpha * src[i];
    }
}

/// `B := A^T` as an element copy into separately stored output.
pub fn transpose_into<T: LinalgScalar, O: Order, P: Order>(a: MatRef<T, O>, mut b: MatMut<T, P>) {
    debug_assert_eq!(b.rows(), a.cols());
    debug_assert_eq!(b.cols(), a.rows());
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            b[(j, i)] = a[(i, j)];
        }
    }
}

/// `y := A x`
pub fn mult_mat_vec<T: LinalgScalar>(a: MatRef<T>, x: VecRef<T>, mut y: VecMut<T>) {
    debug_assert_eq!(a.cols(), x.len());
    debug_assert_eq!(a.rows(), y.len());
    for i in 0..a.rows() {
        let row = a.row(i);
        let mut acc = T::zero();
        for k in 0..x.len() {
            acc = acc + row[k] * x[k];
        }
        y[i] = acc;
    }
}

/// `y += s A x`
pub fn mult_add_mat_vec<T: LinalgScalar>(s: T, a: MatRef<T>, x: VecRef<T>, mut y: VecMut<T>) {
    debug_assert_eq!(a.cols(), x.len());
    debug_assert_eq!(a.rows(), y.len());
    for i in 0..a.rows() {
        let row = a.row(i);
        let mut acc = T::zero();
        for k in 0..x.len() {
            acc = acc + row[k] * x[k];
        }
        y[i] = y[i] + s * acc;
    }
}

/// `y := A^T x`
pub fn mult_mat_trans_vec<T: LinalgScalar>(a: MatRef<T>, x: VecRef<T>, mut y: VecMut<T>) {
    debug_assert_eq!(a.rows(), x.len());
    debug_assert_eq!(a.cols(), y.len());
    for j in 0..y.len() {
        y[j] = T::zero();
    }
    for k in 0..x.len() {
        let c = x[k];
        let row = a.row(k);
        for j in 0..y.len() {
            y[j] = y[j] + c * row[j];
        }
    }
}

/// `y += s A^T x`
pub fn mult_add_mat_trans_vec<T: LinalgScalar>(s: T, a: MatRef<T>, x: VecRef<T>, mut y: VecMut<T>) {
    debug_assert_eq!(a.rows(), x.len());
    debug_assert_eq!(a.cols(), y.len());
    for k in 0..x.len() {
        let c = s * x[k];
        let row = a.row(k);
        for j in 0..y.len() {
            y[j] = y[j] + c * row[j];
        }
    }
}

/// `y[ind[i]] += s (A^T x)[i]`
pub fn mult_add_mat_trans_vec_indirect(
    s: f64,
    a: MatRef<f64>,
    x: VecRef<f64>,
    mut y: VecMut<f64>,
    ind: &[usize],
) {
    debug_assert_eq!(a.rows(), x.len());
    debug_assert_eq!(a.cols(), ind.len());
    for (i, &yi) in ind.iter().enumerate() {
        let mut acc = 0.0;
        for k in 0..x.len() {
            acc += a[(k, i)] * x[k];
        }
        y[yi] += s * acc;
    }
}

/// `C (:|+)= (+|-) A B`
pub fn mat_mat<T: LinalgScalar, const ADD: bool, const POS: bool>(
    a: MatRef<T>,
    b: MatRef<T>,
    mut c: MatMut<T>,
) {
    debug_assert_eq!(a.cols(), b.rows());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.cols());
    for i in 0..c.rows() {
        for j in 0..c.cols() {
            let mut acc = T::zero();
            for k in 0..a.cols() {
                acc = acc + a[(i, k)] * b[(k, j)];
            }
            let acc = if POS { acc } else { T::zero() - acc };
            let prev = c[(i, j)];
            c[(i, j)] = if ADD { prev + acc } else { acc };
        }
    }
}

/// `C (:|+)= (+|-) A^T B`
///
/// An empty contraction (zero shared height) or a zero-width `B` returns
/// with `C` untouched, matching [`crate::kernel::matmat::mat_mat_atb`].
pub fn mat_mat_atb<T: LinalgScalar, const ADD: bool, const POS: bool>(
    a: MatRef<T>,
    b: MatRef<T>,
    mut c: MatMut<T>,
) {
    debug_assert_eq!(a.rows(), b.rows());
    debug_assert_eq!(c.rows(), a.cols());
    debug_assert_eq!(c.cols(), b.cols());
    if a.rows() == 0 || b.cols() == 0 {
        return;
    }
    for i in 0..c.rows() {
        for j in 0..c.cols() {
            let mut acc = T::zero();
            for k in 0..a.rows() {
                acc = acc + a[(k, i)] * b[(k, j)];
            }
            let acc = if POS { acc } else { T::zero() - acc };
            let prev = c[(i, j)];
            c[(i, j)] = if ADD { prev + acc } else { acc };
        }
    }
}

/// `C (:|+)= (+|-) A B^T`
pub fn mat_mat_abt<T: LinalgScalar, const ADD: bool, const POS: bool>(
    a: MatRef<T>,
    b: MatRef<T>,
    mut c: MatMut<T>,
) {
    debug_assert_eq!(a.cols(), b.cols());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.rows());
    for i in 0..c.rows() {
        let ar = a.row(i);
        for j in 0..c.cols() {
            let br = b.row(j);
            let mut acc = T::zero();
            for k in 0..a.cols() {
                acc = acc + ar[k] * br[k];
            }
            let acc = if POS { acc } else { T::zero() - acc };
            let prev = c[(i, j)];
            c[(i, j)] = if ADD { prev + acc } else { acc };
        }
    }
}

/// `C (:|+)= (+|-) A B` for any combination of storage orders. Pure index
/// arithmetic; the composition layer routes here when no specialized family
/// matches the order combination.
pub fn gemm_any<T, const ADD: bool, const POS: bool, OA, OB, OC>(
    a: MatRef<T, OA>,
    b: MatRef<T, OB>,
    mut c: MatMut<T, OC>,
) where
    T: LinalgScalar,
    OA: Order,
    OB: Order,
    OC: Order,
{
    debug_assert_eq!(a.cols(), b.rows());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.cols());
    for i in 0..c.rows() {
        for j in 0..c.cols() {
            let mut acc = T::zero();
            for k in 0..a.cols() {
                acc = acc + a[(i, k)] * b[(k, j)];
            }
            let acc = if POS { acc } else { T::zero() - acc };
            let prev = c[(i, j)];
            c[(i, j)] = if ADD { prev + acc } else { acc };
        }
    }
}
