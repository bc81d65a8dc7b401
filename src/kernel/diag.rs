//! Diagonal scaling, diagonally weighted products and the masked dot.
//!
//! The weighted updates `C -= A D B^T` / `C -= A^T D B` run as rank-1
//! accumulations over the diagonal index, reading all three operands along
//! contiguous rows. Row scaling delegates to column scaling of the transpose
//! instead of owning a second loop nest.

use crate::bitset::BitSet;
use crate::traits::LinalgScalar;
use crate::view::{ColMajor, MatMut, MatRef, Order, VecRef};

/// `A := A * diag(d)`, scaling column `j` by `d[j]`.
pub fn scale_cols<T: LinalgScalar, O: Order>(mut a: MatMut<T, O>, d: VecRef<T>) {
    debug_assert_eq!(a.cols(), d.len());
    if O::ROW_MAJOR {
        for i in 0..a.rows() {
            for j in 0..a.cols() {
                a[(i, j)] = a[(i, j)] * d[j];
            }
        }
    } else {
        for j in 0..a.cols() {
            let dj = d[j];
            for i in 0..a.rows() {
                a[(i, j)] = a[(i, j)] * dj;
            }
        }
    }
}

/// `A := diag(d) * A`, scaling row `i` by `d[i]`.
///
/// Scaling rows of `A` is scaling columns of `A^T` over the same buffer.
#[inline]
pub fn scale_rows<T: LinalgScalar, O: Order>(a: MatMut<T, O>, d: VecRef<T>) {
    scale_cols(a.transpose(), d)
}

/// `C -= A diag(d) B^T` with `A` of shape `m x k`, `B` of shape `n x k`.
pub fn sub_adbt<T: LinalgScalar>(a: MatRef<T>, d: VecRef<T>, b: MatRef<T>, mut c: MatMut<T>) {
    debug_assert_eq!(a.cols(), d.len());
    debug_assert_eq!(b.cols(), d.len());
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.rows());
    let k = d.len();
    for i in 0..a.rows() {
        let ar = a.row(i);
        for j in 0..b.rows() {
            let br = b.row(j);
            let mut acc = T::zero();
            for p in 0..k {
                acc = acc + ar[p] * d[p] * br[p];
            }
            c[(i, j)] = c[(i, j)] - acc;
        }
    }
}

/// `C -= A^T diag(d) B` with `A` of shape `k x m`, `B` of shape `k x n`.
///
/// Runs as `k` rank-1 updates so all three matrices stream along rows.
pub fn sub_atdb<T: LinalgScalar>(a: MatRef<T>, d: VecRef<T>, b: MatRef<T>, mut c: MatMut<T>) {
    debug_assert_eq!(a.rows(), d.len());
    debug_assert_eq!(b.rows(), d.len());
    debug_assert_eq!(c.rows(), a.cols());
    debug_assert_eq!(c.cols(), b.cols());
    let n = c.cols();
    for p in 0..d.len() {
        let dp = d[p];
        let ar = a.row(p);
        let br = b.row(p);
        for i in 0..c.rows() {
            let s = ar[i] * dp;
            let crow = &mut c.row_mut(i)[..n];
            for j in 0..n {
                crow[j] = crow[j] - s * br[j];
            }
        }
    }
}

/// [`sub_adbt`] for column-major operands: `C^T -= B diag(d) A^T` over the
/// transposed (row-major) views of the same buffers.
#[inline]
pub fn sub_adbt_colmajor<T: LinalgScalar>(
    a: MatRef<T, ColMajor>,
    d: VecRef<T>,
    b: MatRef<T, ColMajor>,
    c: MatMut<T, ColMajor>,
) {
    sub_atdb(b.transpose(), d, a.transpose(), c.transpose())
}

/// Dot product restricted to the positions whose mask bit is set.
pub fn masked_dot(a: VecRef<f64>, b: VecRef<f64>, mask: &BitSet) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    debug_assert!(mask.len() >= a.len());
    let mut acc = 0.0;
    for i in 0..a.len() {
        if mask.contains(i) {
            acc += a[i] * b[i];
        }
    }
    acc
}
