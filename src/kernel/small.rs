//! Micro-kernels specialized on a compile-time contraction size.
//!
//! Each function fixes the reduction dimension as a const parameter `K`, so
//! the compiler sees constant trip counts and unrolls fully. Operands along
//! the fixed dimension are staged into stack arrays first; scale factors and
//! signs fold into the staged copy so the inner loops are pure multiply-add.
//! Instantiated per size into the dispatch tables of the sibling modules.

use crate::view::{MatMut, MatRef, VecMut, VecRef};

/// `y := A x`, `A` of width `K`.
pub(crate) fn mat_vec<const K: usize>(a: MatRef<f64>, x: VecRef<f64>, mut y: VecMut<f64>) {
    debug_assert_eq!(a.cols(), K);
    debug_assert_eq!(x.len(), K);
    debug_assert_eq!(y.len(), a.rows());
    let mut xv = [0.0; K];
    for k in 0..K {
        xv[k] = x[k];
    }
    for i in 0..a.rows() {
        let row = &a.row(i)[..K];
        let mut acc = 0.0;
        for k in 0..K {
            acc += row[k] * xv[k];
        }
        y[i] = acc;
    }
}

/// `y += s A x`, `A` of width `K`.
pub(crate) fn add_mat_vec<const K: usize>(s: f64, a: MatRef<f64>, x: VecRef<f64>, mut y: VecMut<f64>) {
    debug_assert_eq!(a.cols(), K);
    debug_assert_eq!(x.len(), K);
    debug_assert_eq!(y.len(), a.rows());
    let mut xv = [0.0; K];
    for k in 0..K {
        xv[k] = s * x[k];
    }
    for i in 0..a.rows() {
        let row = &a.row(i)[..K];
        let mut acc = 0.0;
        for k in 0..K {
            acc += row[k] * xv[k];
        }
        y[i] += acc;
    }
}

/// `y := A^T x`, `A` of height `K`. Streams rows of `A`, so the matrix is
/// read contiguously even though the product runs over its columns.
pub(crate) fn mat_trans_vec<const K: usize>(a: MatRef<f64>, x: VecRef<f64>, mut y: VecMut<f64>) {
    debug_assert_eq!(a.rows(), K);
    debug_assert_eq!(x.len(), K);
    debug_assert_eq!(y.len(), a.cols());
    let mut xv = [0.0; K];
    for k in 0..K {
        xv[k] = x[k];
    }
    let n = y.len();
    for j in 0..n {
        y[j] = 0.0;
    }
    for k in 0..K {
        let c = xv[k];
        let row = &a.row(k)[..n];
        for j in 0..n {
            y[j] += c * row[j];
        }
    }
}

/// `y += s A^T x`, `A` of height `K`.
pub(crate) fn add_mat_trans_vec<const K: usize>(
    s: f64,
    a: MatRef<f64>,
    x: VecRef<f64>,
    mut y: VecMut<f64>,
) {
    debug_assert_eq!(a.rows(), K);
    debug_assert_eq!(x.len(), K);
    debug_assert_eq!(y.len(), a.cols());
    let mut xv = [0.0; K];
    for k in 0..K {
        xv[k] = s * x[k];
    }
    let n = y.len();
    for k in 0..K {
        let c = xv[k];
        let row = &a.row(k)[..n];
        for j in 0..n {
            y[j] += c * row[j];
        }
    }
}

/// `y[ind[i]] += s (A^T x)[i]`, `A` of width `W = ind.len()`. The product is
/// accumulated densely in registers, then scattered in one pass.
pub(crate) fn add_mat_trans_vec_indirect<const W: usize>(
    s: f64,
    a: MatRef<f64>,
    x: VecRef<f64>,
    mut y: VecMut<f64>,
    ind: &[usize],
) {
    debug_assert_eq!(a.cols(), W);
    debug_assert_eq!(ind.len(), W);
    debug_assert_eq!(x.len(), a.rows());
    let mut acc = [0.0; W];
    for j in 0..a.rows() {
        let xj = x[j];
        let row = &a.row(j)[..W];
        for i in 0..W {
            acc[i] += xj * row[i];
        }
    }
    for i in 0..W {
        y[ind[i]] += s * acc[i];
    }
}

/// `C (:|+)= (+|-) A B`, contraction size `K` (width of `A`, height of `B`).
/// `ADD` accumulates instead of overwriting; `POS` selects the sign.
pub(crate) fn mat_mat<const K: usize, const ADD: bool, const POS: bool>(
    a: MatRef<f64>,
    b: MatRef<f64>,
    mut c: MatMut<f64>,
) {
    debug_assert_eq!(a.cols(), K);
    debug_assert_eq!(b.rows(), K);
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.cols());
    let n = c.cols();
    for i in 0..a.rows() {
        let ar = &a.row(i)[..K];
        let mut av = [0.0; K];
        for k in 0..K {
            av[k] = if POS { ar[k] } else { -ar[k] };
        }
        let crow = &mut c.row_mut(i)[..n];
        if !ADD {
            for cj in crow.iter_mut() {
                *cj = 0.0;
            }
        }
        for k in 0..K {
            let aik = av[k];
            let brow = &b.row(k)[..n];
            for j in 0..n {
                crow[j] += aik * brow[j];
            }
        }
    }
}

/// `C (:|+)= (+|-) A^T B`, contraction size `K` (height of both operands).
pub(crate) fn mat_mat_atb<const K: usize, const ADD: bool, const POS: bool>(
    a: MatRef<f64>,
    b: MatRef<f64>,
    mut c: MatMut<f64>,
) {
    debug_assert_eq!(a.rows(), K);
    debug_assert_eq!(b.rows(), K);
    debug_assert_eq!(c.rows(), a.cols());
    debug_assert_eq!(c.cols(), b.cols());
    let n = c.cols();
    for i in 0..c.rows() {
        let mut av = [0.0; K];
        for k in 0..K {
            let v = a[(k, i)];
            av[k] = if POS { v } else { -v };
        }
        let crow = &mut c.row_mut(i)[..n];
        if !ADD {
            for cj in crow.iter_mut() {
                *cj = 0.0;
            }
        }
        for k in 0..K {
            let aki = av[k];
            let brow = &b.row(k)[..n];
            for j in 0..n {
                crow[j] += aki * brow[j];
            }
        }
    }
}

/// `C (:|+)= (+|-) A B^T`, contraction size `K` (width of both operands).
/// Each output element is one length-`K` dot product of contiguous rows.
pub(crate) fn mat_mat_abt<const K: usize, const ADD: bool, const POS: bool>(
    a: MatRef<f64>,
    b: MatRef<f64>,
    mut c: MatMut<f64>,
) {
    debug_assert_eq!(a.cols(), K);
    debug_assert_eq!(b.cols(), K);
    debug_assert_eq!(c.rows(), a.rows());
    debug_assert_eq!(c.cols(), b.rows());
    for i in 0..a.rows() {
        let ar = &a.row(i)[..K];
        for j in 0..b.rows() {
            let br = &b.row(j)[..K];
            let mut acc = 0.0;
            for k in 0..K {
                acc += ar[k] * br[k];
            }
            let acc = if POS { acc } else { -acc };
            let cij = &mut c[(i, j)];
            if ADD {
                *cij += acc;
            } else {
                *cij = acc;
            }
        }
    }
}
