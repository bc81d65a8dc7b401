//! Matrix-vector products dispatched on the contraction length.
//!
//! The tables cover the small widths that dominate element-level assembly;
//! longer operands fall through to [`generic`]. All entries take row-major
//! `f64` views. Column-major operands go through the composition layer,
//! which rewrites them onto the transposed family.

use super::generic;
use super::small::{
    add_mat_trans_vec as add_mat_trans_vec_k, add_mat_trans_vec_indirect as scatter_k,
    add_mat_vec as add_mat_vec_k, mat_trans_vec as mat_trans_vec_k, mat_vec as mat_vec_k,
};
use super::{dispatch_table, kernel_table};
use super::{MatVecAddFn, MatVecFn, MatVecScatterFn};
use crate::view::{MatRef, VecMut, VecRef};

static MULT_MAT_VEC: [MatVecFn; 26] = dispatch_table!(
    mat_vec_k, generic::mult_mat_vec::<f64>;
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24
);

static MULT_ADD_MAT_VEC: [MatVecAddFn; 25] = dispatch_table!(
    add_mat_vec_k, generic::mult_add_mat_vec::<f64>;
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23
);

static MULT_MAT_TRANS_VEC: [MatVecFn; 13] = dispatch_table!(
    mat_trans_vec_k, generic::mult_mat_trans_vec::<f64>;
    0 1 2 3 4 5 6 7 8 9 10 11
);

static MULT_ADD_MAT_TRANS_VEC: [MatVecAddFn; 13] = dispatch_table!(
    add_mat_trans_vec_k, generic::mult_add_mat_trans_vec::<f64>;
    0 1 2 3 4 5 6 7 8 9 10 11
);

static MULT_ADD_MAT_TRANS_VEC_INDIRECT: [MatVecScatterFn; 25] = kernel_table!(
    scatter_k;
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24
);

/// `y := A x`, dispatched on `x.len()` (the width of `A`).
///
/// ```
/// use elbla::{MatRef, VecMut, VecRef, mult_mat_vec};
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let x = [1.0, 1.0];
/// let mut y = [0.0; 2];
/// mult_mat_vec(
///     MatRef::from_slice(&a, 2, 2),
///     VecRef::from_slice(&x),
///     VecMut::from_slice(&mut y),
/// );
/// assert_eq!(y, [3.0, 7.0]);
/// ```
#[inline]
pub fn mult_mat_vec(a: MatRef<f64>, x: VecRef<f64>, y: VecMut<f64>) {
    let k = x.len().min(MULT_MAT_VEC.len() - 1);
    MULT_MAT_VEC[k](a, x, y);
}

/// `y += s A x`, dispatched on `x.len()`.
#[inline]
pub fn mult_add_mat_vec(s: f64, a: MatRef<f64>, x: VecRef<f64>, y: VecMut<f64>) {
    let k = x.len().min(MULT_ADD_MAT_VEC.len() - 1);
    MULT_ADD_MAT_VEC[k](s, a, x, y);
}

/// `y := A^T x`, dispatched on `x.len()` (the height of `A`).
#[inline]
pub fn mult_mat_trans_vec(a: MatRef<f64>, x: VecRef<f64>, y: VecMut<f64>) {
    let k = x.len().min(MULT_MAT_TRANS_VEC.len() - 1);
    MULT_MAT_TRANS_VEC[k](a, x, y);
}

/// `y += s A^T x`, dispatched on `x.len()`.
#[inline]
pub fn mult_add_mat_trans_vec(s: f64, a: MatRef<f64>, x: VecRef<f64>, y: VecMut<f64>) {
    let k = x.len().min(MULT_ADD_MAT_TRANS_VEC.len() - 1);
    MULT_ADD_MAT_TRANS_VEC[k](s, a, x, y);
}

/// `y[ind[i]] += s (A^T x)[i]` for each position `i` of the index array.
///
/// The gather/scatter pattern of assembling a local element result into a
/// global vector. Dispatched on `ind.len()` (the width of `A`); indices must
/// be in range for `y` and, for a well-defined result, distinct.
#[inline]
pub fn mult_add_mat_trans_vec_indirect(
    s: f64,
    a: MatRef<f64>,
    x: VecRef<f64>,
    y: VecMut<f64>,
    ind: &[usize],
) {
    if ind.len() < MULT_ADD_MAT_TRANS_VEC_INDIRECT.len() {
        MULT_ADD_MAT_TRANS_VEC_INDIRECT[ind.len()](s, a, x, y, ind);
    } else {
        generic::mult_add_mat_trans_vec_indirect(s, a, x, y, ind);
    }
}
