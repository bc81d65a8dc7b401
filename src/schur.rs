//! Static condensation: the Schur complement onto the kept unknowns.
//!
//! For a symmetric-ordered splitting of a square matrix `A` into eliminated
//! (`e`, marked in the bit set) and kept (`k`) index classes,
//!
//! ```text
//! S = A_kk - A_ke A_ee^{-1} A_ek
//! ```
//!
//! The eliminated block is reduced by progressive Gaussian pivoting on a
//! compacted permuted copy `[[A_ee, A_ek], [A_ke, A_kk]]` held in the arena;
//! each pivot folds into the trailing block as one diagonally weighted
//! rank-1 update. Pivots are taken in index order without searching, which
//! matches the invertible-by-construction eliminated blocks of conforming
//! discretizations. A zero pivot therefore produces IEEE infinities or NaNs
//! in the output rather than an error.

use alloc::vec::Vec;

use crate::arena::Arena;
use crate::bitset::BitSet;
use crate::kernel::diag::sub_adbt;
use crate::view::{MatMut, MatRef, VecRef};

/// Number of arena doubles [`calc_schur_complement`] needs for an `n x n`
/// input.
#[inline]
pub fn schur_arena_size(n: usize) -> usize {
    n * n + 2 * n
}

/// Writes the Schur complement of `a` onto the unknowns *not* marked in
/// `used` into `s`.
///
/// `used` marks the eliminated indices; `s` must be `m x m` where `m` is the
/// number of unmarked indices. With nothing marked this degenerates to a
/// copy of `a`; with everything marked `s` is empty and untouched. Scratch
/// space comes from `arena` (at least [`schur_arena_size`] doubles) and is
/// handed back when the call returns.
///
/// ```
/// use elbla::{calc_schur_complement, schur_arena_size, Arena, BitSet, MatMut, MatRef};
///
/// // [[4, 2], [2, 3]], eliminating index 0: S = 3 - 2 * 4^{-1} * 2 = 2
/// let a = [4.0, 2.0, 2.0, 3.0];
/// let mut used = BitSet::new(2);
/// used.set(0);
/// let mut s = [0.0];
/// let mut arena = Arena::new(schur_arena_size(2));
/// calc_schur_complement(
///     MatRef::from_slice(&a, 2, 2),
///     MatMut::from_slice(&mut s, 1, 1),
///     &used,
///     &mut arena,
/// );
/// assert!((s[0] - 2.0).abs() < 1e-12);
/// ```
pub fn calc_schur_complement(
    a: MatRef<'_, f64>,
    mut s: MatMut<'_, f64>,
    used: &BitSet,
    arena: &mut Arena,
) {
    let n = a.rows();
    debug_assert_eq!(a.cols(), n);
    debug_assert_eq!(used.len(), n);

    let mut elim: Vec<usize> = Vec::new();
    let mut kept: Vec<usize> = Vec::new();
    for i in 0..n {
        if used.contains(i) {
            elim.push(i);
        } else {
            kept.push(i);
        }
    }
    let ne = elim.len();
    let nk = kept.len();
    debug_assert_eq!(s.rows(), nk);
    debug_assert_eq!(s.cols(), nk);

    if nk == 0 {
        return;
    }
    if ne == 0 {
        for (i, &gi) in kept.iter().enumerate() {
            for (j, &gj) in kept.iter().enumerate() {
                s[(i, j)] = a[(gi, gj)];
            }
        }
        return;
    }

    let stack = arena.stack();
    let (mut m, stack) = stack.take_mat(n, n);
    let (col_buf, stack) = stack.take(n);
    let (row_buf, _stack) = stack.take(n);

    // compacted permuted copy: eliminated indices first, kept after
    for (pi, &gi) in elim.iter().chain(kept.iter()).enumerate() {
        for (pj, &gj) in elim.iter().chain(kept.iter()).enumerate() {
            m[(pi, pj)] = a[(gi, gj)];
        }
    }

    // eliminate the leading block pivot by pivot; the pivot row and column
    // are staged into scratch so the trailing update is one disjoint
    // rank-1 kernel call
    for p in 0..ne {
        let rem = n - p - 1;
        let dinv = [1.0 / m[(p, p)]];
        for r in 0..rem {
            col_buf[r] = m[(p + 1 + r, p)];
        }
        for c in 0..rem {
            row_buf[c] = m[(p, p + 1 + c)];
        }
        let colv = MatRef::<f64>::from_slice(&col_buf[..rem], rem, 1);
        let rowv = MatRef::<f64>::from_slice(&row_buf[..rem], rem, 1);
        let trailing = m.rb_mut().submatrix(p + 1, p + 1, rem, rem);
        sub_adbt(colv, VecRef::from_slice(&dinv), rowv, trailing);
    }

    for i in 0..nk {
        for j in 0..nk {
            s[(i, j)] = m[(ne + i, ne + j)];
        }
    }
}
