//! Symmetric eigensolver via cyclic Jacobi rotations.
//!
//! Sized for the small dense matrices of element-level computation, where a
//! bounded, allocation-light solve beats an optimal-complexity one. Each
//! sweep visits every strict upper-triangle entry once and annihilates it
//! with a two-sided rotation; the rotations accumulate into the eigenvector
//! matrix. Sweeps stop when the off-diagonal mass drops below the
//! round-off floor of the input, or after [`MAX_SWEEPS`] sweeps.
//!
//! A failure to converge is reported, never raised: the outputs always hold
//! the best approximation reached, so callers may inspect the status and
//! still use the result.

use core::fmt;

use alloc::vec;
use alloc::vec::Vec;

// `sqrt`/`abs` come from the trait when the inherent std methods are absent
#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::view::{MatMut, MatRef, VecMut};

/// Hard cap on Jacobi sweeps. Well-conditioned element matrices converge in
/// a handful; hitting the cap signals a pathological input.
pub const MAX_SWEEPS: usize = 30;

/// Outcome of an eigensolve. The decomposition outputs are written in both
/// cases; `Exhausted` means they are the best approximation reached when the
/// sweep budget ran out.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
    /// Off-diagonal mass reached the round-off floor within the budget.
    Converged {
        /// Full sweeps performed before the check passed.
        sweeps: usize,
    },
    /// Budget spent without reaching the floor.
    Exhausted,
}

impl Convergence {
    /// `true` unless the sweep budget ran out.
    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged { .. })
    }
}

impl fmt::Display for Convergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convergence::Converged { sweeps } => write!(f, "converged after {sweeps} sweeps"),
            Convergence::Exhausted => write!(f, "not converged after {MAX_SWEEPS} sweeps"),
        }
    }
}

fn frobenius(w: &[f64]) -> f64 {
    let mut acc = 0.0;
    for &v in w {
        acc += v * v;
    }
    acc.sqrt()
}

fn off_diag_norm(w: &[f64], n: usize) -> f64 {
    let mut acc = 0.0;
    for i in 0..n {
        for j in i + 1..n {
            let v = w[i * n + j];
            acc += 2.0 * v * v;
        }
    }
    acc.sqrt()
}

// Cyclic sweeps over the packed row-major working copy `w`; rotations
// accumulate into `v` when present. `w` must be symmetric on entry and stays
// symmetric throughout.
fn jacobi(w: &mut [f64], n: usize, mut v: Option<&mut MatMut<'_, f64>>) -> Convergence {
    let frob = frobenius(w);
    let tol = f64::EPSILON * frob;
    // entries already at round-off level are not worth a rotation
    let skip = 0.1 * f64::EPSILON * frob / ((n * n) as f64);

    for sweep in 0..MAX_SWEEPS {
        if off_diag_norm(w, n) <= tol {
            return Convergence::Converged { sweeps: sweep };
        }
        for p in 0..n - 1 {
            for q in p + 1..n {
                let apq = w[p * n + q];
                if apq.abs() <= skip {
                    continue;
                }
                let app = w[p * n + p];
                let aqq = w[q * n + q];
                let theta = (aqq - app) / (2.0 * apq);
                let t = if theta >= 0.0 {
                    1.0 / (theta + (1.0 + theta * theta).sqrt())
                } else {
                    1.0 / (theta - (1.0 + theta * theta).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;

                w[p * n + p] = app - t * apq;
                w[q * n + q] = aqq + t * apq;
                w[p * n + q] = 0.0;
                w[q * n + p] = 0.0;
                for i in 0..n {
                    if i == p || i == q {
                        continue;
                    }
                    let aip = w[i * n + p];
                    let aiq = w[i * n + q];
                    w[i * n + p] = c * aip - s * aiq;
                    w[i * n + q] = s * aip + c * aiq;
                    w[p * n + i] = w[i * n + p];
                    w[q * n + i] = w[i * n + q];
                }

                if let Some(vm) = v.as_mut() {
                    for i in 0..n {
                        let vip = vm[(i, p)];
                        let viq = vm[(i, q)];
                        vm[(i, p)] = c * vip - s * viq;
                        vm[(i, q)] = s * vip + c * viq;
                    }
                }
            }
        }
    }

    if off_diag_norm(w, n) <= tol {
        Convergence::Converged { sweeps: MAX_SWEEPS }
    } else {
        Convergence::Exhausted
    }
}

// Ascending selection sort, permuting eigenvector columns along with the
// eigenvalues.
fn sort_ascending(lambda: &mut VecMut<'_, f64>, mut v: Option<&mut MatMut<'_, f64>>) {
    let n = lambda.len();
    for i in 0..n {
        let mut min_idx = i;
        for j in i + 1..n {
            if lambda[j] < lambda[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            let tmp = lambda[i];
            lambda[i] = lambda[min_idx];
            lambda[min_idx] = tmp;
            if let Some(vm) = v.as_mut() {
                for r in 0..vm.rows() {
                    let t = vm[(r, i)];
                    vm[(r, i)] = vm[(r, min_idx)];
                    vm[(r, min_idx)] = t;
                }
            }
        }
    }
}

/// Full eigen-decomposition of a symmetric matrix: `A = V diag(lambda) V^T`.
///
/// `lambda` receives the eigenvalues in ascending order; the columns of `v`
/// are the matching orthonormal eigenvectors. Only the values of `a` are
/// read; symmetry is assumed, not checked. The outputs are written even when
/// the returned status is [`Convergence::Exhausted`].
///
/// ```
/// use elbla::{calc_eigen_system, MatMut, MatRef, VecMut};
///
/// let a = [2.0, 1.0, 1.0, 2.0];
/// let mut lambda = [0.0; 2];
/// let mut v = [0.0; 4];
/// let status = calc_eigen_system(
///     MatRef::from_slice(&a, 2, 2),
///     VecMut::from_slice(&mut lambda),
///     MatMut::from_slice(&mut v, 2, 2),
/// );
/// assert!(status.is_converged());
/// assert!((lambda[0] - 1.0).abs() < 1e-12);
/// assert!((lambda[1] - 3.0).abs() < 1e-12);
/// ```
pub fn calc_eigen_system(
    a: MatRef<'_, f64>,
    mut lambda: VecMut<'_, f64>,
    mut v: MatMut<'_, f64>,
) -> Convergence {
    let n = a.rows();
    debug_assert_eq!(a.cols(), n);
    debug_assert_eq!(lambda.len(), n);
    debug_assert_eq!(v.rows(), n);
    debug_assert_eq!(v.cols(), n);

    v.fill(0.0);
    for i in 0..n {
        v[(i, i)] = 1.0;
    }
    if n == 0 {
        return Convergence::Converged { sweeps: 0 };
    }
    if n == 1 {
        lambda[0] = a[(0, 0)];
        return Convergence::Converged { sweeps: 0 };
    }

    let mut w: Vec<f64> = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            w[i * n + j] = a[(i, j)];
        }
    }

    let status = jacobi(&mut w, n, Some(&mut v));
    for i in 0..n {
        lambda[i] = w[i * n + i];
    }
    sort_ascending(&mut lambda, Some(&mut v));
    status
}

/// Eigenvalues only, ascending; same iteration as [`calc_eigen_system`]
/// without accumulating the rotations.
pub fn eigenvalues_symmetric(a: MatRef<'_, f64>, mut lambda: VecMut<'_, f64>) -> Convergence {
    let n = a.rows();
    debug_assert_eq!(a.cols(), n);
    debug_assert_eq!(lambda.len(), n);

    if n == 0 {
        return Convergence::Converged { sweeps: 0 };
    }
    if n == 1 {
        lambda[0] = a[(0, 0)];
        return Convergence::Converged { sweeps: 0 };
    }

    let mut w: Vec<f64> = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            w[i * n + j] = a[(i, j)];
        }
    }

    let status = jacobi(&mut w, n, None);
    for i in 0..n {
        lambda[i] = w[i * n + i];
    }
    sort_ascending(&mut lambda, None);
    status
}
