//! Size-dispatched compute kernels.
//!
//! Each operation family pairs a set of micro-kernels specialized on a small
//! compile-time contraction size ([`small`]) with a general implementation
//! for arbitrary shapes ([`generic`]). A `static` table of plain function
//! pointers maps the runtime size to the right kernel; the last slot (or an
//! explicit size check) falls back to the general code, so every shape is
//! handled and the specialized sizes are merely faster.
//!
//! Dispatch is on `f64` views. The entry points in [`matmat`] and [`abt`]
//! accept any [`LinalgScalar`](crate::LinalgScalar) element and route
//! non-`f64` types to [`generic`] directly.

pub mod abt;
pub mod diag;
pub mod generic;
pub mod matmat;
pub mod matvec;
pub mod multivec;
pub(crate) mod small;

use crate::view::{MatMut, MatRef, VecMut, VecRef};

/// `y := A x`
pub(crate) type MatVecFn = fn(MatRef<f64>, VecRef<f64>, VecMut<f64>);

/// `y += s A x` (and the transposed variant)
pub(crate) type MatVecAddFn = fn(f64, MatRef<f64>, VecRef<f64>, VecMut<f64>);

/// `y[ind] += s A^T x`
pub(crate) type MatVecScatterFn = fn(f64, MatRef<f64>, VecRef<f64>, VecMut<f64>, &[usize]);

/// `C (:|+|-)= (+|-) A B` for one fixed policy
pub(crate) type MatMatFn = fn(MatRef<f64>, MatRef<f64>, MatMut<f64>);

/// Builds a `static` dispatch table: one micro-kernel per listed size, the
/// general fallback in the trailing slot.
macro_rules! dispatch_table {
    ($kernel:ident :: <$add:literal, $pos:literal>, $fallback:expr; $($k:literal)*) => {
        [$($kernel::<$k, $add, $pos>,)* $fallback]
    };
    ($kernel:ident, $fallback:expr; $($k:literal)*) => {
        [$($kernel::<$k>,)* $fallback]
    };
}

/// Builds a table with no fallback slot; the entry point checks the bound
/// and calls the general code itself.
macro_rules! kernel_table {
    ($kernel:ident :: <$add:literal, $pos:literal>; $($k:literal)*) => {
        [$($kernel::<$k, $add, $pos>,)*]
    };
    ($kernel:ident; $($k:literal)*) => {
        [$($kernel::<$k>,)*]
    };
}

pub(crate) use dispatch_table;
pub(crate) use kernel_table;
