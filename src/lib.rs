//! # elbla
//!
//! Element-level dense linear algebra for finite-element style assembly:
//! matrix kernels dispatched on their (small) runtime size, a bounded
//! symmetric eigensolver, and Schur-complement static condensation.
//!
//! Matrices in this regime are a few rows and columns up to a few dozen, and
//! millions of them stream through the same handful of operations. Instead
//! of one general product loop, each operation family keeps a table of
//! micro-kernels specialized per compile-time size and picks one with a
//! single indexed load; arbitrary sizes fall back to general code with the
//! same semantics. Operands are borrowed views ([`MatRef`], [`MatMut`],
//! [`VecRef`], [`VecMut`]) over caller-owned storage, with the storage order
//! tracked in the type so transposition is free.
//!
//! ## Quick start
//!
//! ```
//! use elbla::{mult_mat_mat, MatMut, MatRef};
//!
//! let a = [1.0, 2.0, 3.0, 4.0];
//! let b = [0.5, 0.0, 0.0, 0.5];
//! let mut c = [0.0; 4];
//! mult_mat_mat(
//!     MatRef::from_slice(&a, 2, 2),
//!     MatRef::from_slice(&b, 2, 2),
//!     MatMut::from_slice(&mut c, 2, 2),
//! );
//! assert_eq!(c, [0.5, 1.0, 1.5, 2.0]);
//! ```
//!
//! ## Modules
//!
//! - [`view`]: borrowed matrix/vector views with compile-time storage order
//! - [`kernel`]: size-dispatched product families and their general fallbacks
//! - [`gemm`]: update-policy and storage-order composition over the families
//! - [`eigen`]: symmetric Jacobi eigensolver with an explicit status
//! - [`schur`]: static condensation through an arena-backed elimination
//! - [`arena`], [`bitset`]: scratch memory and index marking for condensation
//! - [`traits`]: element-type abstraction over real and complex scalars
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Standard library (float math via intrinsics) |
//! | `libm`  | no      | Float math for `no_std` builds |
//!
//! The crate is `no_std` with `alloc` when `std` is off; enable `libm` in
//! that configuration.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod arena;
pub mod bitset;
pub mod eigen;
pub mod gemm;
pub mod kernel;
pub mod schur;
pub mod traits;
pub mod view;

pub use arena::{Arena, ArenaStack};
pub use bitset::BitSet;
pub use eigen::{calc_eigen_system, eigenvalues_symmetric, Convergence, MAX_SWEEPS};
pub use gemm::{gemm, gemv, GemmRoute, GemvRoute};
pub use kernel::abt::{
    add_abt, add_abt_complex_real, add_abt_real_complex, add_abt_sym, add_abt_sym_real_complex,
    add_abt_sym_to_complex, add_abt_to_complex, mat_mat_abt, minus_mult_abt, mult_abt, sub_abt,
};
pub use kernel::diag::{masked_dot, scale_cols, scale_rows, sub_adbt, sub_adbt_colmajor, sub_atdb};
pub use kernel::generic::{add_vector, copy_vector, transpose_into};
pub use kernel::matmat::{add_ab, mat_mat_atb, minus_mult_ab, mult_atb, mult_mat_mat, sub_ab};
pub use kernel::matvec::{
    mult_add_mat_trans_vec, mult_add_mat_trans_vec_indirect, mult_add_mat_vec, mult_mat_trans_vec,
    mult_mat_vec,
};
pub use kernel::multivec::{multi_vector_add, pairwise_inner_product};
pub use schur::{calc_schur_complement, schur_arena_size};
pub use traits::{FloatScalar, LinalgScalar, Scalar};
pub use view::{ColMajor, MatMut, MatRef, Order, RowMajor, VecMut, VecRef};

pub use num_complex::Complex;
