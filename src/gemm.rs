//! Policy-composed matrix products over arbitrary storage orders.
//!
//! [`gemm`] carries the update policy as const flags and the three storage
//! orders as type parameters. Each order combination routes to whichever
//! specialized family reads its operands along contiguous rows:
//!
//! | A   | B   | C   | family                         |
//! |-----|-----|-----|--------------------------------|
//! | row | row | row | `A B`                          |
//! | row | col | row | `A B^T` on the transposed view |
//! | col | row | row | `A^T B` on the transposed view |
//! | col | col | row | general fallback               |
//!
//! Column-major results rewrite through `(A B)^T = B^T A^T` onto the row
//! above, so six of the eight combinations land on a specialized family and
//! two fall back to the order-generic loops. The rewrite is view
//! manipulation only; no elements are copied or moved.

use crate::kernel::{abt, generic, matmat, matvec};
use crate::view::{ColMajor, MatMut, MatRef, Order, RowMajor, VecMut, VecRef};

/// Routing for one (A-order, B-order, C-order) combination, implemented on a
/// marker tuple. Sealed by construction: all eight combinations are covered
/// here.
pub trait GemmRoute {
    type A: Order;
    type B: Order;
    type C: Order;

    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64, Self::A>,
        b: MatRef<f64, Self::B>,
        c: MatMut<f64, Self::C>,
    );
}

impl GemmRoute for (RowMajor, RowMajor, RowMajor) {
    type A = RowMajor;
    type B = RowMajor;
    type C = RowMajor;

    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64>,
        b: MatRef<f64>,
        c: MatMut<f64>,
    ) {
        match (ADD, POS) {
            (false, true) => matmat::mult_mat_mat(a, b, c),
            (false, false) => matmat::minus_mult_ab(a, b, c),
            (true, true) => matmat::add_ab(a, b, c),
            (true, false) => matmat::sub_ab(a, b, c),
        }
    }
}

impl GemmRoute for (RowMajor, ColMajor, RowMajor) {
    type A = RowMajor;
    type B = ColMajor;
    type C = RowMajor;

    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64>,
        b: MatRef<f64, ColMajor>,
        c: MatMut<f64>,
    ) {
        // a column-major B is a row-major B^T over the same buffer
        abt::mat_mat_abt::<ADD, POS, f64>(a, b.transpose(), c)
    }
}

impl GemmRoute for (ColMajor, RowMajor, RowMajor) {
    type A = ColMajor;
    type B = RowMajor;
    type C = RowMajor;

    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64, ColMajor>,
        b: MatRef<f64>,
        c: MatMut<f64>,
    ) {
        matmat::mat_mat_atb::<ADD, POS, f64>(a.transpose(), b, c)
    }
}

impl GemmRoute for (ColMajor, ColMajor, RowMajor) {
    type A = ColMajor;
    type B = ColMajor;
    type C = RowMajor;

    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64, ColMajor>,
        b: MatRef<f64, ColMajor>,
        c: MatMut<f64>,
    ) {
        // no family reads both operands contiguously here
        generic::gemm_any::<f64, ADD, POS, ColMajor, ColMajor, RowMajor>(a, b, c)
    }
}

impl GemmRoute for (RowMajor, RowMajor, ColMajor) {
    type A = RowMajor;
    type B = RowMajor;
    type C = ColMajor;

    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64>,
        b: MatRef<f64>,
        c: MatMut<f64, ColMajor>,
    ) {
        generic::gemm_any::<f64, ADD, POS, RowMajor, RowMajor, ColMajor>(a, b, c)
    }
}

impl GemmRoute for (RowMajor, ColMajor, ColMajor) {
    type A = RowMajor;
    type B = ColMajor;
    type C = ColMajor;

    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64>,
        b: MatRef<f64, ColMajor>,
        c: MatMut<f64, ColMajor>,
    ) {
        // (A B)^T = B^T A^T turns the col-major result into a row-major one;
        // b^T is row-major and a^T col-major, so this lands on the A B^T route
        <(RowMajor, ColMajor, RowMajor) as GemmRoute>::run::<ADD, POS>(
            b.transpose(),
            a.transpose(),
            c.transpose(),
        )
    }
}

impl GemmRoute for (ColMajor, RowMajor, ColMajor) {
    type A = ColMajor;
    type B = RowMajor;
    type C = ColMajor;

    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64, ColMajor>,
        b: MatRef<f64>,
        c: MatMut<f64, ColMajor>,
    ) {
        // b^T is col-major and a^T row-major: the A^T B route
        <(ColMajor, RowMajor, RowMajor) as GemmRoute>::run::<ADD, POS>(
            b.transpose(),
            a.transpose(),
            c.transpose(),
        )
    }
}

impl GemmRoute for (ColMajor, ColMajor, ColMajor) {
    type A = ColMajor;
    type B = ColMajor;
    type C = ColMajor;

    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64, ColMajor>,
        b: MatRef<f64, ColMajor>,
        c: MatMut<f64, ColMajor>,
    ) {
        <(RowMajor, RowMajor, RowMajor) as GemmRoute>::run::<ADD, POS>(
            b.transpose(),
            a.transpose(),
            c.transpose(),
        )
    }
}

/// `C (:|+)= (+|-) A B` for any storage-order combination.
///
/// `ADD` accumulates instead of overwriting, `POS` selects the sign:
///
/// ```
/// use elbla::{gemm, ColMajor, MatMut, MatRef, RowMajor};
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [1.0, 3.0, 2.0, 4.0]; // the same matrix, column-major
/// let mut c = [10.0; 4];
/// // C -= A B
/// gemm::<true, false, RowMajor, ColMajor, RowMajor>(
///     MatRef::from_slice(&a, 2, 2),
///     MatRef::<f64, ColMajor>::from_slice(&b, 2, 2),
///     MatMut::from_slice(&mut c, 2, 2),
/// );
/// assert_eq!(c, [3.0, 0.0, -5.0, -12.0]);
/// ```
#[inline]
pub fn gemm<const ADD: bool, const POS: bool, OA, OB, OC>(
    a: MatRef<f64, OA>,
    b: MatRef<f64, OB>,
    c: MatMut<f64, OC>,
) where
    OA: Order,
    OB: Order,
    OC: Order,
    (OA, OB, OC): GemmRoute<A = OA, B = OB, C = OC>,
{
    <(OA, OB, OC) as GemmRoute>::run::<ADD, POS>(a, b, c)
}

/// Routing for one A-order of the matrix-vector product.
pub trait GemvRoute: Order {
    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64, Self>,
        x: VecRef<f64>,
        y: VecMut<f64>,
    );
}

impl GemvRoute for RowMajor {
    fn run<const ADD: bool, const POS: bool>(a: MatRef<f64>, x: VecRef<f64>, mut y: VecMut<f64>) {
        match (ADD, POS) {
            (false, true) => matvec::mult_mat_vec(a, x, y),
            (true, true) => matvec::mult_add_mat_vec(1.0, a, x, y),
            (true, false) => matvec::mult_add_mat_vec(-1.0, a, x, y),
            (false, false) => {
                y.fill(0.0);
                matvec::mult_add_mat_vec(-1.0, a, x, y);
            }
        }
    }
}

impl GemvRoute for ColMajor {
    fn run<const ADD: bool, const POS: bool>(
        a: MatRef<f64, ColMajor>,
        x: VecRef<f64>,
        mut y: VecMut<f64>,
    ) {
        // a column-major A is a row-major A^T: use the transposed family
        match (ADD, POS) {
            (false, true) => matvec::mult_mat_trans_vec(a.transpose(), x, y),
            (true, true) => matvec::mult_add_mat_trans_vec(1.0, a.transpose(), x, y),
            (true, false) => matvec::mult_add_mat_trans_vec(-1.0, a.transpose(), x, y),
            (false, false) => {
                y.fill(0.0);
                matvec::mult_add_mat_trans_vec(-1.0, a.transpose(), x, y);
            }
        }
    }
}

/// `y (:|+)= (+|-) A x` for either storage order of `A`.
#[inline]
pub fn gemv<const ADD: bool, const POS: bool, O: GemvRoute>(
    a: MatRef<f64, O>,
    x: VecRef<f64>,
    y: VecMut<f64>,
) {
    O::run::<ADD, POS>(a, x, y)
}
