//! Borrowed matrix and vector views over caller-owned storage.
//!
//! The kernel layer never owns element data. Callers hand in slices wrapped
//! as [`MatRef`]/[`MatMut`] (with a compile-time storage-order marker) or
//! [`VecRef`]/[`VecMut`] (with a runtime stride). Transposition is free: it
//! flips the order marker and swaps the logical extents over the same buffer.

use core::any::TypeId;
use core::fmt::Debug;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::RowMajor {}
    impl Sealed for super::ColMajor {}
}

/// Storage order of a matrix view, resolved at compile time.
pub trait Order: sealed::Sealed + Copy + Debug + 'static {
    /// `true` for [`RowMajor`].
    const ROW_MAJOR: bool;
    /// The opposite order; transposing a view flips to this.
    type Flip: Order<Flip = Self>;
}

/// Rows are contiguous; element `(r, c)` lives at `r * stride + c`.
#[derive(Clone, Copy, Debug)]
pub struct RowMajor;

/// Columns are contiguous; element `(r, c)` lives at `c * stride + r`.
#[derive(Clone, Copy, Debug)]
pub struct ColMajor;

impl Order for RowMajor {
    const ROW_MAJOR: bool = true;
    type Flip = ColMajor;
}

impl Order for ColMajor {
    const ROW_MAJOR: bool = false;
    type Flip = RowMajor;
}

#[inline]
fn minor_extent<O: Order>(rows: usize, cols: usize) -> usize {
    if O::ROW_MAJOR {
        cols
    } else {
        rows
    }
}

// The slice must cover the last addressed element. Empty views are exempt
// so that zero-row/zero-column shapes can wrap an empty slice.
#[inline]
fn check_extent<O: Order>(len: usize, rows: usize, cols: usize, stride: usize) {
    if rows == 0 || cols == 0 {
        return;
    }
    assert!(
        stride >= minor_extent::<O>(rows, cols),
        "stride {stride} shorter than minor extent {}",
        minor_extent::<O>(rows, cols)
    );
    let major = if O::ROW_MAJOR { rows } else { cols };
    let need = (major - 1) * stride + minor_extent::<O>(rows, cols);
    assert!(
        need <= len,
        "matrix view {rows}x{cols} stride {stride} needs {need} elements, slice has {len}"
    );
}

/// Immutable matrix view: shape, stride and a storage-order marker over `&[T]`.
pub struct MatRef<'a, T, O: Order = RowMajor> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    stride: usize,
    order: PhantomData<O>,
}

impl<T, O: Order> Copy for MatRef<'_, T, O> {}

impl<T, O: Order> Clone for MatRef<'_, T, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, O: Order> MatRef<'a, T, O> {
    /// Wraps a packed slice, stride equal to the minor extent.
    ///
    /// Panics if the slice is shorter than `rows * cols`.
    ///
    /// # Examples
    ///
    /// ```
    /// use elbla::{ColMajor, MatRef};
    ///
    /// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    /// let a = MatRef::<f64>::from_slice(&data, 2, 3);
    /// assert_eq!(a[(1, 0)], 4.0);
    /// // the same storage read column-by-column
    /// let b = MatRef::<f64, ColMajor>::from_slice(&data, 3, 2);
    /// assert_eq!(b[(1, 0)], 2.0);
    /// ```
    #[inline]
    pub fn from_slice(data: &'a [T], rows: usize, cols: usize) -> Self {
        Self::from_strided(data, rows, cols, minor_extent::<O>(rows, cols))
    }

    /// Wraps a slice with an explicit leading-dimension stride.
    ///
    /// Panics if the slice cannot hold the addressed extent.
    #[inline]
    pub fn from_strided(data: &'a [T], rows: usize, cols: usize, stride: usize) -> Self {
        check_extent::<O>(data.len(), rows, cols, stride);
        MatRef { data, rows, cols, stride, order: PhantomData }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    fn offset(&self, r: usize, c: usize) -> usize {
        debug_assert!(r < self.rows && c < self.cols);
        if O::ROW_MAJOR {
            r * self.stride + c
        } else {
            c * self.stride + r
        }
    }

    /// The same buffer read with flipped extents and flipped order marker.
    #[inline]
    pub fn transpose(self) -> MatRef<'a, T, O::Flip> {
        MatRef {
            data: self.data,
            rows: self.cols,
            cols: self.rows,
            stride: self.stride,
            order: PhantomData,
        }
    }

    /// Rectangular sub-view starting at `(r0, c0)`.
    #[inline]
    pub fn submatrix(self, r0: usize, c0: usize, rows: usize, cols: usize) -> MatRef<'a, T, O> {
        debug_assert!(r0 + rows <= self.rows && c0 + cols <= self.cols);
        if rows == 0 || cols == 0 {
            return MatRef { data: &self.data[0..0], rows, cols, stride: self.stride, order: PhantomData };
        }
        let start = self.offset(r0, c0);
        MatRef { data: &self.data[start..], rows, cols, stride: self.stride, order: PhantomData }
    }

    /// Reinterprets the element type. Only sound when `T` and `U` are the
    /// same type; call sites guard with a `TypeId` comparison.
    #[inline]
    pub(crate) fn cast<U: 'static>(self) -> MatRef<'a, U, O>
    where
        T: 'static,
    {
        assert_eq!(TypeId::of::<T>(), TypeId::of::<U>());
        let data = unsafe { &*(self.data as *const [T] as *const [U]) };
        MatRef { data, rows: self.rows, cols: self.cols, stride: self.stride, order: PhantomData }
    }
}

impl<'a, T> MatRef<'a, T, RowMajor> {
    /// Row `r` as a contiguous slice.
    #[inline]
    pub fn row(&self, r: usize) -> &'a [T] {
        let start = r * self.stride;
        &self.data[start..start + self.cols]
    }
}

impl<T, O: Order> Index<(usize, usize)> for MatRef<'_, T, O> {
    type Output = T;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &T {
        &self.data[self.offset(r, c)]
    }
}

/// Mutable matrix view over `&mut [T]`.
pub struct MatMut<'a, T, O: Order = RowMajor> {
    data: &'a mut [T],
    rows: usize,
    cols: usize,
    stride: usize,
    order: PhantomData<O>,
}

impl<'a, T, O: Order> MatMut<'a, T, O> {
    /// Wraps a packed mutable slice, stride equal to the minor extent.
    #[inline]
    pub fn from_slice(data: &'a mut [T], rows: usize, cols: usize) -> Self {
        Self::from_strided(data, rows, cols, minor_extent::<O>(rows, cols))
    }

    /// Wraps a mutable slice with an explicit stride.
    #[inline]
    pub fn from_strided(data: &'a mut [T], rows: usize, cols: usize, stride: usize) -> Self {
        check_extent::<O>(data.len(), rows, cols, stride);
        MatMut { data, rows, cols, stride, order: PhantomData }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    fn offset(&self, r: usize, c: usize) -> usize {
        debug_assert!(r < self.rows && c < self.cols);
        if O::ROW_MAJOR {
            r * self.stride + c
        } else {
            c * self.stride + r
        }
    }

    /// Immutable view of the same data.
    #[inline]
    pub fn as_ref(&self) -> MatRef<'_, T, O> {
        MatRef {
            data: &*self.data,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            order: PhantomData,
        }
    }

    /// Reborrows as a shorter-lived mutable view.
    #[inline]
    pub fn rb_mut(&mut self) -> MatMut<'_, T, O> {
        MatMut {
            data: &mut *self.data,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            order: PhantomData,
        }
    }

    /// The same buffer written with flipped extents and flipped order marker.
    #[inline]
    pub fn transpose(self) -> MatMut<'a, T, O::Flip> {
        MatMut {
            data: self.data,
            rows: self.cols,
            cols: self.rows,
            stride: self.stride,
            order: PhantomData,
        }
    }

    /// Rectangular mutable sub-view starting at `(r0, c0)`. Consumes the view;
    /// reborrow with [`MatMut::rb_mut`] first to keep the original.
    #[inline]
    pub fn submatrix(self, r0: usize, c0: usize, rows: usize, cols: usize) -> MatMut<'a, T, O> {
        debug_assert!(r0 + rows <= self.rows && c0 + cols <= self.cols);
        if rows == 0 || cols == 0 {
            return MatMut { data: &mut self.data[0..0], rows, cols, stride: self.stride, order: PhantomData };
        }
        let start = self.offset(r0, c0);
        MatMut { data: &mut self.data[start..], rows, cols, stride: self.stride, order: PhantomData }
    }

    /// Overwrites every element of the view (gaps beyond the stride are left
    /// untouched).
    pub fn fill(&mut self, value: T)
    where
        T: Copy,
    {
        for r in 0..self.rows {
            for c in 0..self.cols {
                let off = self.offset(r, c);
                self.data[off] = value;
            }
        }
    }

    /// See [`MatRef::cast`].
    #[inline]
    pub(crate) fn cast<U: 'static>(self) -> MatMut<'a, U, O>
    where
        T: 'static,
    {
        assert_eq!(TypeId::of::<T>(), TypeId::of::<U>());
        let data = unsafe { &mut *(self.data as *mut [T] as *mut [U]) };
        MatMut { data, rows: self.rows, cols: self.cols, stride: self.stride, order: PhantomData }
    }
}

impl<'a, T> MatMut<'a, T, RowMajor> {
    /// Row `r` as a contiguous mutable slice.
    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        let start = r * self.stride;
        &mut self.data[start..start + self.cols]
    }
}

impl<T, O: Order> Index<(usize, usize)> for MatMut<'_, T, O> {
    type Output = T;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &T {
        &self.data[self.offset(r, c)]
    }
}

impl<T, O: Order> IndexMut<(usize, usize)> for MatMut<'_, T, O> {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        let off = self.offset(r, c);
        &mut self.data[off]
    }
}

/// Immutable strided vector view.
pub struct VecRef<'a, T> {
    data: &'a [T],
    len: usize,
    stride: usize,
}

impl<T> Copy for VecRef<'_, T> {}

impl<T> Clone for VecRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> VecRef<'a, T> {
    /// Wraps a packed slice (stride 1, length = slice length).
    #[inline]
    pub fn from_slice(data: &'a [T]) -> Self {
        VecRef { len: data.len(), data, stride: 1 }
    }

    /// Wraps a slice with an explicit element stride.
    #[inline]
    pub fn from_strided(data: &'a [T], len: usize, stride: usize) -> Self {
        if len > 0 {
            assert!(stride >= 1, "vector stride must be at least 1");
            assert!(
                (len - 1) * stride < data.len(),
                "vector view len {len} stride {stride} exceeds slice of {}",
                data.len()
            );
        }
        VecRef { data, len, stride }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The underlying slice when the view is packed.
    #[inline]
    pub fn as_slice(&self) -> Option<&'a [T]> {
        if self.stride == 1 {
            Some(&self.data[..self.len])
        } else {
            None
        }
    }
}

impl<T> Index<usize> for VecRef<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        debug_assert!(i < self.len);
        &self.data[i * self.stride]
    }
}

/// Mutable strided vector view.
pub struct VecMut<'a, T> {
    data: &'a mut [T],
    len: usize,
    stride: usize,
}

impl<'a, T> VecMut<'a, T> {
    /// Wraps a packed mutable slice (stride 1).
    #[inline]
    pub fn from_slice(data: &'a mut [T]) -> Self {
        VecMut { len: data.len(), data, stride: 1 }
    }

    /// Wraps a mutable slice with an explicit element stride.
    #[inline]
    pub fn from_strided(data: &'a mut [T], len: usize, stride: usize) -> Self {
        if len > 0 {
            assert!(stride >= 1, "vector stride must be at least 1");
            assert!(
                (len - 1) * stride < data.len(),
                "vector view len {len} stride {stride} exceeds slice of {}",
                data.len()
            );
        }
        VecMut { data, len, stride }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Immutable view of the same data.
    #[inline]
    pub fn as_ref(&self) -> VecRef<'_, T> {
        VecRef { data: &*self.data, len: self.len, stride: self.stride }
    }

    /// Reborrows as a shorter-lived mutable view.
    #[inline]
    pub fn rb_mut(&mut self) -> VecMut<'_, T> {
        VecMut { data: &mut *self.data, len: self.len, stride: self.stride }
    }

    /// Overwrites every element of the view.
    pub fn fill(&mut self, value: T)
    where
        T: Copy,
    {
        for i in 0..self.len {
            self.data[i * self.stride] = value;
        }
    }
}

impl<T> Index<usize> for VecMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        debug_assert!(i < self.len);
        &self.data[i * self.stride]
    }
}

impl<T> IndexMut<usize> for VecMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        debug_assert!(i < self.len);
        &mut self.data[i * self.stride]
    }
}
