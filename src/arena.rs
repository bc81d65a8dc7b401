//! Caller-managed scratch memory with stack discipline.
//!
//! An [`Arena`] owns one flat `f64` buffer, sized once by the caller.
//! Operations that need temporaries borrow it through an [`ArenaStack`],
//! carve regions off the front with [`ArenaStack::take`], and give everything
//! back implicitly when the borrows end. No allocation happens on the hot
//! path, and nested calls can keep splitting the remainder.

use alloc::vec;
use alloc::vec::Vec;

use crate::view::{MatMut, VecMut};

/// Owns the scratch buffer.
pub struct Arena {
    storage: Vec<f64>,
}

impl Arena {
    /// Allocates an arena of `capacity` doubles.
    pub fn new(capacity: usize) -> Self {
        Arena { storage: vec![0.0; capacity] }
    }

    /// Total capacity in doubles.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Borrows the whole buffer as a fresh stack.
    pub fn stack(&mut self) -> ArenaStack<'_> {
        ArenaStack { buf: &mut self.storage }
    }
}

/// A borrowed suffix of the arena. `take` splits off the front and returns
/// the shrunken remainder, so regions release in reverse order of acquisition
/// as their borrows expire.
pub struct ArenaStack<'a> {
    buf: &'a mut [f64],
}

impl<'a> ArenaStack<'a> {
    /// Doubles still available.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Carves `n` doubles off the front. The contents are unspecified;
    /// callers must initialize what they read.
    ///
    /// Panics if fewer than `n` doubles remain.
    pub fn take(self, n: usize) -> (&'a mut [f64], ArenaStack<'a>) {
        assert!(
            n <= self.buf.len(),
            "arena exhausted: requested {n} doubles, {} remain",
            self.buf.len()
        );
        let (head, tail) = self.buf.split_at_mut(n);
        (head, ArenaStack { buf: tail })
    }

    /// Carves a packed row-major `rows x cols` matrix off the front.
    pub fn take_mat(self, rows: usize, cols: usize) -> (MatMut<'a, f64>, ArenaStack<'a>) {
        let (head, rest) = self.take(rows * cols);
        (MatMut::from_slice(head, rows, cols), rest)
    }

    /// Carves a packed vector of `len` doubles off the front.
    pub fn take_vec(self, len: usize) -> (VecMut<'a, f64>, ArenaStack<'a>) {
        let (head, rest) = self.take(len);
        (VecMut::from_slice(head), rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_splits_front() {
        let mut arena = Arena::new(10);
        assert_eq!(arena.capacity(), 10);
        let stack = arena.stack();
        let (a, stack) = stack.take(4);
        assert_eq!(a.len(), 4);
        assert_eq!(stack.remaining(), 6);
        let (b, stack) = stack.take(6);
        assert_eq!(b.len(), 6);
        assert_eq!(stack.remaining(), 0);
    }

    #[test]
    fn regions_are_disjoint() {
        let mut arena = Arena::new(8);
        let stack = arena.stack();
        let (a, stack) = stack.take(4);
        let (b, _stack) = stack.take(4);
        a.fill(1.0);
        b.fill(2.0);
        assert!(a.iter().all(|&v| v == 1.0));
        assert!(b.iter().all(|&v| v == 2.0));
    }

    #[test]
    fn released_on_borrow_end() {
        let mut arena = Arena::new(4);
        {
            let (head, _rest) = arena.stack().take(4);
            head.fill(3.0);
        }
        // the whole buffer is available again
        let (head, _rest) = arena.stack().take(4);
        assert_eq!(head.len(), 4);
    }

    #[test]
    fn take_mat_shape() {
        let mut arena = Arena::new(12);
        let (mut m, stack) = arena.stack().take_mat(3, 4);
        assert_eq!((m.rows(), m.cols()), (3, 4));
        assert_eq!(stack.remaining(), 0);
        m[(2, 3)] = 5.0;
        assert_eq!(m[(2, 3)], 5.0);
    }

    #[test]
    #[should_panic]
    fn exhaustion_panics() {
        let mut arena = Arena::new(3);
        let _ = arena.stack().take(4);
    }
}
