use core::ops::{Deref, DerefMut};

use segbuf_pool::Pool;

use super::*;

/// A [`Buffer`] over a head owned by someone else.
///
/// The head is copied in when the view is created and copied back when the view goes
/// out of scope, whichever way the scope is left (normal exit, early return, `?`, or a
/// panic unwinding through it). This lets a [`Head`] embedded in a larger record be
/// worked on as a full buffer for the duration of one operation.
///
/// # Example
///
/// ```
/// use segbuf::{Head, LocalBuffer, Segment, pool::{PoolOptions, RecordPool}};
///
/// struct Request {
///   id: u32,
///   payload: Head<8>,
/// }
///
/// let mut pool = RecordPool::new(Segment::<8>::record_info(1), PoolOptions::new()).unwrap();
/// let mut req = Request { id: 1, payload: Head::new() };
///
/// {
///   let mut buf = LocalBuffer::new(&mut pool, &mut req.payload);
///   buf.append(&[10, 20, 30]).unwrap();
/// }
///
/// assert_eq!(req.payload.size(), 3);
/// ```
pub struct LocalBuffer<'h, 'p, P: Pool + ?Sized, const SZ: usize> {
  buf: Buffer<'p, P, SZ>,
  src: &'h mut Head<SZ>,
}

impl<'h, 'p, P: Pool + ?Sized, const SZ: usize> LocalBuffer<'h, 'p, P, SZ> {
  /// Copies `src` into a buffer over `pool`.
  #[inline]
  pub fn new(pool: &'p mut P, src: &'h mut Head<SZ>) -> Self {
    Self {
      buf: Buffer::with_head(pool, *src),
      src,
    }
  }
}

impl<P: Pool + ?Sized, const SZ: usize> Drop for LocalBuffer<'_, '_, P, SZ> {
  #[inline]
  fn drop(&mut self) {
    *self.src = self.buf.head();
  }
}

impl<'p, P: Pool + ?Sized, const SZ: usize> Deref for LocalBuffer<'_, 'p, P, SZ> {
  type Target = Buffer<'p, P, SZ>;

  #[inline]
  fn deref(&self) -> &Self::Target {
    &self.buf
  }
}

impl<P: Pool + ?Sized, const SZ: usize> DerefMut for LocalBuffer<'_, '_, P, SZ> {
  #[inline]
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.buf
  }
}

impl<const SZ: usize> Head<SZ> {
  /// Runs `f` on a buffer over this head and writes the resulting head back, also when
  /// `f` panics.
  ///
  /// # Example
  ///
  /// ```
  /// use segbuf::{Head, Segment, pool::{PoolOptions, RecordPool}};
  ///
  /// let mut pool = RecordPool::new(Segment::<4>::record_info(1), PoolOptions::new()).unwrap();
  /// let mut head = Head::<4>::new();
  ///
  /// head.scoped(&mut pool, |buf| buf.append(&[1, 2, 3, 4, 5])).unwrap();
  /// assert_eq!(head.size(), 5);
  /// assert_eq!(head.segments(), 2);
  /// ```
  pub fn scoped<P, R, F>(&mut self, pool: &mut P, f: F) -> R
  where
    P: Pool + ?Sized,
    F: FnOnce(&mut Buffer<'_, P, SZ>) -> R,
  {
    let mut local = LocalBuffer::new(pool, self);
    f(&mut *local)
  }
}
