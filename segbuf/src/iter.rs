use core::iter::FusedIterator;

use segbuf_pool::{Handle, Pool};

use super::*;

/// An iterator over the used words of a [`Buffer`], first to last.
///
/// Created by [`Buffer::iter`].
pub struct Words<'a, 'p, P: Pool + ?Sized, const SZ: usize> {
  buf: &'a Buffer<'p, P, SZ>,
  cursor: Cursor,
}

impl<'a, 'p, P: Pool + ?Sized, const SZ: usize> Words<'a, 'p, P, SZ> {
  #[inline]
  pub(crate) fn new(buf: &'a Buffer<'p, P, SZ>) -> Self {
    let mut cursor = Cursor::null();
    buf.first(&mut cursor);
    Self { buf, cursor }
  }

  /// Returns the cursor of the word the next call to `next` yields.
  #[inline]
  pub const fn cursor(&self) -> Cursor {
    self.cursor
  }
}

impl<P: Pool + ?Sized, const SZ: usize> Iterator for Words<'_, '_, P, SZ> {
  type Item = Word;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let word = self.buf.get(&self.cursor)?;
    self.buf.next(&mut self.cursor);
    Some(word)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.len();
    (len, Some(len))
  }

  fn nth(&mut self, n: usize) -> Option<Self::Item> {
    match u32::try_from(n) {
      Ok(hops) if self.buf.advance(&mut self.cursor, hops) => self.next(),
      _ => {
        self.cursor.set_null();
        None
      }
    }
  }
}

impl<P: Pool + ?Sized, const SZ: usize> ExactSizeIterator for Words<'_, '_, P, SZ> {
  #[inline]
  fn len(&self) -> usize {
    match self.cursor.position() {
      Some(pos) => (self.buf.size() - pos) as usize,
      None => 0,
    }
  }
}

impl<P: Pool + ?Sized, const SZ: usize> FusedIterator for Words<'_, '_, P, SZ> {}

/// An iterator over the handles of a segment chain, first to last.
///
/// Created by [`Buffer::segment_handles`].
pub struct SegmentHandles<'a, P: ?Sized, const SZ: usize> {
  pool: &'a P,
  next: Handle,
}

impl<'a, P: Pool + ?Sized, const SZ: usize> SegmentHandles<'a, P, SZ> {
  #[inline]
  pub(crate) fn new(pool: &'a P, first: Handle) -> Self {
    Self { pool, next: first }
  }
}

impl<P: Pool + ?Sized, const SZ: usize> Iterator for SegmentHandles<'_, P, SZ> {
  type Item = Handle;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let current = self.next.get()?;
    self.next = Segment::<SZ>::from_words(self.pool.get(current)).next();
    Some(current)
  }
}

impl<P: Pool + ?Sized, const SZ: usize> FusedIterator for SegmentHandles<'_, P, SZ> {}
