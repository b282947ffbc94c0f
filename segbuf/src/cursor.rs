use segbuf_pool::Handle;

/// A position inside a buffer.
///
/// A cursor is plain data: the handle of the segment holding the current word, the
/// index of that word within the segment and its absolute position in the buffer. It is
/// moved by the buffer that produced it ([`Buffer::first`](crate::Buffer::first),
/// [`Buffer::next`](crate::Buffer::next), [`Buffer::advance`](crate::Buffer::advance),
/// ...) and must not be used after the buffer's segments are released.
///
/// A null cursor points at nothing; it is what a cursor becomes when it runs off the end
/// of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
  pub(crate) segment: Handle,
  pub(crate) index: u32,
  pub(crate) pos: u32,
}

impl Default for Cursor {
  #[inline]
  fn default() -> Self {
    Self::null()
  }
}

impl Cursor {
  /// Creates a null cursor.
  #[inline]
  pub const fn null() -> Self {
    Self {
      segment: Handle::NONE,
      index: u32::MAX,
      pos: u32::MAX,
    }
  }

  #[inline]
  pub(crate) const fn at(segment: Handle, index: u32, pos: u32) -> Self {
    Self {
      segment,
      index,
      pos,
    }
  }

  /// Returns `true` if the cursor points at nothing.
  #[inline]
  pub const fn is_null(&self) -> bool {
    self.segment.is_none()
  }

  /// Makes the cursor null.
  #[inline]
  pub fn set_null(&mut self) {
    *self = Self::null();
  }

  /// Returns the absolute word position, or `None` for a null cursor.
  #[inline]
  pub const fn position(&self) -> Option<u32> {
    if self.is_null() {
      None
    } else {
      Some(self.pos)
    }
  }

  /// Returns the index of the word within its segment, or `None` for a null cursor.
  #[inline]
  pub const fn index(&self) -> Option<u32> {
    if self.is_null() {
      None
    } else {
      Some(self.index)
    }
  }

  /// Returns the handle of the current segment.
  #[inline]
  pub const fn segment(&self) -> Handle {
    self.segment
  }
}
