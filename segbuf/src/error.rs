/// An error returned by [`Buffer`](crate::Buffer) operations.
///
/// Broken chain invariants are not reported through this type; they panic.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum Error {
  /// The pool could not supply a segment.
  Pool(segbuf_pool::Error),

  /// The range starting at the cursor runs past the used words of the buffer.
  OutOfBounds {
    /// The absolute position of the cursor.
    position: u32,
    /// The number of words requested.
    len: usize,
    /// The number of used words in the buffer.
    used: u32,
  },

  /// The cursor does not point at a word.
  NullCursor,

  /// Growing the buffer would overflow the 32-bit word count.
  Overflow {
    /// The number of used words in the buffer.
    used: u32,
    /// The number of words requested.
    requested: usize,
  },
}

impl From<segbuf_pool::Error> for Error {
  #[inline]
  fn from(e: segbuf_pool::Error) -> Self {
    Self::Pool(e)
  }
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::Pool(e) => write!(f, "{}", e),
      Self::OutOfBounds {
        position,
        len,
        used,
      } => write!(
        f,
        "Index out of bounds: {} words at position {} exceed the {} used words",
        len, position, used
      ),
      Self::NullCursor => write!(f, "Cursor does not point at a word"),
      Self::Overflow { used, requested } => write!(
        f,
        "Buffer overflow: cannot grow {} used words by {} words",
        used, requested
      ),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Pool(e) => Some(e),
      _ => None,
    }
  }
}
