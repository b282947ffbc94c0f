use core::fmt;

/// An opaque reference to a record owned by a [`Pool`](crate::Pool).
///
/// Handles are plain 32-bit indices, so they stay valid across growth of the pool's
/// backing store and can be embedded in the records themselves (the next link of a
/// chained record is a `Handle`). [`Handle::NONE`] marks the absence of a record.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Handle(u32);

impl Handle {
  /// The sentinel handle which refers to no record.
  pub const NONE: Self = Self(u32::MAX);

  /// Creates a handle from a record index.
  ///
  /// # Example
  ///
  /// ```
  /// use segbuf_pool::Handle;
  ///
  /// let h = Handle::new(7);
  /// assert_eq!(h.index(), 7);
  /// assert!(h.is_some());
  /// ```
  #[inline]
  pub const fn new(index: u32) -> Self {
    Self(index)
  }

  /// Returns the raw index of the handle.
  #[inline]
  pub const fn index(&self) -> u32 {
    self.0
  }

  /// Returns `true` if this is [`Handle::NONE`].
  #[inline]
  pub const fn is_none(&self) -> bool {
    self.0 == u32::MAX
  }

  /// Returns `true` if this handle refers to a record.
  #[inline]
  pub const fn is_some(&self) -> bool {
    !self.is_none()
  }

  /// Converts the sentinel into `None`.
  #[inline]
  pub const fn get(self) -> Option<Self> {
    if self.is_none() {
      None
    } else {
      Some(self)
    }
  }
}

impl Default for Handle {
  #[inline]
  fn default() -> Self {
    Self::NONE
  }
}

impl From<Option<Handle>> for Handle {
  #[inline]
  fn from(h: Option<Handle>) -> Self {
    h.unwrap_or(Self::NONE)
  }
}

impl fmt::Debug for Handle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_none() {
      write!(f, "Handle(NONE)")
    } else {
      write!(f, "Handle({})", self.0)
    }
  }
}

impl fmt::Display for Handle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_none() {
      write!(f, "NONE")
    } else {
      write!(f, "{}", self.0)
    }
  }
}
