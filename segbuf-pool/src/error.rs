/// An error returned by a [`Pool`](crate::Pool) or while constructing one.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum Error {
  /// Every record of the pool is in use.
  Exhausted {
    /// The maximum number of records the pool can hand out.
    capacity: u32,
  },

  /// The layout descriptor cannot describe a pooled record.
  InvalidRecordInfo(&'static str),

  /// The requested pool capacity is not usable.
  InvalidCapacity {
    /// The rejected capacity.
    capacity: u32,
  },
}

impl Error {
  #[inline]
  pub(crate) const fn exhausted(capacity: u32) -> Self {
    Self::Exhausted { capacity }
  }

  /// Returns `true` if the error reports pool exhaustion.
  #[inline]
  pub const fn is_exhausted(&self) -> bool {
    matches!(self, Self::Exhausted { .. })
  }
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::Exhausted { capacity } => write!(
        f,
        "Allocation failed: all {} records of the pool are in use",
        capacity
      ),
      Self::InvalidRecordInfo(reason) => write!(f, "Invalid record info: {}", reason),
      Self::InvalidCapacity { capacity } => write!(
        f,
        "Invalid pool capacity: {} (must be in 1..{})",
        capacity,
        u32::MAX
      ),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
