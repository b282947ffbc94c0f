bitflags::bitflags! {
  /// Behavior switches of a [`RecordPool`](crate::RecordPool).
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct PoolFlags: u8 {
    /// Check the tag of a record every time its handle is resolved.
    const VERIFY_TAG = 0b0000_0001;
    /// Overwrite the payload of a freed record with [`POISON`](crate::POISON).
    const POISON_ON_FREE = 0b0000_0010;
  }
}

/// Options for creating a [`RecordPool`](crate::RecordPool).
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
  capacity: u32,
  reserve: u32,
  flags: PoolFlags,
}

impl Default for PoolOptions {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl PoolOptions {
  /// Create an options for creating a pool with default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      capacity: 1024,
      reserve: 0,
      flags: PoolFlags::VERIFY_TAG,
    }
  }

  /// Set the maximum number of records the pool hands out.
  ///
  /// The capacity must be in `1..u32::MAX`, because [`Handle::NONE`](crate::Handle::NONE)
  /// occupies the last index.
  ///
  /// The default capacity is `1024` records.
  ///
  /// # Example
  ///
  /// ```
  /// use segbuf_pool::PoolOptions;
  ///
  /// let opts = PoolOptions::new().with_capacity(64);
  /// assert_eq!(opts.capacity(), 64);
  /// ```
  #[inline]
  pub const fn with_capacity(mut self, capacity: u32) -> Self {
    self.capacity = capacity;
    self
  }

  /// Set how many records are backed by memory when the pool is created.
  ///
  /// Records beyond the reserve are materialized one by one on demand. The value is
  /// clamped to the capacity.
  ///
  /// The default reserve is `0`.
  ///
  /// # Example
  ///
  /// ```
  /// use segbuf_pool::PoolOptions;
  ///
  /// let opts = PoolOptions::new().with_capacity(8).with_reserve(16);
  /// assert_eq!(opts.reserve(), 8);
  /// ```
  #[inline]
  pub const fn with_reserve(mut self, reserve: u32) -> Self {
    self.reserve = reserve;
    self
  }

  /// Set the behavior flags of the pool.
  ///
  /// The default is [`PoolFlags::VERIFY_TAG`].
  ///
  /// # Example
  ///
  /// ```
  /// use segbuf_pool::{PoolFlags, PoolOptions};
  ///
  /// let opts = PoolOptions::new().with_flags(PoolFlags::all());
  /// assert!(opts.flags().contains(PoolFlags::POISON_ON_FREE));
  /// ```
  #[inline]
  pub const fn with_flags(mut self, flags: PoolFlags) -> Self {
    self.flags = flags;
    self
  }

  /// Get the maximum number of records.
  #[inline]
  pub const fn capacity(&self) -> u32 {
    self.capacity
  }

  /// Get the number of records materialized up front.
  #[inline]
  pub const fn reserve(&self) -> u32 {
    if self.reserve > self.capacity {
      self.capacity
    } else {
      self.reserve
    }
  }

  /// Get the behavior flags.
  #[inline]
  pub const fn flags(&self) -> PoolFlags {
    self.flags
  }
}
