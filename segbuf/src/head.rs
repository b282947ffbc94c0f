use core::{fmt, marker::PhantomData};

use segbuf_pool::Handle;

use super::{Segment, Word};

/// The persistent state of a buffer: its length and the two ends of its segment chain.
///
/// A head is a plain `Copy` descriptor. It owns nothing by itself and is meaningful only
/// together with the pool its segments were drawn from, which lets a head be embedded in
/// a larger record and turned into a [`Buffer`](crate::Buffer) only while it is worked
/// on (see [`LocalBuffer`](crate::LocalBuffer)).
///
/// `first` is `NONE` exactly when `used` is zero, and so is `last`.
#[repr(C)]
pub struct Head<const SZ: usize> {
  pub(crate) used: u32,
  pub(crate) first: Handle,
  pub(crate) last: Handle,
  _segment: PhantomData<[Word; SZ]>,
}

impl<const SZ: usize> Clone for Head<SZ> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<const SZ: usize> Copy for Head<SZ> {}

impl<const SZ: usize> PartialEq for Head<SZ> {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.used == other.used && self.first == other.first && self.last == other.last
  }
}

impl<const SZ: usize> Eq for Head<SZ> {}

impl<const SZ: usize> Default for Head<SZ> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<const SZ: usize> fmt::Debug for Head<SZ> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Head")
      .field("used", &self.used)
      .field("first", &self.first)
      .field("last", &self.last)
      .field("segment_size", &SZ)
      .finish()
  }
}

impl<const SZ: usize> Head<SZ> {
  /// Creates an empty head.
  #[inline]
  pub const fn new() -> Self {
    Self {
      used: 0,
      first: Handle::NONE,
      last: Handle::NONE,
      _segment: PhantomData,
    }
  }

  /// Returns the number of used words.
  #[inline]
  pub const fn size(&self) -> u32 {
    self.used
  }

  /// Returns `true` if no word is used.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.used == 0
  }

  /// Returns the capacity of one segment in words.
  #[inline]
  pub const fn segment_size() -> u32 {
    Segment::<SZ>::CAPACITY
  }

  /// Returns the handle of the first segment.
  #[inline]
  pub const fn first(&self) -> Handle {
    self.first
  }

  /// Returns the handle of the last segment.
  #[inline]
  pub const fn last(&self) -> Handle {
    self.last
  }

  /// Returns the number of segments in the chain.
  #[inline]
  pub const fn segments(&self) -> u32 {
    self.used.div_ceil(Segment::<SZ>::CAPACITY)
  }

  /// Words still free in the last segment.
  #[inline]
  pub(crate) const fn rest(&self) -> u32 {
    if self.first.is_none() {
      0
    } else {
      let cap = Segment::<SZ>::CAPACITY;
      (cap - self.used % cap) % cap
    }
  }
}
