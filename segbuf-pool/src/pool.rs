use core::{fmt, ops::Range};

use std::vec::Vec;

use super::*;

/// The interface a pooled allocator offers to the structures built on top of it.
///
/// Records are addressed by [`Handle`]s only; a resolved view (`&[u32]`) is short-lived
/// and must not be held across calls that may reallocate the backing store.
pub trait Pool {
  /// Returns the layout descriptor of the records managed by the pool.
  fn record_info(&self) -> RecordInfo;

  /// Obtains one free record.
  ///
  /// The record's tag is set to [`RecordInfo::type_id`] and its next field to
  /// [`Handle::NONE`]; the payload is unspecified.
  fn alloc(&mut self) -> Result<Handle, Error>;

  /// Returns a record to the pool.
  ///
  /// # Panics
  /// - If `handle` is [`Handle::NONE`], out of range, or already freed.
  fn dealloc(&mut self, handle: Handle);

  /// Resolves a handle into the words of its record.
  ///
  /// # Panics
  /// - If `handle` is [`Handle::NONE`] or out of range.
  /// - If tag verification is on and the record is not live.
  fn get(&self, handle: Handle) -> &[u32];

  /// Resolves a handle into the mutable words of its record.
  ///
  /// # Panics
  /// - Same conditions as [`Pool::get`].
  fn get_mut(&mut self, handle: Handle) -> &mut [u32];
}

/// An arena of fixed-size records addressed by index.
///
/// All records live in one `Vec<u32>`; record `i` occupies the words
/// `i * stride..(i + 1) * stride`. Free records are chained through their own
/// next field, so the pool carries no bookkeeping besides the free-list head.
pub struct RecordPool {
  info: RecordInfo,
  opts: PoolOptions,
  words: Vec<u32>,
  free_head: Handle,
  allocated: u32,
}

impl fmt::Debug for RecordPool {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RecordPool")
      .field("info", &self.info)
      .field("capacity", &self.opts.capacity())
      .field("materialized", &self.materialized())
      .field("allocated", &self.allocated)
      .field("free_head", &self.free_head)
      .finish()
  }
}

impl RecordPool {
  /// Creates a new pool serving records shaped by `info`.
  ///
  /// # Example
  ///
  /// ```
  /// use segbuf_pool::{Pool, PoolOptions, RecordInfo, RecordPool};
  ///
  /// let mut pool = RecordPool::new(RecordInfo::new(16, 4, 0, 9), PoolOptions::new().with_capacity(2)).unwrap();
  /// let a = pool.alloc().unwrap();
  /// let _b = pool.alloc().unwrap();
  /// assert!(pool.alloc().unwrap_err().is_exhausted());
  ///
  /// pool.dealloc(a);
  /// assert_eq!(pool.remaining(), 1);
  /// ```
  pub fn new(info: RecordInfo, opts: PoolOptions) -> Result<Self, Error> {
    info.validate()?;

    let capacity = opts.capacity();
    if capacity == 0 || capacity == u32::MAX {
      return Err(Error::InvalidCapacity { capacity });
    }

    let reserve = opts.reserve();
    let mut this = Self {
      info,
      opts,
      words: Vec::with_capacity(reserve as usize * info.words()),
      free_head: Handle::NONE,
      allocated: 0,
    };

    for _ in 0..reserve {
      this.materialize();
    }
    // push in reverse so the lowest index is handed out first
    for index in (0..reserve).rev() {
      this.push_free(Handle::new(index));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
      record_size = info.size(),
      type_id = info.type_id(),
      capacity,
      reserve,
      "record pool created"
    );

    Ok(this)
  }

  /// Returns the options the pool was created with.
  #[inline]
  pub const fn options(&self) -> &PoolOptions {
    &self.opts
  }

  /// Returns the maximum number of records the pool hands out.
  #[inline]
  pub const fn capacity(&self) -> u32 {
    self.opts.capacity()
  }

  /// Returns the number of live records.
  #[inline]
  pub const fn allocated(&self) -> u32 {
    self.allocated
  }

  /// Returns how many more records can be allocated.
  #[inline]
  pub const fn remaining(&self) -> u32 {
    self.opts.capacity() - self.allocated
  }

  /// Returns the number of records currently backed by memory.
  #[inline]
  pub fn materialized(&self) -> u32 {
    (self.words.len() / self.info.words()) as u32
  }

  /// Returns `true` if the handle refers to a live record of this pool.
  ///
  /// Unlike [`Pool::get`], this never panics.
  pub fn is_live(&self, handle: Handle) -> bool {
    if handle.is_none() || handle.index() >= self.materialized() {
      return false;
    }
    let start = handle.index() as usize * self.info.words();
    self.words[start + self.info.tag_word()] == self.info.type_id()
  }

  fn materialize(&mut self) -> Handle {
    let handle = Handle::new(self.materialized());
    let len = self.words.len() + self.info.words();
    // zeroed words carry FREE_TAG
    self.words.resize(len, FREE_TAG);
    handle
  }

  fn push_free(&mut self, handle: Handle) {
    let next = self.info.next_word();
    let tag = self.info.tag_word();
    let free_head = self.free_head;
    let range = self.range(handle);
    let slot = &mut self.words[range];
    slot[tag] = FREE_TAG;
    slot[next] = free_head.index();
    self.free_head = handle;
  }

  #[inline]
  fn range(&self, handle: Handle) -> Range<usize> {
    assert!(handle.is_some(), "cannot resolve Handle::NONE");
    assert!(
      handle.index() < self.materialized(),
      "handle {} is out of range, the pool has {} records",
      handle,
      self.materialized()
    );
    let stride = self.info.words();
    let start = handle.index() as usize * stride;
    start..start + stride
  }

  #[inline]
  fn check_live(&self, handle: Handle, slot: &[u32]) {
    if self.opts.flags().contains(PoolFlags::VERIFY_TAG) {
      let tag = slot[self.info.tag_word()];
      assert!(
        tag == self.info.type_id(),
        "handle {} resolves to a record with tag {}, expected {}",
        handle,
        tag,
        self.info.type_id()
      );
    }
  }
}

impl Pool for RecordPool {
  #[inline]
  fn record_info(&self) -> RecordInfo {
    self.info
  }

  fn alloc(&mut self) -> Result<Handle, Error> {
    let handle = if self.free_head.is_some() {
      let handle = self.free_head;
      let range = self.range(handle);
      self.free_head = Handle::new(self.words[range][self.info.next_word()]);
      handle
    } else if self.materialized() < self.opts.capacity() {
      let handle = self.materialize();
      #[cfg(feature = "tracing")]
      tracing::trace!("materialize record {} on demand", handle);
      handle
    } else {
      #[cfg(feature = "tracing")]
      tracing::debug!(
        capacity = self.opts.capacity(),
        "allocation failed, record pool is exhausted"
      );
      return Err(Error::exhausted(self.opts.capacity()));
    };

    let range = self.range(handle);
    let slot = &mut self.words[range];
    slot[self.info.tag_word()] = self.info.type_id();
    slot[self.info.next_word()] = Handle::NONE.index();
    self.allocated += 1;
    Ok(handle)
  }

  fn dealloc(&mut self, handle: Handle) {
    let range = self.range(handle);
    let tag = self.info.tag_word();
    let next = self.info.next_word();
    let slot = &mut self.words[range];
    assert!(
      slot[tag] == self.info.type_id(),
      "double free or foreign handle {} (tag {})",
      handle,
      slot[tag]
    );

    if self.opts.flags().contains(PoolFlags::POISON_ON_FREE) {
      slot
        .iter_mut()
        .enumerate()
        .filter(|(i, _)| *i != tag && *i != next)
        .for_each(|(_, w)| *w = POISON);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("free record {}", handle);

    self.push_free(handle);
    self.allocated -= 1;
  }

  #[inline]
  fn get(&self, handle: Handle) -> &[u32] {
    let slot = &self.words[self.range(handle)];
    self.check_live(handle, slot);
    slot
  }

  #[inline]
  fn get_mut(&mut self, handle: Handle) -> &mut [u32] {
    let range = self.range(handle);
    self.check_live(handle, &self.words[range.clone()]);
    &mut self.words[range]
  }
}
