use segbuf_pool::{Handle, Pool};

use super::*;

/// A growable sequence of words stored as a chain of fixed-capacity segments.
///
/// The buffer pairs a [`Head`] with the pool its segments come from. Segments are seized
/// from the pool on demand and linked by handle; the last segment may be partially used.
/// Words are read and written through a [`Cursor`] which the buffer moves across segment
/// boundaries.
///
/// Dropping a buffer does not release its segments: the head may still be referenced
/// elsewhere (see [`LocalBuffer`]). Call [`Buffer::release`] to return them to the pool.
///
/// # Example
///
/// ```
/// use segbuf::{Buffer, Cursor, Segment, pool::{PoolOptions, RecordPool}};
///
/// let mut pool = RecordPool::new(Segment::<4>::record_info(1), PoolOptions::new()).unwrap();
/// let mut buf = Buffer::<_, 4>::new(&mut pool);
///
/// buf.append(&[1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(buf.size(), 6);
///
/// let mut it = Cursor::null();
/// assert!(buf.position(&mut it, 4));
/// assert_eq!(buf.get(&it), Some(5));
///
/// buf.release();
/// assert!(buf.is_empty());
/// ```
pub struct Buffer<'p, P: Pool + ?Sized, const SZ: usize> {
  head: Head<SZ>,
  pool: &'p mut P,
}

impl<P: Pool + ?Sized, const SZ: usize> core::fmt::Debug for Buffer<'_, P, SZ> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Buffer").field("head", &self.head).finish()
  }
}

impl<'p, P: Pool + ?Sized, const SZ: usize> Buffer<'p, P, SZ> {
  const CAP: u32 = Segment::<SZ>::CAPACITY;

  /// Creates an empty buffer drawing segments from `pool`.
  #[inline]
  pub fn new(pool: &'p mut P) -> Self {
    Self::with_head(pool, Head::new())
  }

  /// Creates a buffer over an existing head.
  ///
  /// The head must describe a chain seized from `pool`.
  #[inline]
  pub fn with_head(pool: &'p mut P, head: Head<SZ>) -> Self {
    debug_assert!(
      pool.record_info().words() >= Segment::<SZ>::WORDS,
      "pool records are too small to hold segments of {} words",
      SZ
    );
    debug_assert_eq!(
      pool.record_info().next_offset(),
      Segment::<SZ>::record_info(1).next_offset(),
      "pool chains records through a different field than segments do"
    );
    Self { head, pool }
  }

  /// Returns a copy of the head.
  #[inline]
  pub const fn head(&self) -> Head<SZ> {
    self.head
  }

  /// Consumes the buffer, returning its head.
  #[inline]
  pub fn into_head(self) -> Head<SZ> {
    self.head
  }

  /// Returns the pool the buffer draws segments from.
  #[inline]
  pub fn pool(&self) -> &P {
    &*self.pool
  }

  /// Returns the number of used words.
  #[inline]
  pub const fn size(&self) -> u32 {
    self.head.used
  }

  /// Returns `true` if the buffer holds no words.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.head.used == 0
  }

  /// Returns the capacity of one segment in words.
  #[inline]
  pub const fn segment_size() -> u32 {
    Self::CAP
  }

  /// Grows the buffer by exactly `n` words, seizing only the segments needed.
  ///
  /// Either every needed segment is obtained or none is: when the pool runs dry midway,
  /// the segments seized by this call go back to the pool and the buffer is left exactly
  /// as it was.
  ///
  /// The new words are not initialized by the buffer; write them with
  /// [`Buffer::import`] or through a cursor.
  pub fn seize(&mut self, n: u32) -> Result<(), Error> {
    let used = self.head.used.checked_add(n).ok_or(Error::Overflow {
      used: self.head.used,
      requested: n as usize,
    })?;

    let rest = self.head.rest();
    if rest >= n {
      self.head.used = used;
      return Ok(());
    }

    let count = (n - rest).div_ceil(Self::CAP);
    #[cfg(feature = "tracing")]
    tracing::debug!(
      requested = n,
      used = self.head.used,
      rest,
      segments = count,
      "seize segments"
    );

    let (first, last) = self.seize_chain(count)?;
    if self.head.first.is_none() {
      self.head.first = first;
    } else {
      let tail = self.head.last;
      self.segment_mut(tail).set_next(first);
    }
    self.head.last = last;
    self.head.used = used;
    Ok(())
  }

  /// Returns every segment to the pool and empties the buffer.
  ///
  /// Releasing an empty buffer does nothing. Cursors into the buffer must not be used
  /// afterwards.
  pub fn release(&mut self) {
    if self.head.first.is_none() {
      return;
    }

    let _freed = self.release_chain(self.head.first);
    #[cfg(feature = "tracing")]
    tracing::trace!(segments = _freed, used = self.head.used, "release buffer");
    self.head = Head::new();
  }

  /// Moves the cursor to the first word.
  ///
  /// Returns `false`, leaving the cursor null, if the buffer is empty.
  #[inline]
  pub fn first(&self, it: &mut Cursor) -> bool {
    if self.head.first.is_none() {
      it.set_null();
      return false;
    }
    *it = Cursor::at(self.head.first, 0, 0);
    true
  }

  /// Moves the cursor one word forward.
  ///
  /// Returns `false`, leaving the cursor null, if the cursor was on the last word or
  /// was already null.
  pub fn next(&self, it: &mut Cursor) -> bool {
    if it.is_null() {
      return false;
    }

    it.index += 1;
    it.pos += 1;
    if it.index < Self::CAP && it.pos < self.head.used {
      return true;
    }

    if it.pos < self.head.used {
      it.segment = self.next_of(it.segment);
      it.index = 0;
      return true;
    }

    it.set_null();
    false
  }

  /// Moves the cursor `hops` words forward.
  ///
  /// Has the effect of `hops` calls to [`Buffer::next`] but crosses whole segments in
  /// one step. Returns `false`, leaving the cursor null, if the target lies at or past
  /// the end of the buffer.
  pub fn advance(&self, it: &mut Cursor, hops: u32) -> bool {
    if it.is_null() {
      return false;
    }

    if it.pos as u64 + hops as u64 >= self.head.used as u64 {
      it.set_null();
      return false;
    }

    // a whole segment away is the same index in the following segment
    let mut hops = hops;
    while hops >= Self::CAP {
      it.segment = self.next_of(it.segment);
      it.pos += Self::CAP;
      hops -= Self::CAP;
    }

    it.index += hops;
    it.pos += hops;
    if it.index >= Self::CAP {
      it.segment = self.next_of(it.segment);
      it.index -= Self::CAP;
    }
    true
  }

  /// Moves the cursor to the first word of the next segment.
  ///
  /// Returns `false`, leaving the cursor null, if there is no word past the current
  /// segment.
  #[inline]
  pub fn next_segment(&self, it: &mut Cursor) -> bool {
    if it.is_null() {
      return false;
    }
    self.advance(it, Self::CAP - it.index)
  }

  /// Moves the cursor to the absolute word position `pos`.
  ///
  /// Seeks from the first word, whatever the cursor's current position. Returns
  /// `false`, leaving the cursor null, if `pos` is not a used word.
  #[inline]
  pub fn position(&self, it: &mut Cursor, pos: u32) -> bool {
    self.first(it) && self.advance(it, pos)
  }

  /// Returns the word under the cursor, or `None` for a null cursor.
  #[inline]
  pub fn get(&self, it: &Cursor) -> Option<Word> {
    if it.is_null() {
      return None;
    }
    Some(self.segment(it.segment).data()[it.index as usize])
  }

  /// Returns a mutable reference to the word under the cursor, or `None` for a null
  /// cursor.
  #[inline]
  pub fn get_mut(&mut self, it: &Cursor) -> Option<&mut Word> {
    if it.is_null() {
      return None;
    }
    Some(&mut self.segment_mut(it.segment).data_mut()[it.index as usize])
  }

  /// Overwrites the word under the cursor. Returns `false` for a null cursor.
  #[inline]
  pub fn set(&mut self, it: &Cursor, word: Word) -> bool {
    match self.get_mut(it) {
      Some(w) => {
        *w = word;
        true
      }
      None => false,
    }
  }

  /// Returns `true` if `len` words starting at the cursor lie strictly inside the used
  /// words, i.e. `position + len < size`.
  ///
  /// A range ending exactly at the end of the buffer is reported as not importable,
  /// although [`Buffer::import`] accepts it.
  #[inline]
  pub fn importable(&self, it: &Cursor, len: u32) -> bool {
    !it.is_null() && (it.pos as u64 + len as u64) < self.head.used as u64
  }

  /// Overwrites `src.len()` used words starting at the cursor.
  ///
  /// Neither the size of the buffer nor the cursor changes. The words must already be
  /// part of the buffer; grow it first with [`Buffer::seize`].
  pub fn import(&mut self, it: &Cursor, src: &[Word]) -> Result<(), Error> {
    self.check_range(it, src.len())?;
    if src.is_empty() {
      return Ok(());
    }

    let index = it.index as usize;
    let (head, tail) = src.split_at(src.len().min(SZ - index));
    let mut segment = it.segment;
    self.segment_mut(segment).data_mut()[index..index + head.len()].copy_from_slice(head);

    for chunk in tail.chunks(SZ) {
      segment = self.next_of(segment);
      self.segment_mut(segment).data_mut()[..chunk.len()].copy_from_slice(chunk);
    }
    Ok(())
  }

  /// Copies `dst.len()` used words starting at the cursor into `dst`.
  ///
  /// The cursor does not move.
  pub fn read(&self, it: &Cursor, dst: &mut [Word]) -> Result<(), Error> {
    self.check_range(it, dst.len())?;
    if dst.is_empty() {
      return Ok(());
    }

    let index = it.index as usize;
    let len = dst.len().min(SZ - index);
    let (head, tail) = dst.split_at_mut(len);
    let mut segment = it.segment;
    head.copy_from_slice(&self.segment(segment).data()[index..index + len]);

    for chunk in tail.chunks_mut(SZ) {
      segment = self.next_of(segment);
      chunk.copy_from_slice(&self.segment(segment).data()[..chunk.len()]);
    }
    Ok(())
  }

  /// Appends `src` to the end of the buffer.
  ///
  /// On failure the buffer is unchanged.
  pub fn append(&mut self, src: &[Word]) -> Result<(), Error> {
    if src.is_empty() {
      return Ok(());
    }

    let len = u32::try_from(src.len()).map_err(|_| Error::Overflow {
      used: self.head.used,
      requested: src.len(),
    })?;

    let pos = self.head.used;
    self.seize(len)?;

    let mut it = Cursor::null();
    if !self.position(&mut it, pos) {
      corrupted(format_args!(
        "cannot reach word {} of {} after seizing {} words",
        pos, self.head.used, len
      ));
    }
    if let Err(e) = self.import(&it, src) {
      corrupted(format_args!("cannot import seized words: {}", e));
    }
    Ok(())
  }

  /// Returns an iterator over the used words.
  #[inline]
  pub fn iter(&self) -> Words<'_, 'p, P, SZ> {
    Words::new(self)
  }

  /// Returns an iterator over the handles of the segment chain, first to last.
  #[inline]
  pub fn segment_handles(&self) -> SegmentHandles<'_, P, SZ> {
    SegmentHandles::new(&*self.pool, self.head.first)
  }

  fn seize_chain(&mut self, count: u32) -> Result<(Handle, Handle), Error> {
    let mut first = Handle::NONE;
    let mut last = Handle::NONE;
    for _seized in 0..count {
      match self.pool.alloc() {
        Ok(handle) => {
          self.segment_mut(handle).set_next(Handle::NONE);
          if last.is_none() {
            first = handle;
          } else {
            self.segment_mut(last).set_next(handle);
          }
          last = handle;
        }
        Err(e) => {
          #[cfg(feature = "tracing")]
          tracing::debug!(
            seized = _seized,
            needed = count,
            "seize failed, returning segments to the pool"
          );
          self.release_chain(first);
          return Err(e.into());
        }
      }
    }
    Ok((first, last))
  }

  fn release_chain(&mut self, mut handle: Handle) -> u32 {
    let mut freed = 0;
    while handle.is_some() {
      let next = self.segment(handle).next();
      self.pool.dealloc(handle);
      handle = next;
      freed += 1;
    }
    freed
  }

  fn check_range(&self, it: &Cursor, len: usize) -> Result<(), Error> {
    if it.is_null() {
      return Err(Error::NullCursor);
    }

    if it.pos as u64 + len as u64 > self.head.used as u64 {
      return Err(Error::OutOfBounds {
        position: it.pos,
        len,
        used: self.head.used,
      });
    }
    Ok(())
  }

  #[inline]
  fn next_of(&self, handle: Handle) -> Handle {
    let next = self.segment(handle).next();
    if next.is_none() {
      corrupted(format_args!(
        "segment {} ends the chain before word {} is reached",
        handle, self.head.used
      ));
    }
    next
  }

  #[inline]
  fn segment(&self, handle: Handle) -> &Segment<SZ> {
    Segment::from_words(self.pool.get(handle))
  }

  #[inline]
  fn segment_mut(&mut self, handle: Handle) -> &mut Segment<SZ> {
    Segment::from_words_mut(self.pool.get_mut(handle))
  }
}
