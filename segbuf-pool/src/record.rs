use super::*;

/// Describes the shape of the records a pool manages.
///
/// A single [`RecordPool`] implementation can serve records of any size: the only
/// things it needs to know are how large one record is, where the next-handle field
/// lives (used to chain free records) and where the tag field lives (used to catch
/// stale or foreign handles). All sizes and offsets are in bytes and must be
/// multiples of [`WORD_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordInfo {
  size: u32,
  next_offset: u32,
  tag_offset: u32,
  type_id: u32,
}

impl RecordInfo {
  /// Creates a new layout descriptor.
  ///
  /// # Example
  ///
  /// ```
  /// use segbuf_pool::RecordInfo;
  ///
  /// // tag word, next word, 4 payload words
  /// let info = RecordInfo::new(24, 4, 0, 1);
  /// assert_eq!(info.words(), 6);
  /// assert!(info.validate().is_ok());
  /// ```
  #[inline]
  pub const fn new(size: u32, next_offset: u32, tag_offset: u32, type_id: u32) -> Self {
    Self {
      size,
      next_offset,
      tag_offset,
      type_id,
    }
  }

  /// Returns the size of one record in bytes.
  #[inline]
  pub const fn size(&self) -> u32 {
    self.size
  }

  /// Returns the byte offset of the next-handle field.
  #[inline]
  pub const fn next_offset(&self) -> u32 {
    self.next_offset
  }

  /// Returns the byte offset of the tag field.
  #[inline]
  pub const fn tag_offset(&self) -> u32 {
    self.tag_offset
  }

  /// Returns the tag stamped into every live record.
  #[inline]
  pub const fn type_id(&self) -> u32 {
    self.type_id
  }

  /// Returns the size of one record in words.
  #[inline]
  pub const fn words(&self) -> usize {
    (self.size / WORD_SIZE) as usize
  }

  #[inline]
  pub(crate) const fn next_word(&self) -> usize {
    (self.next_offset / WORD_SIZE) as usize
  }

  #[inline]
  pub(crate) const fn tag_word(&self) -> usize {
    (self.tag_offset / WORD_SIZE) as usize
  }

  /// Checks that the descriptor can be served by a word-addressed pool.
  pub const fn validate(&self) -> Result<(), Error> {
    if self.size == 0 {
      return Err(Error::InvalidRecordInfo("record size is zero"));
    }

    if self.size % WORD_SIZE != 0 {
      return Err(Error::InvalidRecordInfo("record size is not a multiple of the word size"));
    }

    if self.next_offset % WORD_SIZE != 0 || self.tag_offset % WORD_SIZE != 0 {
      return Err(Error::InvalidRecordInfo("field offsets must be word aligned"));
    }

    if self.next_offset >= self.size || self.tag_offset >= self.size {
      return Err(Error::InvalidRecordInfo("field offset is outside of the record"));
    }

    if self.next_offset == self.tag_offset {
      return Err(Error::InvalidRecordInfo("next and tag fields overlap"));
    }

    if self.type_id == FREE_TAG {
      return Err(Error::InvalidRecordInfo("type id collides with the free tag"));
    }

    Ok(())
  }
}
