use core::mem;

use segbuf_pool::{Handle, RecordInfo, WORD_SIZE};

use super::Word;

/// The storage unit of a buffer: `SZ` words plus the handle of the next segment.
///
/// Segments are pool records. The pool only ever sees them as words; the buffer
/// views a record as a `Segment` through [`Segment::from_words`].
#[derive(Debug)]
#[repr(C)]
pub struct Segment<const SZ: usize> {
  magic: u32,
  next: Handle,
  data: [Word; SZ],
}

impl<const SZ: usize> Segment<SZ> {
  /// The number of payload words in a segment.
  pub const CAPACITY: u32 = {
    assert!(
      SZ > 0 && SZ <= (u32::MAX / WORD_SIZE) as usize - 2,
      "segment capacity must be in 1..=u32::MAX / 4 - 2"
    );
    SZ as u32
  };

  /// The number of pool words a segment occupies.
  pub const WORDS: usize = mem::size_of::<Self>() / WORD_SIZE as usize;

  /// Returns the layout descriptor a pool needs to serve segments of this capacity.
  ///
  /// # Example
  ///
  /// ```
  /// use segbuf::Segment;
  ///
  /// let info = Segment::<4>::record_info(3);
  /// assert_eq!(info.size(), 24);
  /// assert_eq!(info.tag_offset(), 0);
  /// assert_eq!(info.next_offset(), 4);
  /// ```
  pub fn record_info(type_id: u32) -> RecordInfo {
    let _ = Self::CAPACITY;
    RecordInfo::new(
      mem::size_of::<Self>() as u32,
      mem::offset_of!(Segment<SZ>, next) as u32,
      mem::offset_of!(Segment<SZ>, magic) as u32,
      type_id,
    )
  }

  /// Views the words of a pool record as a segment.
  ///
  /// # Panics
  /// - If `words` is shorter than [`Segment::WORDS`].
  #[inline]
  pub fn from_words(words: &[u32]) -> &Self {
    assert!(
      words.len() >= Self::WORDS,
      "record of {} words cannot hold a segment of {} words",
      words.len(),
      Self::WORDS
    );
    // SAFETY: `Segment` is `repr(C)` and made of `u32`s only (`Handle` is a transparent
    // `u32`), so it has the alignment of `u32`, no padding, and any bit pattern is valid.
    unsafe { &*words.as_ptr().cast::<Self>() }
  }

  /// Views the words of a pool record as a mutable segment.
  ///
  /// # Panics
  /// - If `words` is shorter than [`Segment::WORDS`].
  #[inline]
  pub fn from_words_mut(words: &mut [u32]) -> &mut Self {
    assert!(
      words.len() >= Self::WORDS,
      "record of {} words cannot hold a segment of {} words",
      words.len(),
      Self::WORDS
    );
    // SAFETY: see `from_words`.
    unsafe { &mut *words.as_mut_ptr().cast::<Self>() }
  }

  /// Returns the tag the pool stamped into the segment.
  #[inline]
  pub const fn magic(&self) -> u32 {
    self.magic
  }

  /// Returns the handle of the next segment in the chain.
  #[inline]
  pub const fn next(&self) -> Handle {
    self.next
  }

  /// Links the segment to `next`.
  #[inline]
  pub fn set_next(&mut self, next: Handle) {
    self.next = next;
  }

  /// Returns the payload words.
  #[inline]
  pub const fn data(&self) -> &[Word; SZ] {
    &self.data
  }

  /// Returns the mutable payload words.
  #[inline]
  pub fn data_mut(&mut self) -> &mut [Word; SZ] {
    &mut self.data
  }
}
