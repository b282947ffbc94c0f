#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error!("`segbuf-pool` requires either the 'std' or 'alloc' feature to be enabled");

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

mod handle;
pub use handle::*;

mod options;
pub use options::*;

mod pool;
pub use pool::*;

mod record;
pub use record::*;

/// The size of a pool word in bytes. Records are stored and addressed in units of `u32`.
pub const WORD_SIZE: u32 = core::mem::size_of::<u32>() as u32;

/// The tag stamped into a record while it sits on the free list.
///
/// A [`RecordInfo`] may never use it as its `type_id`.
pub const FREE_TAG: u32 = 0;

/// The pattern written over the payload of a freed record when
/// [`PoolFlags::POISON_ON_FREE`] is set.
pub const POISON: u32 = 0xDEAD_BEEF;

#[cfg(test)]
mod tests;
