#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error!("`segbuf` requires either the 'std' or 'alloc' feature to be enabled");

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

pub use segbuf_pool as pool;
pub use segbuf_pool::{Handle, Pool, RecordInfo};

mod buffer;
pub use buffer::*;

mod cursor;
pub use cursor::*;

mod error;
pub use error::*;

mod head;
pub use head::*;

mod iter;
pub use iter::*;

mod local;
pub use local::*;

mod segment;
pub use segment::*;

/// The unit of storage of a buffer.
pub type Word = u32;

/// Reports a broken chain invariant. Execution cannot continue past this point.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn corrupted(args: core::fmt::Arguments<'_>) -> ! {
  panic!("segmented buffer is corrupted: {}", args)
}
