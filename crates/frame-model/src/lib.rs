//! avimosh Frame Model
//!
//! Defines the data contracts shared by every stage:
//! - **Tags:** the fixed four-byte markers that delimit container regions
//!   and start media chunks, plus the fixed-pattern search over them
//! - **Frames:** `(offset, size, kind)` descriptors into the interleaved-data region
//! - **Frame tables:** offset-ordered frame lists with inferred sizes
//!
//! Frames describe bytes; they never own them. Offsets are relative to the
//! start of the interleaved-data region (which begins with its `movi` tag).

pub mod frame;
pub mod table;
pub mod tags;

pub use frame::*;
pub use table::*;
pub use tags::*;
