//! avimosh Processing Core
//!
//! Turns a frame table into the frame order that gets written back:
//! - **Cleaning:** drop oversized scan artifacts, optionally pin the first video frame
//! - **Effects:** reorder, repeat, or drop frames with one of eight modes
//!
//! This crate is pure computation — no I/O. Randomness is always supplied
//! by the caller so results are reproducible under a fixed seed.

pub mod cleaner;
pub mod effects;

pub use cleaner::FrameCleaner;
pub use effects::{EffectMode, EffectParams, EffectPipeline, MAX_OUTPUT_FRAMES};
