//! avimosh Container
//!
//! Everything that touches files:
//! - **Splitter:** carve a container into header, interleaved-data, and index regions
//! - **Indexer:** rebuild a frame table by scanning the data region for chunk signatures
//! - **Reassembler:** stream frames back out in a new order
//! - **Session:** the whole split → index → clean → effect → reassemble run
//!
//! All I/O is blocking and sequential. Large copies go through fixed-size
//! buffers, so memory use does not grow with file size.

pub mod indexer;
pub mod inspect;
pub mod reassembler;
pub mod session;
pub mod splitter;
pub mod workspace;

pub use indexer::build_frame_table;
pub use inspect::{inspect, InspectReport};
pub use reassembler::{reassemble, ReassemblyStats};
pub use session::{MoshReport, MoshSession};
pub use splitter::{stream_until_marker, Split};
pub use workspace::{RegionOffsets, RegionWorkspace};

/// Bytes read per scan window by the splitter and the indexer.
pub const WINDOW_SIZE: usize = 1024;
