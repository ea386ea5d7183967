//! Streams reordered frames back into an output file.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use avimosh_common::error::{MoshError, MoshResult};
use avimosh_frame_model::{Frame, TAG_LEN};

/// Capacity of the output buffer every frame is copied through.
pub const COPY_BUFFER_SIZE: usize = 1024 * 1024;

/// What one reassembly pass wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassemblyStats {
    pub frames_written: usize,
    pub sentinels_skipped: usize,
    /// Leading tag bytes copied from the region; zero for an empty region.
    pub tag_bytes: u64,
    /// Frame bytes appended, excluding the leading tag.
    pub payload_bytes: u64,
}

/// Append the region's leading tag and then every frame of `frames`, in
/// order, to `output`.
///
/// The tag is the first [`TAG_LEN`] bytes of `region`, so an empty region
/// contributes nothing. Frame bytes are read from `region` at each frame's
/// offset. Sentinel entries (offset and size both zero) are skipped. A frame
/// that runs past the end of `region` fails with [`MoshError::Truncated`].
pub fn reassemble(region: &Path, frames: &[Frame], output: &Path) -> MoshResult<ReassemblyStats> {
    let mut source = File::open(region)?;
    let out = OpenOptions::new().create(true).append(true).open(output)?;
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, out);
    let mut stats = ReassemblyStats::default();

    stats.tag_bytes = io::copy(&mut (&mut source).take(TAG_LEN as u64), &mut writer)?;

    for frame in frames {
        if frame.is_sentinel() {
            stats.sentinels_skipped += 1;
            continue;
        }

        source.seek(SeekFrom::Start(frame.offset))?;
        let copied = io::copy(&mut (&mut source).take(frame.size), &mut writer)?;
        if copied != frame.size {
            return Err(MoshError::Truncated {
                offset: frame.offset,
                expected: frame.size,
                copied,
            });
        }

        stats.frames_written += 1;
        stats.payload_bytes += copied;
    }

    writer.flush()?;
    Ok(stats)
}
