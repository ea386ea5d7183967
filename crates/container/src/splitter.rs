//! Marker-delimited streaming copy.
//!
//! Source bytes are read in [`WINDOW_SIZE`] windows. The last
//! `marker.len() - 1` bytes of each window are held back and searched again
//! together with the next window, so a marker straddling two reads is still
//! found at its true offset.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use avimosh_common::error::MoshResult;
use avimosh_frame_model::find_first;

use crate::WINDOW_SIZE;

/// Where a streaming copy stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// The marker begins at this absolute source offset; nothing from it on was copied.
    Marker(u64),

    /// No marker requested or none found; copied through this end offset.
    Eof(u64),
}

impl Split {
    pub fn offset(self) -> u64 {
        match self {
            Split::Marker(offset) | Split::Eof(offset) => offset,
        }
    }

    pub fn found(self) -> bool {
        matches!(self, Split::Marker(_))
    }
}

/// Append `source[start..]` to `dest`, stopping just before `marker`.
///
/// With `marker = None` (or a marker that never occurs) everything through
/// end of file is copied.
pub fn stream_until_marker(
    source: &Path,
    dest: &Path,
    marker: Option<&[u8]>,
    start: u64,
) -> MoshResult<Split> {
    let mut reader = File::open(source)?;
    reader.seek(SeekFrom::Start(start))?;

    let out = OpenOptions::new().create(true).append(true).open(dest)?;
    let mut writer = BufWriter::new(out);

    let hold_back = marker.map_or(0, |m| m.len().saturating_sub(1));
    let mut window = vec![0u8; WINDOW_SIZE];
    let mut pending: Vec<u8> = Vec::with_capacity(WINDOW_SIZE + hold_back);
    let mut pending_start = start;

    loop {
        let n = reader.read(&mut window)?;
        if n == 0 {
            writer.write_all(&pending)?;
            writer.flush()?;
            return Ok(Split::Eof(pending_start + pending.len() as u64));
        }
        pending.extend_from_slice(&window[..n]);

        if let Some(marker) = marker {
            if let Some(i) = find_first(&pending, marker) {
                writer.write_all(&pending[..i])?;
                writer.flush()?;
                return Ok(Split::Marker(pending_start + i as u64));
            }
        }

        let ready = pending.len() - hold_back.min(pending.len());
        writer.write_all(&pending[..ready])?;
        pending.drain(..ready);
        pending_start += ready as u64;
    }
}
