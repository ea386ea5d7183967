//! Frame table construction by signature scanning.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use avimosh_common::error::MoshResult;
use avimosh_frame_model::{FrameKind, FrameTable, TAG_LEN};

use crate::WINDOW_SIZE;

/// Scan an interleaved-data region for chunk signatures.
///
/// Video chunks are always indexed; audio chunks only with `include_audio`.
/// The region is read in [`WINDOW_SIZE`] windows with `TAG_LEN - 1` bytes of
/// overlap, so each signature is reported exactly once wherever it falls.
pub fn build_frame_table(region: &Path, include_audio: bool) -> MoshResult<FrameTable> {
    let mut file = File::open(region)?;

    let mut window = vec![0u8; WINDOW_SIZE];
    let mut pending: Vec<u8> = Vec::with_capacity(WINDOW_SIZE + TAG_LEN);
    let mut pending_start = 0u64;
    let mut matches = Vec::new();

    loop {
        let n = file.read(&mut window)?;
        if n == 0 {
            break;
        }
        pending.extend_from_slice(&window[..n]);

        matches.extend(
            pending
                .windows(TAG_LEN)
                .enumerate()
                .filter_map(|(i, id)| Some((i, FrameKind::from_signature(id)?)))
                .filter(|&(_, kind)| include_audio || kind == FrameKind::Video)
                .map(|(i, kind)| (pending_start + i as u64, kind)),
        );

        // Anything kept here is shorter than a tag, so it cannot hold a
        // match that was already reported.
        let consumed = pending.len() - (TAG_LEN - 1).min(pending.len());
        pending.drain(..consumed);
        pending_start += consumed as u64;
    }

    let region_len = pending_start + pending.len() as u64;
    let table = FrameTable::from_matches(matches, region_len);

    tracing::debug!(
        frames = table.len(),
        region_len,
        include_audio,
        "built frame table"
    );
    Ok(table)
}
