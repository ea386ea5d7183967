//! Temporary storage for the three container regions.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use avimosh_common::error::MoshResult;
use avimosh_frame_model::{IDX1, MOVI};

use crate::splitter::{stream_until_marker, Split};

/// A temp directory holding `hdrl.bin`, `movi.bin`, and `idx1.bin`.
///
/// The directory and everything in it is removed when the workspace is
/// dropped, whether the run succeeded or not.
pub struct RegionWorkspace {
    temp_dir: TempDir,
}

/// Where the region boundaries fell in the source container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionOffsets {
    /// Start of the `movi` tag, or end of file if absent.
    pub movi: Split,
    /// Start of the `idx1` tag, or end of file if absent.
    pub idx1: Split,
    /// Total bytes in the source.
    pub end: u64,
}

impl RegionOffsets {
    pub fn header_len(&self) -> u64 {
        self.movi.offset()
    }

    pub fn data_len(&self) -> u64 {
        self.idx1.offset() - self.movi.offset()
    }

    pub fn index_len(&self) -> u64 {
        self.end - self.idx1.offset()
    }
}

impl RegionWorkspace {
    /// Create an empty workspace in the system temp directory.
    pub fn new() -> MoshResult<Self> {
        let temp_dir = tempfile::Builder::new().prefix("avimosh-").tempdir()?;
        Ok(Self { temp_dir })
    }

    /// Leading region, up to (not including) the `movi` tag.
    pub fn header(&self) -> PathBuf {
        self.temp_dir.path().join("hdrl.bin")
    }

    /// Interleaved-data region, starting with its `movi` tag.
    pub fn data(&self) -> PathBuf {
        self.temp_dir.path().join("movi.bin")
    }

    /// Trailing region, starting with its `idx1` tag.
    pub fn index(&self) -> PathBuf {
        self.temp_dir.path().join("idx1.bin")
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Carve `input` into the three region files.
    pub fn split(&self, input: &Path) -> MoshResult<RegionOffsets> {
        let movi = stream_until_marker(input, &self.header(), Some(&MOVI[..]), 0)?;
        if !movi.found() {
            tracing::warn!(input = %input.display(), "no movi tag found; whole file treated as header");
        }

        let idx1 = stream_until_marker(input, &self.data(), Some(&IDX1[..]), movi.offset())?;
        if movi.found() && !idx1.found() {
            tracing::warn!(input = %input.display(), "no idx1 tag found; data region runs to end of file");
        }

        let end = stream_until_marker(input, &self.index(), None, idx1.offset())?;

        let offsets = RegionOffsets {
            movi,
            idx1,
            end: end.offset(),
        };
        tracing::debug!(
            header = offsets.header_len(),
            data = offsets.data_len(),
            index = offsets.index_len(),
            "split container"
        );
        Ok(offsets)
    }
}
