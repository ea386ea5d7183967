//! Offset-ordered frame tables.

use serde::{Deserialize, Serialize};

use crate::frame::{Frame, FrameKind};

/// Every frame found in one interleaved-data region, ascending by offset.
///
/// Built once from raw signature matches; read-only afterwards. Non-terminal
/// frames span up to the next frame's offset, the terminal frame spans to the
/// end of the region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTable {
    frames: Vec<Frame>,
    region_len: u64,
}

/// Aggregate statistics over a frame table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub frames: usize,
    pub video_frames: usize,
    pub audio_frames: usize,
    pub min_size: u64,
    pub max_size: u64,
    pub mean_size: f64,
    pub region_len: u64,
}

impl FrameTable {
    /// Build a table from `(offset, kind)` matches in any order.
    ///
    /// Matches are sorted by offset; repeated offsets keep the first kind seen.
    /// Offsets at or past `region_len` are discarded.
    pub fn from_matches(mut matches: Vec<(u64, FrameKind)>, region_len: u64) -> Self {
        matches.retain(|(offset, _)| *offset < region_len);
        matches.sort_by_key(|(offset, _)| *offset);
        matches.dedup_by_key(|(offset, _)| *offset);

        let frames = matches
            .iter()
            .enumerate()
            .map(|(i, &(offset, kind))| {
                let end = matches.get(i + 1).map_or(region_len, |(next, _)| *next);
                Frame::new(offset, end - offset, kind)
            })
            .collect();

        Self { frames, region_len }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Length of the region the table indexes.
    pub fn region_len(&self) -> u64 {
        self.region_len
    }

    /// Largest inferred frame size, 0 for an empty table.
    pub fn max_frame_size(&self) -> u64 {
        self.frames.iter().map(|f| f.size).max().unwrap_or(0)
    }

    /// First video frame in offset order.
    pub fn first_video(&self) -> Option<&Frame> {
        self.frames.iter().find(|f| f.kind == FrameKind::Video)
    }

    pub fn summary(&self) -> TableSummary {
        let video_frames = self
            .frames
            .iter()
            .filter(|f| f.kind == FrameKind::Video)
            .count();
        let total: u64 = self.frames.iter().map(|f| f.size).sum();
        let mean_size = if self.frames.is_empty() {
            0.0
        } else {
            total as f64 / self.frames.len() as f64
        };

        TableSummary {
            frames: self.frames.len(),
            video_frames,
            audio_frames: self.frames.len() - video_frames,
            min_size: self.frames.iter().map(|f| f.size).min().unwrap_or(0),
            max_size: self.max_frame_size(),
            mean_size,
            region_len: self.region_len,
        }
    }
}

impl<'a> IntoIterator for &'a FrameTable {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sizes_from_gaps() {
        let table = FrameTable::from_matches(
            vec![
                (30, FrameKind::Video),
                (4, FrameKind::Video),
                (12, FrameKind::Audio),
            ],
            50,
        );
        let sizes: Vec<(u64, u64)> = table.iter().map(|f| (f.offset, f.size)).collect();
        assert_eq!(sizes, vec![(4, 8), (12, 18), (30, 20)]);
        assert_eq!(table.max_frame_size(), 20);
        assert_eq!(table.first_video().map(|f| f.offset), Some(4));
    }

    #[test]
    fn test_duplicate_offsets_collapse() {
        let table = FrameTable::from_matches(
            vec![(8, FrameKind::Video), (8, FrameKind::Video), (20, FrameKind::Video)],
            24,
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.frames()[0].size, 12);
    }

    #[test]
    fn test_empty_table() {
        let table = FrameTable::from_matches(vec![], 100);
        assert!(table.is_empty());
        assert_eq!(table.max_frame_size(), 0);
        assert!(table.first_video().is_none());
        assert_eq!(table.summary().mean_size, 0.0);
    }

    #[test]
    fn test_summary_counts() {
        let table = FrameTable::from_matches(
            vec![
                (4, FrameKind::Video),
                (10, FrameKind::Audio),
                (14, FrameKind::Video),
            ],
            30,
        );
        let summary = table.summary();
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.video_frames, 2);
        assert_eq!(summary.audio_frames, 1);
        assert_eq!(summary.min_size, 4);
        assert_eq!(summary.max_size, 16);
        assert!((summary.mean_size - 26.0 / 3.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_table_is_strictly_ordered_and_tiles_region(
            offsets in proptest::collection::vec(0u64..10_000, 0..64),
            tail in 1u64..512,
        ) {
            let region_len = offsets.iter().copied().max().unwrap_or(0) + tail;
            let matches = offsets.iter().map(|&o| (o, FrameKind::Video)).collect();
            let table = FrameTable::from_matches(matches, region_len);

            for pair in table.frames().windows(2) {
                prop_assert!(pair[0].offset < pair[1].offset);
                prop_assert_eq!(pair[0].size, pair[1].offset - pair[0].offset);
            }
            if let Some(last) = table.frames().last() {
                prop_assert_eq!(last.size, region_len - last.offset);
            }
        }
    }
}
