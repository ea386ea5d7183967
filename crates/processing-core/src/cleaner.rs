//! Oversized-frame rejection.
//!
//! Frames whose inferred size exceeds `kill_ratio * max_size` are treated as
//! scan artifacts (a gap between signatures that spans more than one real
//! chunk) and dropped. Order is never changed here.

use avimosh_frame_model::{Frame, FrameTable};

/// Filters a frame table down to the frames worth reassembling.
#[derive(Debug, Clone, Copy)]
pub struct FrameCleaner {
    kill_ratio: f64,
    keep_first_frame: bool,
}

impl FrameCleaner {
    /// `kill_ratio` is expected in `(0, 1]`; see `MoshConfig::validate`.
    pub fn new(kill_ratio: f64, keep_first_frame: bool) -> Self {
        Self {
            kill_ratio,
            keep_first_frame,
        }
    }

    /// Largest size a frame may have and still be kept.
    pub fn threshold(&self, table: &FrameTable) -> f64 {
        table.max_frame_size() as f64 * self.kill_ratio
    }

    /// Cleaned frames in table order.
    ///
    /// With `keep_first_frame`, the first video frame is emitted up front
    /// unconditionally. If it also passes the size filter it appears a second
    /// time right after; that repeat is part of the output contract.
    pub fn clean(&self, table: &FrameTable) -> Vec<Frame> {
        let threshold = self.threshold(table);
        let mut clean = Vec::with_capacity(table.len() + 1);

        if self.keep_first_frame {
            if let Some(first) = table.first_video() {
                clean.push(*first);
            }
        }

        clean.extend(table.iter().filter(|f| f.size as f64 <= threshold));

        tracing::debug!(
            table = table.len(),
            kept = clean.len(),
            threshold,
            "cleaned frame table"
        );
        clean
    }

    /// How many table entries the size filter rejects.
    pub fn rejected(&self, table: &FrameTable) -> usize {
        let threshold = self.threshold(table);
        table.iter().filter(|f| f.size as f64 > threshold).count()
    }
}
