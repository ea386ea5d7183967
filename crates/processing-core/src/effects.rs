//! Frame reordering effects.
//!
//! Each mode maps an ordered frame list to a new ordered frame list. Output
//! frames may repeat, move, or disappear; nothing is mutated in place.
//! `count` and `position` mean different things per mode, see
//! [`EffectMode::describe`].

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use avimosh_common::error::{MoshError, MoshResult};

/// Largest frame list an effect may produce. Larger `count`/`position`
/// combinations are rejected before any frame is copied.
pub const MAX_OUTPUT_FRAMES: usize = 1 << 24;

/// Available reordering algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMode {
    /// Identity.
    Void,

    /// Unbiased shuffle.
    Random,

    /// Last frame first.
    Reverse,

    /// Swap each adjacent pair; an odd trailing frame stays put.
    Invert,

    /// Replace the frame at `position` with `count` copies of it.
    Bloom,

    /// Every `count`-th frame is emitted `position` times.
    Pulse,

    /// Each slot takes a frame from a Gaussian-jittered index
    /// (standard deviation `position`).
    Jiggle,

    /// Windows of `count` frames, starting every `position` frames.
    Overlap,
}

impl EffectMode {
    pub const ALL: [EffectMode; 8] = [
        EffectMode::Void,
        EffectMode::Random,
        EffectMode::Reverse,
        EffectMode::Invert,
        EffectMode::Bloom,
        EffectMode::Pulse,
        EffectMode::Jiggle,
        EffectMode::Overlap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectMode::Void => "void",
            EffectMode::Random => "random",
            EffectMode::Reverse => "reverse",
            EffectMode::Invert => "invert",
            EffectMode::Bloom => "bloom",
            EffectMode::Pulse => "pulse",
            EffectMode::Jiggle => "jiggle",
            EffectMode::Overlap => "overlap",
        }
    }

    /// Case-sensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }

    /// Like [`EffectMode::from_name`], but unknown names fall back to `Void`
    /// with a warning.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!(mode = name, "unknown mode, using void");
            EffectMode::Void
        })
    }

    /// One-line help text including how `count` and `position` are read.
    pub fn describe(self) -> &'static str {
        match self {
            EffectMode::Void => "leave frame order untouched",
            EffectMode::Random => "shuffle all frames",
            EffectMode::Reverse => "play frames backwards",
            EffectMode::Invert => "swap every pair of neighbouring frames",
            EffectMode::Bloom => "repeat the frame at index <position> <count> times",
            EffectMode::Pulse => "every <count>-th frame is repeated <position> times",
            EffectMode::Jiggle => "shake frame order with gaussian jitter of width <position>",
            EffectMode::Overlap => {
                "emit windows of <count> frames, one starting every <position> frames"
            }
        }
    }
}

impl fmt::Display for EffectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mode-specific integer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectParams {
    pub count: usize,
    pub position: usize,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            count: 1,
            position: 1,
        }
    }
}

/// A configured effect, ready to apply to frame lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectPipeline {
    mode: EffectMode,
    params: EffectParams,
}

impl EffectPipeline {
    pub fn new(mode: EffectMode, params: EffectParams) -> Self {
        Self { mode, params }
    }

    /// Build from a user-supplied mode name; unknown names become `Void`.
    pub fn from_mode_name(name: &str, params: EffectParams) -> Self {
        Self::new(EffectMode::resolve(name), params)
    }

    pub fn mode(&self) -> EffectMode {
        self.mode
    }

    pub fn params(&self) -> EffectParams {
        self.params
    }

    /// Reject parameters that would index outside a list of `len` frames or
    /// produce more than [`MAX_OUTPUT_FRAMES`] frames.
    pub fn validate(&self, len: usize) -> MoshResult<()> {
        let EffectParams { count, position } = self.params;
        let fail = |msg: String| Err(MoshError::parameter(self.mode.name(), msg));

        match self.mode {
            EffectMode::Void | EffectMode::Random | EffectMode::Reverse | EffectMode::Invert => {
                Ok(())
            }
            EffectMode::Bloom if len == 0 => fail("no frames to bloom".to_string()),
            EffectMode::Bloom if position >= len => fail(format!(
                "position {position} is beyond the last of {len} frames"
            )),
            EffectMode::Bloom => Ok(()),
            EffectMode::Pulse if count == 0 => {
                fail("count (pulse period) must be at least 1".to_string())
            }
            EffectMode::Pulse => Ok(()),
            EffectMode::Jiggle if len == 0 => fail("no frames to jiggle".to_string()),
            EffectMode::Jiggle => Ok(()),
            EffectMode::Overlap if count == 0 => {
                fail("count (window size) must be at least 1".to_string())
            }
            EffectMode::Overlap if position == 0 => {
                fail("position (stride) must be at least 1".to_string())
            }
            EffectMode::Overlap => Ok(()),
        }?;

        match self.output_bound(len) {
            Some(out) if out <= MAX_OUTPUT_FRAMES => Ok(()),
            Some(out) => fail(format!(
                "count {count} and position {position} would emit {out} frames \
                 (limit {MAX_OUTPUT_FRAMES})"
            )),
            None => fail(format!(
                "count {count} and position {position} overflow the output length"
            )),
        }
    }

    /// Upper bound on the output length for `len` input frames, `None` when
    /// it does not fit in a `usize`.
    fn output_bound(&self, len: usize) -> Option<usize> {
        let EffectParams { count, position } = self.params;
        match self.mode {
            EffectMode::Void
            | EffectMode::Random
            | EffectMode::Reverse
            | EffectMode::Invert
            | EffectMode::Jiggle => Some(len),
            EffectMode::Bloom => len.saturating_sub(1).checked_add(count),
            EffectMode::Pulse if len == 0 => Some(0),
            EffectMode::Pulse => {
                let hits = (len - 1).checked_div(count)? + 1;
                hits.checked_mul(position)?.checked_add(len - hits)
            }
            EffectMode::Overlap if len == 0 => Some(0),
            EffectMode::Overlap => {
                let windows = if count >= len {
                    1
                } else {
                    (len - count - 1).checked_div(position)? + 2
                };
                windows.checked_mul(count.min(len))
            }
        }
    }

    /// Apply the effect to `frames`, drawing any randomness from `rng`.
    pub fn apply<T, R>(&self, frames: &[T], rng: &mut R) -> MoshResult<Vec<T>>
    where
        T: Clone,
        R: Rng + ?Sized,
    {
        self.validate(frames.len())?;
        let EffectParams { count, position } = self.params;

        let out = match self.mode {
            EffectMode::Void => frames.to_vec(),
            EffectMode::Random => {
                let mut shuffled = frames.to_vec();
                shuffled.shuffle(rng);
                shuffled
            }
            EffectMode::Reverse => frames.iter().rev().cloned().collect(),
            EffectMode::Invert => frames
                .chunks(2)
                .flat_map(|pair| pair.iter().rev())
                .cloned()
                .collect(),
            EffectMode::Bloom => bloom(frames, count, position),
            EffectMode::Pulse => pulse(frames, count, position),
            EffectMode::Jiggle => jiggle(frames, position, rng)?,
            EffectMode::Overlap => overlap(frames, count, position),
        };

        tracing::debug!(
            mode = %self.mode,
            input = frames.len(),
            output = out.len(),
            "applied effect"
        );
        Ok(out)
    }
}

fn bloom<T: Clone>(frames: &[T], count: usize, position: usize) -> Vec<T> {
    frames[..position]
        .iter()
        .cloned()
        .chain(std::iter::repeat(frames[position].clone()).take(count))
        .chain(frames[position + 1..].iter().cloned())
        .collect()
}

fn pulse<T: Clone>(frames: &[T], period: usize, repeat: usize) -> Vec<T> {
    frames
        .iter()
        .enumerate()
        .flat_map(|(i, frame)| {
            let times = if i % period == 0 { repeat } else { 1 };
            std::iter::repeat(frame.clone()).take(times)
        })
        .collect()
}

fn jiggle<T, R>(frames: &[T], amount: usize, rng: &mut R) -> MoshResult<Vec<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, amount as f64)
        .map_err(|e| MoshError::parameter(EffectMode::Jiggle.name(), e.to_string()))?;
    let last = frames.len() as i64 - 1;

    Ok((0..frames.len())
        .map(|i| {
            let shift = normal.sample(rng).trunc() as i64;
            let index = (i as i64).saturating_add(shift).clamp(0, last);
            frames[index as usize].clone()
        })
        .collect())
}

/// Windows stop once one reaches the end of the input, so a trailing
/// window is clipped rather than followed by ever-shorter tails.
fn overlap<T: Clone>(frames: &[T], window: usize, stride: usize) -> Vec<T> {
    let mut out = Vec::new();
    let mut start = 0;
    while start < frames.len() {
        let end = start.saturating_add(window).min(frames.len());
        out.extend_from_slice(&frames[start..end]);
        if end == frames.len() {
            break;
        }
        start = start.saturating_add(stride);
    }
    out
}
