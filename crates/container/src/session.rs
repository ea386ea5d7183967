//! One end-to-end glitch run.

use std::path::PathBuf;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use avimosh_common::config::MoshConfig;
use avimosh_common::error::MoshResult;
use avimosh_processing_core::{EffectMode, EffectParams, EffectPipeline, FrameCleaner};

use crate::indexer::build_frame_table;
use crate::reassembler::{reassemble, ReassemblyStats};
use crate::splitter::stream_until_marker;
use crate::workspace::RegionWorkspace;

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct MoshReport {
    pub output: PathBuf,

    /// Mode name as requested.
    pub requested_mode: String,

    /// Mode actually applied; `void` when the request was unknown.
    pub applied_mode: EffectMode,

    /// Whether the input carried a `movi` tag. Without one the output is a
    /// copy of the input.
    pub movi_found: bool,

    /// Frames found by scanning.
    pub table_frames: usize,

    /// Frames left after cleaning.
    pub clean_frames: usize,

    /// Frames written after the effect.
    pub final_frames: usize,

    pub reassembly: ReassemblyStats,

    /// Seed the effect's random source was built from.
    pub seed: u64,

    pub elapsed_ms: u64,
}

/// Runs split → index → clean → effect → reassemble for one config.
pub struct MoshSession<'a> {
    config: &'a MoshConfig,
}

impl<'a> MoshSession<'a> {
    pub fn new(config: &'a MoshConfig) -> Self {
        Self { config }
    }

    /// Execute the run and write the output file.
    ///
    /// Configuration and effect parameters are checked before the output
    /// file is touched. Temporary region files are removed on every path.
    pub fn run(&self) -> MoshResult<MoshReport> {
        let started = Instant::now();
        let config = self.config;
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        tracing::info!("step 1/5: splitting container");
        let workspace = RegionWorkspace::new()?;
        let offsets = workspace.split(&config.input)?;

        tracing::info!("step 2/5: constructing frame index");
        let table = build_frame_table(&workspace.data(), config.preserve_audio)?;
        let clean = FrameCleaner::new(config.kill_ratio, config.keep_first_frame).clean(&table);
        tracing::debug!(table = table.len(), clean = clean.len(), "frame index ready");

        let pipeline = EffectPipeline::from_mode_name(
            &config.mode,
            EffectParams {
                count: config.count,
                position: config.position,
            },
        );
        tracing::info!(seed, "step 3/5: mode {}", pipeline.mode());
        let final_frames = pipeline.apply(&clean, &mut rng)?;

        tracing::info!("step 4/5: putting things back together");
        let output = config.output_path()?;
        if output.exists() {
            std::fs::remove_file(&output)?;
        }
        stream_until_marker(&workspace.header(), &output, None, 0)?;
        let reassembly = if offsets.movi.found() {
            reassemble(&workspace.data(), &final_frames, &output)?
        } else {
            tracing::debug!("no movi tag, frame data left untouched");
            ReassemblyStats::default()
        };
        stream_until_marker(&workspace.index(), &output, None, 0)?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            frames = final_frames.len(),
            elapsed_ms,
            "step 5/5: done, wrote {}",
            output.display()
        );

        Ok(MoshReport {
            output,
            requested_mode: config.mode.clone(),
            applied_mode: pipeline.mode(),
            movi_found: offsets.movi.found(),
            table_frames: table.len(),
            clean_frames: clean.len(),
            final_frames: final_frames.len(),
            reassembly,
            seed,
            elapsed_ms,
        })
    }
}
