//! Read-only analysis of a container's frame index.

use std::path::PathBuf;

use serde::Serialize;

use avimosh_common::config::MoshConfig;
use avimosh_common::error::MoshResult;
use avimosh_frame_model::TableSummary;
use avimosh_processing_core::FrameCleaner;

use crate::indexer::build_frame_table;
use crate::workspace::RegionWorkspace;

/// What a run over this input would work with.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub input: PathBuf,
    pub header_len: u64,
    pub data_len: u64,
    pub index_len: u64,
    pub movi_found: bool,
    pub idx1_found: bool,
    pub table: TableSummary,
    pub kill_ratio: f64,
    pub kill_threshold: f64,
    /// Table entries the kill ratio would drop.
    pub rejected_frames: usize,
    /// Length of the cleaned list (pinned first frame included).
    pub clean_frames: usize,
}

/// Split and index `config.input` without writing any output.
pub fn inspect(config: &MoshConfig) -> MoshResult<InspectReport> {
    config.validate()?;

    let workspace = RegionWorkspace::new()?;
    let offsets = workspace.split(&config.input)?;
    let table = build_frame_table(&workspace.data(), config.preserve_audio)?;

    let cleaner = FrameCleaner::new(config.kill_ratio, config.keep_first_frame);

    Ok(InspectReport {
        input: config.input.clone(),
        header_len: offsets.header_len(),
        data_len: offsets.data_len(),
        index_len: offsets.index_len(),
        movi_found: offsets.movi.found(),
        idx1_found: offsets.idx1.found(),
        table: table.summary(),
        kill_ratio: config.kill_ratio,
        kill_threshold: cleaner.threshold(&table),
        rejected_frames: cleaner.rejected(&table),
        clean_frames: cleaner.clean(&table).len(),
    })
}
