//! Show a file's frame index.

use avimosh_common::config::MoshConfig;

pub fn run(config: MoshConfig, json: bool) -> anyhow::Result<()> {
    let report = avimosh_container::inspect(&config)
        .map_err(|e| super::run_error("inspect", &config.input, e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File: {}", report.input.display());
    println!();

    println!("Regions:");
    println!("  Header: {} bytes", report.header_len);
    println!(
        "  Data:   {} bytes{}",
        report.data_len,
        if report.movi_found { "" } else { " (no movi tag)" }
    );
    println!(
        "  Index:  {} bytes{}",
        report.index_len,
        if report.idx1_found { "" } else { " (no idx1 tag)" }
    );
    println!();

    let t = &report.table;
    println!("Frames:");
    println!(
        "  Total: {} ({} video, {} audio)",
        t.frames, t.video_frames, t.audio_frames
    );
    println!(
        "  Size: min {} / mean {:.1} / max {} bytes",
        t.min_size, t.mean_size, t.max_size
    );
    println!();

    println!("Cleaning:");
    println!(
        "  Kill ratio: {} (threshold {:.1} bytes)",
        report.kill_ratio, report.kill_threshold
    );
    println!("  Rejected: {}", report.rejected_frames);
    println!("  Remaining: {}", report.clean_frames);

    Ok(())
}
