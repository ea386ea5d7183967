//! Glitch a file.

use avimosh_common::config::MoshConfig;
use avimosh_container::MoshSession;

pub fn run(config: MoshConfig, json: bool) -> anyhow::Result<()> {
    let report = MoshSession::new(&config)
        .run()
        .map_err(|e| super::run_error("mosh", &config.input, e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Moshed: {}", config.input.display());
    if report.applied_mode.name() != report.requested_mode {
        println!(
            "  Mode: {} (unknown, used {})",
            report.requested_mode, report.applied_mode
        );
    } else {
        println!("  Mode: {}", report.applied_mode);
    }
    println!("  Count / position: {} / {}", config.count, config.position);
    println!("  Seed: {}", report.seed);
    println!(
        "  Frames: {} found, {} after cleaning, {} written",
        report.table_frames, report.clean_frames, report.final_frames
    );
    if report.movi_found {
        println!("  Payload: {} bytes", report.reassembly.payload_bytes);
    } else {
        println!("  Payload: none (no movi tag, output is a copy)");
    }
    println!("  Output: {}", report.output.display());
    println!("  Time: {}ms", report.elapsed_ms);

    Ok(())
}
