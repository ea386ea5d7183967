//! List effect modes.

use avimosh_processing_core::EffectMode;

pub fn run() -> anyhow::Result<()> {
    println!("Modes:");
    for mode in EffectMode::ALL {
        println!("  {:<8} {}", mode.name(), mode.describe());
    }
    Ok(())
}
