pub mod init;
pub mod inspect;
pub mod modes;
pub mod mosh;

use std::path::Path;

use avimosh_common::error::MoshError;

/// Wrap a failed run for display. Mistakes in the invocation get a pointer
/// to `--help`; I/O failures are reported as they are.
pub fn run_error(action: &str, input: &Path, err: MoshError) -> anyhow::Error {
    if err.is_user_error() {
        anyhow::anyhow!(
            "Failed to {action} {}: {err}\nRun `avimosh --help` for usage.",
            input.display()
        )
    } else {
        anyhow::anyhow!("Failed to {action} {}: {err}", input.display())
    }
}
