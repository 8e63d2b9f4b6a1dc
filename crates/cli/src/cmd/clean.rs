//! Implementation of the `ccc clean` command.

use anyhow::{Context, Result};

use ccc_core::clean::{clean_build_dirs, clean_repository};

use crate::cmd::block_on;
use crate::output::print_info;

/// Execute the clean command.
///
/// Removes every `build-*` directory under the current directory. With
/// `--all`, also asks git to remove untracked files and directories.
pub fn cmd_clean(all: bool) -> Result<()> {
  let cwd = std::env::current_dir().context("Failed to determine current directory")?;

  let report = clean_build_dirs(&cwd)?;
  for dir in &report.removed {
    print_info(&format!("Removed {}", dir.display()));
  }
  if report.removed.is_empty() {
    print_info("No build directories to remove");
  }

  if all {
    block_on(clean_repository(&cwd))??;
  }
  Ok(())
}
