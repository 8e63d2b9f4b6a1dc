//! Removal of generated build directories.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::backend::Invocation;
use crate::error::{CoreError, Result};

/// Directories removed by `clean`.
#[derive(Debug, Default)]
pub struct CleanReport {
  pub removed: Vec<PathBuf>,
}

/// Remove every `build-*` directory directly under `dir`.
///
/// Read-only bits (left behind by some generators on Windows) are cleared
/// before removal. Only build directories are ever touched.
pub fn clean_build_dirs(dir: &Path) -> Result<CleanReport> {
  let mut report = CleanReport::default();
  for entry in std::fs::read_dir(dir)? {
    let entry = entry?;
    let name = entry.file_name().to_string_lossy().into_owned();
    if !entry.file_type()?.is_dir() || !name.starts_with("build-") {
      continue;
    }
    let path = entry.path();
    debug!(dir = %path.display(), "removing build directory");
    remove_dir_all_writable(&path)?;
    report.removed.push(path);
  }
  report.removed.sort();
  Ok(report)
}

/// Ask git to remove everything else it does not track.
pub async fn clean_repository(dir: &Path) -> Result<()> {
  let inv = Invocation::new("git", dir).args(["clean", "-f", "-d"]);
  match inv.status().await? {
    Some(0) => Ok(()),
    code => Err(CoreError::Io(std::io::Error::other(format!(
      "git clean failed with exit code {code:?}"
    )))),
  }
}

/// `remove_dir_all` with a pre-pass clearing read-only permissions.
fn remove_dir_all_writable(path: &Path) -> Result<()> {
  for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
    let metadata = match entry.metadata() {
      Ok(m) => m,
      Err(_) => continue,
    };
    let mut perms = metadata.permissions();
    if perms.readonly() {
      #[allow(clippy::permissions_set_readonly_false)]
      perms.set_readonly(false);
      let _ = std::fs::set_permissions(entry.path(), perms);
    }
  }
  std::fs::remove_dir_all(path)?;
  Ok(())
}
