//! Discovery and execution of test executables in a build directory.
//!
//! There is no registry of test binaries; like the underlying build system
//! we rely on naming conventions. Anything executable whose file name
//! contains one of the markers counts as a test.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::backend::Invocation;
use crate::error::{CoreError, Result};

/// File-name markers that identify a test executable.
pub const TEST_NAME_MARKERS: &[&str] = &["Tests", "Tester", "unitTest"];

/// Result of running one test executable.
#[derive(Debug)]
pub struct TestRun {
  pub executable: PathBuf,
  pub code: Option<i32>,
}

impl TestRun {
  pub fn passed(&self) -> bool {
    self.code == Some(0)
  }
}

/// Find test executables under `build_dir`, sorted by path.
pub fn find_test_executables(build_dir: &Path) -> Vec<PathBuf> {
  let mut found = Vec::new();
  for entry in WalkDir::new(build_dir).into_iter().filter_map(|e| e.ok()) {
    if !entry.file_type().is_file() {
      continue;
    }
    let name = entry.file_name().to_string_lossy();
    if TEST_NAME_MARKERS.iter().any(|m| name.contains(m)) && is_executable(entry.path()) {
      found.push(entry.path().to_path_buf());
    }
  }
  found.sort();
  found
}

/// Run every test executable in `build_dir` whose name contains
/// `name_match` (all of them when `None`), in path order.
///
/// # Errors
///
/// `NoTestExecutables` when nothing matches; individual test failures are
/// reported through the returned `TestRun`s, not as errors.
pub async fn run_tests(
  build_dir: &Path,
  name_match: Option<&str>,
  env: &BTreeMap<String, String>,
) -> Result<Vec<TestRun>> {
  let executables: Vec<PathBuf> = find_test_executables(build_dir)
    .into_iter()
    .filter(|path| match name_match {
      Some(text) => path.to_string_lossy().contains(text),
      None => true,
    })
    .collect();

  if executables.is_empty() {
    return Err(CoreError::NoTestExecutables {
      build_dir: build_dir.to_path_buf(),
    });
  }

  let mut runs = Vec::with_capacity(executables.len());
  for executable in executables {
    debug!(executable = %executable.display(), "running test executable");
    let code = Invocation::new(executable.display().to_string(), build_dir)
      .envs(env)
      .status()
      .await?;
    runs.push(TestRun { executable, code });
  }
  Ok(runs)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;
  std::fs::metadata(path).map(|m| m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
  path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("exe"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[cfg(unix)]
  fn write_executable(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
  }

  #[test]
  #[cfg(unix)]
  fn discovery_matches_markers_and_executable_bit() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("testing");
    std::fs::create_dir(&nested).unwrap();

    let unit = write_executable(temp.path(), "widgetTests", "#!/bin/sh\nexit 0\n");
    let nested_exe = write_executable(&nested, "ioTester", "#!/bin/sh\nexit 0\n");
    // Matching name without the executable bit
    std::fs::write(temp.path().join("parserTests.cpp"), "").unwrap();
    // Executable without a matching name
    write_executable(temp.path(), "widget", "#!/bin/sh\nexit 0\n");

    let found = find_test_executables(temp.path());
    assert_eq!(found, vec![nested_exe, unit]);
  }

  #[test]
  fn discovery_of_empty_directory_is_empty() {
    let temp = TempDir::new().unwrap();
    assert!(find_test_executables(temp.path()).is_empty());
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn run_tests_reports_per_executable_codes() {
    let temp = TempDir::new().unwrap();
    write_executable(temp.path(), "aTests", "#!/bin/sh\nexit 0\n");
    write_executable(temp.path(), "bTests", "#!/bin/sh\nexit 1\n");

    let runs = run_tests(temp.path(), None, &BTreeMap::new()).await.unwrap();
    assert_eq!(runs.len(), 2);
    assert!(runs[0].passed());
    assert!(!runs[1].passed());
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn run_tests_filters_by_match() {
    let temp = TempDir::new().unwrap();
    write_executable(temp.path(), "parserTests", "#!/bin/sh\nexit 0\n");
    write_executable(temp.path(), "lexerTests", "#!/bin/sh\nexit 1\n");

    let runs = run_tests(temp.path(), Some("parser"), &BTreeMap::new()).await.unwrap();
    assert_eq!(runs.len(), 1);
    assert!(runs[0].passed());
  }

  #[tokio::test]
  async fn run_tests_with_no_executables_fails() {
    let temp = TempDir::new().unwrap();
    let err = run_tests(temp.path(), None, &BTreeMap::new()).await.unwrap_err();
    assert!(matches!(err, CoreError::NoTestExecutables { .. }));
  }
}
