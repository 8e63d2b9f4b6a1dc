//! Conan dependency installation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::process::Invocation;

/// Recognized Conan dependency descriptors, in precedence order.
const CONAN_FILES: &[&str] = &["conanfile.py", "conanfile.txt"];

/// Locate the Conan file for a build, searching the build directory before
/// the project root and preferring `conanfile.py`.
pub fn find_conanfile(build_dir: &Path, project_root: &Path) -> Option<PathBuf> {
  for dir in [build_dir, project_root] {
    for name in CONAN_FILES {
      let candidate = dir.join(name);
      if candidate.is_file() {
        return Some(candidate);
      }
    }
  }
  None
}

/// Build the `conan install` invocation, run from inside `build_dir` so
/// generated files land next to the CMake cache.
pub fn install(conanfile: &Path, build_dir: &Path, extra_options: &[String], env: &BTreeMap<String, String>) -> Invocation {
  Invocation::new("conan", build_dir)
    .arg("install")
    .arg(conanfile.display().to_string())
    .arg("--build=missing")
    .args(extra_options.iter().cloned())
    .envs(env)
}
