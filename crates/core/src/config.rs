//! Project configuration loaded from `.project.yml` files.
//!
//! Configuration files are discovered in the invocation directory and every
//! parent directory, then merged with the nearest file taking precedence.
//! All fields are optional; an absent or empty file contributes nothing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{CoreError, Result};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".project.yml";

/// Merged contents of the discovered configuration files.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProjectConfig {
  pub project: ProjectSection,

  /// Environment variables injected into every backend subprocess.
  pub environment: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProjectSection {
  /// Overrides the computed `build-<profile>-<platform>` directory.
  pub build_dir: Option<PathBuf>,

  pub configure: ConfigureSection,
  pub build: BuildSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigureSection {
  pub extra_cmake_configure_options: Vec<String>,
  pub extra_conan_install_options: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct BuildSection {
  pub extra_cmake_build_options: Vec<String>,
}

impl ProjectConfig {
  /// Discover and merge configuration files for `start`.
  ///
  /// With `local_only` set, only `start` itself is searched; otherwise every
  /// ancestor directory is searched as well and nearer files win on conflict.
  pub fn load(start: &Path, file_name: &str, local_only: bool) -> Result<Self> {
    let mut merged = ProjectConfig::default();
    for file in find_config_files(start, file_name, local_only) {
      debug!(file = %file.display(), "reading configuration");
      if let Some(config) = read_config_file(&file)? {
        merged.merge(config);
      }
    }
    Ok(merged)
  }

  /// Overlay `other` on top of `self`; fields set in `other` win.
  fn merge(&mut self, other: ProjectConfig) {
    if other.project.build_dir.is_some() {
      self.project.build_dir = other.project.build_dir;
    }
    if !other.project.configure.extra_cmake_configure_options.is_empty() {
      self.project.configure.extra_cmake_configure_options = other.project.configure.extra_cmake_configure_options;
    }
    if !other.project.configure.extra_conan_install_options.is_empty() {
      self.project.configure.extra_conan_install_options = other.project.configure.extra_conan_install_options;
    }
    if !other.project.build.extra_cmake_build_options.is_empty() {
      self.project.build.extra_cmake_build_options = other.project.build.extra_cmake_build_options;
    }
    self.environment.extend(other.environment);
  }
}

/// List existing configuration files from the farthest ancestor down to
/// `start`, so that merging in order lets the nearest file override.
pub fn find_config_files(start: &Path, file_name: &str, local_only: bool) -> Vec<PathBuf> {
  let mut files = Vec::new();
  let candidate = start.join(file_name);
  if candidate.is_file() {
    files.push(candidate);
  }
  if !local_only {
    for dir in start.ancestors().skip(1) {
      let candidate = dir.join(file_name);
      if candidate.is_file() {
        files.push(candidate);
      }
    }
  }
  files.reverse();
  files
}

/// Parse one configuration file. Empty or comment-only files yield `None`.
fn read_config_file(path: &Path) -> Result<Option<ProjectConfig>> {
  let text = std::fs::read_to_string(path)?;
  serde_yaml::from_str(&text).map_err(|source| CoreError::Config {
    path: path.to_path_buf(),
    source,
  })
}
