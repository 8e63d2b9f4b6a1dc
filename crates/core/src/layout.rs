//! Build configuration and output-directory layout.
//!
//! A build is identified by `(profile, platform)`. The pair maps to a
//! deterministic directory name, `build-<profile>-<platform>`, created under
//! the project root on first use and kept across invocations so the backend
//! can rebuild incrementally.

use std::fmt;
use std::path::{Path, PathBuf};

use ccc_platform::Os;
use serde::Serialize;

/// Build variant selector, controls the backend's optimization/debug flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
  #[default]
  Debug,
  Release,
}

impl Profile {
  /// Returns the profile name as it appears in build-directory names
  pub const fn as_str(&self) -> &'static str {
    match self {
      Profile::Debug => "debug",
      Profile::Release => "release",
    }
  }

  /// The value passed to CMake as `CMAKE_BUILD_TYPE`
  pub const fn cmake_build_type(&self) -> &'static str {
    match self {
      Profile::Debug => "Debug",
      Profile::Release => "Release",
    }
  }
}

impl fmt::Display for Profile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// The effective configuration of one build invocation.
///
/// `platform` is a free-form label so builds can be routed to separate
/// directories per target; it defaults to the host OS name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  pub profile: Profile,
  pub platform: String,
}

impl BuildConfig {
  /// Configuration for `profile` on the host platform.
  pub fn new(profile: Profile) -> Self {
    Self {
      profile,
      platform: Os::current().as_str().to_string(),
    }
  }

  /// Configuration with an explicit platform label.
  pub fn with_platform(profile: Profile, platform: impl Into<String>) -> Self {
    Self {
      profile,
      platform: platform.into(),
    }
  }

  /// The deterministic output-directory name for this configuration.
  pub fn dir_name(&self) -> String {
    format!("build-{}-{}", self.profile, self.platform)
  }

  /// The output directory under `root`.
  pub fn build_dir(&self, root: &Path) -> PathBuf {
    root.join(self.dir_name())
  }
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self::new(Profile::default())
  }
}

/// Resolve the output directory for one invocation.
///
/// Precedence: an explicit override (CLI flag, then configuration file),
/// otherwise the computed `build-<profile>-<platform>` under `root`.
/// Relative overrides are taken relative to `root`.
pub fn resolve_build_dir(root: &Path, config: &BuildConfig, override_dir: Option<&Path>) -> PathBuf {
  match override_dir {
    Some(dir) if dir.is_absolute() => dir.to_path_buf(),
    Some(dir) => root.join(dir),
    None => config.build_dir(root),
  }
}
