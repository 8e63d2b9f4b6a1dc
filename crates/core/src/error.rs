//! Error types for ccc-core

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, Error)]
pub enum CoreError {
  /// No recognized build descriptor in the start directory or any parent.
  #[error("no build descriptor (CMakeLists.txt) found in {} or any parent directory", .start.display())]
  DescriptorNotFound { start: PathBuf },

  /// More than one recognized build descriptor in the same directory.
  #[error("multiple build descriptors found in {}: {}", .root.display(), .found.join(", "))]
  AmbiguousDescriptor { root: PathBuf, found: Vec<String> },

  /// A backend program is not installed or not on PATH.
  #[error("{program} not found on PATH")]
  BackendMissing { program: String },

  /// `conan install` exited non-zero.
  #[error("conan install failed with exit code {code:?}")]
  DependencyInstallFailed { code: Option<i32> },

  /// The CMake configure step exited non-zero.
  #[error("cmake configure failed with exit code {code:?}")]
  ConfigureFailed { code: Option<i32> },

  /// The CMake compile step exited non-zero.
  #[error("cmake build failed with exit code {code:?}")]
  CompileFailed { code: Option<i32> },

  /// A configuration file could not be parsed.
  #[error("invalid configuration file {}: {source}", .path.display())]
  Config {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  /// No test executables were found in the build directory.
  #[error("no test executables found in {}", .build_dir.display())]
  NoTestExecutables { build_dir: PathBuf },

  /// Scaffolding would overwrite an existing build descriptor.
  #[error("refusing to overwrite existing project at {}", .0.display())]
  ProjectExists(PathBuf),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
