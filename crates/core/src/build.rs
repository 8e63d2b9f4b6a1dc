//! The build orchestrator.
//!
//! One invocation is a linear delegation: install dependencies (when a
//! Conan file is present), configure (when the backend has not been
//! configured in the output directory yet), then compile. Each step blocks
//! until the backend subprocess exits; a non-zero exit aborts the run and
//! leaves the output directory for the next, incremental attempt.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backend::cmake::ConfigureOptions;
use crate::backend::{Invocation, cmake, conan};
use crate::error::{CoreError, Result};
use crate::layout::Profile;
use crate::project::Project;

/// Marker file CMake writes during configuration; its presence means the
/// configure step can be skipped on rebuilds.
const CMAKE_CACHE_FILE: &str = "CMakeCache.txt";

/// Backend options for one invocation, already merged from CLI flags and
/// the project configuration.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
  pub install_prefix: Option<PathBuf>,
  pub extra_cmake_configure_options: Vec<String>,
  pub extra_conan_install_options: Vec<String>,
  pub extra_cmake_build_options: Vec<String>,

  /// Environment variables injected into every backend subprocess.
  pub environment: BTreeMap<String, String>,
}

/// What one `build` invocation did.
#[derive(Debug)]
pub struct BuildOutcome {
  pub build_dir: PathBuf,

  /// Whether a configure step ran as part of this invocation.
  pub configured: bool,
}

/// Run the configure step into `build_dir`, creating it if absent.
///
/// Installs Conan dependencies first when a `conanfile.py`/`conanfile.txt`
/// is found, then delegates to CMake with the profile's build type.
pub async fn configure(project: &Project, build_dir: &Path, profile: Profile, options: &BuildOptions) -> Result<()> {
  std::fs::create_dir_all(build_dir)?;

  if let Some(conanfile) = conan::find_conanfile(build_dir, project.root()) {
    info!(file = %conanfile.display(), "installing dependencies with conan");
    let inv = conan::install(
      &conanfile,
      build_dir,
      &options.extra_conan_install_options,
      &options.environment,
    );
    run(inv, |code| CoreError::DependencyInstallFailed { code }).await?;
  }

  info!(build_dir = %build_dir.display(), profile = %profile, "configuring");
  let inv = cmake::configure(
    project.root(),
    build_dir,
    profile,
    &ConfigureOptions {
      install_prefix: options.install_prefix.as_deref(),
      extra_options: &options.extra_cmake_configure_options,
    },
    &options.environment,
  );
  run(inv, |code| CoreError::ConfigureFailed { code }).await
}

/// Run a full build: configure if needed (or forced), then compile.
pub async fn build(
  project: &Project,
  build_dir: &Path,
  profile: Profile,
  target: Option<&str>,
  force_configure: bool,
  options: &BuildOptions,
) -> Result<BuildOutcome> {
  let needs_configure = force_configure || !build_dir.join(CMAKE_CACHE_FILE).exists();
  if needs_configure {
    configure(project, build_dir, profile, options).await?;
  } else {
    debug!(build_dir = %build_dir.display(), "already configured, skipping configure step");
  }

  info!(build_dir = %build_dir.display(), "compiling");
  let inv = cmake::compile(build_dir, target, &options.extra_cmake_build_options, &options.environment);
  run(inv, |code| CoreError::CompileFailed { code }).await?;

  Ok(BuildOutcome {
    build_dir: build_dir.to_path_buf(),
    configured: needs_configure,
  })
}

/// Configure for release with an install prefix, then build the backend's
/// `install` target.
pub async fn install(project: &Project, build_dir: &Path, prefix: &Path, options: &BuildOptions) -> Result<()> {
  let options = BuildOptions {
    install_prefix: Some(prefix.to_path_buf()),
    ..options.clone()
  };
  configure(project, build_dir, Profile::Release, &options).await?;

  info!(prefix = %prefix.display(), "installing");
  let inv = cmake::compile(
    build_dir,
    Some("install"),
    &options.extra_cmake_build_options,
    &options.environment,
  );
  run(inv, |code| CoreError::CompileFailed { code }).await
}

/// Run one backend invocation, mapping a non-zero exit to `on_failure`.
async fn run(invocation: Invocation, on_failure: impl FnOnce(Option<i32>) -> CoreError) -> Result<()> {
  match invocation.status().await? {
    Some(0) => Ok(()),
    code => Err(on_failure(code)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::project::DESCRIPTOR_FILE;
  #[cfg(unix)]
  use serial_test::serial;
  use tempfile::TempDir;

  #[cfg(unix)]
  fn stub_project(temp: &TempDir) -> Project {
    std::fs::write(temp.path().join(DESCRIPTOR_FILE), "project(stub)\n").unwrap();
    Project::locate(temp.path()).unwrap()
  }

  /// Put fake `cmake`/`conan` tools on PATH that log their arguments and
  /// mimic the marker files the real tools produce.
  #[cfg(unix)]
  fn stub_backends(temp: &TempDir) -> std::ffi::OsString {
    use std::os::unix::fs::PermissionsExt;

    let bin = temp.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let stubs = [
      (
        "cmake",
        "#!/bin/sh\necho \"cmake $@\" >> \"$PWD/backend.log\"\nif [ \"$1\" != --build ]; then touch CMakeCache.txt; fi\n",
      ),
      ("conan", "#!/bin/sh\necho \"conan $@\" >> \"$PWD/backend.log\"\n"),
    ];
    for (name, body) in stubs {
      let path = bin.join(name);
      std::fs::write(&path, body).unwrap();
      let mut perms = std::fs::metadata(&path).unwrap().permissions();
      perms.set_mode(0o755);
      std::fs::set_permissions(&path, perms).unwrap();
    }

    let mut path = bin.into_os_string();
    path.push(":");
    path.push(std::env::var_os("PATH").unwrap_or_default());
    path
  }

  #[cfg(unix)]
  fn backend_log(build_dir: &Path) -> String {
    std::fs::read_to_string(build_dir.join("backend.log")).unwrap_or_default()
  }

  #[tokio::test]
  #[cfg(unix)]
  #[serial(env_path)]
  async fn build_configures_then_compiles() {
    let temp = TempDir::new().unwrap();
    let project = stub_project(&temp);
    let build_dir = temp.path().join("build-debug-linux");

    // Env mutation is process-global; these tests are serialized on `path`
    unsafe { std::env::set_var("PATH", stub_backends(&temp)) };

    let outcome = build(&project, &build_dir, Profile::Debug, None, false, &BuildOptions::default())
      .await
      .unwrap();

    assert!(outcome.configured);
    let log = backend_log(&build_dir);
    assert!(log.contains("-DCMAKE_BUILD_TYPE=Debug"));
    assert!(log.contains("cmake --build ."));
  }

  #[tokio::test]
  #[cfg(unix)]
  #[serial(env_path)]
  async fn rebuild_skips_configure() {
    let temp = TempDir::new().unwrap();
    let project = stub_project(&temp);
    let build_dir = temp.path().join("build-debug-linux");

    unsafe { std::env::set_var("PATH", stub_backends(&temp)) };

    build(&project, &build_dir, Profile::Debug, None, false, &BuildOptions::default())
      .await
      .unwrap();
    let outcome = build(&project, &build_dir, Profile::Debug, None, false, &BuildOptions::default())
      .await
      .unwrap();

    assert!(!outcome.configured);
    let configure_runs = backend_log(&build_dir)
      .lines()
      .filter(|l| l.contains("-DCMAKE_BUILD_TYPE"))
      .count();
    assert_eq!(configure_runs, 1);
  }

  #[tokio::test]
  #[cfg(unix)]
  #[serial(env_path)]
  async fn configure_runs_conan_when_conanfile_present() {
    let temp = TempDir::new().unwrap();
    let project = stub_project(&temp);
    std::fs::write(temp.path().join("conanfile.txt"), "[requires]\n").unwrap();
    let build_dir = temp.path().join("build-debug-linux");

    unsafe { std::env::set_var("PATH", stub_backends(&temp)) };

    configure(&project, &build_dir, Profile::Debug, &BuildOptions::default())
      .await
      .unwrap();

    let log = backend_log(&build_dir);
    assert!(log.contains("conan install"));
    assert!(log.contains("--build=missing"));
  }

  #[tokio::test]
  #[cfg(unix)]
  #[serial(env_path)]
  async fn failing_backend_surfaces_compile_error() {
    let temp = TempDir::new().unwrap();
    let project = stub_project(&temp);
    let build_dir = temp.path().join("build-debug-linux");
    std::fs::create_dir_all(&build_dir).unwrap();
    // Pretend the project is configured so only the compile step runs
    std::fs::write(build_dir.join(CMAKE_CACHE_FILE), "").unwrap();

    // A cmake that always fails
    use std::os::unix::fs::PermissionsExt;
    let bin = temp.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let fake = bin.join("cmake");
    std::fs::write(&fake, "#!/bin/sh\nexit 2\n").unwrap();
    let mut perms = std::fs::metadata(&fake).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&fake, perms).unwrap();
    let mut path = bin.into_os_string();
    path.push(":");
    path.push(std::env::var_os("PATH").unwrap_or_default());
    unsafe { std::env::set_var("PATH", path) };

    let err = build(&project, &build_dir, Profile::Debug, None, false, &BuildOptions::default())
      .await
      .unwrap_err();
    assert!(matches!(err, CoreError::CompileFailed { code: Some(2) }));
  }
}
