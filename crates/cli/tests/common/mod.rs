//! Shared test helpers for CLI integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// A minimal descriptor declaring one executable target named `main`,
/// matching the layout `ccc` is most often pointed at.
pub const MAIN_DESCRIPTOR: &str = "cmake_minimum_required(VERSION 3.14)\nproject(main)\n\nadd_executable(main main.cpp)\n";

/// Isolated test environment: a temp directory holding a project directory
/// and a `bin` directory that is prepended to PATH for stub backends.
pub struct TestEnv {
  pub temp: TempDir,
  pub project_dir: PathBuf,
  bin_dir: PathBuf,
}

impl TestEnv {
  /// Create an empty environment (no project files).
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let project_dir = temp.path().join("project");
    std::fs::create_dir_all(&project_dir).unwrap();
    let bin_dir = temp.path().join("bin");
    std::fs::create_dir_all(&bin_dir).unwrap();
    Self {
      temp,
      project_dir,
      bin_dir,
    }
  }

  /// Create an environment holding a one-target CMake project.
  pub fn with_project() -> Self {
    let env = Self::empty();
    env.write_file("project/CMakeLists.txt", MAIN_DESCRIPTOR);
    env.write_file("project/main.cpp", "int main() { return 0; }\n");
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Install stub `cmake`/`conan`/`git` executables.
  ///
  /// Each stub appends its argv to `backend.log` in its working directory.
  /// The cmake stub mimics the real tool's observable behavior: configure
  /// writes `CMakeCache.txt`, `--build` produces an executable named
  /// `main` (the target declared by [`MAIN_DESCRIPTOR`]).
  #[cfg(unix)]
  pub fn install_backend_stubs(&self) {
    let cmake = concat!(
      "#!/bin/sh\n",
      "echo \"cmake $@\" >> \"$PWD/backend.log\"\n",
      "if [ \"$1\" = --build ]; then\n",
      "  touch main\n",
      "  chmod +x main\n",
      "else\n",
      "  touch CMakeCache.txt\n",
      "fi\n"
    );
    self.write_stub("cmake", cmake);
    self.write_stub("conan", "#!/bin/sh\necho \"conan $@\" >> \"$PWD/backend.log\"\n");
    self.write_stub("git", "#!/bin/sh\necho \"git $@\" >> \"$PWD/backend.log\"\n");
  }

  /// Install an executable stub into the PATH directory.
  #[cfg(unix)]
  pub fn write_stub(&self, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    let path = self.bin_dir.join(name);
    std::fs::write(&path, body).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
  }

  /// Read the backend invocation log below the project directory
  /// (`"."` for the project directory itself).
  pub fn backend_log(&self, relative_dir: &str) -> String {
    std::fs::read_to_string(self.project_dir.join(relative_dir).join("backend.log")).unwrap_or_default()
  }

  /// Directories directly under the project dir whose name starts with `build-`.
  pub fn build_dirs(&self) -> Vec<String> {
    let mut dirs: Vec<String> = std::fs::read_dir(&self.project_dir)
      .unwrap()
      .filter_map(|e| e.ok())
      .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
      .map(|e| e.file_name().to_string_lossy().into_owned())
      .filter(|name| name.starts_with("build-"))
      .collect();
    dirs.sort();
    dirs
  }

  /// Get a pre-configured Command for the ccc binary, running inside the
  /// project directory with the stub tools first on PATH.
  pub fn ccc_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("ccc");
    cmd.current_dir(&self.project_dir);

    let current_path = std::env::var_os("PATH").unwrap_or_default();
    let paths = std::iter::once(self.bin_dir.clone())
      .chain(std::env::split_paths(&current_path));
    cmd.env("PATH", std::env::join_paths(paths).unwrap());
    cmd
  }
}

/// The computed build directory name for `profile` on the host platform.
pub fn host_build_dir(profile: &str) -> String {
  format!("build-{profile}-{}", ccc_platform::Os::current().as_str())
}
