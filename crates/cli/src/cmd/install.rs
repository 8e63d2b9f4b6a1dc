//! Implementation of the `ccc install` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use ccc_core::BuildOptions;

use crate::cmd::{Globals, ProjectContext, block_on};
use crate::output::{print_stat, print_success};

/// Build directory used for installs, separate from the per-profile trees
/// so an install prefix never leaks into regular builds.
const INSTALL_BUILD_DIR: &str = "build-install";

/// Execute the install command.
///
/// Configures the project for release with the given install prefix, then
/// builds the backend's `install` target.
pub fn cmd_install(globals: &Globals, directory: &Path) -> Result<()> {
  let ctx = ProjectContext::load(globals)?;

  let override_dir = globals.build_dir.as_deref().or(ctx.config.project.build_dir.as_deref());
  let build_dir: PathBuf = match override_dir {
    Some(dir) if dir.is_absolute() => dir.to_path_buf(),
    Some(dir) => ctx.project.root().join(dir),
    None => ctx.project.root().join(INSTALL_BUILD_DIR),
  };

  let options = BuildOptions {
    install_prefix: None,
    extra_cmake_configure_options: ctx.config.project.configure.extra_cmake_configure_options.clone(),
    extra_conan_install_options: ctx.config.project.configure.extra_conan_install_options.clone(),
    extra_cmake_build_options: ctx.config.project.build.extra_cmake_build_options.clone(),
    environment: ctx.config.environment.clone(),
  };

  block_on(ccc_core::build::install(&ctx.project, &build_dir, directory, &options))??;

  print_success(&format!("Installed {}", ctx.project.name()));
  print_stat("Prefix", &directory.display().to_string());
  print_stat("Build directory", &build_dir.display().to_string());
  Ok(())
}
