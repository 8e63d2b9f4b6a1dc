//! Implementation of the `ccc configure` command.

use std::path::PathBuf;

use anyhow::Result;

use ccc_core::{BuildConfig, BuildOptions};

use crate::cmd::{Globals, ProjectContext, block_on, merge_options};
use crate::output::{print_stat, print_success};

/// Execute the configure command.
///
/// Installs Conan dependencies when a conanfile is present, then runs the
/// CMake configure step into the resolved build directory.
pub fn cmd_configure(
  globals: &Globals,
  build_config: BuildConfig,
  install_prefix: Option<PathBuf>,
  extra_cmake_configure_options: Vec<String>,
  extra_conan_install_options: Vec<String>,
) -> Result<()> {
  let ctx = ProjectContext::load(globals)?;
  let build_dir = ctx.build_dir(globals, &build_config);

  let options = BuildOptions {
    install_prefix,
    extra_cmake_configure_options: merge_options(
      extra_cmake_configure_options,
      &ctx.config.project.configure.extra_cmake_configure_options,
    ),
    extra_conan_install_options: merge_options(
      extra_conan_install_options,
      &ctx.config.project.configure.extra_conan_install_options,
    ),
    extra_cmake_build_options: Vec::new(),
    environment: ctx.config.environment.clone(),
  };

  block_on(ccc_core::build::configure(
    &ctx.project,
    &build_dir,
    build_config.profile,
    &options,
  ))??;

  print_success(&format!("Configured {} ({})", ctx.project.name(), build_config.profile));
  print_stat("Build directory", &build_dir.display().to_string());
  Ok(())
}
