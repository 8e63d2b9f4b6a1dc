//! Implementation of the `ccc build` command.

use std::time::Instant;

use anyhow::Result;

use ccc_core::{BuildConfig, BuildOptions};

use crate::cmd::{Globals, ProjectContext, block_on, merge_options};
use crate::output::{format_duration, print_stat, print_success};

/// Execute the build command.
///
/// Runs the configure step first when the build directory has no CMake
/// cache yet (or when forced), then delegates compilation to the backend.
pub fn cmd_build(
  globals: &Globals,
  build_config: BuildConfig,
  target: Option<String>,
  run_configure: bool,
  extra_cmake_build_options: Vec<String>,
) -> Result<()> {
  let start = Instant::now();

  let ctx = ProjectContext::load(globals)?;
  let build_dir = ctx.build_dir(globals, &build_config);

  let options = BuildOptions {
    install_prefix: None,
    extra_cmake_configure_options: ctx.config.project.configure.extra_cmake_configure_options.clone(),
    extra_conan_install_options: ctx.config.project.configure.extra_conan_install_options.clone(),
    extra_cmake_build_options: merge_options(
      extra_cmake_build_options,
      &ctx.config.project.build.extra_cmake_build_options,
    ),
    environment: ctx.config.environment.clone(),
  };

  let outcome = block_on(ccc_core::build::build(
    &ctx.project,
    &build_dir,
    build_config.profile,
    target.as_deref(),
    run_configure,
    &options,
  ))??;

  print_success(&format!(
    "Built {} ({}) in {}",
    ctx.project.name(),
    build_config.profile,
    format_duration(start.elapsed())
  ));
  print_stat("Build directory", &outcome.build_dir.display().to_string());
  print_stat("Configure step", if outcome.configured { "ran" } else { "cached" });
  Ok(())
}
