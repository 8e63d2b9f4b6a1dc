//! Implementation of the `ccc info` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use ccc_core::{BuildConfig, Profile};
use ccc_platform::Platform;

use crate::cmd::{Globals, ProjectContext};
use crate::output::{OutputFormat, print_json, print_stat};

#[derive(Debug, Serialize)]
struct InfoReport {
  name: String,
  root: PathBuf,
  descriptor: PathBuf,
  platform: String,
  os: &'static str,
  arch: &'static str,
  build_dir_debug: PathBuf,
  build_dir_release: PathBuf,
}

/// Execute the info command.
pub fn cmd_info(globals: &Globals, output: OutputFormat) -> Result<()> {
  let ctx = ProjectContext::load(globals)?;
  let platform = Platform::current();

  let report = InfoReport {
    name: ctx.project.name(),
    root: ctx.project.root().to_path_buf(),
    descriptor: ctx.project.descriptor().to_path_buf(),
    platform: platform.to_string(),
    os: platform.os.as_str(),
    arch: platform.arch.as_str(),
    build_dir_debug: ctx.build_dir(globals, &BuildConfig::new(Profile::Debug)),
    build_dir_release: ctx.build_dir(globals, &BuildConfig::new(Profile::Release)),
  };

  if output.is_json() {
    return print_json(&report);
  }

  print_stat("Project", &report.name);
  print_stat("Root", &report.root.display().to_string());
  print_stat("Descriptor", &report.descriptor.display().to_string());
  print_stat("Platform", &report.platform);
  print_stat("Build dir (debug)", &report.build_dir_debug.display().to_string());
  print_stat("Build dir (release)", &report.build_dir_release.display().to_string());
  Ok(())
}
