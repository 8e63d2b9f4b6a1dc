//! Subcommand implementations.

mod build;
mod clean;
mod configure;
mod info;
mod install;
mod new;
mod sources;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use configure::cmd_configure;
pub use info::cmd_info;
pub use install::cmd_install;
pub use new::cmd_new;
pub use sources::cmd_list_sources;
pub use test::cmd_test;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::debug;

use ccc_core::{BuildConfig, Project, ProjectConfig, resolve_build_dir};

/// Options shared by every subcommand.
pub struct Globals {
  pub config: String,
  pub local_config_only: bool,
  pub build_dir: Option<PathBuf>,
}

/// Project and configuration, loaded once per invocation from the current
/// directory.
pub(crate) struct ProjectContext {
  pub project: Project,
  pub config: ProjectConfig,
}

impl ProjectContext {
  pub fn load(globals: &Globals) -> Result<Self> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let project = Project::locate(&cwd)?;
    let config = ProjectConfig::load(&cwd, &globals.config, globals.local_config_only)?;
    debug!(root = %project.root().display(), "loaded project context");
    Ok(Self { project, config })
  }

  /// The output directory for `build_config`.
  ///
  /// Precedence: `--build-dir`, then the configuration file's
  /// `project.build-dir`, then the computed `build-<profile>-<platform>`.
  pub fn build_dir(&self, globals: &Globals, build_config: &BuildConfig) -> PathBuf {
    let override_dir = globals.build_dir.as_deref().or(self.config.project.build_dir.as_deref());
    resolve_build_dir(self.project.root(), build_config, override_dir)
  }
}

/// CLI flags win over the configuration file when both supply options.
pub(crate) fn merge_options(flags: Vec<String>, config: &[String]) -> Vec<String> {
  if flags.is_empty() { config.to_vec() } else { flags }
}

/// Block on an async core operation from the synchronous CLI.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  Ok(rt.block_on(future))
}
