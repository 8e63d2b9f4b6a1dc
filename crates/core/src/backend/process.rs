//! Thin subprocess-execution adapter shared by all backends.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::error::{CoreError, Result};

/// A fully resolved backend invocation: program, arguments, working
/// directory, and extra environment variables.
///
/// The invocation inherits the parent's environment and stdio; `env` is
/// merged on top so `.project.yml` can inject variables without hiding the
/// user's toolchain setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  program: String,
  args: Vec<String>,
  cwd: PathBuf,
  env: BTreeMap<String, String>,
}

impl Invocation {
  pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: cwd.into(),
      env: BTreeMap::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn envs(mut self, env: &BTreeMap<String, String>) -> Self {
    self.env.extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn arguments(&self) -> &[String] {
    &self.args
  }

  pub fn working_dir(&self) -> &Path {
    &self.cwd
  }

  /// The full command line, for logging.
  pub fn command_line(&self) -> String {
    let mut parts = vec![self.program.clone()];
    parts.extend(self.args.iter().cloned());
    parts.join(" ")
  }

  /// Run to completion with stdio inherited.
  ///
  /// Returns the exit code, or `None` when the process was terminated by a
  /// signal. A missing program is reported as `BackendMissing`.
  pub async fn status(&self) -> Result<Option<i32>> {
    debug!(cmd = %self.command_line(), cwd = %self.cwd.display(), "spawning backend process");

    let status = Command::new(&self.program)
      .args(&self.args)
      .current_dir(&self.cwd)
      .envs(&self.env)
      .status()
      .await
      .map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::BackendMissing {
          program: self.program.clone(),
        },
        _ => CoreError::Io(e),
      })?;

    Ok(status.code())
  }
}

/// Join command parts into a single `sh -c` compatible string, quoting
/// anything that needs it.
pub(crate) fn shell_join(parts: &[String]) -> String {
  parts.iter().map(|p| shell_quote(p)).collect::<Vec<_>>().join(" ")
}

fn shell_quote(part: &str) -> String {
  let safe = !part.is_empty()
    && part
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '=' | ':' | '+' | ','));
  if safe {
    part.to_string()
  } else {
    format!("'{}'", part.replace('\'', r"'\''"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn builds_command_line() {
    let inv = Invocation::new("cmake", "/tmp")
      .arg("--build")
      .arg(".")
      .args(["--target", "install"]);

    assert_eq!(inv.program(), "cmake");
    assert_eq!(inv.arguments(), ["--build", ".", "--target", "install"]);
    assert_eq!(inv.command_line(), "cmake --build . --target install");
  }

  #[test]
  fn shell_join_quotes_when_needed() {
    let parts: Vec<String> = vec!["cmake".into(), "-DCMAKE_BUILD_TYPE=Debug".into(), "a b".into()];
    assert_eq!(shell_join(&parts), "cmake -DCMAKE_BUILD_TYPE=Debug 'a b'");
  }

  #[test]
  fn shell_join_escapes_single_quotes() {
    let parts: Vec<String> = vec!["echo".into(), "it's".into()];
    assert_eq!(shell_join(&parts), r"echo 'it'\''s'");
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn status_reports_exit_code() {
    let temp = TempDir::new().unwrap();

    let ok = Invocation::new("sh", temp.path()).args(["-c", "exit 0"]);
    assert_eq!(ok.status().await.unwrap(), Some(0));

    let fail = Invocation::new("sh", temp.path()).args(["-c", "exit 3"]);
    assert_eq!(fail.status().await.unwrap(), Some(3));
  }

  #[tokio::test]
  async fn status_reports_missing_program() {
    let temp = TempDir::new().unwrap();

    let err = Invocation::new("definitely-not-a-real-backend", temp.path())
      .status()
      .await
      .unwrap_err();
    assert!(matches!(err, CoreError::BackendMissing { .. }));
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn status_merges_extra_environment() {
    let temp = TempDir::new().unwrap();
    let mut env = BTreeMap::new();
    env.insert("CCC_MARKER".to_string(), "1".to_string());

    let inv = Invocation::new("sh", temp.path())
      .args(["-c", "test \"$CCC_MARKER\" = 1"])
      .envs(&env);
    assert_eq!(inv.status().await.unwrap(), Some(0));
  }
}
