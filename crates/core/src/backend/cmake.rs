//! CMake configure and compile command construction.

use std::collections::BTreeMap;
use std::path::Path;

use super::process::{Invocation, shell_join};
use crate::layout::Profile;

/// Script written by Conan's virtualenv generator; when present the
/// configure step must run inside the activated environment.
const ACTIVATE_SCRIPT: &str = "activate.sh";

/// Options for the configure step.
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions<'a> {
  pub install_prefix: Option<&'a Path>,
  pub extra_options: &'a [String],
}

/// Build the `cmake <root> -DCMAKE_BUILD_TYPE=...` configure invocation,
/// run from inside `build_dir`.
pub fn configure(
  project_root: &Path,
  build_dir: &Path,
  profile: Profile,
  options: &ConfigureOptions<'_>,
  env: &BTreeMap<String, String>,
) -> Invocation {
  let mut args: Vec<String> = vec![
    project_root.display().to_string(),
    format!("-DCMAKE_BUILD_TYPE={}", profile.cmake_build_type()),
  ];
  if let Some(prefix) = options.install_prefix {
    args.push(format!("-DCMAKE_INSTALL_PREFIX={}", prefix.display()));
  }
  args.extend(options.extra_options.iter().cloned());

  if build_dir.join(ACTIVATE_SCRIPT).exists() {
    // Source the Conan environment before configuring
    let mut parts = vec!["cmake".to_string()];
    parts.extend(args);
    let script = format!(". ./{} && {}", ACTIVATE_SCRIPT, shell_join(&parts));
    return Invocation::new("sh", build_dir).arg("-c").arg(script).envs(env);
  }

  Invocation::new("cmake", build_dir).args(args).envs(env)
}

/// Build the `cmake --build .` compile invocation, run from inside
/// `build_dir`.
pub fn compile(build_dir: &Path, target: Option<&str>, extra_options: &[String], env: &BTreeMap<String, String>) -> Invocation {
  let mut inv = Invocation::new("cmake", build_dir).args(["--build", "."]);
  if let Some(target) = target {
    inv = inv.args(["--target", target]);
  }
  inv.args(extra_options.iter().cloned()).envs(env)
}
