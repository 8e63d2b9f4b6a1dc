//! Templates for the `ccc new` command.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CoreError, Result};
use crate::project::DESCRIPTOR_FILE;

/// Template for the build descriptor of a fresh project.
/// Contains a `{name}` placeholder for substitution.
const CMAKELISTS_TEMPLATE: &str = r#"cmake_minimum_required(VERSION 3.14)
project({name})

set(CMAKE_CXX_STANDARD 17)
set(CMAKE_CXX_STANDARD_REQUIRED ON)

add_executable({name} main.cpp)
"#;

/// Template for the entry point of a fresh project.
const MAIN_CPP_TEMPLATE: &str = r#"#include <iostream>

int main() {
  std::cout << "Hello from {name}!\n";
  return 0;
}
"#;

/// Files written for a new project.
#[derive(Debug)]
pub struct NewProject {
  pub root: PathBuf,
  pub descriptor: PathBuf,
  pub main_source: PathBuf,
}

/// Create a minimal C++ project at `dir`: a build descriptor declaring one
/// executable target named `name`, and its entry point.
///
/// # Errors
///
/// `ProjectExists` when `dir` already contains a build descriptor.
pub fn create_project(dir: &Path, name: &str) -> Result<NewProject> {
  let descriptor = dir.join(DESCRIPTOR_FILE);
  if descriptor.exists() {
    return Err(CoreError::ProjectExists(descriptor));
  }
  std::fs::create_dir_all(dir)?;

  let main_source = dir.join("main.cpp");
  std::fs::write(&descriptor, CMAKELISTS_TEMPLATE.replace("{name}", name))?;
  std::fs::write(&main_source, MAIN_CPP_TEMPLATE.replace("{name}", name))?;
  debug!(root = %dir.display(), name, "created project skeleton");

  Ok(NewProject {
    root: dir.to_path_buf(),
    descriptor,
    main_source,
  })
}
