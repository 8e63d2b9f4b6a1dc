//! Implementation of the `ccc new` command.

use std::path::Path;

use anyhow::Result;

use ccc_core::scaffold::create_project;

use crate::output::{print_info, print_success};

/// Execute the new command.
///
/// Creates a project skeleton at the given path; the last path component
/// doubles as the project and executable target name.
pub fn cmd_new(name: &str) -> Result<()> {
  let dir = Path::new(name);
  let project_name = dir
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| name.to_string());

  let created = create_project(dir, &project_name)?;

  print_success(&format!("Created project {}", project_name));
  print_info(&format!("Descriptor: {}", created.descriptor.display()));
  print_info(&format!("Entry point: {}", created.main_source.display()));
  println!();
  println!("Next steps:");
  println!("  cd {} && ccc build", created.root.display());
  Ok(())
}
