//! Implementation of the `ccc list-sources` command.

use anyhow::Result;

use ccc_core::sources::{SourcePatterns, list_sources};

use crate::cmd::{Globals, ProjectContext};

/// Execute the list-sources command.
///
/// Prints one source file per line, absolute paths, sorted. The output is
/// meant to be piped into watch tools like `entr`.
pub fn cmd_list_sources(
  globals: &Globals,
  patterns: Vec<String>,
  ignore_patterns: Vec<String>,
  include_patterns: Vec<String>,
) -> Result<()> {
  let ctx = ProjectContext::load(globals)?;

  let mut source_patterns = SourcePatterns::default();
  if !patterns.is_empty() {
    source_patterns.patterns = patterns;
  }
  if !ignore_patterns.is_empty() {
    source_patterns.ignore = ignore_patterns;
  }
  if !include_patterns.is_empty() {
    source_patterns.include = include_patterns;
  }

  for file in list_sources(ctx.project.root(), &source_patterns)? {
    println!("{}", file.display());
  }
  Ok(())
}
