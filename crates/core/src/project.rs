//! Project root and build descriptor discovery.
//!
//! A project root is the nearest ancestor directory containing a recognized
//! build descriptor. Descriptor matching is case-insensitive so a stray
//! case-variant (possible on case-sensitive filesystems) is reported as a
//! conflict instead of being silently ignored.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CoreError, Result};

/// The canonical build descriptor file name.
pub const DESCRIPTOR_FILE: &str = "CMakeLists.txt";

/// A located project: its root directory and build descriptor.
#[derive(Debug, Clone)]
pub struct Project {
  root: PathBuf,
  descriptor: PathBuf,
}

impl Project {
  /// Walk upward from `start` until a directory with exactly one recognized
  /// build descriptor is found.
  ///
  /// # Errors
  ///
  /// `DescriptorNotFound` when no ancestor contains a descriptor, or
  /// `AmbiguousDescriptor` when the first directory with matches contains
  /// more than one.
  pub fn locate(start: &Path) -> Result<Self> {
    for dir in start.ancestors() {
      match find_descriptors(dir)? {
        matches if matches.is_empty() => continue,
        matches => return Self::from_matches(dir, matches),
      }
    }
    Err(CoreError::DescriptorNotFound {
      start: start.to_path_buf(),
    })
  }

  /// Use `root` directly, requiring exactly one descriptor in it.
  pub fn at_root(root: &Path) -> Result<Self> {
    let matches = find_descriptors(root)?;
    if matches.is_empty() {
      return Err(CoreError::DescriptorNotFound {
        start: root.to_path_buf(),
      });
    }
    Self::from_matches(root, matches)
  }

  fn from_matches(root: &Path, matches: Vec<String>) -> Result<Self> {
    if matches.len() > 1 {
      return Err(CoreError::AmbiguousDescriptor {
        root: root.to_path_buf(),
        found: matches,
      });
    }
    let descriptor = root.join(&matches[0]);
    debug!(descriptor = %descriptor.display(), "located project");
    Ok(Self {
      root: root.to_path_buf(),
      descriptor,
    })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn descriptor(&self) -> &Path {
    &self.descriptor
  }

  /// The project name declared by the descriptor's `project(...)` command,
  /// falling back to the root directory name.
  pub fn name(&self) -> String {
    if let Some(name) = self.declared_name() {
      return name;
    }
    debug!(descriptor = %self.descriptor.display(), "no project() command found, using directory name");
    self
      .root
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "project".to_string())
  }

  fn declared_name(&self) -> Option<String> {
    let text = std::fs::read_to_string(&self.descriptor).ok()?;
    text.lines().find_map(parse_project_command)
  }
}

/// File names in `dir` that match a recognized descriptor, sorted.
fn find_descriptors(dir: &Path) -> Result<Vec<String>> {
  let mut matches = Vec::new();
  let entries = match std::fs::read_dir(dir) {
    Ok(entries) => entries,
    // A non-directory ancestor (or one we cannot read) simply has no descriptor
    Err(_) => return Ok(matches),
  };
  for entry in entries {
    let entry = entry?;
    let name = entry.file_name().to_string_lossy().into_owned();
    if name.eq_ignore_ascii_case(DESCRIPTOR_FILE) && entry.file_type()?.is_file() {
      matches.push(name);
    }
  }
  matches.sort();
  Ok(matches)
}

/// Extract the first argument of a `project(...)` command, if `line` is one.
/// CMake command names are case-insensitive.
fn parse_project_command(line: &str) -> Option<String> {
  let trimmed = line.trim();
  let lower = trimmed.to_lowercase();
  if !lower.starts_with("project") {
    return None;
  }
  let rest = trimmed["project".len()..].trim_start();
  let args = rest.strip_prefix('(')?;
  let args = args.split(')').next().unwrap_or(args);
  let name = args.split_whitespace().next()?;
  if name.is_empty() { None } else { Some(name.to_string()) }
}
