//! Source-file listing, suitable for feeding to watch tools like `entr`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Patterns controlling which files count as sources.
///
/// `patterns` select files by name; `ignore` drops selected files by their
/// root-relative path; `include` rescues files the ignore patterns dropped.
/// Patterns support `*` (any run of characters, including `/`) and `?`.
#[derive(Debug, Clone)]
pub struct SourcePatterns {
  pub patterns: Vec<String>,
  pub ignore: Vec<String>,
  pub include: Vec<String>,
}

impl Default for SourcePatterns {
  fn default() -> Self {
    Self {
      patterns: ["*.cpp", "*.cc", "*.c", "*.h", "*.hpp"].map(String::from).to_vec(),
      ignore: ["build-*", ".git/*"].map(String::from).to_vec(),
      include: Vec::new(),
    }
  }
}

/// List source files under `root`, sorted by path.
pub fn list_sources(root: &Path, patterns: &SourcePatterns) -> Result<Vec<PathBuf>> {
  let mut sources = Vec::new();
  for entry in WalkDir::new(root) {
    let entry = entry.map_err(std::io::Error::from)?;
    if !entry.file_type().is_file() {
      continue;
    }

    let name = entry.file_name().to_string_lossy();
    if !patterns.patterns.iter().any(|p| glob_match(p, &name)) {
      continue;
    }

    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    let relative = relative.to_string_lossy().replace('\\', "/");
    let ignored = patterns.ignore.iter().any(|p| glob_match(p, &relative));
    let rescued = patterns.include.iter().any(|p| glob_match(p, &relative));
    if ignored && !rescued {
      continue;
    }

    sources.push(entry.path().to_path_buf());
  }
  sources.sort();
  Ok(sources)
}

/// Shell-style wildcard match: `*` matches any run of characters
/// (including path separators), `?` matches one character.
pub fn glob_match(pattern: &str, text: &str) -> bool {
  let pattern: Vec<char> = pattern.chars().collect();
  let text: Vec<char> = text.chars().collect();

  // Iterative matcher with single-star backtracking
  let (mut p, mut t) = (0, 0);
  let (mut star, mut star_t) = (None, 0);
  while t < text.len() {
    if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
      p += 1;
      t += 1;
    } else if p < pattern.len() && pattern[p] == '*' {
      star = Some(p);
      star_t = t;
      p += 1;
    } else if let Some(s) = star {
      p = s + 1;
      star_t += 1;
      t = star_t;
    } else {
      return false;
    }
  }
  while p < pattern.len() && pattern[p] == '*' {
    p += 1;
  }
  p == pattern.len()
}
