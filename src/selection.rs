//! Helpers used to decide which documents of the site tree are rewritten.

use std::collections::BTreeSet;

/// Trait describing which root-relative document paths take part in a relink run.
pub trait TargetInclusion {
  /// Returns `true` when the document should be rewritten.
  fn is_included(&self, relative_path: &str) -> bool;
}

/// Extension and directory based selection of target documents.
#[derive(Debug, Clone, Default)]
pub struct TargetSelection {
  extensions: BTreeSet<String>,
  include: Option<BTreeSet<String>>,
  exclude: BTreeSet<String>,
}

impl TargetSelection {
  /// Build a selection from raw extension, include and exclude lists.
  pub fn new(
    extensions: impl IntoIterator<Item = String>,
    include: impl IntoIterator<Item = String>,
    exclude: impl IntoIterator<Item = String>,
  ) -> Self {
    let extensions = extensions
      .into_iter()
      .map(|value| value.trim().trim_start_matches('.').to_string())
      .filter(|value| !value.is_empty())
      .collect();
    let include = normalise_list(include);

    Self {
      extensions,
      include: (!include.is_empty()).then_some(include),
      exclude: normalise_list(exclude),
    }
  }

  /// Determine whether a root-relative path should be rewritten.
  pub fn is_included(&self, relative_path: &str) -> bool {
    if !self.has_target_extension(relative_path) {
      return false;
    }

    if self
      .exclude
      .iter()
      .any(|value| scope_matches(value, relative_path))
    {
      return false;
    }

    match &self.include {
      Some(include) => include
        .iter()
        .any(|value| scope_matches(value, relative_path)),
      None => true,
    }
  }

  fn has_target_extension(&self, relative_path: &str) -> bool {
    self
      .extensions
      .iter()
      .any(|ext| relative_path.len() > ext.len() + 1 && relative_path.ends_with(&format!(".{ext}")))
  }
}

impl TargetInclusion for TargetSelection {
  fn is_included(&self, relative_path: &str) -> bool {
    TargetSelection::is_included(self, relative_path)
  }
}

/// Convert a list of raw paths into a sorted, de-duplicated set.
///
/// Values are trimmed and empty entries are discarded to simplify downstream filtering logic.
fn normalise_list(values: impl IntoIterator<Item = String>) -> BTreeSet<String> {
  values
    .into_iter()
    .map(|value| value.trim().replace('\\', "/").trim_matches('/').to_string())
    .filter(|value| !value.is_empty())
    .collect()
}

fn scope_matches(rule: &str, candidate: &str) -> bool {
  if candidate == rule {
    return true;
  }

  candidate
    .strip_prefix(rule)
    .is_some_and(|suffix| suffix.starts_with('/'))
}
