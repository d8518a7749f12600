//! Site-tree driver applying the reference rewriter to every selected document.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::asset_paths::SiteDir;
use crate::error::RelinkError;
use crate::mapping::FingerprintMap;
use crate::models::{DocumentOutcome, RelinkSummary};
use crate::resolver::Resolver;
use crate::rewrite::Rewriter;
use crate::selection::TargetInclusion;

/// Knobs controlling how a run persists its results.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelinkOptions {
  /// Compute and count changes without writing documents back.
  pub dry_run: bool,
}

/// High-level helper rewriting a built site tree against a fingerprint mapping.
#[derive(Debug)]
pub struct SiteRelinker {
  root: PathBuf,
  mapping: FingerprintMap,
}

impl SiteRelinker {
  /// Create a relinker for `root`, failing when the directory does not exist.
  ///
  /// The root is made absolute so references may climb out of it and back in by name.
  pub fn new(root: impl Into<PathBuf>, mapping: FingerprintMap) -> Result<Self, RelinkError> {
    let root = root.into();
    if !root.is_dir() {
      return Err(RelinkError::RootNotFound { path: root });
    }
    let root = std::path::absolute(&root).map_err(|_| RelinkError::RootNotFound { path: root })?;
    Ok(Self { root, mapping })
  }

  /// Site root this relinker operates on.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Mapping shared by every document of the run.
  pub fn mapping(&self) -> &FingerprintMap {
    &self.mapping
  }

  /// Enumerate target documents below the root in file-name order.
  pub fn targets<S: TargetInclusion>(&self, selection: &S) -> Vec<PathBuf> {
    let mut targets = Vec::new();
    for entry in WalkDir::new(&self.root).sort_by_file_name() {
      let entry = match entry {
        Ok(entry) => entry,
        Err(err) => {
          tracing::warn!("skipping unreadable directory entry: {err}");
          continue;
        }
      };
      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.path();
      let relative = path.strip_prefix(&self.root).unwrap_or(path);
      let relative = relative.to_string_lossy().replace('\\', "/");
      if selection.is_included(&relative) {
        targets.push(entry.into_path());
      }
    }
    targets
  }

  /// Rewrite a single document's text as located at `path`.
  ///
  /// Documents outside the root are returned unchanged.
  pub fn process_document(&self, path: &Path, text: &str) -> DocumentOutcome {
    let located = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let Some(doc_dir) = SiteDir::of_document(&self.root, &located) else {
      tracing::debug!(path = %path.display(), "document outside site root; left as is");
      return DocumentOutcome {
        path: path.to_path_buf(),
        text: text.to_string(),
        changed: false,
      };
    };

    let rewriter = Rewriter::new(Resolver::new(&self.mapping));
    let outcome = rewriter.rewrite(text, &doc_dir);
    DocumentOutcome {
      path: path.to_path_buf(),
      text: outcome.text,
      changed: outcome.changed,
    }
  }

  /// Rewrite every selected document, writing back only the ones that changed.
  ///
  /// Unreadable or unwritable documents are logged and counted as skipped; they never abort
  /// the run.
  pub fn run<S: TargetInclusion>(&self, selection: &S, options: RelinkOptions) -> RelinkSummary {
    self.relink_paths(self.targets(selection), options)
  }

  /// Rewrite an already enumerated sequence of documents.
  ///
  /// Every path counts as processed, including ones that turn out to be unreadable.
  pub fn relink_paths(
    &self,
    targets: impl IntoIterator<Item = PathBuf>,
    options: RelinkOptions,
  ) -> RelinkSummary {
    let mut summary = RelinkSummary::default();

    for path in targets {
      summary.processed += 1;
      let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
          tracing::warn!(path = %path.display(), "skip unreadable document: {err}");
          summary.skipped += 1;
          continue;
        }
      };

      let text = String::from_utf8_lossy(&bytes);
      let outcome = self.process_document(&path, &text);
      if !outcome.changed {
        continue;
      }

      if !options.dry_run
        && let Err(err) = fs::write(&path, outcome.text.as_bytes())
      {
        tracing::warn!(path = %path.display(), "failed to write rewritten document: {err}");
        summary.skipped += 1;
        continue;
      }

      tracing::debug!(path = %path.display(), dry_run = options.dry_run, "document changed");
      summary.changed += 1;
    }

    tracing::info!(
      processed = summary.processed,
      changed = summary.changed,
      skipped = summary.skipped,
      "relink finished"
    );
    summary
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::RelinkConfig;
  use tempfile::tempdir;

  fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
  }

  fn mapping() -> FingerprintMap {
    FingerprintMap::parse("style.css style.abcd1234.css\nassets/app.js assets/app.5e6f.js\n")
  }

  #[test]
  fn rejects_missing_root() {
    let dir = tempdir().unwrap();
    let err = SiteRelinker::new(dir.path().join("dist"), mapping()).unwrap_err();
    assert!(matches!(err, RelinkError::RootNotFound { .. }));
  }

  #[test]
  fn enumerates_selected_documents_only() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "index.html", "");
    write(root, "css/site.css", "");
    write(root, "img/logo.png", "");
    write(root, ".fingerprint_map.txt", "");

    let relinker = SiteRelinker::new(root, mapping()).unwrap();
    let targets = relinker.targets(&RelinkConfig::default().selection());
    assert_eq!(targets, vec![root.join("css/site.css"), root.join("index.html")]);
  }

  #[test]
  fn rewrites_documents_relative_to_their_depth() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let top = write(root, "index.html", r#"<link href="style.css">"#);
    let nested = write(
      root,
      "pages/sub/index.html",
      r#"<link href="../../style.css"><script src="/assets/app.js"></script>"#,
    );
    let untouched = write(root, "about.html", r#"<a href="https://example.com/">x</a>"#);

    let relinker = SiteRelinker::new(root, mapping()).unwrap();
    let summary = relinker.run(&RelinkConfig::default().selection(), RelinkOptions::default());
    assert_eq!(summary, RelinkSummary { processed: 3, changed: 2, skipped: 0 });

    assert_eq!(fs::read_to_string(top).unwrap(), r#"<link href="style.abcd1234.css">"#);
    assert_eq!(
      fs::read_to_string(nested).unwrap(),
      r#"<link href="../../style.abcd1234.css"><script src="../../assets/app.5e6f.js"></script>"#
    );
    assert_eq!(
      fs::read_to_string(untouched).unwrap(),
      r#"<a href="https://example.com/">x</a>"#
    );
  }

  #[test]
  fn dry_run_counts_without_writing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let page = write(root, "index.html", r#"<link href="style.css">"#);

    let relinker = SiteRelinker::new(root, mapping()).unwrap();
    let summary = relinker.run(
      &RelinkConfig::default().selection(),
      RelinkOptions { dry_run: true },
    );
    assert_eq!(summary.changed, 1);
    assert_eq!(fs::read_to_string(page).unwrap(), r#"<link href="style.css">"#);
  }

  #[test]
  fn tolerates_invalid_utf8() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let path = root.join("app.js");
    let mut bytes = b"/* \xff */ const s = \"".to_vec();
    bytes.extend_from_slice(b"\"; // src=\"style.css\"");
    fs::write(&path, &bytes).unwrap();

    let relinker = SiteRelinker::new(root, mapping()).unwrap();
    let summary = relinker.run(&RelinkConfig::default().selection(), RelinkOptions::default());
    assert_eq!(summary.changed, 1);

    let updated = fs::read_to_string(&path).unwrap();
    assert!(updated.contains("src=\"style.abcd1234.css\""));
    assert!(updated.contains('\u{FFFD}'));
  }

  #[test]
  fn unreadable_documents_are_skipped_not_changed() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let page = write(root, "index.html", r#"<link href="style.css">"#);
    let missing = root.join("gone.html");

    let relinker = SiteRelinker::new(root, mapping()).unwrap();
    let summary = relinker.relink_paths([missing, page.clone()], RelinkOptions::default());
    assert_eq!(summary, RelinkSummary { processed: 2, changed: 1, skipped: 1 });

    let only_missing = relinker.relink_paths([root.join("gone.html")], RelinkOptions::default());
    assert_eq!(only_missing, RelinkSummary { processed: 1, changed: 0, skipped: 1 });
    assert_eq!(fs::read_to_string(page).unwrap(), r#"<link href="style.abcd1234.css">"#);
  }

  #[test]
  fn resolves_references_that_leave_and_reenter_the_root() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("dist");
    let page = write(&root, "pages/index.html", r#"<link href="../../dist/style.css">"#);
    write(dir.path(), "other/style.css", "");

    let relinker = SiteRelinker::new(&root, mapping()).unwrap();
    let summary = relinker.run(&RelinkConfig::default().selection(), RelinkOptions::default());
    assert_eq!(summary, RelinkSummary { processed: 1, changed: 1, skipped: 0 });
    assert_eq!(
      fs::read_to_string(page).unwrap(),
      r#"<link href="../style.abcd1234.css">"#
    );

    let outcome = relinker.process_document(
      &root.join("pages/index.html"),
      r#"<link href="../../other/style.css">"#,
    );
    assert!(!outcome.changed);
  }

  #[test]
  fn process_document_leaves_outside_paths_alone() {
    let dir = tempdir().unwrap();
    let relinker = SiteRelinker::new(dir.path(), mapping()).unwrap();
    let outcome = relinker.process_document(Path::new("/elsewhere/index.html"), "<a href=\"style.css\">");
    assert!(!outcome.changed);
  }
}
