//! Data structures produced while relinking a site tree.

use std::ops::Range;
use std::path::PathBuf;

use serde::Serialize;

/// Syntactic context a reference was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSyntax {
  /// `href="..."` or `src='...'` attribute values.
  Attribute,
  /// CSS `url(...)` functional notation.
  UrlFunction,
}

/// A candidate reference extracted from a document during a single scan pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
  /// URL text up to the first quote, `#`, `?` or terminator.
  pub url: &'a str,
  /// Byte span of `url` within the scanned text.
  pub span: Range<usize>,
  /// Syntax the reference was written in.
  pub syntax: ReferenceSyntax,
}

/// How a reference was matched against the fingerprint mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
  /// The canonical path is an original path in the mapping.
  Direct,
  /// A bare filename matched the single mapping entry sharing its basename.
  UniqueBasename,
}

/// Mapping hit for a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
  /// Root-relative original path that matched.
  pub original: String,
  /// Root-relative hashed destination.
  pub hashed: String,
  /// Rule that produced the match.
  pub kind: MatchKind,
}

/// Result of rewriting one document's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
  /// Document text after both passes.
  pub text: String,
  /// Whether `text` differs from the input.
  pub changed: bool,
}

/// Rewritten document returned by the tree driver for the caller to persist.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
  /// Path of the document on disk.
  pub path: PathBuf,
  /// New document text.
  pub text: String,
  /// Whether the text differs from what was read.
  pub changed: bool,
}

/// Counters reported at the end of a relink run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelinkSummary {
  /// Target documents enumerated, including ones that could not be read.
  pub processed: usize,
  /// Documents whose text changed.
  pub changed: usize,
  /// Documents skipped because they could not be read or written.
  pub skipped: usize,
}
