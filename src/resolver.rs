//! Resolution of reference text to fingerprinted destinations.
//!
//! A reference is first classified as external, root-absolute or relative. Non-external
//! references are normalised to a canonical root-relative path and looked up in the
//! mapping; bare filenames fall back to the unique mapping entry with that basename.

use crate::asset_paths::{SiteDir, is_external_reference, normalize_root_relative};
use crate::mapping::{FingerprintMap, basename};
use crate::models::{MatchKind, ResolvedTarget};

/// Classification of a reference before any lookup happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind<'a> {
    /// Network URL, protocol-relative URL or data URI, never rewritten.
    External,
    /// Path anchored at the site root, with the leading `/` stripped.
    RootAbsolute(&'a str),
    /// Path relative to the referencing document's directory.
    Relative(&'a str),
}

impl<'a> ReferenceKind<'a> {
    /// Classify raw reference text.
    pub fn classify(url: &'a str) -> Self {
        if is_external_reference(url) {
            Self::External
        } else if let Some(rest) = url.strip_prefix('/') {
            Self::RootAbsolute(rest)
        } else {
            Self::Relative(url)
        }
    }
}

/// Resolves references against a fingerprint mapping.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    mapping: &'a FingerprintMap,
}

impl<'a> Resolver<'a> {
    /// Create a resolver borrowing the run's mapping.
    pub fn new(mapping: &'a FingerprintMap) -> Self {
        Self { mapping }
    }

    /// Canonical root-relative path denoted by `url` when referenced from `doc_dir`.
    ///
    /// Returns `None` for external references and for paths escaping the root.
    pub fn canonical_path(&self, doc_dir: &SiteDir, url: &str) -> Option<String> {
        match ReferenceKind::classify(url) {
            ReferenceKind::External => None,
            ReferenceKind::RootAbsolute(path) => normalize_root_relative(path),
            ReferenceKind::Relative(path) => doc_dir.join(path),
        }
    }

    /// Find the mapping entry `url` refers to, if any.
    pub fn resolve_reference(&self, doc_dir: &SiteDir, url: &str) -> Option<ResolvedTarget> {
        if matches!(ReferenceKind::classify(url), ReferenceKind::External) {
            return None;
        }

        if let Some(canonical) = self.canonical_path(doc_dir, url)
            && let Some(hashed) = self.mapping.get(&canonical)
        {
            return Some(ResolvedTarget {
                hashed: hashed.to_string(),
                original: canonical,
                kind: MatchKind::Direct,
            });
        }

        let path = url.replace('\\', "/");
        if path.contains('/') {
            return None;
        }
        let original = self.mapping.unique_owner(basename(&path))?;
        let hashed = self.mapping.get(original)?;
        Some(ResolvedTarget {
            original: original.to_string(),
            hashed: hashed.to_string(),
            kind: MatchKind::UniqueBasename,
        })
    }

    /// Express a root-relative `target` relative to `doc_dir`.
    pub fn relativize(&self, doc_dir: &SiteDir, target: &str) -> Option<String> {
        doc_dir.relative_to(target)
    }

    /// Replacement text for `url` as seen from `doc_dir`, or `None` to leave it untouched.
    pub fn replacement(&self, doc_dir: &SiteDir, url: &str) -> Option<String> {
        let target = self.resolve_reference(doc_dir, url)?;
        self.relativize(doc_dir, &target.hashed)
    }
}
