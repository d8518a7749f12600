use std::fmt;
use std::path::{Component, Path};

/// Directory of a referencing document, expressed as root-relative segments.
///
/// Segments never contain `.` or `..`, so a `SiteDir` always lies inside the site root.
/// When built from a document on disk it also remembers where the root itself sits, so a
/// reference may climb out of the root and back in through the root's own name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteDir {
    anchor: Vec<String>,
    segments: Vec<String>,
}

impl SiteDir {
    /// The site root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `/`-separated root-relative directory, returning `None` when it climbs
    /// above the root.
    pub fn parse(dir: &str) -> Option<Self> {
        normalize_segments(&[], dir).map(|segments| Self {
            anchor: Vec::new(),
            segments,
        })
    }

    /// Directory containing `document`, relative to `root`.
    ///
    /// Returns `None` when the document does not live under the root.
    pub fn of_document(root: &Path, document: &Path) -> Option<Self> {
        let parent = document.parent()?;
        let relative = parent.strip_prefix(root).ok()?;
        Some(Self {
            anchor: path_segments(root)?,
            segments: path_segments(relative)?,
        })
    }

    /// Resolve `path` against this directory into a canonical root-relative path.
    ///
    /// The path is resolved from the root's own location first and only then expressed
    /// relative to the root. `None` means the result lies outside the root or names the
    /// root itself.
    pub fn join(&self, path: &str) -> Option<String> {
        let mut base = self.anchor.clone();
        base.extend(self.segments.iter().cloned());
        let resolved = normalize_segments(&base, path)?;

        let inside = resolved.strip_prefix(self.anchor.as_slice())?;
        (!inside.is_empty()).then(|| inside.join("/"))
    }

    /// Shortest `..`-based path from this directory to the root-relative `target`.
    pub fn relative_to(&self, target: &str) -> Option<String> {
        let target = normalize_segments(&[], target)?;
        let common = self
            .segments
            .iter()
            .zip(&target)
            .take_while(|(left, right)| left == right)
            .count();

        let mut parts: Vec<&str> = Vec::with_capacity(self.segments.len() - common + target.len());
        parts.extend(std::iter::repeat_n("..", self.segments.len() - common));
        parts.extend(target[common..].iter().map(String::as_str));

        if parts.is_empty() {
            return Some(".".to_string());
        }
        Some(parts.join("/"))
    }
}

impl fmt::Display for SiteDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(".");
        }
        f.write_str(&self.segments.join("/"))
    }
}

/// Canonical root-relative form of `path`, or `None` when it climbs above the root or
/// collapses to the root itself.
pub fn normalize_root_relative(path: &str) -> Option<String> {
    SiteDir::root().join(path)
}

/// Lexically normalised components of a file-system path.
fn path_segments(path: &Path) -> Option<Vec<String>> {
    let mut segments = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                segments.push(prefix.as_os_str().to_string_lossy().into_owned());
            }
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                segments.pop()?;
            }
            Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
        }
    }
    Some(segments)
}

/// Collapse `.`, `..` and redundant separators of `path` on top of `base`.
///
/// Backslashes are treated as separators so Windows-authored references behave the same.
fn normalize_segments(base: &[String], path: &str) -> Option<Vec<String>> {
    let mut segments = base.to_vec();
    for part in path.replace('\\', "/").split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other.to_string()),
        }
    }
    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_relative_paths_onto_document_directory() {
        let dir = SiteDir::parse("pages/sub").unwrap();
        assert_eq!(dir.join("../../style.css").as_deref(), Some("style.css"));
        assert_eq!(dir.join("./img//logo.png").as_deref(), Some("pages/sub/img/logo.png"));
        assert_eq!(dir.join("../x/../y.js").as_deref(), Some("pages/y.js"));
    }

    #[test]
    fn escaping_the_root_is_unresolvable() {
        let dir = SiteDir::parse("pages").unwrap();
        assert_eq!(dir.join("../../style.css"), None);
        assert_eq!(SiteDir::parse("../outside"), None);
        assert_eq!(normalize_root_relative("../secret.css"), None);
    }

    #[test]
    fn root_itself_is_not_a_file() {
        assert_eq!(normalize_root_relative("./"), None);
        assert_eq!(SiteDir::parse("a").unwrap().join(".."), None);
    }

    #[test]
    fn relativizes_from_nested_directories() {
        let nested = SiteDir::parse("pages/sub").unwrap();
        assert_eq!(
            nested.relative_to("style.abcd1234.css").as_deref(),
            Some("../../style.abcd1234.css")
        );
        assert_eq!(
            SiteDir::root().relative_to("style.abcd1234.css").as_deref(),
            Some("style.abcd1234.css")
        );
        assert_eq!(
            SiteDir::parse("css").unwrap().relative_to("css/a.1234.css").as_deref(),
            Some("a.1234.css")
        );
        assert_eq!(
            SiteDir::parse("blog/posts").unwrap().relative_to("blog/img/a.png").as_deref(),
            Some("../img/a.png")
        );
    }

    #[test]
    fn derives_directory_from_document_path() {
        let root = Path::new("/srv/dist");
        let dir = SiteDir::of_document(root, Path::new("/srv/dist/pages/sub/index.html")).unwrap();
        assert_eq!(dir.to_string(), "pages/sub");
        assert_eq!(dir.join("img/a.png").as_deref(), Some("pages/sub/img/a.png"));

        let top = SiteDir::of_document(root, Path::new("/srv/dist/index.html")).unwrap();
        assert_eq!(top.to_string(), ".");
        assert_eq!(top.relative_to("style.css").as_deref(), Some("style.css"));

        assert_eq!(SiteDir::of_document(root, Path::new("/elsewhere/index.html")), None);
    }

    #[test]
    fn climbing_out_and_back_through_the_root_name_stays_inside() {
        let root = Path::new("/srv/dist");
        let dir = SiteDir::of_document(root, Path::new("/srv/dist/pages/index.html")).unwrap();
        assert_eq!(dir.join("../../dist/style.css").as_deref(), Some("style.css"));
        assert_eq!(dir.join("../../dist/css/../a.js").as_deref(), Some("a.js"));
        assert_eq!(dir.join("../../other/style.css"), None);
        assert_eq!(dir.join("../../distant/style.css"), None);
        assert_eq!(dir.join("../../../../../style.css"), None);
    }

    #[test]
    fn treats_backslashes_as_separators() {
        assert_eq!(
            normalize_root_relative("assets\\img\\logo.png").as_deref(),
            Some("assets/img/logo.png")
        );
    }
}
