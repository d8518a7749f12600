//! Regex-driven rewriting of `href`/`src` attributes and CSS `url()` references.
//!
//! Each syntax is a separate pass over the text; the functional-notation pass runs on the
//! output of the attribute pass. Only the URL portion of a match is replaced, so quotes,
//! query strings and fragments survive verbatim.

use std::sync::OnceLock;

use regex::Regex;

use crate::asset_paths::SiteDir;
use crate::models::{Reference, ReferenceSyntax, RewriteOutcome};
use crate::resolver::Resolver;

const PASSES: [ReferenceSyntax; 2] = [ReferenceSyntax::Attribute, ReferenceSyntax::UrlFunction];

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?i)(?P<prefix>\b(?:href|src)\s*=\s*["'])(?P<url>[^"'#?\s>]+)(?P<suffix>[^"']*["'])"#,
        )
        .expect("invalid attribute regex")
    })
}

fn url_function_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?i)(?P<prefix>\burl\(\s*["']?)(?P<url>[^"')#?\s]+)(?P<suffix>[^"')]*["']?\s*\))"#,
        )
        .expect("invalid url() regex")
    })
}

fn pattern_for(syntax: ReferenceSyntax) -> &'static Regex {
    match syntax {
        ReferenceSyntax::Attribute => attribute_pattern(),
        ReferenceSyntax::UrlFunction => url_function_pattern(),
    }
}

/// Collect every candidate reference of one syntax in `text`, left to right.
///
/// Spans cover only the URL, so splicing a replacement into them keeps the surrounding
/// quotes, query string and fragment intact.
pub fn find_references(text: &str, syntax: ReferenceSyntax) -> Vec<Reference<'_>> {
    pattern_for(syntax)
        .captures_iter(text)
        .filter_map(|caps| caps.name("url"))
        .map(|url| Reference {
            url: url.as_str(),
            span: url.range(),
            syntax,
        })
        .collect()
}

/// Rewrites references in document text using a shared resolver.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    resolver: Resolver<'a>,
}

impl<'a> Rewriter<'a> {
    /// Create a rewriter backed by `resolver`.
    pub fn new(resolver: Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Rewrite both reference syntaxes in `text` as seen from `doc_dir`.
    pub fn rewrite(&self, text: &str, doc_dir: &SiteDir) -> RewriteOutcome {
        let mut current = text.to_string();
        for syntax in PASSES {
            current = self.rewrite_pass(&current, doc_dir, syntax);
        }

        let changed = current != text;
        RewriteOutcome {
            text: current,
            changed,
        }
    }

    fn rewrite_pass(&self, text: &str, doc_dir: &SiteDir, syntax: ReferenceSyntax) -> String {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for reference in find_references(text, syntax) {
            let Some(replacement) = self.resolver.replacement(doc_dir, reference.url) else {
                continue;
            };

            tracing::debug!(
                syntax = ?reference.syntax,
                from = reference.url,
                to = %replacement,
                dir = %doc_dir,
                "rewrote reference"
            );
            output.push_str(&text[last..reference.span.start]);
            output.push_str(&replacement);
            last = reference.span.end;
        }
        output.push_str(&text[last..]);
        output
    }
}
