//! Helpers for classifying and normalising asset paths inside a built site.
//!
//! Filtering of external references and the root-relative path arithmetic live in separate
//! submodules so each can be tested without a mapping or a file system.

mod filters;
mod site_path;

pub use filters::is_external_reference;
pub use site_path::{SiteDir, normalize_root_relative};
