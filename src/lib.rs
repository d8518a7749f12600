#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod cli;
pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod relinker;
pub mod resolver;
pub mod rewrite;
pub mod selection;

pub use config::RelinkConfig;
pub use error::{ConfigError, RelinkError};
pub use mapping::FingerprintMap;
pub use relinker::{RelinkOptions, SiteRelinker};
pub use resolver::{ReferenceKind, Resolver};
pub use rewrite::{Rewriter, find_references};
pub use selection::{TargetInclusion, TargetSelection};
