//! Content resolution: turning a logical results file name into a local path.
//!
//! Two resolvers implement [`ContentResolver`]:
//! - [`local::LocalResolver`] – looks the file up under a root directory
//! - [`fetch::FetchCacheResolver`] – serves a cached copy, fetching it from an
//!   HTTP base URL or a bundled assets directory on first use
//!
//! The resolver is chosen at runtime from [`ViewerConfig`] via
//! [`resolver_from_config`]. Resolution may block (network fetch), so the
//! viewer runs it on the resolver worker thread; see
//! [`crate::resources::resolverbridge`].

pub mod fetch;
pub mod local;

use std::path::PathBuf;

use thiserror::Error;

use crate::resources::viewerconfig::{ResolverKind, ViewerConfig};

/// Errors produced while resolving a results file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The file does not exist locally and no source provides it.
    #[error("results file not found: {}", path.display())]
    NotFound { path: PathBuf },
    /// The fallback transfer failed (transport error or HTTP status).
    #[error("{reason}")]
    Fetch { url: String, reason: String },
    /// Local file system error while reading or caching the file.
    #[error("{}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
}

impl ResolveError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ResolveError::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Text shown to the user when resolution fails.
    pub fn status_text(&self) -> String {
        match self {
            ResolveError::NotFound { .. } => "Can't find results file.".to_string(),
            other => format!("Error loading results file: {}", other),
        }
    }
}

/// Maps a logical file name to an absolute local path.
///
/// Implementations may block; they are called off the main loop.
pub trait ContentResolver: Send {
    fn resolve(&self, name: &str) -> Result<PathBuf, ResolveError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Build the resolver selected by `config`.
pub fn resolver_from_config(config: &ViewerConfig) -> Box<dyn ContentResolver> {
    match config.resolver {
        ResolverKind::Local => Box::new(local::LocalResolver::new(&config.root)),
        ResolverKind::Fetch => Box::new(fetch::FetchCacheResolver::new(
            &config.cache_dir,
            fetch::AssetSource::parse(&config.base_url),
        )),
    }
}

/// Make `path` absolute without requiring it to exist.
pub(crate) fn absolute(path: PathBuf) -> Result<PathBuf, ResolveError> {
    std::path::absolute(&path).map_err(|e| ResolveError::io(path, e))
}
