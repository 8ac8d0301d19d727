//! Fetch-then-cache resolver.
//!
//! Serves `cache_dir/<name>` when present. Otherwise the file is fetched from
//! its [`AssetSource`], written to the cache and then served from there.
//! Downloads land in a `.part` file first and are renamed into place, so an
//! interrupted transfer never leaves a truncated cache entry behind.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::info;

use super::{ContentResolver, ResolveError, absolute};

/// Where missing files are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// HTTP(S) base URL; the file is fetched with `GET <base>/<name>`.
    Http(String),
    /// Bundled assets directory; the file is copied from `<dir>/<name>`.
    Dir(PathBuf),
}

impl AssetSource {
    /// Interpret a configured base location.
    ///
    /// `http://` and `https://` prefixes select [`AssetSource::Http`];
    /// anything else is treated as a directory path.
    pub fn parse(base: &str) -> Self {
        let base = base.trim();
        if base.starts_with("http://") || base.starts_with("https://") {
            AssetSource::Http(base.trim_end_matches('/').to_string())
        } else {
            AssetSource::Dir(PathBuf::from(base))
        }
    }

    fn fetch(&self, name: &str) -> Result<Vec<u8>, ResolveError> {
        match self {
            AssetSource::Http(base) => fetch_http(&format!("{}/{}", base, name)),
            AssetSource::Dir(dir) => {
                let path = dir.join(name);
                if !path.is_file() {
                    return Err(ResolveError::NotFound { path });
                }
                fs::read(&path).map_err(|e| ResolveError::io(path, e))
            }
        }
    }
}

fn fetch_http(url: &str) -> Result<Vec<u8>, ResolveError> {
    let fetch_err = |reason: String| ResolveError::Fetch {
        url: url.to_string(),
        reason,
    };
    let response = ureq::get(url).call().map_err(|e| fetch_err(e.to_string()))?;
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|e| fetch_err(e.to_string()))?;
    Ok(body)
}

/// Resolver that materialises files into a local cache directory.
#[derive(Debug, Clone)]
pub struct FetchCacheResolver {
    cache_dir: PathBuf,
    source: AssetSource,
}

impl FetchCacheResolver {
    pub fn new(cache_dir: impl AsRef<Path>, source: AssetSource) -> Self {
        Self {
            cache_dir: cache_dir.as_ref().to_path_buf(),
            source,
        }
    }

    fn store(&self, name: &str, body: &[u8]) -> Result<PathBuf, ResolveError> {
        fs::create_dir_all(&self.cache_dir)
            .map_err(|e| ResolveError::io(self.cache_dir.clone(), e))?;
        let target = self.cache_dir.join(name);
        let partial = self.cache_dir.join(format!("{}.part", name));
        fs::write(&partial, body).map_err(|e| ResolveError::io(partial.clone(), e))?;
        fs::rename(&partial, &target).map_err(|e| ResolveError::io(target.clone(), e))?;
        Ok(target)
    }
}

impl ContentResolver for FetchCacheResolver {
    fn resolve(&self, name: &str) -> Result<PathBuf, ResolveError> {
        let cached = self.cache_dir.join(name);
        if cached.is_file() {
            return absolute(cached);
        }

        info!("{} not cached, fetching from {:?}", name, self.source);
        let body = self.source.fetch(name)?;
        let stored = self.store(name, &body)?;
        info!("Cached {} ({} bytes)", stored.display(), body.len());
        absolute(stored)
    }

    fn describe(&self) -> String {
        format!("fetch ({} <- {:?})", self.cache_dir.display(), self.source)
    }
}
