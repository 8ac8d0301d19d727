//! Local-first resolver.

use std::path::{Path, PathBuf};

use super::{ContentResolver, ResolveError, absolute};

/// Resolves names against a root directory on the local file system.
#[derive(Debug, Clone)]
pub struct LocalResolver {
    root: PathBuf,
}

impl LocalResolver {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ContentResolver for LocalResolver {
    fn resolve(&self, name: &str) -> Result<PathBuf, ResolveError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(ResolveError::NotFound { path });
        }
        absolute(path)
    }

    fn describe(&self) -> String {
        format!("local ({})", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "simviewer-local-{}-{}",
            tag,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn resolves_existing_file_to_absolute_path() {
        let dir = scratch_dir("found");
        fs::write(dir.join("results.txt"), "0,0,0\n").unwrap();

        let path = LocalResolver::new(&dir).resolve("results.txt").unwrap();
        assert!(path.is_absolute());
        assert_eq!(fs::read_to_string(path).unwrap(), "0,0,0\n");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = scratch_dir("missing");
        let err = LocalResolver::new(&dir).resolve("nope.txt").unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn directory_is_not_a_results_file() {
        let dir = scratch_dir("dir");
        fs::create_dir_all(dir.join("results.txt")).unwrap();
        assert!(LocalResolver::new(&dir).resolve("results.txt").is_err());
        fs::remove_dir_all(dir).ok();
    }
}
