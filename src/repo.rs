//! Repository root handling and relative-path conversions.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Converts between repository-relative paths and absolute filesystem
/// paths. Relative paths are the identity key for folders throughout a
/// scan; `None` denotes the repository root itself.
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a repository-relative folder.
    pub fn abs_path(&self, rel: Option<&Path>) -> PathBuf {
        match rel {
            None => self.root.clone(),
            Some(rel) => self.root.join(rel),
        }
    }

    /// Relative path of an entry named `name` inside the folder `rel`.
    pub fn child_rel(rel: Option<&Path>, name: &OsStr) -> PathBuf {
        match rel {
            None => PathBuf::from(name),
            Some(rel) => rel.join(name),
        }
    }
}

/// Render a repository-relative path with `/` separators regardless of
/// platform. All pattern matching and report output goes through this so
/// OS-specific separators never leak into the data model.
pub fn rel_display(rel: &Path) -> String {
    let segments: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    segments.join("/")
}

/// Default repository root: `$M2_REPO` if set, else `~/.m2/repository`.
/// Returns `None` only when no home directory can be determined either.
pub fn default_repo_root() -> Option<PathBuf> {
    if let Some(repo) = env::var_os("M2_REPO") {
        return Some(PathBuf::from(repo));
    }
    dirs::home_dir().map(|home| home.join(".m2").join("repository"))
}
