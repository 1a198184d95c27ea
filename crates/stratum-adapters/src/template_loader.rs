//! Filesystem template loader.
//!
//! Reads a user override directory into `(key, body)` pairs that shadow the
//! built-in catalog.
//!
//! # Directory layout expected
//!
//! The directory mirrors template keys. A trailing `.tmpl` is optional and
//! stripped:
//!
//! ```text
//! my-templates/
//! ├── shared/
//! │   └── README.md.tmpl        → key "shared/README.md"
//! └── flask/
//!     └── clean/
//!         └── route.py          → key "flask/clean/route.py"
//! ```
//!
//! Hidden files and directories are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use stratum_core::{
    application::ApplicationError, domain::TemplateKey, error::StratumResult,
};

const TEMPLATE_SUFFIX: &str = ".tmpl";

#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    root: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every template under the root, sorted by key.
    ///
    /// An unreadable root is an error. Individual files that cannot be read
    /// (bad permissions, not UTF-8) are skipped with a warning.
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn load_all(&self) -> StratumResult<Vec<(TemplateKey, String)>> {
        if !self.root.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: self.root.clone(),
                reason: "template directory does not exist".into(),
            }
            .into());
        }

        let mut templates = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
                ApplicationError::filesystem(path, e)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(key) = self.key_for(entry.path()) else {
                continue;
            };
            match fs::read_to_string(entry.path()) {
                Ok(body) => {
                    debug!(key = %key, "override template loaded");
                    templates.push((key, body));
                }
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "skipping unreadable template");
                }
            }
        }

        templates.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(templates)
    }

    /// Key for a file under the root: `/`-joined components, `.tmpl` removed.
    fn key_for(&self, path: &Path) -> Option<TemplateKey> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let joined = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?
            .join("/");
        let key = joined.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(&joined);
        (!key.is_empty()).then(|| TemplateKey::new(key))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') && name != ".env.tmpl" && name != ".env")
}
