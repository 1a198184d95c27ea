//! In-memory port fakes for service tests.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::ApplicationError;
use crate::application::ports::{ConfigStore, Filesystem, TemplateRenderer, TemplateStore};
use crate::domain::{ProjectConfig, RenderContext, TemplateKey};
use crate::error::StratumResult;

/// Clones share state, so a test can keep a handle after boxing one.
#[derive(Clone, Default)]
pub struct FakeFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl FakeFs {
    pub fn seed(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_owned());
    }

    pub fn read(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.dirs.lock().unwrap().contains(Path::new(path))
    }
}

impl Filesystem for FakeFs {
    fn create_dir_all(&self, path: &Path) -> StratumResult<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> StratumResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ApplicationError::filesystem(path, "not found").into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
    }
}

pub struct FakeStore(HashMap<String, String>);

impl FakeStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }
}

impl TemplateStore for FakeStore {
    fn get(&self, key: &TemplateKey) -> StratumResult<String> {
        self.0.get(key.as_str()).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                key: key.to_string(),
            }
            .into()
        })
    }

    fn contains(&self, key: &TemplateKey) -> bool {
        self.0.contains_key(key.as_str())
    }

    fn keys(&self) -> Vec<TemplateKey> {
        let mut keys: Vec<_> = self.0.keys().map(|k| TemplateKey::new(k.clone())).collect();
        keys.sort();
        keys
    }
}

/// Serves every key as a one-line comment naming it. Marker-strategy entry
/// points get a body with the registration sentinel.
pub struct AnyStore;

impl TemplateStore for AnyStore {
    fn get(&self, key: &TemplateKey) -> StratumResult<String> {
        Ok(match key.as_str() {
            "flask/clean/app/routes/__init__.py" | "flask/mvc/app/__init__.py" => {
                "def register_blueprints(app):\n    # Additional blueprints will be registered here automatically\n".to_owned()
            }
            other => format!("# {other}\n"),
        })
    }

    fn contains(&self, _key: &TemplateKey) -> bool {
        true
    }

    fn keys(&self) -> Vec<TemplateKey> {
        Vec::new()
    }
}

/// Replaces `{{KEY}}` with the context value; unknown keys stay literal.
pub struct SubstituteRenderer;

impl TemplateRenderer for SubstituteRenderer {
    fn render(&self, template: &str, context: &RenderContext) -> StratumResult<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = &after[..end];
                    match context.get(key.trim()) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(key);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// JSON-encoded configs keyed by path. Clones share state.
#[derive(Clone, Default)]
pub struct FakeConfigStore(Arc<Mutex<HashMap<PathBuf, String>>>);

impl FakeConfigStore {
    /// Store raw JSON at `path`, as if hand-edited.
    pub fn seed(&self, path: &str, raw: &str) {
        self.0.lock().unwrap().insert(PathBuf::from(path), raw.to_owned());
    }
}

impl ConfigStore for FakeConfigStore {
    fn load(&self, path: &Path) -> StratumResult<ProjectConfig> {
        let raw = self.0.lock().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::ConfigNotFound {
                path: path.to_path_buf(),
                reason: "missing".into(),
            }
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::ConfigNotFound {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn save(&self, path: &Path, config: &ProjectConfig) -> StratumResult<()> {
        let raw = serde_json::to_string_pretty(config).map_err(|e| {
            ApplicationError::SerializationFailed {
                reason: e.to_string(),
            }
        })?;
        self.0.lock().unwrap().insert(path.to_path_buf(), raw);
        Ok(())
    }
}
