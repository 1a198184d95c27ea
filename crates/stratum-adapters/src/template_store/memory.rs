//! In-memory template store with built-in templates.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::{info, instrument};

use stratum_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateKey,
    error::StratumResult,
};

use crate::builtin_templates::BUILTIN_TEMPLATES;
use crate::template_loader::FilesystemTemplateLoader;

/// Thread-safe template store keyed by template key. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<HashMap<TemplateKey, String>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in catalog loaded.
    pub fn with_builtin() -> StratumResult<Self> {
        let store = Self::new();
        for (key, body) in BUILTIN_TEMPLATES {
            store.insert(TemplateKey::new(*key), *body)?;
        }
        Ok(store)
    }

    /// Built-in catalog, shadowed by the templates under `dir` when given.
    #[instrument(skip_all)]
    pub fn with_overrides(dir: Option<&Path>) -> StratumResult<Self> {
        let store = Self::with_builtin()?;
        if let Some(dir) = dir {
            let count = store.load_dir(dir)?;
            info!(path = %dir.display(), count, "template overrides applied");
        }
        Ok(store)
    }

    /// Load every template under `dir`, replacing entries with the same key.
    /// Returns how many templates were read.
    pub fn load_dir(&self, dir: &Path) -> StratumResult<usize> {
        let templates = FilesystemTemplateLoader::new(dir).load_all()?;
        let count = templates.len();
        for (key, body) in templates {
            self.insert(key, body)?;
        }
        Ok(count)
    }

    pub fn insert(&self, key: TemplateKey, body: impl Into<String>) -> StratumResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(key, body.into());
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, key: &TemplateKey) -> StratumResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(key).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                key: key.to_string(),
            }
            .into()
        })
    }

    fn contains(&self, key: &TemplateKey) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains_key(key))
            .unwrap_or(false)
    }

    fn keys(&self) -> Vec<TemplateKey> {
        let mut keys: Vec<TemplateKey> = self
            .inner
            .read()
            .map(|inner| inner.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}
