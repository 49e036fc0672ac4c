//! Loader for the rule and project documents
//!
//! ```text
//! tools/
//!   animus_rules.yaml            lint rules
//!   animus_strategy_rules.yaml   strategy templates
//!   yy_rules.yaml                project layout (optional)
//! ```

use serde::de::DeserializeOwned;

use crate::schema::{LintRules, ProjectConfig, StrategyRules};
use crate::{ConfigFile, Error, Result};
use gml_fs::{ConfigStore, NormalizedPath};

/// Loads configuration documents through [`ConfigStore`].
pub struct RulesLoader {
    store: ConfigStore,
}

impl RulesLoader {
    pub fn new() -> Self {
        Self {
            store: ConfigStore::new(),
        }
    }

    /// Load a required document.
    ///
    /// A missing file is [`Error::ConfigNotFound`]; unreadable or invalid
    /// content is [`Error::InvalidConfig`].
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        }
        self.store.load(path).map_err(|e| Error::InvalidConfig {
            path: path.to_native(),
            message: e.to_string(),
        })
    }

    /// Lint rules from `path`, or from the default location under `root`.
    pub fn load_lint_rules(
        &self,
        root: &NormalizedPath,
        path: Option<&NormalizedPath>,
    ) -> Result<LintRules> {
        let path = resolve(root, path, ConfigFile::LintRules);
        self.load(&path)
    }

    /// Strategy rules from `path`, or from the default location under `root`.
    pub fn load_strategy_rules(
        &self,
        root: &NormalizedPath,
        path: Option<&NormalizedPath>,
    ) -> Result<StrategyRules> {
        let path = resolve(root, path, ConfigFile::StrategyRules);
        self.load(&path)
    }

    /// Project configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn load_project_config(
        &self,
        root: &NormalizedPath,
        path: Option<&NormalizedPath>,
    ) -> Result<ProjectConfig> {
        if path.is_some() {
            return self.load(&resolve(root, path, ConfigFile::ProjectRules));
        }
        let default_path = root.join(ConfigFile::ProjectRules.as_str());
        if default_path.is_file() {
            self.load(&default_path)
        } else {
            tracing::debug!(path = %default_path, "no project config, using defaults");
            Ok(ProjectConfig::default())
        }
    }
}

impl Default for RulesLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(root: &NormalizedPath, path: Option<&NormalizedPath>, fallback: ConfigFile) -> NormalizedPath {
    match path {
        Some(p) if p.to_native().is_absolute() => p.clone(),
        Some(p) => root.join(p.as_str()),
        None => root.join(fallback.as_str()),
    }
}
