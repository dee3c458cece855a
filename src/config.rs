//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/domscore/domscore.toml`
//! 3. Local config: `<dir>/.domscore.toml`
//! 4. Environment variables: `DOMSCORE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{default_entries, DomainEntry, Traversal, DEFAULT_SEPARATOR};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DOMSCORE";

/// Unified configuration for domscore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Ordered input entries; later entries win for repeated domains
    pub domains: Vec<DomainEntry>,
    /// Domain label separator
    pub separator: char,
    /// Reducer walk strategy
    pub traversal: Traversal,
    /// Print the domain tree before the result
    pub show_tree: bool,
    /// Print one line per leaf contribution
    pub show_leaves: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            domains: default_entries(),
            separator: DEFAULT_SEPARATOR,
            traversal: Traversal::default(),
            show_tree: false,
            show_leaves: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub domains: Option<Vec<DomainEntry>>,
    pub separator: Option<char>,
    pub traversal: Option<Traversal>,
    pub show_tree: Option<bool>,
    pub show_leaves: Option<bool>,
}

/// Get the XDG config directory for domscore.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "domscore").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("domscore.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".domscore.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Apply global config onto defaults.
    ///
    /// A `domains` array REPLACES the compiled entries.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            domains: global
                .domains
                .clone()
                .unwrap_or_else(|| self.domains.clone()),
            separator: global.separator.unwrap_or(self.separator),
            traversal: global.traversal.unwrap_or(self.traversal),
            show_tree: global.show_tree.unwrap_or(self.show_tree),
            show_leaves: global.show_leaves.unwrap_or(self.show_leaves),
        }
    }

    /// Merge local config onto self.
    ///
    /// A `domains` array is APPENDED, so a local entry for an already known
    /// domain overrides it when the tree is built.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut domains = self.domains.clone();
        if let Some(extra) = &overlay.domains {
            domains.extend(extra.iter().cloned());
        }
        Self {
            domains,
            separator: overlay.separator.unwrap_or(self.separator),
            traversal: overlay.traversal.unwrap_or(self.traversal),
            show_tree: overlay.show_tree.unwrap_or(self.show_tree),
            show_leaves: overlay.show_leaves.unwrap_or(self.show_leaves),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.domscore.toml`
    pub fn load(local_dir: Option<&Path>) -> ApplicationResult<Self> {
        let global_path = global_config_path();
        Self::load_from(
            global_path.as_deref(),
            local_dir,
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    /// Load settings from explicit layer sources.
    ///
    /// Missing files are skipped; `env` supplies the `DOMSCORE_*` overrides.
    #[instrument(level = "debug", skip(env))]
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
        env: Environment,
    ) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current.apply_env_overrides(env)
    }

    /// Apply `DOMSCORE_*` environment variables as scalar overrides.
    ///
    /// Variables are `DOMSCORE_<KEY>`, e.g. `DOMSCORE_SHOW_TREE`.
    /// Domain entries cannot be set from the environment.
    pub fn apply_env_overrides(mut self, env: Environment) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(env.prefix_separator("_").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("separator") {
            self.separator = parse_separator(&val)?;
        }
        if let Ok(val) = config.get_string("traversal") {
            self.traversal = val
                .parse::<Traversal>()
                .map_err(|reason| ApplicationError::InvalidSetting {
                    key: "traversal".into(),
                    reason,
                })?;
        }
        if config.get_string("show_tree").is_ok() {
            self.show_tree = config.get_bool("show_tree").map_err(config_err)?;
        }
        if config.get_string("show_leaves").is_ok() {
            self.show_leaves = config.get_bool("show_leaves").map_err(config_err)?;
        }

        Ok(self)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# domscore configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/domscore/domscore.toml  (defines your baseline)
#   Local:  ./.domscore.toml                  (additions for this directory)
#   Env:    DOMSCORE_* environment variables  (scalar overrides)
#
# Domain Merge Semantics:
#   Global domains REPLACE the compiled defaults.
#   Local domains are APPENDED; a repeated domain takes the last score.

# Label separator
# separator = "."

# Walk strategy: "recursive" or "iterative"
# traversal = "recursive"

# Print the domain tree / per-leaf contributions
# show_tree = false
# show_leaves = false

# [[domains]]
# domain = "google.com"
# score = 10
"#
        .to_string()
    }
}

/// A separator must be exactly one character.
fn parse_separator(val: &str) -> ApplicationResult<char> {
    let mut chars = val.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::InvalidSetting {
            key: "separator".into(),
            reason: format!("expected a single character, got '{val}'"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
