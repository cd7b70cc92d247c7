use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::{CONFIG_FILENAME, CONFIG_SECTION, PACKAGE_JSON_FILENAME};
use crate::transform::{SiblingPolicy, TransformOptions};

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for arrow2fn.
    pub arrow2fn: Arrow2fnConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
/// Configuration options for arrow2fn.
pub struct Arrow2fnConfig {
    /// What to do with non-arrow bindings sharing a rewritten statement.
    pub siblings: Option<SiblingPolicy>,
    /// Whether `var` declarations are rewritten too.
    pub include_var: Option<bool>,
}

/// Error loading an explicitly requested configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}", path.display())]
    Io {
        /// Offending file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("invalid config file {}", path.display())]
    Toml {
        /// Offending file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },
    /// The file is not valid JSON for this schema.
    #[error("invalid package manifest {}", path.display())]
    Json {
        /// Offending file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize, Clone)]
struct PackageJson {
    arrow2fn: Option<Arrow2fnConfig>,
}

impl Config {
    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// In each directory `.arrow2fn.toml` wins over a `package.json` with an
    /// `"arrow2fn"` key. Files that fail to parse are skipped with a warning.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if current.is_file() {
            current.pop();
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let dedicated = current.join(CONFIG_FILENAME);
            if dedicated.is_file() {
                match Self::load_toml(&dedicated) {
                    Ok(config) => return config,
                    Err(e) => warn!(error = %e, "skipping unreadable config"),
                }
            }

            // 2. Try PACKAGE_JSON_FILENAME
            let manifest = current.join(PACKAGE_JSON_FILENAME);
            if manifest.is_file() {
                match Self::load_package_json(&manifest) {
                    Ok(Some(config)) => return config,
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "skipping unreadable package manifest"),
                }
            }

            if !current.pop() {
                break;
            }
        }

        debug!("no config file found, using defaults");
        Config::default()
    }

    /// Loads an explicitly named configuration file.
    ///
    /// `*.json` files are read as a package manifest; anything else as TOML.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(Self::load_package_json(path)?.unwrap_or_else(|| Config {
                arrow2fn: Arrow2fnConfig::default(),
                config_file_path: Some(path.to_path_buf()),
            }))
        } else {
            Self::load_toml(path)
        }
    }

    fn load_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = read(path)?;
        let mut config = toml::from_str::<Config>(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_file_path = Some(path.to_path_buf());
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn load_package_json(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = read(path)?;
        let manifest =
            serde_json::from_str::<PackageJson>(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(manifest.arrow2fn.map(|section| {
            debug!(path = %path.display(), section = CONFIG_SECTION, "loaded config from package manifest");
            Config {
                arrow2fn: section,
                config_file_path: Some(path.to_path_buf()),
            }
        }))
    }

    /// Engine options from this configuration, defaults filled in.
    #[must_use]
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            siblings: self.arrow2fn.siblings.unwrap_or_default(),
            include_var: self.arrow2fn.include_var.unwrap_or(false),
        }
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
