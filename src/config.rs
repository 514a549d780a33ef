//! Persisted user settings.
//!
//! One small JSON record at `~/.mainframe/config.json`. Reads never fail
//! the caller: a missing file is replaced by the default record, an
//! unreadable one is ignored for the session.
//!
//! Structure:
//! - Types: `Config`, `AiModel`, `ConfigError`
//! - Pure functions: path computation
//! - Effect functions: load, save

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

/// Directory under the home directory holding all mainframe state.
const CONFIG_DIR_NAME: &str = ".mainframe";

/// Settings filename within the config directory.
const CONFIG_FILENAME: &str = "config.json";

/// Log directory name, sibling of the settings file.
const LOG_DIR_NAME: &str = "logs";

// ============================================================================
// TYPES
// ============================================================================

/// Which model backs the assistant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AiModel {
    /// Weights on the user's machine.
    #[default]
    Local,
    /// Hosted OpenAI models, needs an API key.
    Gpt,
}

impl AiModel {
    /// The other model.
    pub fn toggled(self) -> Self {
        match self {
            AiModel::Local => AiModel::Gpt,
            AiModel::Gpt => AiModel::Local,
        }
    }

    /// Serialized name, as stored on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            AiModel::Local => "local",
            AiModel::Gpt => "gpt",
        }
    }

    /// Parse a stored name. Unknown names give None.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "local" => Some(AiModel::Local),
            "gpt" => Some(AiModel::Gpt),
            _ => None,
        }
    }
}

/// An unknown model name falls back to the default so the rest of the
/// record still loads.
impl<'de> Deserialize<'de> for AiModel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(AiModel::from_name(&name).unwrap_or_else(|| {
            tracing::warn!(ai_model = %name, "unknown model in settings, using local");
            AiModel::default()
        }))
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted settings record.
///
/// Missing fields fall back to their defaults, so older or hand-edited
/// files still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai_model: AiModel,
    pub api_key: String,
    pub debug: bool,
    pub logs: bool,
    pub experimental: bool,
}

/// Failure to read or write the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to create config directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Where committed settings go.
///
/// The navigation controller persists through this after every
/// mutating key event.
pub trait ConfigSink {
    fn save(&mut self, config: &Config) -> Result<(), ConfigError>;
}

/// The settings file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
}

// ============================================================================
// PURE FUNCTIONS (Paths)
// ============================================================================

/// Returns the default config directory: `~/.mainframe`.
///
/// Falls back to the current directory when no home directory is known.
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

impl ConfigFile {
    /// Settings file at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        ConfigFile { path: path.into() }
    }

    /// Settings file at `~/.mainframe/config.json`.
    pub fn default_location() -> Self {
        ConfigFile::at(default_config_dir().join(CONFIG_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory for log files, next to the settings file.
    pub fn log_dir(&self) -> PathBuf {
        self.path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(LOG_DIR_NAME)
    }
}

// ============================================================================
// EFFECT FUNCTIONS (I/O)
// ============================================================================

impl ConfigFile {
    /// Load settings.
    ///
    /// A missing file is created with the default record, which is
    /// returned. A file that exists but does not parse is left alone and
    /// reported as an error.
    pub fn load(&self) -> Result<Config, ConfigError> {
        self.ensure_dir()?;

        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Config::default();
                self.write(&config)?;
                tracing::info!(path = %self.path.display(), "created default settings");
                return Ok(config);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Load settings, falling back to defaults for this session on error.
    ///
    /// Returns the error alongside so the caller can report it once
    /// logging is up.
    pub fn load_or_default(&self) -> (Config, Option<ConfigError>) {
        match self.load() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        }
    }

    /// Write settings as pretty-printed JSON.
    pub fn write(&self, config: &Config) -> Result<(), ConfigError> {
        self.ensure_dir()?;
        let data = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, data).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn ensure_dir(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}

impl ConfigSink for ConfigFile {
    fn save(&mut self, config: &Config) -> Result<(), ConfigError> {
        self.write(config)
    }
}

// ============================================================================
// TESTS
// ============================================================================
