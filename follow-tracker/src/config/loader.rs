//! Layered configuration loading with figment.
//!
//! Later layers override earlier ones:
//!
//! 1. built-in defaults ([`FollowTrackerConfig::default`])
//! 2. the first of `follow-tracker.{toml,yaml,yml,json}` or
//!    `.follow-tracker/config.*` found in the working directory
//! 3. `config.{toml,yaml,yml,json}` in the platform config directory
//!    (`~/.config/follow-tracker` on Linux)
//! 4. a file passed explicitly to [`ConfigLoader::load_file`] (`--config`)
//! 5. `FOLLOW_TRACKER_*` environment variables
//!
//! Callers decide which layers to apply by calling the `load_*` methods in
//! that order.

use super::{ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, Result, models::*, validation};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Accumulates configuration layers and extracts a validated [`FollowTrackerConfig`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Start from the built-in defaults.
    pub fn new() -> Self {
        let figment = Figment::new().merge(Serialized::defaults(FollowTrackerConfig::default()));
        Self { figment }
    }

    /// Layer a TOML, YAML or JSON file on top, chosen by extension.
    ///
    /// A missing file or an unknown extension is an error; use
    /// [`load_default_files`](Self::load_default_files) for optional files.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileLoadError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
        if !CONFIG_EXTENSIONS.contains(&extension) {
            return Err(ConfigError::FileLoadError(format!(
                "Unsupported file format: {}",
                path.display()
            )));
        }

        let figment = std::mem::take(&mut self.figment);
        self.figment = match extension {
            "toml" => figment.merge(Toml::file(path)),
            "json" => figment.merge(Json::file(path)),
            _ => figment.merge(Yaml::file(path)),
        };

        Ok(self)
    }

    /// Layer the optional `follow-tracker.*` file from the working directory,
    /// then `config.*` from the platform config directory. Only the first
    /// existing file of each location is used.
    pub fn load_default_files(&mut self) -> &mut Self {
        let local = DEFAULT_CONFIG_FILES.iter().map(PathBuf::from);
        self.load_first_existing(local);

        if let Some(dirs) = directories::ProjectDirs::from("org", "follow-tracker", "follow-tracker") {
            let config_dir = dirs.config_dir();
            let platform = CONFIG_EXTENSIONS
                .iter()
                .map(|ext| config_dir.join(format!("config.{ext}")));
            self.load_first_existing(platform);
        }

        self
    }

    /// Layer `FOLLOW_TRACKER_*` variables; `__` separates sections, so
    /// `FOLLOW_TRACKER_STORAGE__DATA_DIR=/tmp/x` sets `storage.data_dir`.
    pub fn load_env(&mut self) -> &mut Self {
        let figment = std::mem::take(&mut self.figment)
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        self.figment = figment;
        self
    }

    /// Extract the merged layers and validate the result.
    pub fn extract(&self) -> Result<FollowTrackerConfig> {
        let config: FollowTrackerConfig = self
            .figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validation::validate_config(&config)?;
        Ok(config)
    }

    fn load_first_existing(&mut self, candidates: impl IntoIterator<Item = PathBuf>) {
        for path in candidates {
            if path.exists() && self.load_file(&path).is_ok() {
                break;
            }
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
