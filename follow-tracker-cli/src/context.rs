use follow_tracker::config::{
    ConfigBuilder, ConfigLoader, ConsoleTarget, FollowTrackerConfig, LogLevel,
};
use follow_tracker::core::RelationshipStore;
use follow_tracker::storage::{YamlFileStore, create_repository};
use std::path::Path;

pub struct FollowTrackerCliContext {
    pub store: RelationshipStore<YamlFileStore>,
    pub config: FollowTrackerConfig,
}

impl FollowTrackerCliContext {
    /// Open the store described by an already loaded configuration
    pub fn new(config: FollowTrackerConfig) -> follow_tracker::Result<Self> {
        let store = RelationshipStore::open(create_repository(&config), config.validation)?;
        Ok(Self { store, config })
    }
}

/// Load configuration: defaults, config files, an explicit `--config` file,
/// then `FOLLOW_TRACKER_*` environment variables. `data_dir` overrides all of them.
pub fn load_config(
    config_file: Option<&Path>,
    data_dir: Option<&Path>,
) -> follow_tracker::Result<FollowTrackerConfig> {
    let mut loader = ConfigLoader::new();
    loader.load_default_files();
    if let Some(path) = config_file {
        loader.load_file(path)?;
    }
    loader.load_env();

    let mut builder = ConfigBuilder::from_config(loader.extract()?);
    if let Some(dir) = data_dir {
        builder = builder.with_data_dir(dir);
    }
    Ok(builder.build()?)
}

/// Map the logging flags onto `config`. Logs go to `--log-file` when given,
/// otherwise to stderr so stdout only carries command output. Quiet mode logs
/// errors only and takes precedence over verbose.
pub fn apply_log_flags(
    config: FollowTrackerConfig,
    verbose: bool,
    quiet: bool,
    log_file: Option<&Path>,
) -> follow_tracker::Result<FollowTrackerConfig> {
    let level = if quiet {
        LogLevel::Error
    } else if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };

    let mut builder = ConfigBuilder::from_config(config)
        .with_log_level(level)
        .with_log_console(ConsoleTarget::Stderr);
    if let Some(path) = log_file {
        builder = builder.with_log_file(path);
    }
    Ok(builder.build()?)
}
