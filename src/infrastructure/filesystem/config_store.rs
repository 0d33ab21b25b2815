use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::error::ComposectlError;
use crate::common::result::ComposectlResult;
use crate::domain::entities::configuration::{Config, StackConfig};
use crate::domain::entities::stack::stack_config_path;

pub use crate::domain::entities::configuration::CONFIG_FILE_NAME;

/// Name of the optional environment file in the base directory
pub const ENV_FILE_NAME: &str = ".env";

const ENV_FILE_FLAG: &str = "--env-file";

/// Keys of the global config file; only keys present replace defaults
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "common-args")]
    common_args: Option<Vec<String>>,
    #[serde(rename = "up-args")]
    up_args: Option<Vec<String>>,
    #[serde(rename = "down-args")]
    down_args: Option<Vec<String>>,
    timeout: Option<u64>,
}

impl ConfigFile {
    fn apply_to(self, config: &mut Config) {
        if let Some(common_args) = self.common_args {
            config.common_args = common_args;
        }
        if let Some(up_args) = self.up_args {
            config.up_args = up_args;
        }
        if let Some(down_args) = self.down_args {
            config.down_args = down_args;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
    }
}

/// Loads the global configuration and per-stack overrides from YAML files
#[derive(Debug, Clone)]
pub struct ConfigStore {
    base_dir: PathBuf,
    config_file: Option<PathBuf>,
}

impl ConfigStore {
    /// Create a store reading `<base_dir>/config.yaml`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            config_file: None,
        }
    }

    /// Read the global configuration from an explicit file instead
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }

    /// Path of the global configuration file in use
    pub fn global_config_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| self.base_dir.join(CONFIG_FILE_NAME))
    }

    /// Load the global configuration.
    ///
    /// Defaults, plus `--env-file <base>/.env` in `common-args` when that file
    /// exists, overlaid by the config file if present. A `common-args` list
    /// from the file replaces the defaults wholesale, env-file included.
    /// Relative `--env-file` values are resolved against the base directory.
    pub fn load_global(&self) -> ComposectlResult<Config> {
        let mut config = Config::default();

        let env_file = self.base_dir.join(ENV_FILE_NAME);
        if env_file.is_file() {
            config.common_args.push(ENV_FILE_FLAG.to_string());
            config
                .common_args
                .push(env_file.to_string_lossy().into_owned());
        }

        let config_path = self.global_config_path();
        if let Some(file) = read_yaml::<ConfigFile>(&config_path)? {
            debug!("Using config file: {}", config_path.display());
            file.apply_to(&mut config);
        }

        resolve_env_file_paths(&mut config.common_args, &self.base_dir);
        Ok(config)
    }

    /// Load the override file of one stack; a missing file is an empty override
    pub fn load_stack_override(&self, stack_dir: &Path) -> ComposectlResult<StackConfig> {
        Ok(read_yaml::<StackConfig>(&stack_config_path(stack_dir))?.unwrap_or_default())
    }
}

/// `Ok(None)` when the file does not exist or holds no YAML document
fn read_yaml<T>(path: &Path) -> ComposectlResult<Option<T>>
where
    T: for<'de> Deserialize<'de>,
{
    match fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ComposectlError::config_read_error(path, e)),
    }

    let contents =
        fs::read_to_string(path).map_err(|e| ComposectlError::config_read_error(path, e))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    serde_yaml::from_str(&contents)
        .map(Some)
        .map_err(|e| ComposectlError::config_parse_error(path, e))
}

fn resolve_env_file_paths(args: &mut [String], base_dir: &Path) {
    let mut i = 0;
    while i + 1 < args.len() {
        if args[i] == ENV_FILE_FLAG && Path::new(&args[i + 1]).is_relative() {
            args[i + 1] = base_dir.join(&args[i + 1]).to_string_lossy().into_owned();
        }
        i += 1;
    }
}
