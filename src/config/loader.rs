//! Configuration Loader
//!
//! Layers the optional configuration file and environment overrides on top
//! of the serde defaults using the `config` crate.

use super::RmgConfig;
use crate::constants::ENV_PREFIX;
use crate::error::{Result, RmgError};
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    use_environment: bool,
}

impl ConfigLoader {
    /// Loader that reads environment overrides but no file
    pub fn new() -> Self {
        Self {
            file: None,
            use_environment: true,
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Skip `RMG__*` environment overrides (useful for tests)
    pub fn without_environment(mut self) -> Self {
        self.use_environment = false;
        self
    }

    pub fn load(&self) -> Result<RmgConfig> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            Self::check_file(path)?;
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        if self.use_environment {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("scan.ports"),
            );
        }

        let config: RmgConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            file = ?self.file,
            threads = config.guess.threads,
            ssl = config.connection.ssl,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn check_file(path: &Path) -> Result<()> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            RmgError::Configuration(format!(
                "cannot read configuration file {}: {e}",
                path.display()
            ))
        })?;

        if !metadata.is_file() {
            return Err(RmgError::Configuration(format!(
                "configuration path {} must point to a regular file",
                path.display()
            )));
        }

        Ok(())
    }
}
