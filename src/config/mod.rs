//! # Configuration
//!
//! Defaults for connection handling, scanning, guessing and output. Values
//! are layered: built-in defaults, then an optional TOML file, then `RMG__*`
//! environment variables. Command line options override all of them; that
//! last merge happens in the dispatcher.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rmg_core::config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().load()?;
//! println!("threads: {}", config.guess.threads);
//! # Ok(())
//! # }
//! ```

pub mod loader;

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS, DEFAULT_SCAN_PORTS, DEFAULT_THREADS,
};
use crate::error::{Result, RmgError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use loader::ConfigLoader;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RmgConfig {
    pub connection: ConnectionConfig,
    pub scan: ScanConfig,
    pub guess: GuessConfig,
    pub output: OutputConfig,
    /// Replaces the built-in known endpoint catalog when set
    pub known_endpoints: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub ssl: bool,
    pub follow: bool,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            ssl: false,
            follow: false,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl ConnectionConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub ports: Vec<u16>,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ports: DEFAULT_SCAN_PORTS.to_vec(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GuessConfig {
    pub threads: usize,
    pub zero_arg: bool,
    pub duplicates: bool,
    pub wordlist_folder: Option<PathBuf>,
    pub template_folder: Option<PathBuf>,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            zero_arg: false,
            duplicates: false,
            wordlist_folder: None,
            template_folder: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub verbose: bool,
    pub stack_trace: bool,
    pub no_color: bool,
}

impl RmgConfig {
    /// Reject values no action could work with
    pub fn validate(&self) -> Result<()> {
        if self.guess.threads == 0 {
            return Err(RmgError::Configuration(
                "guess.threads must be at least 1".to_string(),
            ));
        }

        if self.connection.connect_timeout_ms == 0 || self.connection.read_timeout_ms == 0 {
            return Err(RmgError::Configuration(
                "connection timeouts must be greater than zero".to_string(),
            ));
        }

        if self.scan.ports.contains(&0) {
            return Err(RmgError::Configuration(
                "scan.ports must not contain port 0".to_string(),
            ));
        }

        Ok(())
    }
}
