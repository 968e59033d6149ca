//! Where to find the telemetry feed and the key assets.

use std::env;
use std::path::PathBuf;

/// Port the simulator plugin publishes telemetry on.
pub const TELEMETRY_PORT: u16 = 22223;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_ASSETS_DIR: &str = "Assets";

pub const HOST_VAR: &str = "RAILDRIVER_HOST";
pub const ASSETS_VAR: &str = "RAILDRIVER_ASSETS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub assets_dir: PathBuf,
}

impl Config {
    /// Host comes from the first argument or `RAILDRIVER_HOST`, assets from
    /// `RAILDRIVER_ASSETS`.
    pub fn from_env() -> Self {
        Self::resolve(
            env::args().nth(1),
            env::var(HOST_VAR).ok(),
            env::var_os(ASSETS_VAR).map(PathBuf::from),
        )
    }

    fn resolve(arg: Option<String>, host_var: Option<String>, assets: Option<PathBuf>) -> Self {
        Self {
            host: arg
                .or(host_var)
                .unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: TELEMETRY_PORT,
            assets_dir: assets.unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
        }
    }

    pub fn address(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}
