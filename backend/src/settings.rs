//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from CLI flags, `INVENTORY_*` environment variables
//! or a configuration file. Session cookie settings are read separately, see
//! [`crate::inbound::http::session_config`].

use std::ffi::OsString;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MIRROR_DIR: &str = "./datos";

/// Process-wide configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INVENTORY")]
pub struct AppSettings {
    /// PostgreSQL URL. Without it every store lives in memory.
    pub database_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Directory holding `datos.txt`, `datos.json` and `datos.csv`.
    pub mirror_dir: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Load settings from the process arguments and environment.
    ///
    /// # Errors
    /// Returns the OrthoConfig error when a value cannot be parsed.
    pub fn load_from_args(
        args: impl IntoIterator<Item = OsString>,
    ) -> Result<Self, color_eyre::Report> {
        Self::load_from_iter(args).map_err(|err| color_eyre::eyre::eyre!("{err}"))
    }

    /// Host and port the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    #[must_use]
    pub fn mirror_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.mirror_dir.as_deref().unwrap_or(DEFAULT_MIRROR_DIR))
    }

    /// Pool settings when a database is configured.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let config = PoolConfig::new(url);
        Some(match self.db_max_connections {
            Some(max) => config.with_max_size(max),
            None => config,
        })
    }
}
