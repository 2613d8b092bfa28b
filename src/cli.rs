//! Command-line interface.
//!
//! Flags override values from the optional config file; the result is
//! validated once, before anything is started.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{read_config, validate_config, ConfigError, RedirectorConfig};

#[derive(Parser, Debug)]
#[command(name = "subdomain-redirector", version)]
#[command(about = "Redirect every request to <leaf label>.<TARGET_HOST>", long_about = None)]
pub struct Cli {
    /// Domain to redirect to; empty keeps the request host
    pub target_host: Option<String>,

    /// TCP listen address [default: :8080]
    #[arg(short = 'a', long = "listen")]
    pub listen_address: Option<String>,

    /// Original host query parameter, empty to disable [default: via]
    #[arg(short = 'q', long = "query-param")]
    pub host_query_param: Option<String>,

    /// Always redirect using HTTPS
    #[arg(short = 's', long = "always-https")]
    pub always_https: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load the config file (or defaults), apply flags and validate.
    pub fn resolve_config(&self) -> Result<RedirectorConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => read_config(path)?,
            None => RedirectorConfig::default(),
        };
        let config = self.apply(base);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply(&self, mut config: RedirectorConfig) -> RedirectorConfig {
        if let Some(target_host) = &self.target_host {
            config.redirect.target_host = target_host.clone();
        }
        if let Some(address) = &self.listen_address {
            config.listener.bind_address = address.clone();
        }
        if let Some(param) = &self.host_query_param {
            config.redirect.host_query_param = param.clone();
        }
        if self.always_https {
            config.redirect.always_https = true;
        }
        config
    }
}
