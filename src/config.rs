//! Application configuration loaded from environment variables.

use std::net::SocketAddr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::Result;
use crate::ingest::FieldMapping;
use crate::wager::{validate_fee, DEFAULT_FEE};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Interface to bind the HTTP server to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    // === Calculation Defaults ===
    /// Fee applied to effective-odds requests that omit one (0.03 = 3%).
    #[serde(default = "default_fee")]
    pub default_fee: Decimal,

    // === Ingestion ===
    /// Optional JSON file overriding the pick field mapping.
    #[serde(default)]
    pub field_map_path: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fee() -> Decimal {
    DEFAULT_FEE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            rust_log: default_log_level(),
            log_json: false,
            default_fee: default_fee(),
            field_map_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> std::result::Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.bind_address.trim().is_empty() {
            return Err("BIND_ADDRESS must not be empty".to_string());
        }

        if validate_fee(self.default_fee).is_err() {
            return Err(format!(
                "DEFAULT_FEE must be in [0, 1), got {}",
                self.default_fee
            ));
        }

        if self.socket_addr().is_err() {
            return Err(format!(
                "BIND_ADDRESS {:?} is not a valid IP address",
                self.bind_address
            ));
        }

        Ok(())
    }

    /// Tracing filter directive. `verbose` turns on debug output for this crate.
    pub fn log_directive(&self, verbose: bool) -> String {
        if verbose {
            "wager_calc=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Address the HTTP server listens on.
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind_address.trim(), self.port).parse()
    }

    /// Field mapping from `FIELD_MAP_PATH`, or the built-in default.
    pub fn field_mapping(&self) -> Result<FieldMapping> {
        match &self.field_map_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                Ok(FieldMapping::from_json_str(&raw)?)
            }
            None => Ok(FieldMapping::default()),
        }
    }
}
