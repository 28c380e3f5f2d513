//! Configuration for the pokedex service.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (POKEDEX_API_BASE, POKEDEX_ADDRESS)
//! 2. Config file (.pokedex/config.yaml)
//! 3. Defaults (PokeAPI, 24 entries per page, 127.0.0.1:3000)
//!
//! Config file discovery:
//! - Searches current directory and parents for .pokedex/config.yaml
//! - Falls back to ~/.pokedex/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

pub const ENV_API_BASE: &str = "POKEDEX_API_BASE";
pub const ENV_ADDRESS: &str = "POKEDEX_ADDRESS";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub upstream: Option<UpstreamConfig>,
    #[serde(default)]
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: Option<String>,
    pub page_limit: Option<u32>,
    pub page_offset: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub address: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Upstream catalog settings
    pub upstream: UpstreamSettings,
    /// Address the HTTP server binds to
    pub address: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub page_limit: u32,
    pub page_offset: u32,
    pub timeout_seconds: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            page_limit: 24,
            page_offset: 0,
            timeout_seconds: 10,
        }
    }
}

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:3000";

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamSettings::default(),
            address: DEFAULT_ADDRESS.to_string(),
            config_file: None,
        }
    }
}

/// Find config file by searching current directory and parents, then home
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".pokedex").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(".pokedex").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge a parsed config file and environment overrides over the defaults
fn resolve(
    file: Option<ConfigFile>,
    config_file: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let defaults = UpstreamSettings::default();
    let upstream_file = file.as_ref().and_then(|f| f.upstream.clone());
    let server_file = file.as_ref().and_then(|f| f.server.clone());

    let base_url = env(ENV_API_BASE)
        .or_else(|| upstream_file.as_ref().and_then(|u| u.base_url.clone()))
        .unwrap_or(defaults.base_url);

    let upstream = UpstreamSettings {
        base_url,
        page_limit: upstream_file
            .as_ref()
            .and_then(|u| u.page_limit)
            .unwrap_or(defaults.page_limit),
        page_offset: upstream_file
            .as_ref()
            .and_then(|u| u.page_offset)
            .unwrap_or(defaults.page_offset),
        timeout_seconds: upstream_file
            .as_ref()
            .and_then(|u| u.timeout_seconds)
            .unwrap_or(defaults.timeout_seconds),
    };

    let address = env(ENV_ADDRESS)
        .or_else(|| server_file.and_then(|s| s.address))
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

    ResolvedConfig {
        upstream,
        address,
        config_file,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();
    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    Ok(resolve(file, config_file, |key| std::env::var(key).ok()))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
