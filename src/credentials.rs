// src/credentials.rs
//! Bearer-token discovery.
//!
//! The token comes from the `NOTION_TOKEN` environment variable or, failing
//! that, from the first MCP server configuration that carries one. The set of
//! places to look is an explicit value so tests can supply their own.

use crate::constants::{MCP_CONFIG_FILE, PLUGIN_CACHE_PATTERN, TOKEN_ENV_VAR};
use crate::error::AppError;
use crate::types::ApiKey;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Where a resolved token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    ConfigFile(PathBuf),
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "{} environment variable", TOKEN_ENV_VAR),
            Self::ConfigFile(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A resolved bearer token.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: ApiKey,
    pub source: CredentialSource,
}

/// The ordered places a token may come from.
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    env_token: Option<String>,
    config_files: Vec<PathBuf>,
}

/// The subset of an `.mcp.json` file this client reads. Server entries stay
/// loose so an odd entry for some other server cannot hide the notion one.
#[derive(Debug, Deserialize)]
struct McpConfig {
    #[serde(default, rename = "mcpServers")]
    mcp_servers: BTreeMap<String, Value>,
}

impl CredentialSources {
    pub fn new(env_token: Option<String>, config_files: Vec<PathBuf>) -> Self {
        Self {
            env_token,
            config_files,
        }
    }

    /// No sources at all; resolving always fails.
    pub fn none() -> Self {
        Self::default()
    }

    /// Collects the process's real sources, in lookup order:
    /// the environment variable, `.mcp.json` in the working directory and each
    /// ancestor, `~/.claude/mcp.json`, then the plugin cache (newest first).
    pub fn from_environment() -> Self {
        let env_token = std::env::var(TOKEN_ENV_VAR).ok();

        let mut config_files = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            config_files.extend(cwd.ancestors().map(|dir| dir.join(MCP_CONFIG_FILE)));
        }
        if let Some(home) = dirs::home_dir() {
            config_files.push(home.join(".claude").join("mcp.json"));
            config_files.extend(plugin_cache_files(&home));
        }

        Self::new(env_token, config_files)
    }

    /// Resolves the token, or fails with `MissingCredential`.
    pub fn resolve(&self) -> Result<Credentials, AppError> {
        if let Some(token) = self.env_token.as_deref().filter(|t| !t.trim().is_empty()) {
            return Ok(Credentials {
                token: ApiKey::new(token)?,
                source: CredentialSource::Environment,
            });
        }

        for path in &self.config_files {
            if let Some(token) = token_from_config_file(path) {
                log::debug!("Using Notion token from {}", path.display());
                return Ok(Credentials {
                    token: ApiKey::new(token)?,
                    source: CredentialSource::ConfigFile(path.clone()),
                });
            }
        }

        Err(AppError::MissingCredential(format!(
            "set {} or add a notion server with env.{} to {}",
            TOKEN_ENV_VAR, TOKEN_ENV_VAR, MCP_CONFIG_FILE
        )))
    }
}

/// Plugin cache configs, sorted so the newest version directory comes first.
fn plugin_cache_files(home: &Path) -> Vec<PathBuf> {
    let pattern = home.join(PLUGIN_CACHE_PATTERN);
    let mut paths: Vec<PathBuf> = match glob::glob(&pattern.to_string_lossy()) {
        Ok(entries) => entries.filter_map(Result::ok).collect(),
        Err(e) => {
            log::warn!("Invalid plugin cache pattern {}: {}", pattern.display(), e);
            Vec::new()
        }
    };
    paths.sort();
    paths.reverse();
    paths
}

/// Reads one MCP config file. Missing files are silent; unreadable or
/// malformed ones are skipped with a warning.
fn token_from_config_file(path: &Path) -> Option<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Skipping unreadable {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<McpConfig>(&contents) {
        Ok(config) => notion_token(&config),
        Err(e) => {
            log::warn!("Skipping malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// First server whose name mentions notion and that carries a non-empty token.
fn notion_token(config: &McpConfig) -> Option<String> {
    config
        .mcp_servers
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains("notion"))
        .find_map(|(_, server)| {
            server
                .get("env")
                .and_then(|env| env.get(TOKEN_ENV_VAR))
                .and_then(Value::as_str)
                .filter(|t| !t.trim().is_empty())
                .map(str::to_string)
        })
}
