use anyhow::{anyhow, Context, Result};
use jobmatch::{EngineConfig, GuardMode};

/// Application configuration loaded from environment variables.
/// Read once at startup; the guard mode is fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub guard_mode: GuardMode,
    pub default_top_n: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let default_top_n = var("DEFAULT_TOP_N", "5")
            .parse::<usize>()
            .context("DEFAULT_TOP_N must be a positive integer")?;
        if default_top_n == 0 {
            return Err(anyhow!("DEFAULT_TOP_N must be at least 1"));
        }

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            guard_mode: var("WHITELIST_GUARD_MODE", "permissive")
                .parse::<GuardMode>()
                .map_err(|e| anyhow!(e))
                .context("WHITELIST_GUARD_MODE is invalid")?,
            default_top_n,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            guard_mode: self.guard_mode,
            default_top_n: self.default_top_n,
        }
    }
}
