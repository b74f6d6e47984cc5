//! Passage configuration
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `PASSAGE_*` environment variables, then validation.
//!
//! ```toml
//! [gate]
//! home_route = "/"
//! require_correct_chain = false
//!
//! [wallet]
//! target_chain_id = 11155111
//! target_chain_name = "Sepolia"
//!
//! [session]
//! storage_dir = ".passage/session"
//!
//! [[routes]]
//! prefix = "/generate"
//! protected = true
//! require_correct_chain = true
//! ```

pub mod validation;

use crate::types::{ChainId, RoutePath, TargetChain};
use crate::{PassageError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validation::ConfigValidator;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "PASSAGE_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassageConfig {
    /// Route gate behaviour
    pub gate: GateConfig,
    /// Wallet provider settings
    pub wallet: WalletConfig,
    /// Session store settings
    pub session: SessionConfig,
    /// Protected route table
    pub routes: Vec<RouteRule>,
}

/// Route gate behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Where denied navigations are redirected
    pub home_route: String,
    /// Default chain requirement for protected routes that do not set one
    pub require_correct_chain: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            home_route: "/".to_string(),
            require_correct_chain: false,
        }
    }
}

impl GateConfig {
    /// Home route as a typed path.
    pub fn home(&self) -> RoutePath {
        RoutePath::new(self.home_route.clone())
    }
}

/// Wallet provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Expected chain identifier
    pub target_chain_id: u64,
    /// Expected chain display name
    pub target_chain_name: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        let target = TargetChain::default();
        Self {
            target_chain_id: target.id.value(),
            target_chain_name: target.name,
        }
    }
}

impl WalletConfig {
    /// Target chain as a typed value.
    pub fn target_chain(&self) -> TargetChain {
        TargetChain::new(ChainId(self.target_chain_id), self.target_chain_name.clone())
    }
}

/// Session store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for the file-backed session storage
    pub storage_dir: PathBuf,
    /// Storage key of the bearer token
    pub token_key: String,
    /// Storage key of the cached session metadata
    pub info_key: String,
    /// Maximum verification attempts per `verify` call
    pub verify_max_attempts: u32,
    /// Delay between verification attempts, in milliseconds
    pub verify_backoff_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".passage/session"),
            token_key: "wcsap_session_token".to_string(),
            info_key: "wcsap_session_info".to_string(),
            verify_max_attempts: 3,
            verify_backoff_ms: 500,
        }
    }
}

/// A single route table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Path prefix this rule covers
    pub prefix: String,
    /// Whether navigation requires authorization
    #[serde(default = "default_protected")]
    pub protected: bool,
    /// Chain requirement; falls back to `gate.require_correct_chain`
    #[serde(default)]
    pub require_correct_chain: Option<bool>,
}

fn default_protected() -> bool {
    true
}

impl PassageConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PassageError::not_found(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the file if it exists, otherwise start from defaults; then apply
    /// environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => Self::load_from_file(path)?,
            Some(path) => {
                tracing::debug!(path = %path.display(), "Config file absent, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PASSAGE_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply `PASSAGE_*` overrides from an explicit variable list.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            if let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) {
                self.set_from_string(&name.to_lowercase(), value.as_ref())?;
            }
        }
        Ok(())
    }

    /// Set a single value by its flattened name, e.g. `wallet_target_chain_id`.
    ///
    /// Unknown names are ignored so unrelated `PASSAGE_*` variables do not fail
    /// startup.
    pub fn set_from_string(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "gate_home_route" => self.gate.home_route = value.to_string(),
            "gate_require_correct_chain" => {
                self.gate.require_correct_chain = parse_bool(key, value)?;
            }
            "wallet_target_chain_id" => {
                self.wallet.target_chain_id = parse_u64(key, value)?;
            }
            "wallet_target_chain_name" => self.wallet.target_chain_name = value.to_string(),
            "session_storage_dir" => self.session.storage_dir = PathBuf::from(value),
            "session_token_key" => self.session.token_key = value.to_string(),
            "session_info_key" => self.session.info_key = value.to_string(),
            "session_verify_max_attempts" => {
                self.session.verify_max_attempts = u32::try_from(parse_u64(key, value)?)
                    .map_err(|_| PassageError::invalid(format!("{key}: value too large")))?;
            }
            "session_verify_backoff_ms" => {
                self.session.verify_backoff_ms = parse_u64(key, value)?;
            }
            _ => {
                tracing::debug!(key, "Ignoring unknown configuration override");
            }
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let mut validator = ConfigValidator::new();

        let mut gate = validator.for_field("gate");
        gate.route("home_route", &self.gate.home_route);
        validator.merge(gate);

        let mut wallet = validator.for_field("wallet");
        wallet
            .range("target_chain_id", self.wallet.target_chain_id, Some(1), None)
            .non_empty("target_chain_name", &self.wallet.target_chain_name);
        validator.merge(wallet);

        let mut session = validator.for_field("session");
        session
            .non_empty("token_key", &self.session.token_key)
            .non_empty("info_key", &self.session.info_key)
            .range(
                "verify_max_attempts",
                u64::from(self.session.verify_max_attempts),
                Some(1),
                Some(10),
            );
        validator.merge(session);

        validator.each("routes", &self.routes, |v, rule| {
            v.route("prefix", &rule.prefix);
        });

        if self.session.token_key == self.session.info_key {
            return Err(PassageError::invalid(
                "session.token_key and session.info_key must differ",
            ));
        }

        validator.result().map_err(PassageError::from)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PassageError::invalid(format!(
            "{key}: expected boolean, got {other:?}"
        ))),
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| PassageError::invalid(format!("{key}: {e}")))
}
