//! # CLI Configuration
//!
//! Resolves the settings shared by every subcommand. Precedence is
//! command-line flags, then environment, then defaults:
//!
//! | Setting    | Flag             | Environment      | Default         |
//! |------------|------------------|------------------|-----------------|
//! | catalogue  | `--catalogue`    | `ACTP_CATALOGUE` | built-in only   |
//! | log filter | `-v` (repeated)  | `ACTP_LOG`       | `warn`          |
//! | log format | `--log-format`   |                  | `text`          |

use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::{Context, Result};

use actp_eip712::{builtin_catalogue, builtin_registry, Catalogue, TypeHashRegistry};

/// Environment variable naming an extra catalogue file.
pub const CATALOGUE_ENV: &str = "ACTP_CATALOGUE";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "ACTP_LOG";

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Values taken from global command-line flags.
#[derive(Debug, Clone, Default)]
pub struct FlagOverrides {
    /// Number of `-v` repetitions.
    pub verbose: u8,
    /// `--catalogue`.
    pub catalogue: Option<PathBuf>,
    /// `--log-format`.
    pub log_format: LogFormat,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Extra catalogue layered over the built-in one.
    pub catalogue: Option<PathBuf>,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Log line format.
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Resolve from flags and an environment lookup.
    ///
    /// Empty environment values count as unset.
    pub fn resolve(flags: FlagOverrides, env: impl Fn(&str) -> Option<String>) -> Self {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let catalogue = flags
            .catalogue
            .or_else(|| env(CATALOGUE_ENV).map(PathBuf::from));

        let log_filter = match flags.verbose {
            0 => env(LOG_ENV).unwrap_or_else(|| "warn".to_string()),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        };

        Self {
            catalogue,
            log_filter,
            log_format: flags.log_format,
        }
    }

    /// Resolve from flags and the process environment.
    pub fn from_env(flags: FlagOverrides) -> Self {
        Self::resolve(flags, |key| std::env::var(key).ok())
    }

    /// The registry subcommands resolve message types against.
    ///
    /// Without an extra catalogue this is the shared built-in registry.
    /// Otherwise a new registry is built from the built-in catalogue followed
    /// by the extra one; identifiers that collide are rejected.
    pub fn registry(&self) -> Result<Cow<'static, TypeHashRegistry>> {
        let Some(path) = &self.catalogue else {
            return Ok(Cow::Borrowed(builtin_registry()?));
        };

        let extra = Catalogue::from_path(path)?;
        tracing::info!(
            path = %path.display(),
            schemas = extra.schemas.len(),
            "extending built-in catalogue"
        );
        let mut catalogue = builtin_catalogue();
        catalogue.extend(extra);
        let registry = TypeHashRegistry::from_catalogue(catalogue.schemas)
            .with_context(|| format!("failed to register catalogue {}", path.display()))?;
        Ok(Cow::Owned(registry))
    }
}
