//! Runtime configuration for the batch entry point.
//!
//! Credentials and the catalog endpoint come from the environment (a `.env`
//! file is honoured by the binary via `dotenvy`), but they are parsed exactly
//! once into an explicit [`Config`] value that gets passed by parameter into
//! the catalog client. No global state holds the credential.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, info};

/// Environment variable naming the Supabase project base URL.
pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
/// Environment variable carrying the service-role key used for catalog reads.
pub const SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
/// Optional override for the artifact root directory.
pub const OUTPUT_ROOT_VAR: &str = "OUTPUT_ROOT";

const DEFAULT_OUTPUT_ROOT: &str = "public";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Supabase project, without the `/rest/v1` suffix.
    pub supabase_url: String,
    /// Service-role key sent as both `apikey` and bearer token.
    pub service_role_key: String,
    /// Directory under which the `qrcodes/` artifact tree is written.
    pub output_root: PathBuf,
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(
            supabase_url = %self.supabase_url,
            output_root = %self.output_root.display(),
            key_set = !self.service_role_key.is_empty(),
            "Loaded config"
        );
    }
}

/// Reads the batch configuration from the environment. Missing or empty
/// required variables are configuration errors surfaced before any catalog
/// request or filesystem write happens.
pub fn load_config() -> Result<Config> {
    let supabase_url = require_var(SUPABASE_URL_VAR)?;
    let service_role_key = require_var(SERVICE_ROLE_KEY_VAR)?;

    let output_root = match env::var(OUTPUT_ROOT_VAR) {
        Ok(root) if !root.trim().is_empty() => PathBuf::from(root),
        _ => PathBuf::from(DEFAULT_OUTPUT_ROOT),
    };

    let config = Config {
        supabase_url: supabase_url.trim_end_matches('/').to_string(),
        service_role_key,
        output_root,
    };
    config.trace_loaded();
    Ok(config)
}

fn require_var(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => {
            error!(var = name, "Environment variable is set but empty");
            Err(anyhow::anyhow!("{name} environment variable is empty"))
        }
        Err(e) => {
            error!(var = name, error = ?e, "Environment variable not set");
            Err(anyhow::anyhow!("{name} environment variable not set: {e}"))
        }
    }
}
