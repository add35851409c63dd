use clap::Parser;
use std::fs;
use std::time::Duration;

use crate::backend::{BackendConfig, RestConfig};
use crate::error::CoreError;

pub mod types;
pub mod validation;

pub use types::{Args, BackendKind, CleanArgs, Command};

/// # Errors
///
/// Will return `Err` if the arguments do not describe a usable backend
pub fn args_checks() -> Result<CleanArgs, CoreError> {
    CleanArgs::new(Args::parse())
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if the rest backend is selected without a url or key
    pub fn new(args: Args) -> Result<Self, CoreError> {
        let backend = match args.backend {
            BackendKind::Rest => {
                let url = args
                    .api_url
                    .filter(|u| !u.trim().is_empty())
                    .ok_or_else(|| CoreError::Config("rest backend needs --api-url".into()))?;
                let api_key = args
                    .api_key
                    .as_deref()
                    .map(validation::resolve_secret)
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| CoreError::Config("rest backend needs --api-key".into()))?;
                let mut config = RestConfig::new(url, api_key);
                config.timeout = Duration::from_secs(args.timeout_secs);
                BackendConfig::Rest(config)
            }
            BackendKind::Sqlite => BackendConfig::Sqlite {
                db_name: args.db_name,
                startup_sql: args.db_startup_script.as_deref().map(combine_sql_scripts),
            },
        };
        Ok(CleanArgs {
            backend,
            command: args.command,
        })
    }
}

/// Concatenates every readable `;`-separated script, skipping the ones that fail.
#[must_use]
pub fn combine_sql_scripts(files: &str) -> String {
    let mut full_script = String::new();
    for file in files.split(';') {
        let file = file.trim();
        if file.is_empty() {
            continue;
        }
        match fs::read_to_string(file) {
            Ok(script) => {
                full_script.push_str(&script);
                // push a newline just in case
                full_script.push('\n');
            }
            Err(e) => {
                tracing::warn!("failed to read SQL startup script '{file}': {e}");
            }
        }
    }
    full_script
}
