use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::domain::StvError;

const DEFAULT_DIRECTIVE: &str = "stv=info";

/// Expand `~` and environment variables in a user supplied path.
pub fn expand_path(path: &str) -> Result<PathBuf, StvError> {
    let expanded = shellexpand::full(path)
        .map_err(|e| StvError::InvalidConfig(format!("cannot expand {path:?}: {e}")))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Log to a file, the terminal belongs to the UI. `RUST_LOG` overrides the
/// default level.
pub fn init_logging(path: &str) -> Result<PathBuf, StvError> {
    let path = expand_path(path)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| StvError::InvalidConfig(format!("logging: {e}")))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(expand_path("/tmp/stv.log").unwrap(), PathBuf::from("/tmp/stv.log"));
    }

    #[test]
    fn expands_env_vars() {
        let home = std::env::var("HOME").unwrap_or_default();
        if !home.is_empty() {
            assert_eq!(
                expand_path("$HOME/stv.log").unwrap(),
                PathBuf::from(format!("{home}/stv.log"))
            );
        }
    }

    #[test]
    fn unknown_var_is_a_config_error() {
        let err = expand_path("$STV_SURELY_UNSET_VARIABLE/x.log").unwrap_err();
        assert!(matches!(err, StvError::InvalidConfig(_)));
    }
}
