use crate::errors::RecopyError;
use tracing_subscriber::{fmt, EnvFilter};

pub fn initialize_logger(verbose: bool) -> Result<(), RecopyError> {
    let default_directive = if verbose { "recopy=debug" } else { "recopy=warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| RecopyError::ConfigError(format!("Failed to set global logger: {}", e)))
}
