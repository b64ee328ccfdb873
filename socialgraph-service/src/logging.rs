use crate::{ServiceError, ServiceResult};
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `fmt` subscriber filtered by `filter`
/// (e.g. `"info"` or `"socialgraph_mapping=debug"`).
pub fn init_logging(filter: &str) -> ServiceResult<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(filter)
                .map_err(|e| ServiceError::Config(format!("invalid log filter: {e}")))?,
        )
        .with_target(true)
        .try_init()
        .map_err(|_| ServiceError::Config("logging already initialized".into()))
}
