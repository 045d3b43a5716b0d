use billcheck_config::ConfigError;
use billcheck_core::CoreError;
use thiserror::Error;

/// Error type surfaced by session-level operations.
#[derive(Debug, Error)]
pub enum BillcheckError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
