use crate::{nav::NavError, source::AccessError, spec::ConfigError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Unified public error for callers that do not want to distinguish
/// the three failure surfaces. Each variant is surfaced unchanged;
/// nothing is logged, retried, or suppressed on the way up.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Navigation(#[from] NavError),
}
