use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DaemonError {
    #[error("device error: {0}")]
    Device(#[from] x52_hotas::Error),
    #[error("profile error: {0}")]
    Profile(#[from] x52_profile::ProfileError),
    #[error("failed to set Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
