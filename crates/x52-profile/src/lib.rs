mod labels;
mod parse;
mod profile;
mod v1;
mod workspace;

use thiserror::Error;

pub use labels::ButtonLabels;
pub use parse::parse_profile;
pub use profile::{LedBinding, MfdText, Profile, DEFAULT_POLL_INTERVAL};
pub use workspace::{Workspace, PROFILE_FILE_NAME};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("yaml deserialize error: {0}")]
    YamlDeserializeError(#[from] serde_yaml::Error),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("v1 profile error: {0}")]
    V1ProfileError(#[from] v1::Error),

    #[error("current directory not set")]
    CurrentDirNotSet,
    #[error("profile not found: {0}")]
    ProfileNotFound(String),
    #[error("path error: {0}")]
    PathError(#[from] std::io::Error),
}
