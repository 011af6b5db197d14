mod parse;
mod profile;

use thiserror::Error;

pub(crate) use profile::ProfileV1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid calibration preset: {0}")]
    InvalidPreset(String),
    #[error("invalid hat encoding: {0}")]
    InvalidHatEncoding(String),
    #[error("invalid channel: {0}")]
    InvalidChannel(String),
    #[error("invalid deadzone for {0}: {1}")]
    InvalidDeadzone(String, f64),
    #[error("invalid full scale for {0}: {1}")]
    InvalidFullScale(String, f64),
    #[error("poll interval must be positive")]
    InvalidPollInterval,
    #[error("invalid led zone: {0}")]
    InvalidZone(String),
    #[error("invalid led color: {0}")]
    InvalidColor(String),
    #[error("invalid mfd line: {0}")]
    InvalidMfdLine(u8),
    #[error("mfd text does not fit on a line: \"{0}\"")]
    MfdTextTooLong(String),
}
