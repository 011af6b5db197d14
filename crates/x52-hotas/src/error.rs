use thiserror::Error;

/// Error type for device sampling operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Failed to initialize the backend (SDL2 or subsystems).
    #[error("backend init failed: {0}")]
    BackendInit(String),
    /// No device is present at the requested index.
    #[error("device not found: {0}")]
    DeviceNotFound(u32),
    /// The device at this index already has an open handle.
    #[error("device already claimed: {0}")]
    DeviceClaimed(u32),
    /// The backend refused to open the device.
    #[error("unable to open device {index}: {message}")]
    Open { index: u32, message: String },
    /// Capabilities could not be fetched. Sizing depends on them, so this is fatal.
    #[error("capabilities unavailable: {0}")]
    Capabilities(String),
    /// Button index is out of the device's reported range.
    #[error("button index {index} out of range (device has {count} buttons)")]
    ButtonIndex { index: usize, count: usize },
    /// Operation attempted on a released handle.
    #[error("device handle is closed")]
    Closed,
}

/// Convenient result alias for sampler operations.
pub type Result<T> = std::result::Result<T, Error>;
