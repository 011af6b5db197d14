//! Polling and normalization core for the Saitek/Logitech X52 Pro HOTAS.
//!
//! A [`DeviceSampler`] owns one open controller. Each call to
//! [`DeviceSampler::poll`] drains the events queued by the platform backend
//! into a [`RawSample`]; readings are derived from that snapshot through a
//! per-channel [`Calibration`].

mod backend;
mod calibration;
mod error;
mod output;
mod pov;
mod registry;
mod sample;
mod sampler;
#[cfg(feature = "sdl2-backend")]
mod sdl;
mod types;
pub mod virtual_device;

pub use crate::backend::{Backend, Device};
pub use crate::calibration::{
    Calibration, CalibrationPreset, ChannelCalibration, DEFAULT_DEADZONE,
};
pub use crate::error::{Error, Result};
pub use crate::output::{
    fit_mfd_text, LedColor, LedCommand, LedZone, MfdLine, OutputSurface, MFD_LINES,
    MFD_LINE_WIDTH,
};
pub use crate::pov::{HatEncoding, PovAngle, POV_CENTERED};
pub use crate::registry::DeviceRegistry;
pub use crate::sample::{NormalizedReading, OutputFrame, RawEvent, RawSample};
pub use crate::sampler::DeviceSampler;
#[cfg(feature = "sdl2-backend")]
pub use crate::sdl::{Sdl2Backend, Sdl2Device};
pub use crate::types::{Capabilities, Channel, DeviceIndex, DeviceInfo};
