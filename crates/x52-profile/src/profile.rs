use std::time::Duration;

use x52_hotas::{Calibration, CalibrationPreset, DeviceIndex, LedColor, LedZone, MfdLine};

use crate::ButtonLabels;

/// Poll period used when the profile does not set one.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Lights `zone` with `color` while `button` is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedBinding {
    pub button: usize,
    pub zone: LedZone,
    pub color: LedColor,
}

/// Static text shown on one MFD line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfdText {
    pub line: MfdLine,
    pub text: String,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub device: DeviceIndex,
    pub poll_interval: Duration,
    pub preset: CalibrationPreset,
    pub calibration: Calibration,
    pub labels: ButtonLabels,
    pub leds: Vec<LedBinding>,
    pub mfd: Vec<MfdText>,
}

impl Default for Profile {
    fn default() -> Self {
        let preset = CalibrationPreset::default();
        Self {
            device: 0,
            poll_interval: DEFAULT_POLL_INTERVAL,
            preset,
            calibration: preset.calibration(),
            labels: ButtonLabels::x52_pro(),
            leds: Vec::new(),
            mfd: Vec::new(),
        }
    }
}

impl Profile {
    /// LED bindings attached to `button`.
    pub fn leds_for(&self, button: usize) -> impl Iterator<Item = &LedBinding> {
        self.leds.iter().filter(move |b| b.button == button)
    }
}
