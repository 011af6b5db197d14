use smallvec::{smallvec, SmallVec};

use crate::pov::HatEncoding;
use crate::types::Channel;

/// Deadzone applied around the rest position of every stick axis.
pub const DEFAULT_DEADZONE: f64 = 3500.0;

/// Half of the raw axis span.
const HALF_SCALE: f64 = 32767.0;
/// Full raw axis span.
const FULL_SCALE: f64 = 65535.0;

/// Mapping from one raw axis slot to a signed unit fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelCalibration {
    /// Raw axis slot feeding the channel. `None` leaves the channel at rest.
    pub source: Option<usize>,
    /// Raw value treated as zero.
    pub center: f64,
    /// Distance from `center` that maps to a magnitude of 1.0.
    pub full_scale: f64,
    /// Distances from `center` up to and including this value collapse to 0.0.
    pub deadzone: f64,
    /// Flips the direction of the channel.
    pub inverted: bool,
}

impl ChannelCalibration {
    /// Channel centered on `center` and scaled by `full_scale`.
    pub const fn new(source: usize, center: f64, full_scale: f64) -> Self {
        Self {
            source: Some(source),
            center,
            full_scale,
            deadzone: DEFAULT_DEADZONE,
            inverted: false,
        }
    }

    /// Channel with no raw axis behind it.
    pub const fn unbacked() -> Self {
        Self {
            source: None,
            center: 0.0,
            full_scale: FULL_SCALE,
            deadzone: 0.0,
            inverted: false,
        }
    }

    #[must_use]
    pub const fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    #[must_use]
    pub const fn with_deadzone(mut self, deadzone: f64) -> Self {
        self.deadzone = deadzone;
        self
    }

    /// Maps a raw reading to `[-1.0, 1.0]`.
    #[inline]
    pub fn normalize(&self, raw: i32) -> f64 {
        let mut offset = f64::from(raw) - self.center;
        if self.inverted {
            offset = -offset;
        }
        if offset.abs() <= self.deadzone || self.full_scale <= 0.0 {
            return 0.0;
        }
        (offset / self.full_scale).clamp(-1.0, 1.0)
    }
}

/// Named calibration sets for the two raw encodings the X52 Pro is read through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalibrationPreset {
    /// Signed axes centered on zero (SDL2).
    #[default]
    Sdl,
    /// Unsigned axes in 0..=65535 centered on 32767 (DirectInput).
    DirectInput,
}

impl CalibrationPreset {
    pub fn calibration(self) -> Calibration {
        match self {
            CalibrationPreset::Sdl => Calibration::sdl(),
            CalibrationPreset::DirectInput => Calibration::direct_input(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CalibrationPreset::Sdl => "sdl",
            CalibrationPreset::DirectInput => "direct_input",
        }
    }
}

/// Per-channel calibration plus the hat encoding of one device.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    channels: [ChannelCalibration; Channel::COUNT],
    hat: HatEncoding,
}

impl Calibration {
    pub const fn new(channels: [ChannelCalibration; Channel::COUNT], hat: HatEncoding) -> Self {
        Self { channels, hat }
    }

    /// SDL2 reports every axis as `i16`. Throttle and rotaries are unipolar.
    pub fn sdl() -> Self {
        Self::new(
            [
                ChannelCalibration::new(0, 0.0, HALF_SCALE),
                // SDL flips the y-axis
                ChannelCalibration::new(1, 0.0, HALF_SCALE).inverted(),
                ChannelCalibration::new(2, HALF_SCALE, FULL_SCALE).inverted(),
                ChannelCalibration::new(3, -HALF_SCALE, FULL_SCALE),
                ChannelCalibration::new(4, -HALF_SCALE, FULL_SCALE),
                ChannelCalibration::new(5, 0.0, HALF_SCALE),
                ChannelCalibration::new(6, 0.0, HALF_SCALE),
                ChannelCalibration::new(7, 0.0, HALF_SCALE),
                ChannelCalibration::new(8, 0.0, HALF_SCALE),
            ],
            HatEncoding::Bitmask,
        )
    }

    /// DirectInput reports axes in `0..=65535`. Rotaries and slider carry no deadzone.
    pub fn direct_input() -> Self {
        Self::new(
            [
                ChannelCalibration::new(0, HALF_SCALE, HALF_SCALE),
                ChannelCalibration::new(1, HALF_SCALE, HALF_SCALE).inverted(),
                ChannelCalibration::new(2, FULL_SCALE, FULL_SCALE).inverted(),
                ChannelCalibration::new(3, 0.0, FULL_SCALE).with_deadzone(0.0),
                ChannelCalibration::new(4, 0.0, FULL_SCALE).with_deadzone(0.0),
                ChannelCalibration::new(5, HALF_SCALE, HALF_SCALE),
                ChannelCalibration::new(6, 0.0, FULL_SCALE).with_deadzone(0.0),
                ChannelCalibration::unbacked(),
                ChannelCalibration::unbacked(),
            ],
            HatEncoding::Centidegrees,
        )
    }

    pub fn channel(&self, channel: Channel) -> &ChannelCalibration {
        &self.channels[channel.index()]
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut ChannelCalibration {
        &mut self.channels[channel.index()]
    }

    pub fn hat_encoding(&self) -> HatEncoding {
        self.hat
    }

    pub fn set_hat_encoding(&mut self, hat: HatEncoding) {
        self.hat = hat;
    }

    /// Overrides the deadzone of every backed channel.
    #[must_use]
    pub fn with_deadzone(mut self, deadzone: f64) -> Self {
        for c in self.channels.iter_mut().filter(|c| c.source.is_some()) {
            c.deadzone = deadzone;
        }
        self
    }

    /// Raw slot values that read 0.0 on every backed channel. Slots feeding
    /// no channel rest at 0.
    pub fn rest_axes(&self, axis_count: usize) -> SmallVec<[i32; 9]> {
        let mut axes = smallvec![0; axis_count];
        for c in &self.channels {
            if let Some(slot) = c.source.and_then(|s| axes.get_mut(s)) {
                *slot = c.center.round() as i32;
            }
        }
        axes
    }

    /// Normalizes `raw` as read from the slot feeding `channel`.
    #[inline]
    pub fn normalize_axis(&self, raw: i32, channel: Channel) -> f64 {
        self.channel(channel).normalize(raw)
    }

    /// Normalizes `channel` out of a full raw axis slice. Missing slots read 0.0.
    #[inline]
    pub fn read(&self, axes: &[i32], channel: Channel) -> f64 {
        let calibration = self.channel(channel);
        match calibration.source.and_then(|slot| axes.get(slot)) {
            Some(&raw) => calibration.normalize(raw),
            None => 0.0,
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::sdl()
    }
}
