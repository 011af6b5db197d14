use smallvec::{smallvec, SmallVec};

use crate::calibration::Calibration;
use crate::error::{Error, Result};
use crate::pov::PovAngle;
use crate::types::{Capabilities, Channel};

/// A single change reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Axis { index: usize, value: i32 },
    Button { index: usize, pressed: bool },
    Hat { index: usize, value: u32 },
}

/// Point-in-time raw state of one device.
///
/// Containers are sized exactly to the device capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSample {
    axes: SmallVec<[i32; 9]>,
    buttons: SmallVec<[bool; 64]>,
    hats: SmallVec<[u32; 1]>,
    // Slots still holding their rest value, never reported by the device
    seeded_axes: SmallVec<[bool; 9]>,
    seeded_hats: SmallVec<[bool; 1]>,
}

impl RawSample {
    /// Creates a sample at rest: every channel of `calibration` reads 0.0,
    /// buttons are released and hats centered.
    pub fn new(capabilities: Capabilities, calibration: &Calibration) -> Self {
        Self {
            axes: calibration.rest_axes(capabilities.axis_count),
            buttons: smallvec![false; capabilities.button_count],
            hats: smallvec![calibration.hat_encoding().centered(); capabilities.hat_count],
            seeded_axes: smallvec![true; capabilities.axis_count],
            seeded_hats: smallvec![true; capabilities.hat_count],
        }
    }

    /// Moves inputs the device has not reported yet to the rest values of
    /// `calibration`. Reported values are kept as they are.
    pub(crate) fn reseed(&mut self, calibration: &Calibration) {
        let rest = calibration.rest_axes(self.axes.len());
        for ((axis, &seeded), rest) in self.axes.iter_mut().zip(&self.seeded_axes).zip(rest) {
            if seeded {
                *axis = rest;
            }
        }
        let centered = calibration.hat_encoding().centered();
        for (hat, &seeded) in self.hats.iter_mut().zip(&self.seeded_hats) {
            if seeded {
                *hat = centered;
            }
        }
    }

    /// Merges one event into the sample. Returns false when the event
    /// addresses an input the device does not have.
    pub fn apply(&mut self, event: RawEvent) -> bool {
        match event {
            RawEvent::Axis { index, value } => {
                let Some(axis) = self.axes.get_mut(index) else {
                    return false;
                };
                *axis = value;
                self.seeded_axes[index] = false;
            }
            RawEvent::Button { index, pressed } => {
                let Some(button) = self.buttons.get_mut(index) else {
                    return false;
                };
                *button = pressed;
            }
            RawEvent::Hat { index, value } => {
                let Some(hat) = self.hats.get_mut(index) else {
                    return false;
                };
                *hat = value;
                self.seeded_hats[index] = false;
            }
        }
        true
    }

    pub fn axes(&self) -> &[i32] {
        &self.axes
    }

    pub fn buttons(&self) -> &[bool] {
        &self.buttons
    }

    pub fn hats(&self) -> &[u32] {
        &self.hats
    }

    /// Raw code of the first hat, if the device has one.
    pub fn hat_value(&self) -> Option<u32> {
        self.hats.first().copied()
    }

    pub fn is_button_pressed(&self, index: usize) -> Result<bool> {
        self.buttons
            .get(index)
            .copied()
            .ok_or(Error::ButtonIndex {
                index,
                count: self.buttons.len(),
            })
    }

    /// Capabilities matching the container sizes.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            axis_count: self.axes.len(),
            button_count: self.buttons.len(),
            hat_count: self.hats.len(),
        }
    }
}

/// Normalized view over a [`RawSample`]. Recomputed on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReading<'a> {
    axes: [f64; Channel::COUNT],
    pov: PovAngle,
    buttons: &'a [bool],
}

impl<'a> NormalizedReading<'a> {
    pub fn new(sample: &'a RawSample, calibration: &Calibration) -> Self {
        let mut axes = [0.0; Channel::COUNT];
        for channel in Channel::ALL {
            axes[channel.index()] = calibration.read(sample.axes(), channel);
        }
        let pov = sample
            .hat_value()
            .map(|raw| calibration.hat_encoding().normalize(raw))
            .unwrap_or_default();
        Self {
            axes,
            pov,
            buttons: sample.buttons(),
        }
    }

    #[inline]
    pub fn axis(&self, channel: Channel) -> f64 {
        self.axes[channel.index()]
    }

    /// All nine channels in [`Channel::ALL`] order.
    pub fn axes(&self) -> &[f64; Channel::COUNT] {
        &self.axes
    }

    pub fn pov(&self) -> PovAngle {
        self.pov
    }

    pub fn buttons(&self) -> &'a [bool] {
        self.buttons
    }

    /// Indices of the buttons currently held.
    pub fn pressed(&self) -> impl Iterator<Item = usize> + 'a {
        self.buttons
            .iter()
            .enumerate()
            .filter_map(|(i, &down)| down.then_some(i))
    }

    pub fn to_frame(&self) -> OutputFrame {
        let mut axes = [0.0; 6];
        for (slot, channel) in axes.iter_mut().zip(Channel::AXES) {
            *slot = self.axis(channel);
        }
        OutputFrame {
            axes,
            slider: self.axis(Channel::Slider),
            pov: self.pov.as_f64(),
            buttons: self.buttons.to_vec(),
        }
    }
}

/// Output layout consumed by real-time simulation bridges: six axes,
/// slider, POV angle and one flag per button.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputFrame {
    /// X, Y, Z, RX, RY, RZ.
    pub axes: [f64; 6],
    pub slider: f64,
    /// Degrees, or [`crate::POV_CENTERED`].
    pub pov: f64,
    pub buttons: Vec<bool>,
}

impl OutputFrame {
    /// Writes the frame into the four numeric ports of a simulation block.
    /// Buttons beyond the port width are dropped, missing ones read 0.0.
    pub fn write_ports(
        &self,
        axes: &mut [f64; 6],
        slider: &mut f64,
        pov: &mut f64,
        buttons: &mut [f64],
    ) {
        *axes = self.axes;
        *slider = self.slider;
        *pov = self.pov;
        for (i, out) in buttons.iter_mut().enumerate() {
            *out = match self.buttons.get(i) {
                Some(true) => 1.0,
                _ => 0.0,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pov::POV_CENTERED;

    fn x52_sample() -> RawSample {
        RawSample::new(Capabilities::X52_PRO, &Calibration::sdl())
    }

    #[test]
    fn new_sample_matches_capabilities() {
        let sample = x52_sample();
        assert_eq!(sample.axes().len(), 9);
        assert_eq!(sample.buttons().len(), 39);
        assert_eq!(sample.hats().len(), 1);
        assert_eq!(sample.capabilities(), Capabilities::X52_PRO);
        assert_eq!(sample.hat_value(), Some(0));
    }

    #[test]
    fn apply_is_last_writer_wins() {
        let mut sample = x52_sample();
        assert!(sample.apply(RawEvent::Axis { index: 0, value: 100 }));
        assert!(sample.apply(RawEvent::Axis { index: 0, value: -200 }));
        assert!(sample.apply(RawEvent::Button { index: 3, pressed: true }));
        assert!(sample.apply(RawEvent::Hat { index: 0, value: 0x04 }));
        assert_eq!(sample.axes()[0], -200);
        assert_eq!(sample.is_button_pressed(3), Ok(true));
        assert_eq!(sample.hat_value(), Some(0x04));
    }

    #[test]
    fn apply_drops_out_of_range_events() {
        let mut sample = x52_sample();
        let before = sample.clone();
        assert!(!sample.apply(RawEvent::Axis { index: 9, value: 1 }));
        assert!(!sample.apply(RawEvent::Button { index: 39, pressed: true }));
        assert!(!sample.apply(RawEvent::Hat { index: 1, value: 1 }));
        assert_eq!(sample, before);
    }

    #[test]
    fn button_index_is_bounds_checked() {
        let sample = x52_sample();
        for i in 0..39 {
            assert_eq!(sample.is_button_pressed(i), Ok(false));
        }
        assert_eq!(
            sample.is_button_pressed(39),
            Err(Error::ButtonIndex { index: 39, count: 39 })
        );
        assert!(sample.is_button_pressed(usize::MAX).is_err());
    }

    #[test]
    fn reading_normalizes_every_channel() {
        let mut sample = x52_sample();
        sample.apply(RawEvent::Axis { index: 0, value: 32767 });
        sample.apply(RawEvent::Axis { index: 1, value: 1 });
        sample.apply(RawEvent::Hat { index: 0, value: 0x01 });
        sample.apply(RawEvent::Button { index: 5, pressed: true });
        let cal = Calibration::sdl();
        let reading = NormalizedReading::new(&sample, &cal);
        assert!((reading.axis(Channel::X) - 1.0).abs() < 1e-9);
        assert_eq!(reading.axis(Channel::Y), 0.0);
        assert_eq!(reading.pov(), PovAngle::Degrees(0));
        assert_eq!(reading.pressed().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn hatless_device_reads_centered() {
        let caps = Capabilities {
            axis_count: 2,
            button_count: 1,
            hat_count: 0,
        };
        let sample = RawSample::new(caps, &Calibration::sdl());
        let cal = Calibration::sdl();
        let reading = NormalizedReading::new(&sample, &cal);
        assert_eq!(reading.pov(), PovAngle::Centered);
        assert_eq!(reading.axis(Channel::Slider), 0.0);
    }

    #[test]
    fn frame_uses_bridge_layout() {
        let mut sample = x52_sample();
        for slot in 2..5 {
            sample.apply(RawEvent::Axis { index: slot, value: 0 });
        }
        sample.apply(RawEvent::Axis { index: 6, value: -32767 });
        sample.apply(RawEvent::Button { index: 38, pressed: true });
        let cal = Calibration::sdl();
        let frame = NormalizedReading::new(&sample, &cal).to_frame();
        // stick at rest, throttle and rotaries halfway
        assert_eq!(frame.axes[0], 0.0);
        assert_eq!(frame.axes[1], 0.0);
        assert_eq!(frame.axes[5], 0.0);
        for unipolar in &frame.axes[2..5] {
            assert!((unipolar - 0.5).abs() < 1e-4);
        }
        assert!((frame.slider + 1.0).abs() < 1e-9);
        assert_eq!(frame.pov, f64::from(POV_CENTERED));
        assert_eq!(frame.buttons.len(), 39);
        assert!(frame.buttons[38]);
    }

    #[test]
    fn write_ports_pads_and_truncates_buttons() {
        let frame = OutputFrame {
            axes: [0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
            slider: -0.5,
            pov: 90.0,
            buttons: vec![true, false, true],
        };
        let mut axes = [0.0; 6];
        let mut slider = 0.0;
        let mut pov = 0.0;
        let mut buttons = [9.0; 5];
        frame.write_ports(&mut axes, &mut slider, &mut pov, &mut buttons);
        assert_eq!(axes, frame.axes);
        assert_eq!(slider, -0.5);
        assert_eq!(pov, 90.0);
        assert_eq!(buttons, [1.0, 0.0, 1.0, 0.0, 0.0]);

        let mut narrow = [0.0; 2];
        frame.write_ports(&mut axes, &mut slider, &mut pov, &mut narrow);
        assert_eq!(narrow, [1.0, 0.0]);
    }

    #[test]
    fn fresh_direct_input_sample_reads_rest() {
        let cal = Calibration::direct_input();
        let caps = Capabilities {
            axis_count: 7,
            button_count: 39,
            hat_count: 1,
        };
        let sample = RawSample::new(caps, &cal);
        let reading = NormalizedReading::new(&sample, &cal);
        for channel in Channel::ALL {
            assert_eq!(reading.axis(channel), 0.0, "{channel}");
        }
        assert_eq!(reading.pov(), PovAngle::Centered);
    }

    #[test]
    fn reseed_moves_only_unreported_inputs() {
        let mut sample = x52_sample();
        sample.apply(RawEvent::Axis { index: 0, value: 1234 });
        sample.reseed(&Calibration::direct_input());
        assert_eq!(sample.axes()[0], 1234);
        assert_eq!(sample.axes()[5], 32767);
        assert_eq!(sample.hat_value(), Some(0xFFFF));

        sample.apply(RawEvent::Hat { index: 0, value: 9000 });
        sample.reseed(&Calibration::sdl());
        assert_eq!(sample.hat_value(), Some(9000));
        assert_eq!(sample.axes()[5], 0);
    }
}
