use x52_hotas::{
    virtual_device::VirtualFeed, Calibration, Channel, ChannelCalibration, PovAngle,
};

/// Ticks per full back-and-forth travel of an axis.
const PERIOD: u32 = 200;
/// Ticks each button stays held.
const HOLD: u32 = 25;
const BUTTONS: usize = 39;

/// Scripted input for the virtual X52 Pro: stick and throttle sweep end to
/// end, buttons are held one after another and the hat walks the compass.
pub(crate) struct VirtualSweep {
    feed: VirtualFeed,
    calibration: Calibration,
    tick: u32,
}

impl VirtualSweep {
    pub fn new(feed: VirtualFeed, calibration: Calibration) -> Self {
        Self {
            feed,
            calibration,
            tick: 0,
        }
    }

    /// Queues the events of the next tick.
    pub fn advance(&mut self) {
        let tick = self.tick;
        self.tick = self.tick.wrapping_add(1);

        let position = triangle(tick);
        // throttle is unipolar
        let throttle = (position + 1.0) / 2.0;
        for (channel, position) in [
            (Channel::X, position),
            (Channel::Y, position),
            (Channel::Z, throttle),
        ] {
            let calibration = self.calibration.channel(channel);
            if let Some(slot) = calibration.source {
                self.feed.axis(slot, raw_at(calibration, position));
            }
        }

        if tick % HOLD == 0 {
            let step = (tick / HOLD) as usize;
            let previous = (step + BUTTONS - 1) % BUTTONS;
            self.feed.button(previous, false);
            self.feed.button(step % BUTTONS, true);

            let angle = match step % 9 {
                8 => PovAngle::Centered,
                n => PovAngle::Degrees(n as u16 * 45),
            };
            self.feed.pov(self.calibration.hat_encoding(), angle);
        }
    }
}

/// -1.0 -> 1.0 -> -1.0 over one period.
fn triangle(tick: u32) -> f64 {
    let phase = f64::from(tick % PERIOD) / f64::from(PERIOD);
    if phase < 0.5 {
        phase * 4.0 - 1.0
    } else {
        3.0 - phase * 4.0
    }
}

/// Raw value that `calibration` maps to `position`, ignoring the deadzone.
fn raw_at(calibration: &ChannelCalibration, position: f64) -> i32 {
    let offset = position * calibration.full_scale;
    let offset = if calibration.inverted { -offset } else { offset };
    (calibration.center + offset).round() as i32
}

#[cfg(test)]
mod tests {
    use x52_hotas::{
        virtual_device::{VirtualBackend, VirtualDeviceSpec},
        DeviceSampler,
    };

    use super::*;

    #[test]
    fn triangle_spans_full_travel() {
        assert_eq!(triangle(0), -1.0);
        assert_eq!(triangle(PERIOD / 2), 1.0);
        assert!(triangle(PERIOD / 4).abs() < 1e-9);
    }

    #[test]
    fn raw_at_inverts_normalization() {
        let calibration = Calibration::sdl();
        for channel in [Channel::X, Channel::Y] {
            let c = calibration.channel(channel);
            assert_eq!(c.normalize(raw_at(c, 1.0)), 1.0);
            assert_eq!(c.normalize(raw_at(c, -1.0)), -1.0);
        }
    }

    #[test]
    fn sweep_drives_a_sampler() {
        let mut backend = VirtualBackend::new();
        let feed = backend.plug(VirtualDeviceSpec::x52_pro());
        let calibration = Calibration::direct_input();
        let mut sampler =
            DeviceSampler::open(&mut backend, 0, calibration.clone()).expect("open");
        let mut sweep = VirtualSweep::new(feed, calibration);

        sweep.advance();
        sampler.poll().expect("poll");
        assert_eq!(sampler.axis(Channel::X), -1.0);
        assert_eq!(sampler.is_button_pressed(0), Ok(true));
        assert_eq!(sampler.pov(), PovAngle::Degrees(0));

        for _ in 0..HOLD {
            sweep.advance();
        }
        sampler.poll().expect("poll");
        assert_eq!(sampler.is_button_pressed(0), Ok(false));
        assert_eq!(sampler.is_button_pressed(1), Ok(true));
        assert_eq!(sampler.pov(), PovAngle::Degrees(45));
    }
}
