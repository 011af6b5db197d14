use ahash::AHashMap;
use smallvec::SmallVec;

use x52_hotas::{LedColor, LedZone, MfdLine, NormalizedReading, OutputFrame};
use x52_profile::Profile;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    Button { index: usize, pressed: bool },
    Led { zone: LedZone, color: LedColor },
    Text { line: MfdLine, text: String },
    Frame(OutputFrame),
}

/// Turns consecutive readings into the feedback the profile asks for.
pub(crate) struct X52App {
    profile: Profile,
    buttons: Vec<bool>,
    frame: Option<OutputFrame>,
    leds: AHashMap<LedZone, LedColor>,
}

impl X52App {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            buttons: Vec::new(),
            frame: None,
            leds: AHashMap::new(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// MFD text from the profile, and every bound zone switched off.
    pub fn start(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .profile
            .mfd
            .iter()
            .map(|m| Action::Text {
                line: m.line,
                text: m.text.clone(),
            })
            .collect();
        for zone in self.bound_zones() {
            self.leds.insert(zone, LedColor::Off);
            actions.push(Action::Led {
                zone,
                color: LedColor::Off,
            });
        }
        actions
    }

    pub fn update(&mut self, reading: &NormalizedReading<'_>) -> Vec<Action> {
        let mut actions = Vec::new();

        let buttons = reading.buttons();
        if self.buttons.len() != buttons.len() {
            self.buttons = vec![false; buttons.len()];
        }
        let mut changed = false;
        for (index, (&now, prev)) in buttons.iter().zip(self.buttons.iter_mut()).enumerate() {
            if now != *prev {
                *prev = now;
                changed = true;
                actions.push(Action::Button {
                    index,
                    pressed: now,
                });
            }
        }
        if changed {
            self.refresh_leds(&mut actions);
        }

        let frame = reading.to_frame();
        if self.frame.as_ref() != Some(&frame) {
            self.frame = Some(frame.clone());
            actions.push(Action::Frame(frame));
        }
        actions
    }

    /// Lit zones go dark and the MFD is cleared.
    pub fn stop(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        for zone in self.bound_zones() {
            if self.leds.insert(zone, LedColor::Off) != Some(LedColor::Off) {
                actions.push(Action::Led {
                    zone,
                    color: LedColor::Off,
                });
            }
        }
        for m in &self.profile.mfd {
            actions.push(Action::Text {
                line: m.line,
                text: String::new(),
            });
        }
        actions
    }

    fn refresh_leds(&mut self, actions: &mut Vec<Action>) {
        for zone in self.bound_zones() {
            let color = self.zone_color(zone);
            if self.leds.insert(zone, color) != Some(color) {
                actions.push(Action::Led { zone, color });
            }
        }
    }

    // The last held binding of a zone wins.
    fn zone_color(&self, zone: LedZone) -> LedColor {
        self.profile
            .leds
            .iter()
            .rev()
            .find(|b| b.zone == zone && self.buttons.get(b.button).copied().unwrap_or(false))
            .map(|b| b.color)
            .unwrap_or(LedColor::Off)
    }

    fn bound_zones(&self) -> SmallVec<[LedZone; 11]> {
        let mut zones = SmallVec::new();
        for binding in &self.profile.leds {
            if !zones.contains(&binding.zone) {
                zones.push(binding.zone);
            }
        }
        zones
    }
}

#[cfg(test)]
mod tests {
    use x52_hotas::{Calibration, Capabilities, RawEvent, RawSample};
    use x52_profile::{LedBinding, MfdText};

    use super::*;

    fn profile() -> Profile {
        Profile {
            leds: vec![
                LedBinding {
                    button: 2,
                    zone: LedZone::FireA,
                    color: LedColor::Red,
                },
                LedBinding {
                    button: 3,
                    zone: LedZone::FireA,
                    color: LedColor::Green,
                },
            ],
            mfd: vec![MfdText {
                line: MfdLine::new(0).expect("line"),
                text: "X52 PRO".to_string(),
            }],
            ..Profile::default()
        }
    }

    fn sample() -> RawSample {
        RawSample::new(Capabilities::X52_PRO, &Calibration::sdl())
    }

    fn update(app: &mut X52App, sample: &RawSample) -> Vec<Action> {
        let calibration = Calibration::sdl();
        app.update(&NormalizedReading::new(sample, &calibration))
    }

    #[test]
    fn start_writes_text_and_clears_bound_zones() {
        let mut app = X52App::new(profile());
        let actions = app.start();
        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[0], Action::Text { text, .. } if text == "X52 PRO"));
        assert_eq!(
            actions[1],
            Action::Led {
                zone: LedZone::FireA,
                color: LedColor::Off
            }
        );
    }

    #[test]
    fn first_update_reports_the_frame_only() {
        let mut app = X52App::new(profile());
        app.start();
        let actions = update(&mut app, &sample());
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::Frame(_)));
        assert!(update(&mut app, &sample()).is_empty());
    }

    #[test]
    fn held_button_lights_its_zone() {
        let mut app = X52App::new(profile());
        app.start();
        let mut raw = sample();
        update(&mut app, &raw);

        raw.apply(RawEvent::Button {
            index: 2,
            pressed: true,
        });
        let actions = update(&mut app, &raw);
        assert!(actions.contains(&Action::Button {
            index: 2,
            pressed: true
        }));
        assert!(actions.contains(&Action::Led {
            zone: LedZone::FireA,
            color: LedColor::Red
        }));

        // later binding wins while both are held
        raw.apply(RawEvent::Button {
            index: 3,
            pressed: true,
        });
        let actions = update(&mut app, &raw);
        assert!(actions.contains(&Action::Led {
            zone: LedZone::FireA,
            color: LedColor::Green
        }));

        raw.apply(RawEvent::Button {
            index: 2,
            pressed: false,
        });
        raw.apply(RawEvent::Button {
            index: 3,
            pressed: false,
        });
        let actions = update(&mut app, &raw);
        assert!(actions.contains(&Action::Led {
            zone: LedZone::FireA,
            color: LedColor::Off
        }));
    }

    #[test]
    fn unbound_buttons_do_not_touch_leds() {
        let mut app = X52App::new(profile());
        app.start();
        let mut raw = sample();
        update(&mut app, &raw);
        raw.apply(RawEvent::Button {
            index: 10,
            pressed: true,
        });
        let actions = update(&mut app, &raw);
        assert!(!actions.iter().any(|a| matches!(a, Action::Led { .. })));
    }

    #[test]
    fn axis_motion_reports_a_new_frame() {
        let mut app = X52App::new(profile());
        let mut raw = sample();
        update(&mut app, &raw);
        raw.apply(RawEvent::Axis {
            index: 0,
            value: 32767,
        });
        let actions = update(&mut app, &raw);
        match actions.as_slice() {
            [Action::Frame(frame)] => assert_eq!(frame.axes[0], 1.0),
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn stop_turns_lit_zones_off_and_clears_text() {
        let mut app = X52App::new(profile());
        app.start();
        let mut raw = sample();
        raw.apply(RawEvent::Button {
            index: 2,
            pressed: true,
        });
        update(&mut app, &raw);
        let actions = app.stop();
        assert_eq!(
            actions,
            vec![
                Action::Led {
                    zone: LedZone::FireA,
                    color: LedColor::Off
                },
                Action::Text {
                    line: MfdLine::new(0).expect("line"),
                    text: String::new()
                },
            ]
        );
    }
}
