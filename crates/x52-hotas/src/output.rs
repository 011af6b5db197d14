//! LED and MFD output surface of the X52 Pro.
//!
//! Only the command model lives here. Delivering commands to the device is up
//! to whichever [`OutputSurface`] the caller plugs in; nothing is acknowledged.

use std::fmt;

use smallvec::{smallvec, SmallVec};

/// Characters per MFD line.
pub const MFD_LINE_WIDTH: usize = 16;
/// Lines on the MFD.
pub const MFD_LINES: u8 = 3;

/// Tri-state LED color. Yellow lights both diodes of a bi-color zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LedColor {
    #[default]
    Off,
    Red,
    Green,
    Yellow,
}

impl LedColor {
    pub fn from_name(name: &str) -> Option<LedColor> {
        Some(match name {
            "off" => LedColor::Off,
            "red" => LedColor::Red,
            "green" => LedColor::Green,
            "yellow" | "amber" => LedColor::Yellow,
            _ => return None,
        })
    }

    const fn red(self) -> bool {
        matches!(self, LedColor::Red | LedColor::Yellow)
    }

    const fn green(self) -> bool {
        matches!(self, LedColor::Green | LedColor::Yellow)
    }
}

/// LED zones of the X52 Pro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedZone {
    Fire,
    FireA,
    FireB,
    FireD,
    FireE,
    Toggle12,
    Toggle34,
    Toggle56,
    Pov2,
    Clutch,
    Throttle,
}

/// One diode switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedCommand {
    pub led: u32,
    pub on: bool,
}

impl LedZone {
    pub const ALL: [LedZone; 11] = [
        LedZone::Fire,
        LedZone::FireA,
        LedZone::FireB,
        LedZone::FireD,
        LedZone::FireE,
        LedZone::Toggle12,
        LedZone::Toggle34,
        LedZone::Toggle56,
        LedZone::Pov2,
        LedZone::Clutch,
        LedZone::Throttle,
    ];

    /// Diode ids as numbered by the vendor output library: `(red, Some(green))`
    /// for bi-color zones, `(id, None)` for single-color ones.
    pub const fn leds(self) -> (u32, Option<u32>) {
        match self {
            LedZone::Fire => (0, None),
            LedZone::FireA => (1, Some(2)),
            LedZone::FireB => (3, Some(4)),
            LedZone::FireD => (5, Some(6)),
            LedZone::FireE => (7, Some(8)),
            LedZone::Toggle12 => (9, Some(10)),
            LedZone::Toggle34 => (11, Some(12)),
            LedZone::Toggle56 => (13, Some(14)),
            LedZone::Pov2 => (15, Some(16)),
            LedZone::Clutch => (17, Some(18)),
            LedZone::Throttle => (19, None),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            LedZone::Fire => "fire",
            LedZone::FireA => "fire_a",
            LedZone::FireB => "fire_b",
            LedZone::FireD => "fire_d",
            LedZone::FireE => "fire_e",
            LedZone::Toggle12 => "toggle_1_2",
            LedZone::Toggle34 => "toggle_3_4",
            LedZone::Toggle56 => "toggle_5_6",
            LedZone::Pov2 => "pov_2",
            LedZone::Clutch => "clutch",
            LedZone::Throttle => "throttle",
        }
    }

    pub fn from_name(name: &str) -> Option<LedZone> {
        LedZone::ALL.into_iter().find(|z| z.name() == name)
    }

    /// Expands a color into per-diode commands. Single-color zones light up
    /// for any color other than `Off`.
    pub fn commands(self, color: LedColor) -> SmallVec<[LedCommand; 2]> {
        match self.leds() {
            (led, None) => smallvec![LedCommand {
                led,
                on: color != LedColor::Off,
            }],
            (red, Some(green)) => smallvec![
                LedCommand {
                    led: red,
                    on: color.red(),
                },
                LedCommand {
                    led: green,
                    on: color.green(),
                },
            ],
        }
    }
}

impl fmt::Display for LedZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A line of the MFD, `0..MFD_LINES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MfdLine(u8);

impl MfdLine {
    pub const fn new(line: u8) -> Option<MfdLine> {
        if line < MFD_LINES {
            Some(MfdLine(line))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Cuts `text` down to what fits on one MFD line.
pub fn fit_mfd_text(text: &str) -> &str {
    match text.char_indices().nth(MFD_LINE_WIDTH) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

/// Destination for LED and MFD commands. Fire-and-forget.
pub trait OutputSurface {
    fn set_led(&mut self, zone: LedZone, color: LedColor);

    fn set_text(&mut self, line: MfdLine, text: &str);

    fn clear_text(&mut self, line: MfdLine) {
        self.set_text(line, "");
    }

    fn set_all_leds(&mut self, color: LedColor) {
        for zone in LedZone::ALL {
            self.set_led(zone, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yellow_lights_both_diodes() {
        let cmds = LedZone::FireA.commands(LedColor::Yellow);
        assert_eq!(
            cmds.as_slice(),
            &[
                LedCommand { led: 1, on: true },
                LedCommand { led: 2, on: true }
            ]
        );
    }

    #[test]
    fn red_and_green_pick_one_diode() {
        let red = LedZone::Clutch.commands(LedColor::Red);
        assert_eq!(red[0], LedCommand { led: 17, on: true });
        assert_eq!(red[1], LedCommand { led: 18, on: false });
        let green = LedZone::Pov2.commands(LedColor::Green);
        assert_eq!(green[0], LedCommand { led: 15, on: false });
        assert_eq!(green[1], LedCommand { led: 16, on: true });
    }

    #[test]
    fn off_clears_both_diodes() {
        let cmds = LedZone::Toggle56.commands(LedColor::Off);
        assert!(cmds.iter().all(|c| !c.on));
    }

    #[test]
    fn single_color_zone_is_on_for_any_color() {
        let cmds = LedZone::Throttle.commands(LedColor::Green);
        assert_eq!(cmds.as_slice(), &[LedCommand { led: 19, on: true }]);
        let cmds = LedZone::Fire.commands(LedColor::Off);
        assert_eq!(cmds.as_slice(), &[LedCommand { led: 0, on: false }]);
    }

    #[test]
    fn zone_names_round_trip() {
        for zone in LedZone::ALL {
            assert_eq!(LedZone::from_name(zone.name()), Some(zone));
        }
        assert_eq!(LedColor::from_name("amber"), Some(LedColor::Yellow));
        assert_eq!(LedColor::from_name("blue"), None);
    }

    #[test]
    fn mfd_lines_are_bounded() {
        assert_eq!(MfdLine::new(2).map(MfdLine::get), Some(2));
        assert_eq!(MfdLine::new(3), None);
    }

    #[test]
    fn mfd_text_is_cut_at_line_width() {
        assert_eq!(fit_mfd_text("MANUAL MODE"), "MANUAL MODE");
        assert_eq!(fit_mfd_text("0123456789ABCDEFGH"), "0123456789ABCDEF");
        assert_eq!(fit_mfd_text("ÄÄÄÄÄÄÄÄÄÄÄÄÄÄÄÄÄ").chars().count(), 16);
    }
}
