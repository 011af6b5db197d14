use std::fmt;

/// Value reported to numeric consumers when the hat is centered.
pub const POV_CENTERED: i32 = -1000;

/// Raw hat code reported by an untouched hat in the given encoding.
const BITMASK_CENTERED: u32 = 0;
const CENTIDEGREES_CENTERED: u32 = 0xFFFF_FFFF;

const HAT_UP: u32 = 0x01;
const HAT_RIGHT: u32 = 0x02;
const HAT_DOWN: u32 = 0x04;
const HAT_LEFT: u32 = 0x08;

/// How a backend encodes hat direction codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HatEncoding {
    /// Up/right/down/left bit flags, combined for diagonals (SDL2).
    #[default]
    Bitmask,
    /// Clockwise hundredths of a degree from north, `0xFFFF` low word when centered
    /// (DirectInput).
    Centidegrees,
}

impl HatEncoding {
    /// Raw code of a centered hat.
    pub const fn centered(self) -> u32 {
        match self {
            HatEncoding::Bitmask => BITMASK_CENTERED,
            HatEncoding::Centidegrees => CENTIDEGREES_CENTERED,
        }
    }

    /// Discretizes a raw hat code into an 8-way compass angle.
    pub fn normalize(self, raw: u32) -> PovAngle {
        match self {
            HatEncoding::Bitmask => from_bitmask(raw),
            HatEncoding::Centidegrees => from_centidegrees(raw),
        }
    }

    /// Raw code for an angle, the inverse of `normalize` on canonical codes.
    pub fn encode(self, angle: PovAngle) -> u32 {
        let PovAngle::Degrees(deg) = angle else {
            return self.centered();
        };
        match self {
            HatEncoding::Centidegrees => u32::from(deg) * 100,
            HatEncoding::Bitmask => match deg {
                0 => HAT_UP,
                45 => HAT_UP | HAT_RIGHT,
                90 => HAT_RIGHT,
                135 => HAT_DOWN | HAT_RIGHT,
                180 => HAT_DOWN,
                225 => HAT_DOWN | HAT_LEFT,
                270 => HAT_LEFT,
                315 => HAT_UP | HAT_LEFT,
                _ => BITMASK_CENTERED,
            },
        }
    }
}

/// Direction of the POV hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PovAngle {
    #[default]
    Centered,
    /// One of 0, 45, .., 315 degrees clockwise from up.
    Degrees(u16),
}

impl PovAngle {
    pub fn is_centered(self) -> bool {
        matches!(self, PovAngle::Centered)
    }

    pub fn degrees(self) -> Option<u16> {
        match self {
            PovAngle::Centered => None,
            PovAngle::Degrees(deg) => Some(deg),
        }
    }

    /// Angle in degrees, or [`POV_CENTERED`] when centered.
    pub fn as_i32(self) -> i32 {
        match self {
            PovAngle::Centered => POV_CENTERED,
            PovAngle::Degrees(deg) => i32::from(deg),
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.as_i32())
    }
}

impl fmt::Display for PovAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PovAngle::Centered => f.write_str("centered"),
            PovAngle::Degrees(deg) => write!(f, "{deg}°"),
        }
    }
}

fn from_bitmask(raw: u32) -> PovAngle {
    let deg = match raw {
        HAT_UP => 0,
        0x03 => 45,
        HAT_RIGHT => 90,
        0x06 => 135,
        HAT_DOWN => 180,
        0x0C => 225,
        HAT_LEFT => 270,
        0x09 => 315,
        _ => return PovAngle::Centered,
    };
    PovAngle::Degrees(deg)
}

fn from_centidegrees(raw: u32) -> PovAngle {
    if raw & 0xFFFF == 0xFFFF || raw >= 36_000 {
        return PovAngle::Centered;
    }
    let step = (raw + 2_250) / 4_500 % 8;
    PovAngle::Degrees((step * 45) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPASS: [u16; 8] = [0, 45, 90, 135, 180, 225, 270, 315];

    #[test]
    fn bitmask_canonical_codes() {
        let cases = [
            (0x01, 0),
            (0x03, 45),
            (0x02, 90),
            (0x06, 135),
            (0x04, 180),
            (0x0C, 225),
            (0x08, 270),
            (0x09, 315),
        ];
        for (raw, deg) in cases {
            assert_eq!(HatEncoding::Bitmask.normalize(raw), PovAngle::Degrees(deg));
        }
    }

    #[test]
    fn bitmask_neutral_and_contradictions_are_centered() {
        for raw in [0x00, 0x05, 0x0A, 0x0F, 0x10] {
            assert_eq!(HatEncoding::Bitmask.normalize(raw), PovAngle::Centered);
        }
    }

    #[test]
    fn centidegrees_canonical_codes() {
        for deg in COMPASS {
            let raw = u32::from(deg) * 100;
            assert_eq!(
                HatEncoding::Centidegrees.normalize(raw),
                PovAngle::Degrees(deg)
            );
        }
    }

    #[test]
    fn centidegrees_rounds_to_nearest_step() {
        let enc = HatEncoding::Centidegrees;
        assert_eq!(enc.normalize(2_249), PovAngle::Degrees(0));
        assert_eq!(enc.normalize(2_250), PovAngle::Degrees(45));
        assert_eq!(enc.normalize(35_000), PovAngle::Degrees(0));
    }

    #[test]
    fn centidegrees_neutral_is_centered() {
        let enc = HatEncoding::Centidegrees;
        assert_eq!(enc.normalize(0xFFFF_FFFF), PovAngle::Centered);
        assert_eq!(enc.normalize(0xFFFF), PovAngle::Centered);
        assert_eq!(enc.normalize(36_000), PovAngle::Centered);
    }

    #[test]
    fn encode_is_inverse_on_compass_points() {
        for enc in [HatEncoding::Bitmask, HatEncoding::Centidegrees] {
            for deg in COMPASS {
                let angle = PovAngle::Degrees(deg);
                assert_eq!(enc.normalize(enc.encode(angle)), angle);
            }
            assert_eq!(enc.normalize(enc.encode(PovAngle::Centered)), PovAngle::Centered);
        }
    }

    #[test]
    fn sentinel_is_outside_degree_range() {
        assert_eq!(PovAngle::Centered.as_i32(), POV_CENTERED);
        assert!(!(0..360).contains(&POV_CENTERED));
        assert_eq!(PovAngle::Degrees(0).as_f64(), 0.0);
    }

    #[test]
    fn repeated_calls_are_consistent() {
        let first = HatEncoding::Bitmask.normalize(0x01);
        for _ in 0..8 {
            assert_eq!(HatEncoding::Bitmask.normalize(0x01), first);
        }
    }
}
