use std::fmt;

/// Platform-enumerated index of a connected controller.
pub type DeviceIndex = u32;

/// Number of inputs a device reports. Fetched once after opening and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities {
    pub axis_count: usize,
    pub button_count: usize,
    pub hat_count: usize,
}

impl Capabilities {
    /// Layout reported for the X52 Pro through SDL2.
    pub const X52_PRO: Capabilities = Capabilities {
        axis_count: 9,
        button_count: 39,
        hat_count: 1,
    };
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} axes, {} buttons, {} hats",
            self.axis_count, self.button_count, self.hat_count
        )
    }
}

/// Device meta information that remains stable while it stays connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub index: DeviceIndex,
    pub name: String,
    pub capabilities: Capabilities,
}

/// Continuous channels exposed by the sampler, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Slider,
    MouseX,
    MouseY,
}

impl Channel {
    pub const COUNT: usize = 9;

    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::X,
        Channel::Y,
        Channel::Z,
        Channel::Rx,
        Channel::Ry,
        Channel::Rz,
        Channel::Slider,
        Channel::MouseX,
        Channel::MouseY,
    ];

    /// The six primary and rotational axes, in bridge port order.
    pub const AXES: [Channel; 6] = [
        Channel::X,
        Channel::Y,
        Channel::Z,
        Channel::Rx,
        Channel::Ry,
        Channel::Rz,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Z => "z",
            Channel::Rx => "rx",
            Channel::Ry => "ry",
            Channel::Rz => "rz",
            Channel::Slider => "slider",
            Channel::MouseX => "mouse_x",
            Channel::MouseY => "mouse_y",
        }
    }

    /// Looks a channel up by its `name()`.
    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
