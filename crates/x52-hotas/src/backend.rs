use crate::error::Result;
use crate::sample::RawEvent;
use crate::types::{Capabilities, DeviceIndex};

/// A platform input library able to enumerate and open joysticks.
pub trait Backend {
    type Device: Device;

    /// Number of devices currently present.
    fn device_count(&self) -> Result<u32>;

    /// Opens the device at `index` and acquires it.
    fn open(&mut self, index: DeviceIndex) -> Result<Self::Device>;

    /// Name of the device at `index` without opening it.
    fn device_name(&self, index: DeviceIndex) -> Result<String>;
}

/// One open controller connection. Dropping it releases the platform resource.
pub trait Device {
    fn name(&self) -> &str;

    fn capabilities(&self) -> Result<Capabilities>;

    /// Moves every event observed since the last call into `out`. Never blocks.
    fn drain(&mut self, out: &mut Vec<RawEvent>);
}
