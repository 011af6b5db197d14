//! In-memory devices driven by injected events.
//!
//! Useful for exercising the sampler without hardware attached.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::backend::{Backend, Device};
use crate::error::{Error, Result};
use crate::pov::{HatEncoding, PovAngle};
use crate::sample::RawEvent;
use crate::types::{Capabilities, DeviceIndex};

#[derive(Debug, Default)]
struct FeedState {
    queue: VecDeque<RawEvent>,
    claimed: bool,
}

/// Injection handle of a virtual device. Cloning shares the same queue.
#[derive(Debug, Clone, Default)]
pub struct VirtualFeed {
    state: Rc<RefCell<FeedState>>,
}

impl VirtualFeed {
    pub fn push(&self, event: RawEvent) {
        self.state.borrow_mut().queue.push_back(event);
    }

    pub fn axis(&self, index: usize, value: i32) {
        self.push(RawEvent::Axis { index, value });
    }

    pub fn button(&self, index: usize, pressed: bool) {
        self.push(RawEvent::Button { index, pressed });
    }

    pub fn hat(&self, index: usize, value: u32) {
        self.push(RawEvent::Hat { index, value });
    }

    /// Queues a hat change encoded the way `encoding` reports it.
    pub fn pov(&self, encoding: HatEncoding, angle: PovAngle) {
        self.hat(0, encoding.encode(angle));
    }

    /// True while a [`VirtualDevice`] for this feed is open.
    pub fn is_claimed(&self) -> bool {
        self.state.borrow().claimed
    }
}

/// Description of a virtual device plugged into a [`VirtualBackend`].
#[derive(Debug, Clone)]
pub struct VirtualDeviceSpec {
    pub name: String,
    pub capabilities: Capabilities,
    /// Simulates a device whose capabilities cannot be queried.
    pub broken_capabilities: bool,
}

impl VirtualDeviceSpec {
    pub fn new(name: impl Into<String>, capabilities: Capabilities) -> Self {
        Self {
            name: name.into(),
            capabilities,
            broken_capabilities: false,
        }
    }

    /// Layout of the X52 Pro as enumerated by SDL2.
    pub fn x52_pro() -> Self {
        Self::new("Saitek X52 Pro Flight Controller", Capabilities::X52_PRO)
    }
}

/// Backend whose devices exist only in memory.
#[derive(Debug, Default)]
pub struct VirtualBackend {
    devices: Vec<(VirtualDeviceSpec, VirtualFeed)>,
}

impl VirtualBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugs in a device and returns the handle used to drive it.
    /// Devices are enumerated in plug order.
    pub fn plug(&mut self, spec: VirtualDeviceSpec) -> VirtualFeed {
        let feed = VirtualFeed::default();
        self.devices.push((spec, feed.clone()));
        feed
    }

    fn present(&self, index: DeviceIndex) -> Result<&(VirtualDeviceSpec, VirtualFeed)> {
        self.devices
            .get(index as usize)
            .ok_or(Error::DeviceNotFound(index))
    }
}

impl Backend for VirtualBackend {
    type Device = VirtualDevice;

    fn device_count(&self) -> Result<u32> {
        Ok(self.devices.len() as u32)
    }

    fn open(&mut self, index: DeviceIndex) -> Result<VirtualDevice> {
        let (spec, feed) = self.present(index)?;
        {
            let mut state = feed.state.borrow_mut();
            if state.claimed {
                return Err(Error::DeviceClaimed(index));
            }
            state.claimed = true;
        }
        Ok(VirtualDevice {
            spec: spec.clone(),
            feed: feed.clone(),
        })
    }

    fn device_name(&self, index: DeviceIndex) -> Result<String> {
        self.present(index).map(|(spec, _)| spec.name.clone())
    }
}

/// An open virtual device. Releases its claim when dropped.
#[derive(Debug)]
pub struct VirtualDevice {
    spec: VirtualDeviceSpec,
    feed: VirtualFeed,
}

impl Device for VirtualDevice {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn capabilities(&self) -> Result<Capabilities> {
        if self.spec.broken_capabilities {
            return Err(Error::Capabilities(format!(
                "{} did not report its capabilities",
                self.spec.name
            )));
        }
        Ok(self.spec.capabilities)
    }

    fn drain(&mut self, out: &mut Vec<RawEvent>) {
        out.extend(self.feed.state.borrow_mut().queue.drain(..));
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        self.feed.state.borrow_mut().claimed = false;
    }
}
