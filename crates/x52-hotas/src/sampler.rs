use crate::backend::{Backend, Device};
use crate::calibration::Calibration;
use crate::error::{Error, Result};
use crate::pov::PovAngle;
use crate::sample::{NormalizedReading, RawEvent, RawSample};
use crate::types::{Capabilities, Channel, DeviceIndex, DeviceInfo};

/// Owns one controller connection and its latest raw snapshot.
///
/// The sampler is driven by the caller: call [`DeviceSampler::poll`] once per
/// loop iteration, then read normalized values out of the snapshot.
pub struct DeviceSampler<D: Device> {
    index: DeviceIndex,
    name: String,
    device: Option<D>,
    capabilities: Capabilities,
    calibration: Calibration,
    sample: RawSample,
    // Reused between polls
    events: Vec<RawEvent>,
}

impl<D: Device> DeviceSampler<D> {
    /// Opens the device at `index` and fetches its capabilities.
    /// Failures are returned as is, never retried.
    pub fn open<B>(backend: &mut B, index: DeviceIndex, calibration: Calibration) -> Result<Self>
    where
        B: Backend<Device = D>,
    {
        let device = backend.open(index)?;
        // Dropping `device` on failure releases it.
        let capabilities = device.capabilities()?;
        let name = device.name().to_string();
        log::debug!("device {index} ({name}): {capabilities}");

        Ok(Self {
            index,
            name,
            sample: RawSample::new(capabilities, &calibration),
            device: Some(device),
            capabilities,
            calibration,
            events: Vec::new(),
        })
    }

    pub fn index(&self) -> DeviceIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    /// Capabilities fetched at open. Identical on every call.
    pub fn capabilities(&self) -> Result<Capabilities> {
        self.ensure_open()?;
        Ok(self.capabilities)
    }

    pub fn info(&self) -> DeviceInfo {
        DeviceInfo {
            index: self.index,
            name: self.name.clone(),
            capabilities: self.capabilities,
        }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Swaps the calibration. Inputs the device has not reported yet move to
    /// the rest values of the new calibration.
    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.sample.reseed(&calibration);
        self.calibration = calibration;
    }

    /// Merges every pending event into the snapshot and returns it.
    /// Channels without news keep their last value.
    pub fn poll(&mut self) -> Result<&RawSample> {
        let device = self.device.as_mut().ok_or(Error::Closed)?;
        device.drain(&mut self.events);
        for event in self.events.drain(..) {
            if !self.sample.apply(event) {
                log::debug!("device {}: dropped out of range {event:?}", self.index);
            }
        }
        Ok(&self.sample)
    }

    /// Snapshot as of the last poll. Stays readable after `close`.
    pub fn sample(&self) -> &RawSample {
        &self.sample
    }

    pub fn reading(&self) -> NormalizedReading<'_> {
        NormalizedReading::new(&self.sample, &self.calibration)
    }

    pub fn axis(&self, channel: Channel) -> f64 {
        self.calibration.read(self.sample.axes(), channel)
    }

    pub fn pov(&self) -> PovAngle {
        self.sample
            .hat_value()
            .map(|raw| self.calibration.hat_encoding().normalize(raw))
            .unwrap_or_default()
    }

    /// Fails with [`Error::Closed`] once released, like `poll`.
    pub fn is_button_pressed(&self, index: usize) -> Result<bool> {
        self.ensure_open()?;
        self.sample.is_button_pressed(index)
    }

    /// Releases the device. Fails with [`Error::Closed`] when already released.
    pub fn close(&mut self) -> Result<()> {
        let device = self.device.take().ok_or(Error::Closed)?;
        drop(device);
        log::debug!("device {} released", self.index);
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.device.is_none() {
            return Err(Error::Closed);
        }
        Ok(())
    }
}
