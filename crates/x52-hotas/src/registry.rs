use ahash::AHashMap;

use crate::backend::Backend;
use crate::calibration::Calibration;
use crate::error::{Error, Result};
use crate::sampler::DeviceSampler;
use crate::types::{DeviceIndex, DeviceInfo};

/// Caller-owned table of open devices, at most one sampler per index.
pub struct DeviceRegistry<B: Backend> {
    backend: B,
    samplers: AHashMap<DeviceIndex, DeviceSampler<B::Device>>,
}

impl<B: Backend> DeviceRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            samplers: AHashMap::new(),
        }
    }

    /// Devices present on the backend, opened or not.
    pub fn available(&self) -> Result<Vec<(DeviceIndex, String)>> {
        let count = self.backend.device_count()?;
        let mut devices = Vec::with_capacity(count as usize);
        for index in 0..count {
            match self.backend.device_name(index) {
                Ok(name) => devices.push((index, name)),
                Err(e) => log::debug!("skipping device {index}: {e}"),
            }
        }
        Ok(devices)
    }

    /// Opens the device at `index`. Fails when it already has an open sampler.
    pub fn open(
        &mut self,
        index: DeviceIndex,
        calibration: Calibration,
    ) -> Result<&mut DeviceSampler<B::Device>> {
        if self.samplers.contains_key(&index) {
            return Err(Error::DeviceClaimed(index));
        }
        let sampler = DeviceSampler::open(&mut self.backend, index, calibration)?;
        Ok(self.samplers.entry(index).or_insert(sampler))
    }

    pub fn get(&self, index: DeviceIndex) -> Option<&DeviceSampler<B::Device>> {
        self.samplers.get(&index)
    }

    pub fn get_mut(&mut self, index: DeviceIndex) -> Option<&mut DeviceSampler<B::Device>> {
        self.samplers.get_mut(&index)
    }

    /// Open device indices in ascending order.
    pub fn indices(&self) -> Vec<DeviceIndex> {
        let mut indices: Vec<_> = self.samplers.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn infos(&self) -> Vec<DeviceInfo> {
        self.indices()
            .into_iter()
            .filter_map(|i| self.samplers.get(&i).map(DeviceSampler::info))
            .collect()
    }

    /// Polls every open device.
    pub fn poll_all(&mut self) -> Result<()> {
        for sampler in self.samplers.values_mut() {
            sampler.poll()?;
        }
        Ok(())
    }

    /// Releases the device and frees its index for a later `open`.
    pub fn close(&mut self, index: DeviceIndex) -> Result<()> {
        let mut sampler = self.samplers.remove(&index).ok_or(Error::Closed)?;
        sampler.close()
    }

    /// Releases every open device.
    pub fn close_all(&mut self) {
        for (index, mut sampler) in self.samplers.drain() {
            if let Err(e) = sampler.close() {
                log::warn!("device {index}: {e}");
            }
        }
    }
}
