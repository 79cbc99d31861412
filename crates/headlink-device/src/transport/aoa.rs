//! Android Open Accessory devices.

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationList, SINGLE_APPLICATION_HANDLE};
use crate::device::{DeviceHandle, DeviceInfo, TransportDevice, TransportKind};
use crate::uid::DeviceUid;

/// Device attached in USB accessory mode.
///
/// An accessory-mode connection carries exactly one application, so the
/// application list is constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AoaDevice {
    info: DeviceInfo,
}

impl AoaDevice {
    /// Create a device whose accessory handle is not known yet.
    #[must_use]
    pub fn new(name: impl Into<String>, unique_id: DeviceUid) -> Self {
        Self {
            info: DeviceInfo::new(name, unique_id),
        }
    }

    /// Set the accessory handle at construction.
    #[must_use]
    pub fn with_handle(mut self, handle: DeviceHandle) -> Self {
        self.info.set_handle(handle);
        self
    }
}

impl TransportDevice for AoaDevice {
    fn kind(&self) -> TransportKind {
        TransportKind::Aoa
    }

    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut DeviceInfo {
        &mut self.info
    }

    fn application_list(&self) -> ApplicationList {
        vec![SINGLE_APPLICATION_HANDLE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_single_application() -> TestResult {
        let mut device = AoaDevice::new("Pixel 8", DeviceUid::new("0a1b2c")?);
        assert_eq!(device.application_list(), vec![1]);

        device.set_handle(DeviceHandle(0x42));
        assert_eq!(device.application_list(), vec![1]);
        Ok(())
    }

    #[test]
    fn test_with_handle() -> TestResult {
        let device = AoaDevice::new("Pixel 8", DeviceUid::new("0a1b2c")?).with_handle(DeviceHandle(3));
        assert_eq!(device.handle(), Some(DeviceHandle(3)));
        assert_eq!(device.kind(), TransportKind::Aoa);
        Ok(())
    }
}
