//! iAP2 devices.

use serde::{Deserialize, Serialize};

use crate::application::ApplicationList;
use crate::device::{DeviceHandle, DeviceInfo, TransportDevice, TransportKind};
use crate::uid::DeviceUid;

/// Apple device speaking iAP2.
///
/// Applications are only known after the iAP2 session handshake, which the
/// connection layer drives. Until then the device reports none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iap2Device {
    info: DeviceInfo,
    mount_point: Option<String>,
}

impl Iap2Device {
    /// Create a device.
    #[must_use]
    pub fn new(name: impl Into<String>, unique_id: DeviceUid) -> Self {
        Self {
            info: DeviceInfo::new(name, unique_id),
            mount_point: None,
        }
    }

    /// Set the transport handle at construction.
    #[must_use]
    pub fn with_handle(mut self, handle: DeviceHandle) -> Self {
        self.info.set_handle(handle);
        self
    }

    /// Record the filesystem path the media subsystem mounted the device at.
    #[must_use]
    pub fn with_mount_point(mut self, mount_point: impl Into<String>) -> Self {
        self.mount_point = Some(mount_point.into());
        self
    }

    /// Mount point, if the device was enumerated by the media subsystem.
    #[must_use]
    pub fn mount_point(&self) -> Option<&str> {
        self.mount_point.as_deref()
    }
}

impl TransportDevice for Iap2Device {
    fn kind(&self) -> TransportKind {
        TransportKind::Iap2
    }

    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut DeviceInfo {
        &mut self.info
    }

    fn application_list(&self) -> ApplicationList {
        ApplicationList::new()
    }
}
