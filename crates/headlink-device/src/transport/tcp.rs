//! TCP devices.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::application::{ApplicationHandle, ApplicationList, ApplicationTable};
use crate::device::{DeviceHandle, DeviceInfo, TransportDevice, TransportKind};
use crate::error::{DeviceError, DeviceResult};
use crate::uid::DeviceUid;

/// Device reachable over TCP.
///
/// Each accepted connection from a distinct remote port hosts one
/// application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpDevice {
    info: DeviceInfo,
    address: IpAddr,
    applications: ApplicationTable<u16>,
}

impl TcpDevice {
    /// Create a device with no connected applications.
    #[must_use]
    pub fn new(name: impl Into<String>, unique_id: DeviceUid, address: IpAddr) -> Self {
        Self {
            info: DeviceInfo::new(name, unique_id),
            address,
            applications: ApplicationTable::new(),
        }
    }

    /// Set the transport handle at construction.
    #[must_use]
    pub fn with_handle(mut self, handle: DeviceHandle) -> Self {
        self.info.set_handle(handle);
        self
    }

    /// Remote address of the device.
    #[must_use]
    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// Register an application connected from `port`.
    ///
    /// A port that is already registered keeps its handle.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::ApplicationHandlesExhausted`] if the device has
    /// used up its application handles.
    pub fn add_application(&mut self, port: u16) -> DeviceResult<ApplicationHandle> {
        let handle = self
            .applications
            .insert(port)
            .ok_or(DeviceError::ApplicationHandlesExhausted)?;
        tracing::debug!(device = %self.info.unique_id(), app = handle, port, "TCP application added");
        Ok(handle)
    }

    /// Forget the application with `handle`, returning its remote port.
    pub fn remove_application(&mut self, handle: ApplicationHandle) -> Option<u16> {
        self.applications.remove(handle)
    }

    /// Remote port of the application with `handle`.
    #[must_use]
    pub fn port_of(&self, handle: ApplicationHandle) -> Option<u16> {
        self.applications.get(handle).copied()
    }
}

impl TransportDevice for TcpDevice {
    fn kind(&self) -> TransportKind {
        TransportKind::Tcp
    }

    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut DeviceInfo {
        &mut self.info
    }

    fn application_list(&self) -> ApplicationList {
        self.applications.handles()
    }
}
