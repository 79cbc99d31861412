//! Bluetooth devices.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::application::{ApplicationHandle, ApplicationList, ApplicationTable};
use crate::device::{DeviceHandle, DeviceInfo, TransportDevice, TransportKind};
use crate::error::{DeviceError, DeviceResult};
use crate::uid::{DeviceUid, MacAddress};

/// Name of an RFCOMM/SPP channel opened by an application on the phone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RfcommChannel(pub String);

impl RfcommChannel {
    /// Create a channel name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for RfcommChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Device paired over Bluetooth.
///
/// The unique id is derived from the MAC address. Every open RFCOMM channel
/// hosts one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BluetoothDevice {
    info: DeviceInfo,
    address: MacAddress,
    channels: ApplicationTable<RfcommChannel>,
}

impl BluetoothDevice {
    /// Create a device with no open channels.
    #[must_use]
    pub fn new(name: impl Into<String>, address: MacAddress) -> Self {
        Self {
            info: DeviceInfo::new(name, DeviceUid::from_mac(address)),
            address,
            channels: ApplicationTable::new(),
        }
    }

    /// Set the transport handle at construction.
    #[must_use]
    pub fn with_handle(mut self, handle: DeviceHandle) -> Self {
        self.info.set_handle(handle);
        self
    }

    /// Device MAC address.
    #[must_use]
    pub fn address(&self) -> MacAddress {
        self.address
    }

    /// Register an opened channel and return its application handle.
    ///
    /// A channel that is already open keeps its handle.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::ApplicationHandlesExhausted`] if the device has
    /// used up its application handles.
    pub fn add_channel(&mut self, channel: RfcommChannel) -> DeviceResult<ApplicationHandle> {
        let handle = self
            .channels
            .insert(channel)
            .ok_or(DeviceError::ApplicationHandlesExhausted)?;
        tracing::debug!(device = %self.info.unique_id(), app = handle, "Bluetooth channel added");
        Ok(handle)
    }

    /// Forget a closed channel, returning the handle of the application that
    /// was using it.
    pub fn remove_channel(&mut self, channel: &RfcommChannel) -> Option<ApplicationHandle> {
        let handle = self.channels.remove_endpoint(channel)?;
        tracing::debug!(device = %self.info.unique_id(), app = handle, "Bluetooth channel removed");
        Some(handle)
    }

    /// Channel hosting `handle`, if any.
    #[must_use]
    pub fn channel(&self, handle: ApplicationHandle) -> Option<&RfcommChannel> {
        self.channels.get(handle)
    }
}

impl TransportDevice for BluetoothDevice {
    fn kind(&self) -> TransportKind {
        TransportKind::Bluetooth
    }

    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut DeviceInfo {
        &mut self.info
    }

    fn application_list(&self) -> ApplicationList {
        self.channels.handles()
    }
}
