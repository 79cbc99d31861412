//! Uniform device contract shared by every transport.
//!
//! Each transport family contributes one concrete device type (see
//! [`crate::transport`]). They all implement [`TransportDevice`], and the
//! closed [`Device`] enum lets the rest of the middleware hold any of them
//! behind one type.
//!
//! Identity is deliberately narrow: only the transport kind and the
//! [`DeviceUid`] are comparable across transports. Handles, addresses and
//! channel tables are transport metadata and never take part in
//! [`Device::is_same_as`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::application::ApplicationList;
use crate::transport::{AoaDevice, BluetoothDevice, Iap2Device, TcpDevice};
use crate::uid::DeviceUid;

/// Transport-specific opaque device handle, such as an AOA accessory handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeviceHandle(pub u64);

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Transport family a device was discovered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    /// Android Open Accessory over USB.
    Aoa,
    /// Apple accessory protocol, version 2.
    Iap2,
    /// Bluetooth RFCOMM/SPP.
    Bluetooth,
    /// TCP over Wi-Fi or USB networking.
    Tcp,
}

impl TransportKind {
    /// All transport kinds.
    pub fn all() -> impl Iterator<Item = TransportKind> {
        [Self::Aoa, Self::Iap2, Self::Bluetooth, Self::Tcp].into_iter()
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Aoa => "AOA",
            Self::Iap2 => "iAP2",
            Self::Bluetooth => "Bluetooth",
            Self::Tcp => "TCP",
        };
        f.write_str(name)
    }
}

/// Fields common to every device, regardless of transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    name: String,
    unique_id: DeviceUid,
    handle: Option<DeviceHandle>,
}

impl DeviceInfo {
    /// Create device info without a handle.
    #[must_use]
    pub fn new(name: impl Into<String>, unique_id: DeviceUid) -> Self {
        Self {
            name: name.into(),
            unique_id,
            handle: None,
        }
    }

    /// Human-readable device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Primary identity key.
    #[must_use]
    pub fn unique_id(&self) -> &DeviceUid {
        &self.unique_id
    }

    /// Transport handle, once assigned.
    #[must_use]
    pub fn handle(&self) -> Option<DeviceHandle> {
        self.handle
    }

    /// Assign the transport handle, replacing any previous one.
    pub fn set_handle(&mut self, handle: DeviceHandle) {
        self.handle = Some(handle);
    }
}

/// Capability interface every transport device implements.
///
/// Implementations must keep [`application_list`](Self::application_list)
/// pure and non-blocking: it is called from session enumeration paths and
/// must return the same list until the transport adds or removes an
/// application.
pub trait TransportDevice {
    /// Transport family of this device.
    fn kind(&self) -> TransportKind;

    /// Common device fields.
    fn info(&self) -> &DeviceInfo;

    /// Mutable access to the common device fields.
    fn info_mut(&mut self) -> &mut DeviceInfo;

    /// Applications currently hosted on the device.
    fn application_list(&self) -> ApplicationList;

    /// Human-readable device name.
    fn name(&self) -> &str {
        self.info().name()
    }

    /// Primary identity key.
    fn unique_id(&self) -> &DeviceUid {
        self.info().unique_id()
    }

    /// Transport handle, once assigned.
    fn handle(&self) -> Option<DeviceHandle> {
        self.info().handle()
    }

    /// Assign the transport handle.
    ///
    /// Callers assign a handle once per handle-assignment event; a second
    /// call overwrites the first. Identity is unaffected.
    fn set_handle(&mut self, handle: DeviceHandle) {
        self.info_mut().set_handle(handle);
    }
}

/// A device on any supported transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    /// Android Open Accessory device.
    Aoa(AoaDevice),
    /// iAP2 device.
    Iap2(Iap2Device),
    /// Bluetooth device.
    Bluetooth(BluetoothDevice),
    /// TCP device.
    Tcp(TcpDevice),
}

impl Device {
    /// Whether `other` denotes the same physical device.
    ///
    /// True iff `other` is present, is the same transport kind, and carries
    /// a byte-equal unique id. Never fails: a missing comparand or a device
    /// of another transport simply compares as different.
    #[must_use]
    pub fn is_same_as(&self, other: Option<&Device>) -> bool {
        other.is_some_and(|other| {
            self.kind() == other.kind() && self.unique_id() == other.unique_id()
        })
    }

    /// Borrow the concrete transport device.
    fn as_transport(&self) -> &dyn TransportDevice {
        match self {
            Self::Aoa(device) => device,
            Self::Iap2(device) => device,
            Self::Bluetooth(device) => device,
            Self::Tcp(device) => device,
        }
    }

    fn as_transport_mut(&mut self) -> &mut dyn TransportDevice {
        match self {
            Self::Aoa(device) => device,
            Self::Iap2(device) => device,
            Self::Bluetooth(device) => device,
            Self::Tcp(device) => device,
        }
    }

    /// The AOA device, if this is one.
    #[must_use]
    pub fn as_aoa(&self) -> Option<&AoaDevice> {
        match self {
            Self::Aoa(device) => Some(device),
            _ => None,
        }
    }

    /// The iAP2 device, if this is one.
    #[must_use]
    pub fn as_iap2(&self) -> Option<&Iap2Device> {
        match self {
            Self::Iap2(device) => Some(device),
            _ => None,
        }
    }

    /// The Bluetooth device, if this is one.
    #[must_use]
    pub fn as_bluetooth(&self) -> Option<&BluetoothDevice> {
        match self {
            Self::Bluetooth(device) => Some(device),
            _ => None,
        }
    }

    /// Mutable access to the Bluetooth device, if this is one.
    #[must_use]
    pub fn as_bluetooth_mut(&mut self) -> Option<&mut BluetoothDevice> {
        match self {
            Self::Bluetooth(device) => Some(device),
            _ => None,
        }
    }

    /// The TCP device, if this is one.
    #[must_use]
    pub fn as_tcp(&self) -> Option<&TcpDevice> {
        match self {
            Self::Tcp(device) => Some(device),
            _ => None,
        }
    }

    /// Mutable access to the TCP device, if this is one.
    #[must_use]
    pub fn as_tcp_mut(&mut self) -> Option<&mut TcpDevice> {
        match self {
            Self::Tcp(device) => Some(device),
            _ => None,
        }
    }
}

impl TransportDevice for Device {
    fn kind(&self) -> TransportKind {
        self.as_transport().kind()
    }

    fn info(&self) -> &DeviceInfo {
        self.as_transport().info()
    }

    fn info_mut(&mut self) -> &mut DeviceInfo {
        self.as_transport_mut().info_mut()
    }

    fn application_list(&self) -> ApplicationList {
        self.as_transport().application_list()
    }
}

impl From<AoaDevice> for Device {
    fn from(device: AoaDevice) -> Self {
        Self::Aoa(device)
    }
}

impl From<Iap2Device> for Device {
    fn from(device: Iap2Device) -> Self {
        Self::Iap2(device)
    }
}

impl From<BluetoothDevice> for Device {
    fn from(device: BluetoothDevice) -> Self {
        Self::Bluetooth(device)
    }
}

impl From<TcpDevice> for Device {
    fn from(device: TcpDevice) -> Self {
        Self::Tcp(device)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name(), self.kind(), self.unique_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{AoaDevice, Iap2Device};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_same_as_none_is_false() -> TestResult {
        let device = Device::from(AoaDevice::new("Pixel", DeviceUid::new("usb-1")?));
        assert!(!device.is_same_as(None));
        Ok(())
    }

    #[test]
    fn test_same_as_reflexive() -> TestResult {
        let device = Device::from(Iap2Device::new("iPhone", DeviceUid::new("apple-7")?));
        assert!(device.is_same_as(Some(&device)));
        Ok(())
    }

    #[test]
    fn test_cross_variant_is_not_same() -> TestResult {
        let uid = DeviceUid::new("shared-id")?;
        let aoa = Device::from(AoaDevice::new("A", uid.clone()));
        let iap2 = Device::from(Iap2Device::new("A", uid));
        assert!(!aoa.is_same_as(Some(&iap2)));
        assert!(!iap2.is_same_as(Some(&aoa)));
        Ok(())
    }

    #[test]
    fn test_set_handle_through_enum() -> TestResult {
        let mut device = Device::from(AoaDevice::new("Pixel", DeviceUid::new("usb-1")?));
        let before = device.clone();
        assert_eq!(device.handle(), None);
        device.set_handle(DeviceHandle(7));
        assert_eq!(device.handle(), Some(DeviceHandle(7)));
        assert_eq!(device.name(), "Pixel");
        assert!(device.is_same_as(Some(&before)));
        Ok(())
    }

    #[test]
    fn test_display() -> TestResult {
        let device = Device::from(AoaDevice::new("Pixel", DeviceUid::new("usb-1")?));
        assert_eq!(device.to_string(), "Pixel (AOA usb-1)");
        assert_eq!(TransportKind::Iap2.to_string(), "iAP2");
        Ok(())
    }
}
