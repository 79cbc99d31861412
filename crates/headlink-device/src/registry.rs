//! Adapter-side device registry.
//!
//! A transport adapter owns the devices it discovered. The registry keeps
//! exactly one entry per physical device by checking
//! [`Device::is_same_as`] before every insertion, and applies discovery
//! results without dropping state (handles, channel tables) of devices that
//! are still present.

use crate::device::{Device, DeviceHandle, TransportDevice, TransportKind};
use crate::uid::DeviceUid;

/// Outcome of [`DeviceRegistry::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The device was not known and has been added.
    Added,
    /// A device with the same identity was already registered; the existing
    /// entry was kept.
    AlreadyKnown,
}

/// Devices owned by one transport adapter.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly connected device unless an identical one is known.
    pub fn insert(&mut self, device: Device) -> Registration {
        if self.devices.iter().any(|known| known.is_same_as(Some(&device))) {
            tracing::debug!(
                device = %device.unique_id(),
                kind = %device.kind(),
                "Device already registered"
            );
            return Registration::AlreadyKnown;
        }

        tracing::info!(
            device = %device.unique_id(),
            kind = %device.kind(),
            name = device.name(),
            "Device added"
        );
        self.devices.push(device);
        Registration::Added
    }

    /// Apply the result of a device search on the `searched` transport.
    ///
    /// The result replaces the registered devices of that transport:
    /// discovered devices that are already registered keep their existing
    /// entry, unknown ones are added, and registered devices of `searched`
    /// that were not discovered again are removed. Devices of other
    /// transports, and discovered devices of another kind, are left out of
    /// the merge.
    ///
    /// Returns the ids of the devices that were added.
    pub fn merge_discovered(
        &mut self,
        searched: TransportKind,
        discovered: Vec<Device>,
    ) -> Vec<DeviceUid> {
        let (discovered, foreign): (Vec<Device>, Vec<Device>) = discovered
            .into_iter()
            .partition(|device| device.kind() == searched);
        if !foreign.is_empty() {
            tracing::warn!(
                searched = %searched,
                ignored = foreign.len(),
                "Search result contains devices of another transport"
            );
        }

        let before = self.devices.len();
        self.devices.retain(|known| {
            known.kind() != searched
                || discovered.iter().any(|found| known.is_same_as(Some(found)))
        });
        let removed = before.saturating_sub(self.devices.len());
        if removed > 0 {
            tracing::info!(kind = %searched, removed, "Devices lost after search");
        }

        discovered
            .into_iter()
            .filter_map(|device| {
                let uid = device.unique_id().clone();
                (self.insert(device) == Registration::Added).then_some(uid)
            })
            .collect()
    }

    /// Find a device by transport kind and unique id.
    #[must_use]
    pub fn find(&self, kind: TransportKind, unique_id: &DeviceUid) -> Option<&Device> {
        self.devices
            .iter()
            .find(|device| device.kind() == kind && device.unique_id() == unique_id)
    }

    /// Mutable lookup by transport kind and unique id.
    pub fn find_mut(&mut self, kind: TransportKind, unique_id: &DeviceUid) -> Option<&mut Device> {
        self.devices
            .iter_mut()
            .find(|device| device.kind() == kind && device.unique_id() == unique_id)
    }

    /// Assign the transport handle of a registered device.
    ///
    /// Returns `false` if no such device is registered.
    pub fn set_handle(
        &mut self,
        kind: TransportKind,
        unique_id: &DeviceUid,
        handle: DeviceHandle,
    ) -> bool {
        match self.find_mut(kind, unique_id) {
            Some(device) => {
                device.set_handle(handle);
                true
            }
            None => false,
        }
    }

    /// Remove a device on disconnect.
    pub fn remove(&mut self, kind: TransportKind, unique_id: &DeviceUid) -> Option<Device> {
        let index = self
            .devices
            .iter()
            .position(|device| device.kind() == kind && device.unique_id() == unique_id)?;
        let device = self.devices.remove(index);
        tracing::info!(device = %unique_id, kind = %kind, "Device removed");
        Some(device)
    }

    /// Registered devices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    /// Number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
