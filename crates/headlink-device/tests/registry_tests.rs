//! Adapter registry behaviour: deduplication and discovery merges.

use headlink_device::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn aoa(uid: &str) -> Result<Device, DeviceError> {
    Ok(Device::from(AoaDevice::new(format!("phone {uid}"), DeviceUid::new(uid)?)))
}

fn iap2(uid: &str) -> Result<Device, DeviceError> {
    Ok(Device::from(Iap2Device::new(format!("iphone {uid}"), DeviceUid::new(uid)?)))
}

#[test]
fn test_same_id_on_different_transports_is_two_devices() -> TestResult {
    let mut registry = DeviceRegistry::new();
    assert_eq!(registry.insert(aoa("shared")?), Registration::Added);
    assert_eq!(registry.insert(iap2("shared")?), Registration::Added);
    assert_eq!(registry.len(), 2);
    Ok(())
}

#[test]
fn test_duplicate_keeps_existing_entry_state() -> TestResult {
    let mut registry = DeviceRegistry::new();
    let uid = DeviceUid::new("usb-1")?;
    registry.insert(aoa("usb-1")?);
    assert!(registry.set_handle(TransportKind::Aoa, &uid, DeviceHandle(5)));

    assert_eq!(registry.insert(aoa("usb-1")?), Registration::AlreadyKnown);

    let device = registry.find(TransportKind::Aoa, &uid).ok_or("device missing")?;
    assert_eq!(device.handle(), Some(DeviceHandle(5)));
    Ok(())
}

#[test]
fn test_merge_discovered_adds_keeps_and_drops() -> TestResult {
    let mut registry = DeviceRegistry::new();
    registry.insert(aoa("kept")?);
    registry.insert(aoa("lost")?);
    registry.insert(iap2("other-transport")?);

    let uid = DeviceUid::new("kept")?;
    assert!(registry.set_handle(TransportKind::Aoa, &uid, DeviceHandle(11)));

    let added = registry.merge_discovered(TransportKind::Aoa, vec![aoa("kept")?, aoa("new")?]);

    assert_eq!(added, vec![DeviceUid::new("new")?]);
    assert_eq!(registry.len(), 3);
    assert!(registry.find(TransportKind::Aoa, &DeviceUid::new("lost")?).is_none());
    assert!(registry
        .find(TransportKind::Iap2, &DeviceUid::new("other-transport")?)
        .is_some());

    let kept = registry.find(TransportKind::Aoa, &uid).ok_or("kept device missing")?;
    assert_eq!(kept.handle(), Some(DeviceHandle(11)));
    Ok(())
}

#[test]
fn test_merge_discovered_dedups_within_result() -> TestResult {
    let mut registry = DeviceRegistry::new();
    let added = registry.merge_discovered(TransportKind::Aoa, vec![aoa("a")?, aoa("a")?, aoa("b")?]);
    assert_eq!(added.len(), 2);
    assert_eq!(registry.len(), 2);
    Ok(())
}

#[test]
fn test_search_finding_nothing_drops_only_that_transport() -> TestResult {
    let mut registry = DeviceRegistry::new();
    registry.insert(aoa("usb-1")?);
    registry.insert(aoa("usb-2")?);
    registry.insert(iap2("apple-1")?);

    let added = registry.merge_discovered(TransportKind::Aoa, Vec::new());

    assert!(added.is_empty());
    assert_eq!(registry.len(), 1);
    assert!(registry.find(TransportKind::Iap2, &DeviceUid::new("apple-1")?).is_some());
    Ok(())
}

#[test]
fn test_search_ignores_devices_of_other_transports() -> TestResult {
    let mut registry = DeviceRegistry::new();
    registry.insert(iap2("apple-1")?);

    let added = registry.merge_discovered(TransportKind::Aoa, vec![aoa("usb-1")?, iap2("apple-2")?]);

    assert_eq!(added, vec![DeviceUid::new("usb-1")?]);
    assert!(registry.find(TransportKind::Iap2, &DeviceUid::new("apple-1")?).is_some());
    assert!(registry.find(TransportKind::Iap2, &DeviceUid::new("apple-2")?).is_none());
    Ok(())
}

#[test]
fn test_remove_on_disconnect() -> TestResult {
    let mut registry = DeviceRegistry::new();
    registry.insert(aoa("usb-1")?);
    let uid = DeviceUid::new("usb-1")?;

    assert!(registry.remove(TransportKind::Iap2, &uid).is_none());
    let removed = registry.remove(TransportKind::Aoa, &uid).ok_or("device missing")?;
    assert_eq!(removed.unique_id(), &uid);
    assert!(registry.is_empty());
    Ok(())
}

#[test]
fn test_enumerate_sessions_across_registry() -> TestResult {
    let mut registry = DeviceRegistry::new();
    registry.insert(aoa("usb-1")?);
    registry.insert(iap2("apple-1")?);

    let sessions: usize = registry.iter().map(|d| d.application_list().len()).sum();
    assert_eq!(sessions, 1);
    Ok(())
}
