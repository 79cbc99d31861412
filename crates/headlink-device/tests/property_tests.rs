//! Property-based tests for device identity invariants.

use headlink_device::prelude::*;
use proptest::prelude::*;

/// Transports whose unique id is supplied by the caller. Bluetooth ids are
/// derived from the MAC address and are covered by the unit tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum UidKind {
    Aoa,
    Iap2,
    Tcp,
}

fn build(kind: UidKind, uid: DeviceUid) -> Device {
    match kind {
        UidKind::Aoa => Device::from(AoaDevice::new("aoa", uid)),
        UidKind::Iap2 => Device::from(Iap2Device::new("iap2", uid)),
        UidKind::Tcp => Device::from(TcpDevice::new(
            "tcp",
            uid,
            std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
        )),
    }
}

fn kind_strategy() -> impl Strategy<Value = UidKind> {
    prop_oneof![Just(UidKind::Aoa), Just(UidKind::Iap2), Just(UidKind::Tcp)]
}

fn uid_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..24)
}

proptest! {
    #[test]
    fn test_same_as_is_symmetric(
        kind_a in kind_strategy(),
        kind_b in kind_strategy(),
        uid_a in uid_strategy(),
        uid_b in uid_strategy(),
    ) {
        let a = build(kind_a, DeviceUid::new(uid_a).map_err(|e| TestCaseError::fail(e.to_string()))?);
        let b = build(kind_b, DeviceUid::new(uid_b).map_err(|e| TestCaseError::fail(e.to_string()))?);
        prop_assert_eq!(a.is_same_as(Some(&b)), b.is_same_as(Some(&a)));
    }

    #[test]
    fn test_same_as_iff_same_kind_and_uid(
        kind_a in kind_strategy(),
        kind_b in kind_strategy(),
        uid_a in uid_strategy(),
        uid_b in uid_strategy(),
    ) {
        let expected = kind_a == kind_b && uid_a == uid_b;
        let a = build(kind_a, DeviceUid::new(uid_a).map_err(|e| TestCaseError::fail(e.to_string()))?);
        let b = build(kind_b, DeviceUid::new(uid_b).map_err(|e| TestCaseError::fail(e.to_string()))?);
        prop_assert_eq!(a.is_same_as(Some(&b)), expected);
    }

    #[test]
    fn test_set_handle_preserves_identity(
        kind in kind_strategy(),
        uid in uid_strategy(),
        handle in any::<u64>(),
    ) {
        let original = build(kind, DeviceUid::new(uid).map_err(|e| TestCaseError::fail(e.to_string()))?);
        let mut updated = original.clone();
        updated.set_handle(DeviceHandle(handle));
        prop_assert!(updated.is_same_as(Some(&original)));
        prop_assert_eq!(updated.unique_id(), original.unique_id());
        prop_assert_eq!(updated.application_list(), original.application_list());
    }

    #[test]
    fn test_registry_never_holds_duplicates(
        entries in prop::collection::vec((kind_strategy(), 0u8..6), 0..40),
    ) {
        let mut registry = DeviceRegistry::new();
        let mut distinct = std::collections::BTreeSet::new();
        for (kind, id) in entries {
            let uid = DeviceUid::new(vec![b'd', id]).map_err(|e| TestCaseError::fail(e.to_string()))?;
            distinct.insert((kind, id));
            registry.insert(build(kind, uid));
        }
        prop_assert_eq!(registry.len(), distinct.len());
    }
}
