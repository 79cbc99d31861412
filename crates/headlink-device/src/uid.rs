//! Device identifiers.
//!
//! A [`DeviceUid`] is the primary identity key of a device. It is opaque and
//! scoped to the transport that produced it: two devices are only ever
//! compared by id when they share a transport kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DeviceError, DeviceResult};

/// Opaque, transport-scoped unique device identifier.
///
/// Equality, ordering and hashing are byte-wise. An empty id cannot be
/// constructed, including through deserialization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DeviceUid(Vec<u8>);

impl DeviceUid {
    /// Create an identifier from raw bytes or a string.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::EmptyUniqueId`] if `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> DeviceResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DeviceError::EmptyUniqueId);
        }
        Ok(Self(bytes))
    }

    /// Identifier used by the Bluetooth transport: the device MAC rendered
    /// as `AA:BB:CC:DD:EE:FF`.
    #[must_use]
    pub fn from_mac(mac: MacAddress) -> Self {
        Self(mac.to_string().into_bytes())
    }

    /// Raw identifier bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Identifier length in bytes. Always non-zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: empty ids are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u8>> for DeviceUid {
    type Error = DeviceError;

    fn try_from(bytes: Vec<u8>) -> DeviceResult<Self> {
        Self::new(bytes)
    }
}

impl TryFrom<&str> for DeviceUid {
    type Error = DeviceError;

    fn try_from(value: &str) -> DeviceResult<Self> {
        Self::new(value)
    }
}

impl From<DeviceUid> for Vec<u8> {
    fn from(uid: DeviceUid) -> Self {
        uid.0
    }
}

impl AsRef<[u8]> for DeviceUid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for DeviceUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// 48-bit Bluetooth device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Address octets, most significant first.
    #[must_use]
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl FromStr for MacAddress {
    type Err = DeviceError;

    fn from_str(s: &str) -> DeviceResult<Self> {
        let separator = if s.contains(':') { ':' } else { '-' };
        let mut octets = [0u8; 6];
        let mut parts = s.split(separator);
        for octet in &mut octets {
            let part = parts
                .next()
                .filter(|p| p.len() == 2 && p.bytes().all(|b| b.is_ascii_hexdigit()))
                .ok_or_else(|| DeviceError::invalid_mac_address(s))?;
            *octet = u8::from_str_radix(part, 16)
                .map_err(|err| DeviceError::invalid_mac_address(format!("{s} ({err})")))?;
        }
        if parts.next().is_some() {
            return Err(DeviceError::invalid_mac_address(s));
        }
        Ok(Self(octets))
    }
}

#[cfg(feature = "proptest")]
mod proptest_support {
    use super::*;
    use proptest::prelude::*;

    impl Arbitrary for DeviceUid {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            prop::collection::vec(any::<u8>(), 1..32)
                .prop_map(DeviceUid)
                .boxed()
        }
    }
}
