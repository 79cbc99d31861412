//! Prelude for headlink-device.
//!
//! Re-exports the types a transport adapter needs to create, compare and
//! register devices.

pub use crate::application::{ApplicationHandle, ApplicationList, SINGLE_APPLICATION_HANDLE};
pub use crate::device::{Device, DeviceHandle, TransportDevice, TransportKind};
pub use crate::error::{DeviceError, DeviceResult};
pub use crate::registry::{DeviceRegistry, Registration};
pub use crate::transport::{AoaDevice, BluetoothDevice, Iap2Device, RfcommChannel, TcpDevice};
pub use crate::uid::{DeviceUid, MacAddress};
