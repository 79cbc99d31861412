//! # headlink-device
//!
//! Transport-independent device identity for the headlink transport layer.
//!
//! Phones reach the head unit over several physical transports, each with its
//! own notion of device identity and hosted applications. This crate gives the
//! connection handler and session multiplexer one contract over all of them:
//!
//! - [`Device`] is a closed set of transport variants ([`AoaDevice`],
//!   [`Iap2Device`], [`BluetoothDevice`], [`TcpDevice`]) sharing the
//!   [`TransportDevice`] capability trait.
//! - [`Device::is_same_as`] decides whether two devices are the same physical
//!   device: same transport kind and byte-equal [`DeviceUid`].
//! - [`TransportDevice::application_list`] enumerates hosted applications.
//! - [`DeviceRegistry`] is the adapter-side store that keeps one entry per
//!   physical device.
//!
//! ## Example
//!
//! ```rust
//! use headlink_device::prelude::*;
//!
//! # fn main() -> Result<(), DeviceError> {
//! let mut registry = DeviceRegistry::new();
//! let phone = Device::from(AoaDevice::new("Pixel 8", DeviceUid::new("0a1b2c3d")?));
//!
//! assert_eq!(registry.insert(phone.clone()), Registration::Added);
//! assert_eq!(registry.insert(phone.clone()), Registration::AlreadyKnown);
//! assert_eq!(phone.application_list(), vec![1]);
//! # Ok(())
//! # }
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]

pub mod application;
pub mod device;
pub mod error;
pub mod registry;
pub mod transport;
pub mod uid;

pub mod prelude;

pub use application::{
    ApplicationHandle, ApplicationList, ApplicationTable, SINGLE_APPLICATION_HANDLE,
};
pub use device::{Device, DeviceHandle, DeviceInfo, TransportDevice, TransportKind};
pub use error::{DeviceError, DeviceResult};
pub use registry::{DeviceRegistry, Registration};
pub use transport::{AoaDevice, BluetoothDevice, Iap2Device, RfcommChannel, TcpDevice};
pub use uid::{DeviceUid, MacAddress};
