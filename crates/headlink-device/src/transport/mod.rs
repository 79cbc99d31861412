//! Concrete device types, one per transport family.

mod aoa;
mod bluetooth;
mod iap2;
mod tcp;

pub use aoa::AoaDevice;
pub use bluetooth::{BluetoothDevice, RfcommChannel};
pub use iap2::Iap2Device;
pub use tcp::TcpDevice;
