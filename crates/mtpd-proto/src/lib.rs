//! PTP/MTP wire-format primitives for the mtpd responder core.
//!
//! MTP datasets are flat little-endian records mixing fixed-width integers,
//! length-prefixed UTF-16LE strings and count-prefixed arrays of 16-bit codes.
//! This crate provides:
//!
//! - [`codes`]: the protocol code tables (operations, events, device
//!   properties, object formats, response codes)
//! - [`PtpString`]: the protocol's length-prefixed text representation
//! - [`ByteWriter`]: little-endian cursor for packing datasets into
//!   caller-supplied buffers
//! - [`DeviceInfo`]: the GetDeviceInfo dataset with exact size accounting and
//!   fail-clean packing
//!
//! Transport framing (containers, transaction ids) is out of scope; callers
//! hand us the payload buffer and we fill it.

pub mod codes;
mod device_info;
mod wire;

pub use device_info::{DeviceInfo, PackError};
pub use wire::{ByteWriter, PtpString};
