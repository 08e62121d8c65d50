//! Device-side MTP/PTP responder core.
//!
//! Models one responder device exposing storage volumes full of addressable
//! objects, and answers the registry side of the protocol: DeviceInfo
//! packing, store enumeration, object lookup and deletion, all gated by the
//! command/data/response transaction phase. This crate provides:
//!
//! - [`MtpDevice`]: the device context (store registry + object resolver +
//!   phase machine), explicitly owned and passed by the caller
//! - [`StoreVolume`] / [`StorageBackend`]: collaborator traits the host
//!   integration implements; [`MemStore`] / [`MemStorageBackend`] as the
//!   in-memory implementation
//! - [`SList`]: the singly-linked sequence container the registry is built on
//! - [`DeviceConfig`]: static identity configuration (serde-loadable)
//!
//! The USB transport that frames commands and drives phase transitions lives
//! above this crate and serializes all calls into it.

mod config;
mod device;
mod error;
mod mem_store;
mod slist;
mod state;
mod store;

pub use config::DeviceConfig;
pub use device::MtpDevice;
pub use error::DeviceError;
pub use mem_store::{MemStorageBackend, MemStore};
pub use slist::{Iter, IterMut, SList};
pub use state::{DevicePhase, DeviceStatus};
pub use store::{
    DeleteOutcome, FormatFilter, ObjectHandle, ObjectInfo, StorageBackend, StorageError, StoreId,
    StoreVolume,
};
