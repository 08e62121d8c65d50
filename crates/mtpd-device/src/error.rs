use thiserror::Error;

use crate::state::DevicePhase;
use crate::store::StorageError;

/// Errors surfaced by the device context.
///
/// Lookup misses are not errors (they come back as `Option`/response codes);
/// this type covers refused mutations and collaborator failures.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no free store slot (max {max})")]
    StoreSlotsFull { max: usize },

    #[error("device is faulted; reset required")]
    DeviceFaulted,

    #[error("illegal phase transition {from:?} -> {to:?}")]
    IllegalPhaseTransition {
        from: DevicePhase,
        to: DevicePhase,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
