//! Store and object model, and the storage collaborator traits.
//!
//! The device core never touches a filesystem. It talks to storage through
//! [`StorageBackend`] (volume lifecycle) and [`StoreVolume`] (per-store
//! object index), so filesystem-backed, database-backed and in-memory stores
//! are interchangeable behind the same registry code.

use core::any::Any;
use core::fmt;

use thiserror::Error;

use mtpd_proto::codes::FormatCode;

/// Storage volume id, unique among attached stores.
///
/// Layout follows the PTP storage-id convention: physical volume number in
/// the high 16 bits, logical partition in the low 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(pub u32);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Object handle, unique across the whole device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u32);

impl ObjectHandle {
    /// Parent handle carried by root-level objects.
    pub const ROOT_PARENT: ObjectHandle = ObjectHandle(0xFFFF_FFFF);
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Index entry for one addressable object within a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub handle: ObjectHandle,
    pub parent: ObjectHandle,
    pub format: FormatCode,
    pub path: String,
}

impl ObjectInfo {
    /// Containers (folders) are the only objects with children.
    pub fn is_association(&self) -> bool {
        self.format.is_association()
    }
}

/// Format filter applied by DeleteObject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFilter {
    /// Wildcard: every format matches.
    Any,
    Only(FormatCode),
}

impl FormatFilter {
    pub fn matches(self, format: FormatCode) -> bool {
        match self {
            FormatFilter::Any => true,
            FormatFilter::Only(f) => f == format,
        }
    }
}

/// Outcome of a filtered tree deletion inside one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Target object (and its whole subtree, if a container) removed.
    Deleted,
    /// Some descendants failed the filter and survived; the target container
    /// stays too, since removing it would orphan them.
    PartiallyDeleted,
    /// The target's own format fails the filter; nothing was touched.
    FormatMismatch,
    NotFound,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to initialize storage volume: {0}")]
    InitFailed(String),
    #[error("storage volume unavailable: {0}")]
    Unavailable(String),
    #[error("object handle {0} already in use")]
    DuplicateHandle(ObjectHandle),
}

/// One attached storage volume's object index.
///
/// `as_any`/`as_any_mut` give callers a downcast seam to the concrete store
/// type (e.g. [`crate::MemStore`]) for operations outside this contract.
pub trait StoreVolume {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> StoreId;

    /// Parent handle to use for objects created at this store's root.
    fn root_parent_handle(&self) -> ObjectHandle;

    fn object_count(&self) -> usize;

    fn find_object_by_handle(&self, handle: ObjectHandle) -> Option<&ObjectInfo>;

    fn find_object_by_path(&self, path: &str) -> Option<&ObjectInfo>;

    fn contains_handle(&self, handle: ObjectHandle) -> bool {
        self.find_object_by_handle(handle).is_some()
    }

    /// Deletes the object with `handle` and, for containers, its descendants,
    /// subject to `filter` (applied recursively).
    fn delete_object_tree(&mut self, handle: ObjectHandle, filter: FormatFilter) -> DeleteOutcome;
}

/// Storage volume lifecycle, implemented by the host integration.
pub trait StorageBackend {
    /// Discovers and initializes the backing volume for a new store slot.
    /// The device assigns the store id.
    fn initialize_volume(&mut self, id: StoreId) -> Result<Box<dyn StoreVolume>, StorageError>;

    /// Takes back a volume detached from the device.
    fn release_volume(&mut self, volume: Box<dyn StoreVolume>);
}
