//! The device context: store registry, object resolver and transaction gate.

use tracing::{debug, warn};

use mtpd_proto::codes::ResponseCode;
use mtpd_proto::DeviceInfo;

use crate::config::DeviceConfig;
use crate::error::DeviceError;
use crate::slist::SList;
use crate::state::{DevicePhase, DeviceStatus};
use crate::store::{
    DeleteOutcome, FormatFilter, ObjectHandle, ObjectInfo, StorageBackend, StoreId, StoreVolume,
};

/// Device-side responder state for one MTP/PTP device.
///
/// Owns the DeviceInfo dataset, the attached store list and the transaction
/// phase. Constructed at startup and passed explicitly into every operation;
/// there is no ambient singleton. The transport layer serializes calls, so no
/// internal locking is needed — callers that share the device across threads
/// wrap it in their own mutex.
pub struct MtpDevice {
    config: DeviceConfig,
    info: DeviceInfo,
    status: DeviceStatus,
    phase: DevicePhase,
    stores: SList<Box<dyn StoreVolume>>,
    /// One mount flag per configured store slot.
    mounted: Vec<bool>,
    /// Destination store when SendObjectInfo omits one; the first installed
    /// store.
    default_store: Option<StoreId>,
    /// Parent handle when SendObjectInfo omits one; the default store's root.
    default_parent: ObjectHandle,
    backend: Box<dyn StorageBackend>,
}

impl MtpDevice {
    pub fn new(config: DeviceConfig, backend: Box<dyn StorageBackend>) -> Self {
        let info = config.device_info();
        let mounted = vec![false; config.max_stores];
        Self {
            info,
            status: DeviceStatus::Ok,
            phase: DevicePhase::Idle,
            stores: SList::new(),
            mounted,
            default_store: None,
            default_parent: ObjectHandle::ROOT_PARENT,
            backend,
            config,
        }
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    pub fn phase(&self) -> DevicePhase {
        self.phase
    }

    /// Current DeviceInfo dataset; pack it with
    /// [`DeviceInfo::required_size`] / [`DeviceInfo::pack_into`] when
    /// answering GetDeviceInfo.
    pub fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn default_store_id(&self) -> Option<StoreId> {
        self.default_store
    }

    pub fn default_parent_handle(&self) -> ObjectHandle {
        self.default_parent
    }

    // ----- transaction phase -----

    /// Transport-driven phase transition. Illegal transitions leave the
    /// current phase untouched.
    pub fn set_phase(&mut self, next: DevicePhase) -> Result<(), DeviceError> {
        if !self.phase.can_transition_to(next) {
            return Err(DeviceError::IllegalPhaseTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    /// Parks the device after a transport-detected protocol violation.
    /// Terminal for the session: registry mutations are refused until
    /// [`MtpDevice::reset`].
    pub fn fault(&mut self) {
        warn!(phase = ?self.phase, "device fault, parking until reset");
        self.status = DeviceStatus::Error;
        self.phase = DevicePhase::NotReady;
    }

    fn faulted(&self) -> bool {
        self.status == DeviceStatus::Error || self.phase == DevicePhase::NotReady
    }

    fn check_mutable(&self) -> Result<(), DeviceError> {
        if self.faulted() {
            Err(DeviceError::DeviceFaulted)
        } else {
            Ok(())
        }
    }

    /// Returns the device to its initial state: phase `Idle`, status `Ok`,
    /// DeviceInfo rebuilt from the static configuration, store list empty
    /// (volumes are handed back to the backend; stores must be reinstalled).
    pub fn reset(&mut self) {
        debug!("device reset");
        self.release_all_stores();
        self.info = self.config.device_info();
        self.status = DeviceStatus::Ok;
        self.phase = DevicePhase::Idle;
    }

    // ----- store registry -----

    fn store_id_for_slot(slot: usize) -> StoreId {
        // PTP storage-id layout: physical volume number in the high word,
        // logical partition 1 in the low word.
        StoreId(((slot as u32 + 1) << 16) | 0x0001)
    }

    /// Attaches one storage volume into the next free slot. The first
    /// installed store becomes the default store, its root the default
    /// parent. On failure the existing store set is untouched.
    pub fn install_storage(&mut self) -> Result<StoreId, DeviceError> {
        self.check_mutable()?;
        let slot = self
            .mounted
            .iter()
            .position(|m| !*m)
            .ok_or(DeviceError::StoreSlotsFull {
                max: self.mounted.len(),
            })?;
        let id = Self::store_id_for_slot(slot);
        let volume = self.backend.initialize_volume(id)?;
        let root = volume.root_parent_handle();
        self.stores.push_back(volume);
        self.mounted[slot] = true;
        if self.default_store.is_none() {
            self.default_store = Some(id);
            self.default_parent = root;
        }
        debug!(store_id = %id, slot, "storage installed");
        Ok(id)
    }

    /// Detaches every attached store, handing the volumes back to the
    /// backend. Idempotent: succeeds trivially with nothing installed.
    pub fn uninstall_storage(&mut self) -> Result<(), DeviceError> {
        self.check_mutable()?;
        let released = self.stores.len();
        self.release_all_stores();
        debug!(released, "storage uninstalled");
        Ok(())
    }

    fn release_all_stores(&mut self) {
        while let Some(volume) = self.stores.remove_first(|_| true) {
            self.backend.release_volume(volume);
        }
        for flag in &mut self.mounted {
            *flag = false;
        }
        self.default_store = None;
        self.default_parent = ObjectHandle::ROOT_PARENT;
    }

    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Attached store ids in attachment order (matching
    /// [`MtpDevice::store_at_index`]).
    pub fn store_ids(&self) -> Vec<StoreId> {
        self.stores.iter().map(|s| s.id()).collect()
    }

    pub fn store(&self, id: StoreId) -> Option<&dyn StoreVolume> {
        self.stores.iter().find(|s| s.id() == id).map(|b| b.as_ref())
    }

    pub fn store_mut(&mut self, id: StoreId) -> Option<&mut dyn StoreVolume> {
        self.stores
            .iter_mut()
            .find(|s| s.id() == id)
            .map(|b| b.as_mut() as &mut dyn StoreVolume)
    }

    /// Store at the given 0-based position in attachment order.
    pub fn store_at_index(&self, index: usize) -> Option<&dyn StoreVolume> {
        self.stores.iter().nth(index).map(|b| b.as_ref())
    }

    // ----- object resolver -----

    /// Cross-store lookup by handle. Handles are unique device-wide, so the
    /// first hit (in attachment order) is the only possible one.
    pub fn object_by_handle(&self, handle: ObjectHandle) -> Option<&ObjectInfo> {
        self.stores
            .iter()
            .find_map(|s| s.find_object_by_handle(handle))
    }

    /// Cross-store lookup by full path; used when a client references an
    /// object before a handle exists.
    pub fn object_by_path(&self, path: &str) -> Option<&ObjectInfo> {
        self.stores.iter().find_map(|s| s.find_object_by_path(path))
    }

    /// The store owning `handle`, for routing per-store operations.
    pub fn store_containing(&self, handle: ObjectHandle) -> Option<&dyn StoreVolume> {
        self.stores
            .iter()
            .find(|s| s.contains_handle(handle))
            .map(|b| b.as_ref())
    }

    /// Deletes the object with `handle` subject to `filter`, recursing into
    /// containers. Returns the protocol response code: the requester
    /// distinguishes not-found from format-mismatch from partial deletion.
    pub fn delete_object(&mut self, handle: ObjectHandle, filter: FormatFilter) -> ResponseCode {
        if self.faulted() {
            warn!(%handle, "delete refused, device faulted");
            return ResponseCode::GENERAL_ERROR;
        }
        let Some(store) = self.stores.iter_mut().find(|s| s.contains_handle(handle)) else {
            return ResponseCode::INVALID_OBJECT_HANDLE;
        };
        match store.delete_object_tree(handle, filter) {
            DeleteOutcome::Deleted => {
                debug!(%handle, "object deleted");
                ResponseCode::OK
            }
            DeleteOutcome::PartiallyDeleted => {
                debug!(%handle, "object tree partially deleted");
                ResponseCode::PARTIAL_DELETION
            }
            DeleteOutcome::FormatMismatch => ResponseCode::INVALID_OBJECT_FORMAT_CODE,
            // contains_handle raced nothing (single writer); unreachable in
            // practice but mapped anyway
            DeleteOutcome::NotFound => ResponseCode::INVALID_OBJECT_HANDLE,
        }
    }
}
