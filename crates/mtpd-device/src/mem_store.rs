//! In-memory store implementation.
//!
//! Used by tests and by host frontends that materialize their object tree
//! up-front instead of scanning a filesystem on demand.

use core::any::Any;
use std::collections::BTreeMap;

use crate::store::{
    DeleteOutcome, FormatFilter, ObjectHandle, ObjectInfo, StorageBackend, StorageError, StoreId,
    StoreVolume,
};

/// Store volume holding its object index in a `BTreeMap` keyed by handle.
#[derive(Debug)]
pub struct MemStore {
    id: StoreId,
    objects: BTreeMap<u32, ObjectInfo>,
}

impl MemStore {
    pub fn new(id: StoreId) -> Self {
        Self {
            id,
            objects: BTreeMap::new(),
        }
    }

    /// Registers an object. Handles must be unique within the store (the
    /// device-wide uniqueness invariant is the handle allocator's concern).
    pub fn insert_object(&mut self, info: ObjectInfo) -> Result<(), StorageError> {
        if self.objects.contains_key(&info.handle.0) {
            return Err(StorageError::DuplicateHandle(info.handle));
        }
        self.objects.insert(info.handle.0, info);
        Ok(())
    }

    /// Deletes the subtree rooted at `handle`, keeping every object whose
    /// format fails `filter`. Returns whether the whole subtree (root
    /// included) is gone. The root's own format has already been checked by
    /// the caller.
    fn delete_recursive(&mut self, handle: ObjectHandle, filter: FormatFilter) -> bool {
        let children: Vec<u32> = self
            .objects
            .values()
            .filter(|o| o.parent == handle)
            .map(|o| o.handle.0)
            .collect();

        let mut subtree_cleared = true;
        for child in children {
            let format = self.objects[&child].format;
            if !filter.matches(format) {
                subtree_cleared = false;
                continue;
            }
            if !self.delete_recursive(ObjectHandle(child), filter) {
                subtree_cleared = false;
            }
        }

        // A container with surviving children must stay, or they would be
        // orphaned.
        if subtree_cleared {
            self.objects.remove(&handle.0);
        }
        subtree_cleared
    }
}

impl StoreVolume for MemStore {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn id(&self) -> StoreId {
        self.id
    }

    fn root_parent_handle(&self) -> ObjectHandle {
        ObjectHandle::ROOT_PARENT
    }

    fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn find_object_by_handle(&self, handle: ObjectHandle) -> Option<&ObjectInfo> {
        self.objects.get(&handle.0)
    }

    fn find_object_by_path(&self, path: &str) -> Option<&ObjectInfo> {
        self.objects.values().find(|o| o.path == path)
    }

    fn delete_object_tree(&mut self, handle: ObjectHandle, filter: FormatFilter) -> DeleteOutcome {
        let Some(obj) = self.objects.get(&handle.0) else {
            return DeleteOutcome::NotFound;
        };
        if !filter.matches(obj.format) {
            return DeleteOutcome::FormatMismatch;
        }
        if self.delete_recursive(handle, filter) {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::PartiallyDeleted
        }
    }
}

/// Backend producing empty [`MemStore`] volumes.
#[derive(Debug, Default)]
pub struct MemStorageBackend;

impl MemStorageBackend {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for MemStorageBackend {
    fn initialize_volume(&mut self, id: StoreId) -> Result<Box<dyn StoreVolume>, StorageError> {
        Ok(Box::new(MemStore::new(id)))
    }

    fn release_volume(&mut self, _volume: Box<dyn StoreVolume>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtpd_proto::codes::FormatCode;

    fn obj(handle: u32, parent: ObjectHandle, format: FormatCode, path: &str) -> ObjectInfo {
        ObjectInfo {
            handle: ObjectHandle(handle),
            parent,
            format,
            path: path.to_owned(),
        }
    }

    #[test]
    fn duplicate_handle_is_rejected() {
        let mut store = MemStore::new(StoreId(0x0001_0001));
        store
            .insert_object(obj(1, ObjectHandle::ROOT_PARENT, FormatCode::TEXT, "/a"))
            .unwrap();
        let err = store
            .insert_object(obj(1, ObjectHandle::ROOT_PARENT, FormatCode::TEXT, "/b"))
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateHandle(h) if h == ObjectHandle(1)));
        assert_eq!(store.object_count(), 1);
    }

    #[test]
    fn filtered_container_delete_keeps_non_matching_children() {
        let mut store = MemStore::new(StoreId(0x0001_0001));
        store
            .insert_object(obj(1, ObjectHandle::ROOT_PARENT, FormatCode::ASSOCIATION, "/d"))
            .unwrap();
        store
            .insert_object(obj(2, ObjectHandle(1), FormatCode::ASSOCIATION, "/d/e"))
            .unwrap();
        store
            .insert_object(obj(3, ObjectHandle(2), FormatCode::ASSOCIATION, "/d/e/f"))
            .unwrap();
        store
            .insert_object(obj(4, ObjectHandle(2), FormatCode::JPEG, "/d/e/x.jpg"))
            .unwrap();

        let outcome =
            store.delete_object_tree(ObjectHandle(1), FormatFilter::Only(FormatCode::ASSOCIATION));
        assert_eq!(outcome, DeleteOutcome::PartiallyDeleted);

        // the jpeg and its ancestor chain survive; the empty branch is gone
        assert!(store.contains_handle(ObjectHandle(1)));
        assert!(store.contains_handle(ObjectHandle(2)));
        assert!(!store.contains_handle(ObjectHandle(3)));
        assert!(store.contains_handle(ObjectHandle(4)));
    }

    #[test]
    fn wildcard_container_delete_removes_subtree() {
        let mut store = MemStore::new(StoreId(0x0001_0001));
        store
            .insert_object(obj(1, ObjectHandle::ROOT_PARENT, FormatCode::ASSOCIATION, "/d"))
            .unwrap();
        store
            .insert_object(obj(2, ObjectHandle(1), FormatCode::JPEG, "/d/x.jpg"))
            .unwrap();

        assert_eq!(
            store.delete_object_tree(ObjectHandle(1), FormatFilter::Any),
            DeleteOutcome::Deleted
        );
        assert_eq!(store.object_count(), 0);
    }
}
