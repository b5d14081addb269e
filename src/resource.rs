//! In-memory audio resource table.
//!
//! Opened files are read into memory once and registered here; the rest of
//! the program refers to them through opaque [`ResourceRef`] ids. Revoking a
//! reference drops the table's hold on the bytes — buffers already shared
//! with the deck stay alive through their `Arc` until the deck is done.

use std::collections::HashMap;
use std::sync::Arc;

/// Opaque, revocable reference to a registered audio buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceRef(u64);

/// Owner of all registered audio buffers.
#[derive(Default)]
pub struct ResourceTable {
    entries: HashMap<u64, Arc<Vec<u8>>>,
    next_id: u64,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a buffer and return its reference.
    pub fn register(&mut self, data: Arc<Vec<u8>>) -> ResourceRef {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, data);
        ResourceRef(id)
    }

    /// Resolve a reference to its buffer, if it has not been revoked.
    pub fn get(&self, resource: ResourceRef) -> Option<Arc<Vec<u8>>> {
        self.entries.get(&resource.0).cloned()
    }

    /// Drop the table's hold on a buffer. Returns false when the reference
    /// was already revoked or never existed.
    pub fn revoke(&mut self, resource: ResourceRef) -> bool {
        self.entries.remove(&resource.0).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_get_revoke_roundtrip() {
        let mut table = ResourceTable::new();
        let r = table.register(Arc::new(vec![1, 2, 3]));

        assert_eq!(table.get(r).as_deref().map(|v| v.as_slice()), Some(&[1u8, 2, 3][..]));
        assert_eq!(table.len(), 1);

        assert!(table.revoke(r));
        assert!(table.get(r).is_none());
        assert!(table.is_empty());

        // Second revoke is a no-op.
        assert!(!table.revoke(r));
    }

    #[test]
    fn references_are_unique_across_registrations() {
        let mut table = ResourceTable::new();
        let a = table.register(Arc::new(vec![0]));
        let b = table.register(Arc::new(vec![0]));
        assert_ne!(a, b);

        table.revoke(a);
        let c = table.register(Arc::new(vec![0]));
        assert_ne!(b, c);
    }

    #[test]
    fn buffers_outlive_revocation_through_shared_handles() {
        let mut table = ResourceTable::new();
        let data = Arc::new(vec![9u8; 16]);
        let r = table.register(data.clone());

        let held = table.get(r).unwrap();
        table.revoke(r);
        assert_eq!(held.len(), 16);
    }
}
