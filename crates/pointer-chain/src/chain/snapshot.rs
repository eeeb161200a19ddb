use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only view of a memory dump: address to stored 64-bit value
pub trait Snapshot {
    /// Value stored at `address`, if the address is mapped
    fn value_at(&self, address: u64) -> Option<u64>;

    fn contains(&self, address: u64) -> bool {
        self.value_at(address).is_some()
    }
}

impl<S: BuildHasher> Snapshot for HashMap<u64, u64, S> {
    #[inline]
    fn value_at(&self, address: u64) -> Option<u64> {
        self.get(&address).copied()
    }

    #[inline]
    fn contains(&self, address: u64) -> bool {
        self.contains_key(&address)
    }
}

impl Snapshot for BTreeMap<u64, u64> {
    #[inline]
    fn value_at(&self, address: u64) -> Option<u64> {
        self.get(&address).copied()
    }

    #[inline]
    fn contains(&self, address: u64) -> bool {
        self.contains_key(&address)
    }
}

impl<T: Snapshot + ?Sized> Snapshot for &T {
    #[inline]
    fn value_at(&self, address: u64) -> Option<u64> {
        (**self).value_at(address)
    }

    #[inline]
    fn contains(&self, address: u64) -> bool {
        (**self).contains(address)
    }
}
