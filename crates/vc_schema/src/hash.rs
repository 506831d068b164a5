use core::any::TypeId;

use foldhash::fast::FixedState;
use hashbrown::{HashMap, HashSet};

/// Fixed hash state, so lookups behave the same on every run.
pub(crate) const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

pub(crate) type FixedHashMap<K, V> = HashMap<K, V, FixedState>;

pub(crate) type FixedHashSet<K> = HashSet<K, FixedState>;

pub(crate) type TypeIdMap<V> = FixedHashMap<TypeId, V>;

#[inline]
pub(crate) const fn new_map<K, V>() -> FixedHashMap<K, V> {
    HashMap::with_hasher(FIXED_HASH_STATE)
}

#[inline]
pub(crate) const fn new_set<K>() -> FixedHashSet<K> {
    HashSet::with_hasher(FIXED_HASH_STATE)
}
