use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::BuildHasher;
use std::collections::HashMap;

use crate::impls::impl_value_any;
use crate::value::{Classification, Map, Serializable, Value, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// BTreeMap

impl<V: Serializable> Value for BTreeMap<String, V> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Map(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Map(self)
    }

    impl_value_any!();
}

impl<V: Serializable> Serializable for BTreeMap<String, V> {
    const CLASSIFICATION: Classification = Classification::Atomic;
}

impl<V: Serializable> Map for BTreeMap<String, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Value> {
        BTreeMap::get(self, key).map(|v| v as &dyn Value)
    }

    #[inline]
    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    #[inline]
    fn insert_default(&mut self, key: String) -> &mut dyn Value {
        self.entry(key).or_default()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Value)> + '_> {
        Box::new(BTreeMap::iter(self).map(|(k, v)| (k.as_str(), v as &dyn Value)))
    }
}

// -----------------------------------------------------------------------------
// HashMap

impl<V, S> Value for HashMap<String, V, S>
where
    V: Serializable,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Map(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Map(self)
    }

    impl_value_any!();
}

impl<V, S> Serializable for HashMap<String, V, S>
where
    V: Serializable,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    const CLASSIFICATION: Classification = Classification::Atomic;
}

impl<V, S> Map for HashMap<String, V, S>
where
    V: Serializable,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Value> {
        HashMap::get(self, key).map(|v| v as &dyn Value)
    }

    #[inline]
    fn clear(&mut self) {
        HashMap::clear(self);
    }

    #[inline]
    fn insert_default(&mut self, key: String) -> &mut dyn Value {
        self.entry(key).or_default()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Value)> + '_> {
        Box::new(HashMap::iter(self).map(|(k, v)| (k.as_str(), v as &dyn Value)))
    }
}
