use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::impls::impl_value_any;
use crate::value::{Array, Classification, List, Serializable, Value, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Vec

impl<T: Serializable> Value for Vec<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::List(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::List(self)
    }

    impl_value_any!();
}

impl<T: Serializable> Serializable for Vec<T> {
    const CLASSIFICATION: Classification = Classification::Atomic;
}

impl<T: Serializable> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Value> {
        <[T]>::get(self, index).map(|v| v as &dyn Value)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Value> {
        <[T]>::get_mut(self, index).map(|v| v as &mut dyn Value)
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push_default(&mut self) -> &mut dyn Value {
        let index = Vec::len(self);
        self.push(T::default());
        &mut self[index]
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_> {
        Box::new(<[T]>::iter(self).map(|v| v as &dyn Value))
    }
}

// -----------------------------------------------------------------------------
// Array

impl<T: Serializable, const N: usize> Value for [T; N] {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Array(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Array(self)
    }

    impl_value_any!();
}

impl<T: Serializable, const N: usize> Serializable for [T; N]
where
    [T; N]: Default,
{
    const CLASSIFICATION: Classification = Classification::Atomic;
}

impl<T: Serializable, const N: usize> Array for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Value> {
        <[T]>::get(self, index).map(|v| v as &dyn Value)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Value> {
        <[T]>::get_mut(self, index).map(|v| v as &mut dyn Value)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_> {
        Box::new(<[T]>::iter(self).map(|v| v as &dyn Value))
    }
}
