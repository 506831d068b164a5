use crate::impls::impl_value_any;
use crate::value::{Classification, Nullable, Serializable, Value, ValueMut, ValueRef};

impl<T: Serializable> Value for Option<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Nullable(self)
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Nullable(self)
    }

    impl_value_any!();
}

impl<T: Serializable> Serializable for Option<T> {
    const CLASSIFICATION: Classification = Classification::Atomic;
}

impl<T: Serializable> Nullable for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Value> {
        self.as_ref().map(|v| v as &dyn Value)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    #[inline]
    fn insert_default(&mut self) -> &mut dyn Value {
        self.insert(T::default())
    }
}
