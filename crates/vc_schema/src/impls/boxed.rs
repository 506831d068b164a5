use alloc::boxed::Box;

use crate::impls::impl_value_any;
use crate::value::{Classification, Serializable, Value, ValueMut, ValueRef};

// An owning pointer is encoded exactly as its pointee.

impl<T: Value> Value for Box<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        (**self).value_ref()
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        (**self).value_mut()
    }

    impl_value_any!();
}

impl<T: Serializable> Serializable for Box<T> {
    const CLASSIFICATION: Classification = T::CLASSIFICATION;
}
