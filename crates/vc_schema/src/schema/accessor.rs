use core::any::Any;
use core::marker::PhantomData;

use crate::value::Value;

// -----------------------------------------------------------------------------
// ErasedAccessor

/// Get/set binding between a schema member and a live object, with the object
/// type erased.
///
/// Returns `None` when handed an object of another type.
pub(crate) trait ErasedAccessor: Send + Sync + 'static {
    fn get<'a>(&self, object: &'a dyn Any) -> Option<&'a dyn Value>;

    fn get_mut<'a>(&self, object: &'a mut dyn Any) -> Option<&'a mut dyn Value>;
}

// -----------------------------------------------------------------------------
// TypedAccessor

pub(crate) struct TypedAccessor<O, T, G, M> {
    get: G,
    get_mut: M,
    _marker: PhantomData<fn(&O) -> &T>,
}

impl<O, T, G, M> TypedAccessor<O, T, G, M> {
    #[inline]
    pub const fn new(get: G, get_mut: M) -> Self {
        Self {
            get,
            get_mut,
            _marker: PhantomData,
        }
    }
}

impl<O, T, G, M> ErasedAccessor for TypedAccessor<O, T, G, M>
where
    O: Any,
    T: Value,
    G: Fn(&O) -> &T + Send + Sync + 'static,
    M: Fn(&mut O) -> &mut T + Send + Sync + 'static,
{
    #[inline]
    fn get<'a>(&self, object: &'a dyn Any) -> Option<&'a dyn Value> {
        let object = object.downcast_ref::<O>()?;
        Some((self.get)(object))
    }

    #[inline]
    fn get_mut<'a>(&self, object: &'a mut dyn Any) -> Option<&'a mut dyn Value> {
        let object = object.downcast_mut::<O>()?;
        Some((self.get_mut)(object))
    }
}
