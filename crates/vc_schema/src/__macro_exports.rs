//! Items used by generated code. Not public API.

pub use alloc::boxed::Box;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::Registered;
    use crate::registry::SchemaRegistry;

    /// A registration function submitted by `#[schema(auto_register)]`.
    pub struct __AutoRegisterFunc(pub fn(&mut SchemaRegistry));

    inventory::collect!(__AutoRegisterFunc);

    #[inline]
    pub fn __register<T: Registered>(registry: &mut SchemaRegistry) {
        registry.register::<T>();
    }

    // Submitted by this crate itself: if it shows up during iteration,
    // static registration works on this platform.
    inventory::submit! {
        __AutoRegisterFunc(SchemaRegistry::mark_auto_registered)
    }

    pub(crate) fn __register_types(registry: &mut SchemaRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
