use alloc::boxed::Box;
use alloc::string::ToString;
use core::any::TypeId;
use core::fmt;
use std::sync::LazyLock;

use log::{debug, warn};

use crate::format::{FormatReader, ReadError};
use crate::hash::{FixedHashMap, FixedHashSet, TypeIdMap, new_map, new_set};
use crate::schema::{Composite, Registered, Schema};
use crate::stream::InStream;

// -----------------------------------------------------------------------------
// SchemaRegistry

/// A registry of [`Schema`]s, addressable by [`TypeId`], full type path, or
/// short type name.
///
/// Registration is append-only: a type is registered at most once and its
/// entry never changes afterwards.
///
/// # Examples
///
/// ```
/// use vc_schema::derive::Schema;
/// use vc_schema::registry::SchemaRegistry;
///
/// #[derive(Schema, Default)]
/// struct Circle {
///     radius: f32,
/// }
///
/// let mut registry = SchemaRegistry::empty();
/// assert!(registry.register::<Circle>());
/// assert!(!registry.register::<Circle>());
///
/// let schema = registry.get_with_type_name("Circle").unwrap();
/// assert_eq!(schema.member_names(), ["radius"]);
/// ```
pub struct SchemaRegistry {
    schemas: TypeIdMap<&'static Schema>,
    type_path_to_id: FixedHashMap<&'static str, TypeId>,
    type_name_to_id: FixedHashMap<&'static str, TypeId>,
    ambiguous_names: FixedHashSet<&'static str>,
    auto_registered: bool,
}

impl Default for SchemaRegistry {
    /// See [`SchemaRegistry::empty`].
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            schemas: new_map(),
            type_path_to_id: new_map(),
            type_name_to_id: new_map(),
            ambiguous_names: new_set(),
            auto_registered: false,
        }
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        schema: &'static Schema,
        type_path_to_id: &mut FixedHashMap<&'static str, TypeId>,
        type_name_to_id: &mut FixedHashMap<&'static str, TypeId>,
        ambiguous_names: &mut FixedHashSet<&'static str>,
    ) {
        let type_id = schema.type_id();
        let short_name = schema.short_name();

        if !ambiguous_names.contains(short_name) {
            if type_name_to_id.contains_key(short_name) {
                warn!("short type name `{short_name}` is ambiguous, look it up by full path instead");
                type_name_to_id.remove(short_name);
                ambiguous_names.insert(short_name);
            } else {
                type_name_to_id.insert(short_name, type_id);
            }
        }

        // Distinct types share a path only across crate versions.
        if type_path_to_id.insert(schema.type_name(), type_id).is_some() {
            warn!(
                "type path `{}` was registered by two distinct types, keeping the latest",
                schema.type_name(),
            );
        }
    }

    /// Registers a schema and, recursively, the schemas of its parents.
    ///
    /// Returns `false` and does nothing if a schema for the same type is
    /// already present.
    pub fn register_schema(&mut self, schema: &'static Schema) -> bool {
        if self.schemas.contains_key(&schema.type_id()) {
            return false;
        }
        self.schemas.insert(schema.type_id(), schema);
        Self::add_new_type_indices(
            schema,
            &mut self.type_path_to_id,
            &mut self.type_name_to_id,
            &mut self.ambiguous_names,
        );
        for parent in schema.parents() {
            self.register_schema(parent.schema());
        }
        true
    }

    /// Registers `T` and its parents.
    ///
    /// Returns `false` if `T` was already registered.
    #[inline]
    pub fn register<T: Registered>(&mut self) -> bool {
        self.register_schema(T::schema())
    }

    /// Registers every non-generic type annotated with `#[schema(auto_register)]`.
    ///
    /// Repeated calls are cheap and do not insert duplicates.
    ///
    /// Returns `true` if static registration is supported on this platform
    /// and the `auto_register` feature is enabled.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::any::TypeId;
    /// use vc_schema::derive::Schema;
    /// use vc_schema::registry::SchemaRegistry;
    ///
    /// #[derive(Schema, Default)]
    /// #[schema(auto_register)]
    /// struct Foo {
    ///     name: Option<String>,
    ///     value: i32,
    /// }
    ///
    /// let mut registry = SchemaRegistry::empty();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            // Reduce the cost of duplicate registrations.
            if self.auto_registered {
                return true;
            }
            auto_register::__register_types(self);
        }
        self.auto_registered
    }

    #[cfg(feature = "auto_register")]
    #[inline]
    pub(crate) fn mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    /// Whether the type with the given [`TypeId`] is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.schemas.contains_key(&type_id)
    }

    /// Returns the schema of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static Schema> {
        self.schemas.get(&type_id).copied()
    }

    /// Returns the schema of the type with the given full path,
    /// e.g. `my_crate::shapes::Circle`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static Schema> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the schema of the type with the given short name, e.g. `Circle`.
    ///
    /// Returns `None` if the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static Schema> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the short name matches more than one registered type.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Number of registered schemas.
    #[inline]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns `true` if nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates the registered schemas in unspecified order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static Schema> + '_ {
        self.schemas.values().copied()
    }

    /// Creates an instance of the type called `name` (full path first, then
    /// short name) and reads it from `input`.
    ///
    /// `input` is never modified. Fails with [`ReadError::UnregisteredType`]
    /// if no schema matches `name`.
    pub fn deserialize_by_name<F: FormatReader>(
        &self,
        name: &str,
        input: &InStream,
        formatter: &mut F,
    ) -> Result<Box<dyn Composite>, ReadError> {
        let schema = self
            .get_with_type_path(name)
            .or_else(|| self.get_with_type_name(name))
            .ok_or_else(|| ReadError::UnregisteredType {
                name: name.to_string(),
            })?;

        let mut object = schema.construct();
        let mut input = input.clone();
        formatter.reset();
        schema.load(object.as_any_mut(), formatter, &mut input)?;
        formatter.finish_stream(&mut input)?;
        Ok(object)
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.schemas.values().map(|s| s.type_name()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Global

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    let mut registry = SchemaRegistry::empty();
    let supported = registry.auto_register();
    debug!(
        "global schema registry assembled: {} schemas, static registration {}",
        registry.len(),
        if supported { "available" } else { "unavailable" },
    );
    registry
});

/// The registry holding every `#[schema(auto_register)]` type.
///
/// Assembled on first access and immutable afterwards, so it can be read from
/// any thread without locking.
#[inline]
pub fn global() -> &'static SchemaRegistry {
    &GLOBAL
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::any::TypeId;

    use super::SchemaRegistry;
    use crate::derive::Schema;
    use crate::format::ReadError;
    use crate::json::JsonFormatter;
    use crate::stream::InStream;

    #[derive(Schema, Default, Debug, PartialEq)]
    struct Base {
        id: u32,
    }

    #[derive(Schema, Default, Debug, PartialEq)]
    struct Named {
        #[schema(parent)]
        base: Base,
        label: String,
    }

    mod other {
        #[derive(crate::derive::Schema, Default)]
        pub struct Named {
            pub flag: bool,
        }
    }

    #[test]
    fn register_includes_parents() {
        let mut registry = SchemaRegistry::empty();
        assert!(registry.register::<Named>());
        assert!(registry.contains(TypeId::of::<Base>()));
        assert_eq!(registry.len(), 2);
        assert!(!registry.register::<Base>());
    }

    #[test]
    fn short_names_become_ambiguous() {
        let mut registry = SchemaRegistry::empty();
        registry.register::<Named>();
        assert!(registry.get_with_type_name("Named").is_some());

        registry.register::<other::Named>();
        assert!(registry.is_ambiguous("Named"));
        assert!(registry.get_with_type_name("Named").is_none());

        let path = core::any::type_name::<other::Named>();
        let schema = registry.get_with_type_path(path).unwrap();
        assert_eq!(schema.type_id(), TypeId::of::<other::Named>());
    }

    #[test]
    fn deserialize_by_name_constructs_fresh_instance() {
        let mut registry = SchemaRegistry::empty();
        registry.register::<Named>();

        let input = InStream::from(r#"{"label":"x","id":4}"#);
        let object = registry
            .deserialize_by_name("Named", &input, &mut JsonFormatter::compact())
            .unwrap();
        let debug = format!("{object:?}");
        assert!(debug.starts_with("dyn Composite<"));
        assert!(debug.ends_with("Named>"));
        let named = object.into_any().downcast::<Named>().unwrap();
        assert_eq!(
            *named,
            Named {
                base: Base { id: 4 },
                label: String::from("x"),
            }
        );
        assert_eq!(input.as_str().unwrap(), r#"{"label":"x","id":4}"#);
    }

    #[test]
    fn deserialize_by_unknown_name_fails() {
        let registry = SchemaRegistry::empty();
        let err = registry
            .deserialize_by_name("Missing", &InStream::from("{}"), &mut JsonFormatter::compact())
            .unwrap_err();
        assert_eq!(
            err,
            ReadError::UnregisteredType {
                name: String::from("Missing")
            }
        );
    }
}
