use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};

use crate::hash::new_set;
use crate::schema::accessor::TypedAccessor;
use crate::schema::{Composite, FieldInfo, ParentInfo, Registered, Schema, SchemaError};
use crate::value::Serializable;

// -----------------------------------------------------------------------------
// SchemaBuilder

/// Collects the parents, fields and names of a registered type.
///
/// Created by [`Schema::builder`]. Parents and fields are visited in the order
/// they are added.
///
/// # Examples
///
/// ```
/// use vc_schema::{Registered, Schema, impl_composite_value};
/// use vc_schema::schema::SchemaCell;
///
/// #[derive(Default)]
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// impl_composite_value!(Point);
///
/// impl Registered for Point {
///     fn schema() -> &'static Schema {
///         static CELL: SchemaCell = SchemaCell::new();
///         CELL.get_or_init(|| {
///             Schema::builder::<Self>()
///                 .field(|p| &p.x, |p| &mut p.x)
///                 .field(|p| &p.y, |p| &mut p.y)
///                 .names(["x", "y"])
///                 .build()
///         })
///     }
/// }
///
/// assert_eq!(vc_schema::serialize(&Point { x: 1.5, y: 2.0 }).unwrap(), r#"{"x":1.5,"y":2}"#);
/// ```
#[must_use]
pub struct SchemaBuilder<O: Registered> {
    fields: Vec<FieldInfo>,
    parents: Vec<ParentInfo>,
    names: Option<Vec<&'static str>>,
    _marker: core::marker::PhantomData<fn() -> O>,
}

impl<O: Registered> SchemaBuilder<O> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            fields: Vec::new(),
            parents: Vec::new(),
            names: None,
            _marker: core::marker::PhantomData,
        }
    }

    /// Adds a parent whose members are written before the fields of `O`.
    ///
    /// The parent is stored by value inside `O`, reachable through the
    /// given accessors.
    pub fn parent<P, G, M>(mut self, get: G, get_mut: M) -> Self
    where
        P: Registered,
        G: Fn(&O) -> &P + Send + Sync + 'static,
        M: Fn(&mut O) -> &mut P + Send + Sync + 'static,
    {
        self.parents.push(ParentInfo {
            schema: P::schema(),
            accessor: Box::new(TypedAccessor::<O, P, G, M>::new(get, get_mut)),
        });
        self
    }

    /// Adds a field.
    ///
    /// `T` must be [`Serializable`]: atomic, or itself registered.
    pub fn field<T, G, M>(mut self, get: G, get_mut: M) -> Self
    where
        T: Serializable,
        G: Fn(&O) -> &T + Send + Sync + 'static,
        M: Fn(&mut O) -> &mut T + Send + Sync + 'static,
    {
        self.fields.push(FieldInfo {
            name: None,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            classification: T::CLASSIFICATION,
            accessor: Box::new(TypedAccessor::<O, T, G, M>::new(get, get_mut)),
        });
        self
    }

    /// Names the fields, in the order they were added.
    ///
    /// Without names the schema is *nameless* and can only be used with
    /// formats that do not require names.
    pub fn names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.names = Some(names.into_iter().collect());
        self
    }

    /// Builds the schema.
    ///
    /// Fails if the number of names differs from the number of fields, or if
    /// a member name occurs twice across `O` and its parents.
    pub fn try_build(self) -> Result<Schema, SchemaError> {
        let type_name = type_name::<O>();
        let Self {
            mut fields,
            parents,
            names,
            ..
        } = self;

        let own_names = match names {
            Some(names) => {
                if names.len() != fields.len() {
                    return Err(SchemaError::NameCountMismatch {
                        type_name,
                        fields: fields.len(),
                        names: names.len(),
                    });
                }
                for (field, name) in fields.iter_mut().zip(names) {
                    field.name = Some(name);
                }
                true
            }
            None => fields.is_empty(),
        };

        let has_names = own_names && parents.iter().all(|p| p.schema.has_names());

        if has_names {
            let mut seen = new_set();
            for parent in &parents {
                for name in parent.schema.member_names() {
                    if !seen.insert(name) {
                        return Err(SchemaError::DuplicateName { type_name, name });
                    }
                }
            }
            for name in fields.iter().filter_map(|f| f.name) {
                if !seen.insert(name) {
                    return Err(SchemaError::DuplicateName { type_name, name });
                }
            }
        }

        let member_count =
            fields.len() + parents.iter().map(|p| p.schema.member_count()).sum::<usize>();

        Ok(Schema {
            ty: TypeId::of::<O>(),
            type_name,
            fields: fields.into_boxed_slice(),
            parents: parents.into_boxed_slice(),
            has_names,
            member_count,
            construct: construct::<O>,
        })
    }

    /// Builds the schema.
    ///
    /// # Panics
    ///
    /// Panics with the [`SchemaError`] of [`try_build`](Self::try_build).
    pub fn build(self) -> Schema {
        match self.try_build() {
            Ok(schema) => schema,
            Err(err) => panic!("{err}"),
        }
    }
}

fn construct<O: Registered>() -> Box<dyn Composite> {
    Box::new(O::default())
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::any::type_name;

    use crate::derive::Schema;
    use crate::schema::{Schema, SchemaError};

    #[derive(Schema, Default)]
    struct Base {
        id: u32,
    }

    #[derive(Schema, Default)]
    struct Child {
        #[schema(parent)]
        base: Base,
        own: u32,
        note: String,
    }

    #[test]
    fn name_count_must_match_fields() {
        let err = Schema::builder::<Child>()
            .field(|c| &c.own, |c| &mut c.own)
            .field(|c| &c.note, |c| &mut c.note)
            .names(["own"])
            .try_build()
            .err();
        assert_eq!(
            err,
            Some(SchemaError::NameCountMismatch {
                type_name: type_name::<Child>(),
                fields: 2,
                names: 1,
            })
        );
    }

    #[test]
    fn field_name_clashing_with_parent_member() {
        let err = Schema::builder::<Child>()
            .parent(|c| &c.base, |c| &mut c.base)
            .field(|c| &c.own, |c| &mut c.own)
            .names(["id"])
            .try_build()
            .err();
        assert_eq!(
            err,
            Some(SchemaError::DuplicateName {
                type_name: type_name::<Child>(),
                name: "id",
            })
        );
    }

    #[test]
    fn repeated_own_field_name() {
        let err = Schema::builder::<Child>()
            .field(|c| &c.own, |c| &mut c.own)
            .field(|c| &c.note, |c| &mut c.note)
            .names(["own", "own"])
            .try_build()
            .err();
        assert!(matches!(
            err,
            Some(SchemaError::DuplicateName { name: "own", .. })
        ));
    }

    #[test]
    fn nameless_schema_skips_name_checks() {
        let schema = Schema::builder::<Child>()
            .parent(|c| &c.base, |c| &mut c.base)
            .field(|c| &c.own, |c| &mut c.own)
            .try_build()
            .ok();
        let schema = schema.as_ref().map(|s| (s.has_names(), s.member_count()));
        assert_eq!(schema, Some((false, 2)));
    }

    #[test]
    #[should_panic(expected = "declares the member name `id` more than once")]
    fn build_panics_on_invalid_registration() {
        let _ = Schema::builder::<Child>()
            .parent(|c| &c.base, |c| &mut c.base)
            .field(|c| &c.own, |c| &mut c.own)
            .names(["id"])
            .build();
    }

    #[test]
    fn derived_schema_lists_parent_members_first() {
        use crate::Registered;

        let schema = Child::schema();
        assert!(schema.has_names());
        assert_eq!(schema.member_names(), ["id", "own", "note"]);
    }
}
