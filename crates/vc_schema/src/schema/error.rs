use thiserror::Error;

/// A schema that cannot be built.
///
/// These are programming errors: they surface the first time the schema of a
/// type is requested, before any instance is serialized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("schema of `{type_name}` has {fields} fields but {names} names")]
    NameCountMismatch {
        type_name: &'static str,
        fields: usize,
        names: usize,
    },

    #[error("schema of `{type_name}` declares the member name `{name}` more than once")]
    DuplicateName {
        type_name: &'static str,
        name: &'static str,
    },
}
