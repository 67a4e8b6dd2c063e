use crate::{Result, Type, Value};

/// A caller-defined struct that procedures take as input or return as rows.
///
/// Implemented by `#[derive(Record)]`; the field list is built once per type
/// and kept in a static.
pub trait Record: Default + Send + Sync + 'static {
    /// Field descriptors, in declaration order.
    fn fields() -> &'static [Field<Self>];
}

/// Describes one field of a [`Record`].
pub struct Field<T> {
    /// Logical name: the result column and the translation key.
    pub name: &'static str,

    /// Wire parameter name declared with `#[param]`, used by runtime
    /// registration.
    pub param: Option<&'static str>,

    /// Declared field type.
    pub ty: Type,

    /// True for `Option<_>` fields.
    pub nullable: bool,

    /// Reads the field's current value.
    pub get: fn(&T) -> Value,

    /// Converts a value to the field's type and assigns it.
    pub set: fn(&mut T, Value) -> Result<()>,
}

impl<T> core::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("param", &self.param)
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .finish()
    }
}
