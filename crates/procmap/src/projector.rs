use crate::cache::TypeCache;
use crate::{Param, ParamShape, Parameter, Translation, Value};

use std::sync::Arc;

/// Turns operation inputs into procedure parameters.
///
/// Record inputs go through an [`Accessor`] compiled on first use and cached
/// for the lifetime of the projector.
#[derive(Debug, Default)]
pub struct Projector {
    accessors: TypeCache,
}

/// Compiled field reader for one record type.
pub struct Accessor<T> {
    fields: Vec<(&'static str, fn(&T) -> Value)>,
}

impl<T> Accessor<T> {
    /// Every field of `value`, by logical name, in declaration order.
    pub fn read(&self, value: &T) -> Vec<(&'static str, Value)> {
        self.fields
            .iter()
            .map(|(name, get)| (*name, get(value)))
            .collect()
    }

    /// Projects `value` against `translation`: fields named in the table are
    /// paired with their wire name; the rest are left out.
    pub fn project(&self, value: &T, translation: Option<&Translation>) -> Vec<Parameter> {
        let Some(translation) = translation else {
            return vec![];
        };

        self.fields
            .iter()
            .filter_map(|(name, get)| {
                let wire = translation.get(*name)?;
                Some(Parameter::new(wire.as_str(), get(value)))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> core::fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Accessor")
            .field("type", &core::any::type_name::<T>())
            .field(
                "fields",
                &self.fields.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects `value` into an ordered parameter list.
    ///
    /// A primitive input becomes the single `"primitive"` parameter and
    /// compiles nothing.
    pub fn project<P: Param>(
        &self,
        value: &P,
        translation: Option<&Translation>,
    ) -> Vec<Parameter> {
        match P::shape() {
            ParamShape::Primitive(get) => vec![Parameter::primitive(get(value))],
            ParamShape::Record(fields) => self.compile(fields).project(value, translation),
        }
    }

    /// The cached accessor for a record type, compiling it if needed.
    /// Returns `None` for primitive inputs.
    pub fn accessor<P: Param>(&self) -> Option<Arc<Accessor<P>>> {
        match P::shape() {
            ParamShape::Primitive(_) => None,
            ParamShape::Record(fields) => Some(self.compile(fields)),
        }
    }

    /// Number of accessors compiled so far.
    pub fn compilations(&self) -> usize {
        self.accessors.compilations()
    }

    fn compile<P: Param>(&self, fields: &'static [crate::Field<P>]) -> Arc<Accessor<P>> {
        self.accessors.get_or_compile(|| {
            tracing::trace!(
                ty = core::any::type_name::<P>(),
                fields = fields.len(),
                "compiling parameter accessor"
            );

            Accessor {
                fields: fields.iter().map(|field| (field.name, field.get)).collect(),
            }
        })
    }
}
