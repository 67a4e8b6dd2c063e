use super::MapSource;
use crate::{
    mapping, Error, MappingTable, OperationDescriptor, Param, ParamShape, Result, ReturnShape,
    Translation, PRIMITIVE,
};

/// Registration options for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDef {
    name: String,
    procedure: Option<String>,
    shape: ReturnShape,
    primitive_param: Option<String>,
}

impl OperationDef {
    /// An operation calling `usp{name}` with no result.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            procedure: None,
            shape: ReturnShape::NoResult,
            primitive_param: None,
        }
    }

    pub fn procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedure = Some(procedure.into());
        self
    }

    pub fn shape(mut self, shape: ReturnShape) -> Self {
        self.shape = shape;
        self
    }

    /// Wire name for a primitive input. Required when the input type is
    /// primitive.
    pub fn primitive_param(mut self, name: impl Into<String>) -> Self {
        self.primitive_param = Some(name.into());
        self
    }

    fn into_descriptor(self, parameters: Option<Translation>) -> OperationDescriptor {
        let procedure = self
            .procedure
            .unwrap_or_else(|| format!("usp{}", self.name));

        OperationDescriptor {
            name: self.name,
            procedure,
            shape: self.shape,
            parameters,
        }
    }
}

/// Builds a mapping table in code, reading parameter names from the input
/// type's `#[param]` attributes.
///
/// ```ignore
/// let mut map = RuntimeMap::new();
/// map.register::<User>(OperationDef::new("AddUser"))?
///    .register::<i32>(
///        OperationDef::new("GetUser")
///            .shape(ReturnShape::SingleRow)
///            .primitive_param("UserId"),
///    )?;
/// let table = map.build()?;
/// ```
#[derive(Debug, Default)]
pub struct RuntimeMap {
    builder: mapping::Builder,
}

impl RuntimeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation taking a `T` input.
    ///
    /// A record input contributes each `#[param]` field as a translation
    /// entry. A primitive input needs [`OperationDef::primitive_param`].
    pub fn register<T: Param>(&mut self, def: OperationDef) -> Result<&mut Self> {
        self.check(&def)?;

        let parameters: Translation = match T::shape() {
            ParamShape::Primitive(_) => {
                let Some(wire) = def.primitive_param.clone() else {
                    return Err(Error::missing_primitive_parameter_name(def.name));
                };
                [(PRIMITIVE.to_string(), wire)].into_iter().collect()
            }
            ParamShape::Record(fields) => fields
                .iter()
                .filter_map(|field| Some((field.name.to_string(), field.param?.to_string())))
                .collect(),
        };

        self.builder.insert(def.into_descriptor(Some(parameters)))?;
        Ok(self)
    }

    /// Registers an operation that takes no parameters.
    pub fn register_bare(&mut self, def: OperationDef) -> Result<&mut Self> {
        self.check(&def)?;
        self.builder.insert(def.into_descriptor(None))?;
        Ok(self)
    }

    fn check(&self, def: &OperationDef) -> Result<()> {
        if def.name.is_empty() {
            return Err(Error::invalid_mapping("operation name cannot be empty"));
        }

        if self.builder.is_constructed() {
            return Err(Error::already_constructed());
        }

        if self.builder.contains(&def.name) {
            return Err(Error::duplicate_registration(def.name.as_str()));
        }

        Ok(())
    }
}

impl MapSource for RuntimeMap {
    fn build(&mut self) -> Result<MappingTable> {
        self.builder.build()
    }
}
