use super::ReturnShape;
use crate::value::PRIMITIVE;

use indexmap::IndexMap;

/// Ordered map from a logical field name to the procedure's parameter name.
pub type Translation = IndexMap<String, String>;

/// Everything needed to invoke one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    /// Logical operation name, unique within a mapping table.
    pub name: String,

    /// Stored procedure invoked for the operation.
    pub procedure: String,

    /// Expected result kind.
    pub shape: ReturnShape,

    /// Logical-to-wire parameter names. `None` means the operation takes no
    /// parameters.
    pub parameters: Option<Translation>,
}

impl OperationDescriptor {
    pub fn new(
        name: impl Into<String>,
        procedure: impl Into<String>,
        shape: ReturnShape,
    ) -> Self {
        Self {
            name: name.into(),
            procedure: procedure.into(),
            shape,
            parameters: None,
        }
    }

    /// Adds a logical-to-wire parameter translation.
    pub fn param(mut self, logical: impl Into<String>, wire: impl Into<String>) -> Self {
        self.parameters
            .get_or_insert_with(Translation::new)
            .insert(logical.into(), wire.into());
        self
    }

    pub fn with_parameters<K, V>(mut self, parameters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters = Some(
            parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Wire name for the logical parameter `key`, if the operation maps it.
    pub fn translate(&self, key: &str) -> Option<&str> {
        self.parameters.as_ref()?.get(key).map(String::as_str)
    }

    /// Wire name of the lone primitive argument, if the operation takes one.
    pub fn primitive_param(&self) -> Option<&str> {
        self.translate(PRIMITIVE)
    }
}
