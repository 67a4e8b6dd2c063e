use super::Value;

/// Reserved parameter name for a lone scalar argument that bypasses field
/// translation.
pub const PRIMITIVE: &str = "primitive";

/// A named procedure argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// A parameter carrying the reserved `"primitive"` name.
    pub fn primitive(value: impl Into<Value>) -> Self {
        Self::new(PRIMITIVE, value)
    }

    pub fn is_primitive(&self) -> bool {
        self.name == PRIMITIVE
    }
}

impl<K, V> From<(K, V)> for Parameter
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from((name, value): (K, V)) -> Self {
        Self::new(name, value)
    }
}
