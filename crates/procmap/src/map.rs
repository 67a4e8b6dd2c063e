mod entry;

mod json;
pub use json::JsonMap;

mod runtime;
pub use runtime::{OperationDef, RuntimeMap};

mod xml;
pub use xml::XmlMap;

use crate::{mapping, Error, MappingTable, Result};

/// Something that produces a [`MappingTable`].
///
/// Sources are one-shot: after a successful `build`, further calls (and any
/// further registration) fail with `AlreadyConstructed`.
pub trait MapSource {
    fn build(&mut self) -> Result<MappingTable>;
}

impl MapSource for mapping::Builder {
    fn build(&mut self) -> Result<MappingTable> {
        mapping::Builder::build(self)
    }
}

/// A ready-made table, handed out once.
impl MapSource for Option<MappingTable> {
    fn build(&mut self) -> Result<MappingTable> {
        self.take().ok_or_else(Error::already_constructed)
    }
}
