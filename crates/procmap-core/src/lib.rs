pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, IntoError};

pub mod mapping;
pub use mapping::{MappingTable, OperationDescriptor, ReturnShape, Translation};

pub mod value;
pub use value::{Parameter, Row, Type, Value};

/// A Result type alias that uses procmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
