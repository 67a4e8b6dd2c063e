pub mod blocking;

mod cache;

pub mod db;
pub use db::Db;

mod executor;
pub use executor::{Executor, ProcExecutor};

mod load;
pub use load::Load;

pub mod map;
pub use map::{JsonMap, MapSource, OperationDef, RuntimeMap, XmlMap};

mod materializer;
pub use materializer::{Mapper, Materializer};

mod outcome;
pub use outcome::Outcome;

mod param;
pub use param::{Param, ParamShape};

mod primitive;
pub use primitive::Primitive;

mod projector;
pub use projector::{Accessor, Projector};

mod record;
pub use record::{Field, Record};

pub use procmap_macros::Record;

pub use procmap_core::{
    driver::{self, Connection, Driver},
    mapping::{self, MappingTable, OperationDescriptor, ReturnShape, Translation},
    value::PRIMITIVE,
    Error, Parameter, Result, Row, Type, Value,
};

pub use procmap_core::async_trait;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        Error, Field, Load, Materializer, Param, ParamShape, Primitive, Record, Result, Row, Value,
    };
    pub use std::{option::Option, result::Result::Ok, sync::OnceLock, vec::Vec};
}
