mod builder;
pub use builder::Builder;

mod descriptor;
pub use descriptor::{OperationDescriptor, Translation};

mod return_shape;
pub use return_shape::ReturnShape;

mod table;
pub use table::MappingTable;
