use crate::{Error, Materializer, Primitive, Result, Row, Value};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A type an operation's result can be loaded into.
///
/// Records load rows through the materializer; primitives take the first
/// column of a row or the scalar itself.
pub trait Load: Sized + Send + 'static {
    fn load_row(row: Row, materializer: &Materializer) -> Result<Self>;

    fn load_scalar(value: Value) -> Result<Self>;
}

macro_rules! impl_primitive_load {
    ( $( $ty:ty, )* ) => {
        $(
            impl Load for $ty {
                fn load_row(row: Row, _: &Materializer) -> Result<Self> {
                    <$ty as Primitive>::load(row.into_first())
                }

                fn load_scalar(value: Value) -> Result<Self> {
                    <$ty as Primitive>::load(value)
                }
            }
        )*
    };
}

impl_primitive_load! {
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    Decimal,
    String,
    Vec<u8>,
    Uuid,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    DateTime<FixedOffset>,
    DateTime<Utc>,
}

impl<T: Primitive> Load for Option<T> {
    fn load_row(row: Row, _: &Materializer) -> Result<Self> {
        <Option<T> as Primitive>::load(row.into_first())
    }

    fn load_scalar(value: Value) -> Result<Self> {
        <Option<T> as Primitive>::load(value)
    }
}

impl Load for Row {
    fn load_row(row: Row, _: &Materializer) -> Result<Self> {
        Ok(row)
    }

    fn load_scalar(_value: Value) -> Result<Self> {
        Err(Error::invalid_result("a row cannot be loaded from a scalar"))
    }
}

impl Load for Value {
    fn load_row(row: Row, _: &Materializer) -> Result<Self> {
        Ok(row.into_first())
    }

    fn load_scalar(value: Value) -> Result<Self> {
        Ok(value)
    }
}
