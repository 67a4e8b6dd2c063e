use crate::{Field, Primitive, Value};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A value that can be supplied as an operation's input.
pub trait Param: Send + Sync + Sized + 'static {
    fn shape() -> ParamShape<Self>;
}

/// How an input is projected into procedure parameters.
pub enum ParamShape<T: 'static> {
    /// Sent as the single `"primitive"` parameter.
    Primitive(fn(&T) -> Value),

    /// Decomposed field by field.
    Record(&'static [Field<T>]),
}

impl<T: 'static> ParamShape<T> {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }
}

macro_rules! impl_primitive_param {
    ( $( $ty:ty, )* ) => {
        $(
            impl Param for $ty {
                fn shape() -> ParamShape<Self> {
                    ParamShape::Primitive(<$ty as Primitive>::to_value)
                }
            }
        )*
    };
}

impl_primitive_param! {
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

impl<T: Primitive> Param for Option<T> {
    fn shape() -> ParamShape<Self> {
        ParamShape::Primitive(<Option<T> as Primitive>::to_value)
    }
}
