use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use procmap_core::{Error, Result, Value as CoreValue};
use rust_decimal::Decimal;
use tiberius::{numeric::Numeric, ColumnData, FromSql, ToSql};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts one column of a result row.
    pub fn from_sql(data: ColumnData<'static>) -> Result<Self> {
        let temporal = matches!(
            data,
            ColumnData::Date(_)
                | ColumnData::Time(_)
                | ColumnData::DateTime(_)
                | ColumnData::SmallDateTime(_)
                | ColumnData::DateTime2(_)
                | ColumnData::DateTimeOffset(_)
        );

        let value = if temporal {
            from_temporal(&data)?
        } else {
            match data {
                ColumnData::U8(v) => v.map(CoreValue::U8),
                ColumnData::I16(v) => v.map(CoreValue::I16),
                ColumnData::I32(v) => v.map(CoreValue::I32),
                ColumnData::I64(v) => v.map(CoreValue::I64),
                ColumnData::F32(v) => v.map(CoreValue::F32),
                ColumnData::F64(v) => v.map(CoreValue::F64),
                ColumnData::Bit(v) => v.map(CoreValue::Bool),
                ColumnData::String(v) => v.map(|v| CoreValue::String(v.into_owned())),
                ColumnData::Guid(v) => v.map(CoreValue::Uuid),
                ColumnData::Binary(v) => v.map(|v| CoreValue::Bytes(v.into_owned())),
                ColumnData::Numeric(v) => v.map(decimal).transpose()?,
                ColumnData::Xml(v) => v.map(|v| CoreValue::String(v.into_owned().into_string())),
                other => {
                    return Err(Error::invalid_result(format!(
                        "unsupported SQL Server value {other:?}"
                    )))
                }
            }
        };

        Ok(Self(value.unwrap_or(CoreValue::Null)))
    }

    pub fn into_inner(self) -> CoreValue {
        self.0
    }
}

fn from_temporal(data: &ColumnData<'static>) -> Result<Option<CoreValue>> {
    let value = match data {
        ColumnData::Date(_) => NaiveDate::from_sql(data)
            .map_err(Error::driver)?
            .map(CoreValue::Date),
        ColumnData::Time(_) => NaiveTime::from_sql(data)
            .map_err(Error::driver)?
            .map(CoreValue::Time),
        ColumnData::DateTimeOffset(_) => DateTime::<FixedOffset>::from_sql(data)
            .map_err(Error::driver)?
            .map(CoreValue::DateTimeOffset),
        _ => NaiveDateTime::from_sql(data)
            .map_err(Error::driver)?
            .map(CoreValue::DateTime),
    };

    Ok(value)
}

fn decimal(numeric: Numeric) -> Result<CoreValue> {
    Decimal::try_from_i128_with_scale(numeric.value(), u32::from(numeric.scale()))
        .map(CoreValue::Decimal)
        .map_err(|_| Error::invalid_result(format!("{numeric:?} does not fit a decimal")))
}

impl ToSql for Value {
    fn to_sql(&self) -> ColumnData<'_> {
        match &self.0 {
            // SQL Server converts an untyped NULL to the parameter's type
            CoreValue::Null => ColumnData::String(None),
            CoreValue::Bool(v) => v.to_sql(),
            CoreValue::I8(v) => ColumnData::I16(Some(i16::from(*v))),
            CoreValue::I16(v) => v.to_sql(),
            CoreValue::I32(v) => v.to_sql(),
            CoreValue::I64(v) => v.to_sql(),
            CoreValue::U8(v) => v.to_sql(),
            CoreValue::U16(v) => ColumnData::I32(Some(i32::from(*v))),
            CoreValue::U32(v) => ColumnData::I64(Some(i64::from(*v))),
            CoreValue::U64(v) => match i64::try_from(*v) {
                Ok(v) => ColumnData::I64(Some(v)),
                Err(_) => ColumnData::Numeric(Some(Numeric::new_with_scale(i128::from(*v), 0))),
            },
            CoreValue::F32(v) => v.to_sql(),
            CoreValue::F64(v) => v.to_sql(),
            CoreValue::Decimal(v) => {
                ColumnData::Numeric(Some(Numeric::new_with_scale(v.mantissa(), v.scale() as u8)))
            }
            CoreValue::String(v) => v.to_sql(),
            CoreValue::Bytes(v) => v.to_sql(),
            CoreValue::Uuid(v) => v.to_sql(),
            CoreValue::Date(v) => v.to_sql(),
            CoreValue::Time(v) => v.to_sql(),
            CoreValue::DateTime(v) => v.to_sql(),
            CoreValue::DateTimeOffset(v) => v.to_sql(),
        }
    }
}
