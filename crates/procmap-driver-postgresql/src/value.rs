use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres_types::{private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type};
use procmap_core::{Error, Result, Value as CoreValue};
use rust_decimal::Decimal;
use uuid::Uuid;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Reads column `index` of `row`, dispatching on the column's declared
    /// PostgreSQL type.
    pub fn from_sql(index: usize, row: &tokio_postgres::Row) -> Result<Self> {
        // The inner representation of the PostgreSQL type enum is not
        // accessible, so each supported type is matched by hand.
        let ty = row.columns()[index].type_();

        let value = if *ty == Type::BOOL {
            get(row, index, CoreValue::Bool)?
        } else if *ty == Type::INT2 {
            get(row, index, CoreValue::I16)?
        } else if *ty == Type::INT4 {
            get(row, index, CoreValue::I32)?
        } else if *ty == Type::INT8 {
            get(row, index, CoreValue::I64)?
        } else if *ty == Type::FLOAT4 {
            get(row, index, CoreValue::F32)?
        } else if *ty == Type::FLOAT8 {
            get(row, index, CoreValue::F64)?
        } else if *ty == Type::NUMERIC {
            get(row, index, CoreValue::Decimal)?
        } else if [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME].contains(ty) {
            get(row, index, CoreValue::String)?
        } else if *ty == Type::BYTEA {
            get(row, index, CoreValue::Bytes)?
        } else if *ty == Type::UUID {
            get(row, index, CoreValue::Uuid)?
        } else if *ty == Type::DATE {
            get(row, index, CoreValue::Date)?
        } else if *ty == Type::TIME {
            get(row, index, CoreValue::Time)?
        } else if *ty == Type::TIMESTAMP {
            get(row, index, CoreValue::DateTime)?
        } else if *ty == Type::TIMESTAMPTZ {
            get(row, index, |value: DateTime<Utc>| {
                CoreValue::DateTimeOffset(value.fixed_offset())
            })?
        } else {
            return Err(Error::invalid_result(format!(
                "unsupported PostgreSQL column type `{ty}` for column `{}`",
                row.columns()[index].name()
            )));
        };

        Ok(Self(value))
    }

    pub fn into_inner(self) -> CoreValue {
        self.0
    }
}

fn get<'a, T, F>(row: &'a tokio_postgres::Row, index: usize, f: F) -> Result<CoreValue>
where
    T: FromSql<'a>,
    F: FnOnce(T) -> CoreValue,
{
    let value: Option<T> = row.try_get(index).map_err(Error::driver)?;
    Ok(value.map(f).unwrap_or(CoreValue::Null))
}

fn mismatch(value: &CoreValue, ty: &Type) -> BoxError {
    format!("cannot encode {value:?} as PostgreSQL `{ty}`").into()
}

/// Encodes any integer into the integer or numeric type the server
/// inferred for the argument.
fn int_to_sql(
    value: i128,
    source: &CoreValue,
    ty: &Type,
    out: &mut BytesMut,
) -> std::result::Result<IsNull, BoxError> {
    let out_of_range = || -> BoxError {
        format!("{source:?} is out of range for PostgreSQL `{ty}`").into()
    };

    match *ty {
        Type::INT2 => i16::try_from(value).map_err(|_| out_of_range())?.to_sql_checked(ty, out),
        Type::INT4 => i32::try_from(value).map_err(|_| out_of_range())?.to_sql_checked(ty, out),
        Type::INT8 => i64::try_from(value).map_err(|_| out_of_range())?.to_sql_checked(ty, out),
        Type::NUMERIC => Decimal::try_from_i128_with_scale(value, 0)
            .map_err(|_| out_of_range())?
            .to_sql_checked(ty, out),
        Type::FLOAT4 => (value as f32).to_sql_checked(ty, out),
        Type::FLOAT8 => (value as f64).to_sql_checked(ty, out),
        _ => Err(mismatch(source, ty)),
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        let value = &self.0;

        match value {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(v) => v.to_sql_checked(ty, out),
            CoreValue::I8(v) => int_to_sql(*v as i128, value, ty, out),
            CoreValue::I16(v) => int_to_sql(*v as i128, value, ty, out),
            CoreValue::I32(v) => int_to_sql(*v as i128, value, ty, out),
            CoreValue::I64(v) => int_to_sql(*v as i128, value, ty, out),
            CoreValue::U8(v) => int_to_sql(*v as i128, value, ty, out),
            CoreValue::U16(v) => int_to_sql(*v as i128, value, ty, out),
            CoreValue::U32(v) => int_to_sql(*v as i128, value, ty, out),
            CoreValue::U64(v) => int_to_sql(*v as i128, value, ty, out),
            CoreValue::F32(v) => match *ty {
                Type::FLOAT4 => v.to_sql_checked(ty, out),
                Type::FLOAT8 => (*v as f64).to_sql_checked(ty, out),
                _ => Err(mismatch(value, ty)),
            },
            CoreValue::F64(v) => match *ty {
                Type::FLOAT8 => v.to_sql_checked(ty, out),
                Type::FLOAT4 => (*v as f32).to_sql_checked(ty, out),
                _ => Err(mismatch(value, ty)),
            },
            CoreValue::Decimal(v) => match *ty {
                Type::NUMERIC => v.to_sql_checked(ty, out),
                _ => Err(mismatch(value, ty)),
            },
            CoreValue::String(v) => v.to_sql_checked(ty, out),
            CoreValue::Bytes(v) => v.to_sql_checked(ty, out),
            CoreValue::Uuid(v) => match *ty {
                Type::UUID => v.to_sql_checked(ty, out),
                _ => v.to_string().to_sql_checked(ty, out),
            },
            CoreValue::Date(v) => match *ty {
                Type::TIMESTAMP => v.and_time(NaiveTime::MIN).to_sql_checked(ty, out),
                _ => v.to_sql_checked(ty, out),
            },
            CoreValue::Time(v) => v.to_sql_checked(ty, out),
            CoreValue::DateTime(v) => match *ty {
                Type::TIMESTAMPTZ => v.and_utc().to_sql_checked(ty, out),
                _ => v.to_sql_checked(ty, out),
            },
            CoreValue::DateTimeOffset(v) => match *ty {
                Type::TIMESTAMP => v.naive_utc().to_sql_checked(ty, out),
                _ => v.to_sql_checked(ty, out),
            },
        }
    }

    fn accepts(ty: &Type) -> bool {
        <bool as ToSql>::accepts(ty)
            || <i16 as ToSql>::accepts(ty)
            || <i32 as ToSql>::accepts(ty)
            || <i64 as ToSql>::accepts(ty)
            || <f32 as ToSql>::accepts(ty)
            || <f64 as ToSql>::accepts(ty)
            || <Decimal as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
            || <Vec<u8> as ToSql>::accepts(ty)
            || <Uuid as ToSql>::accepts(ty)
            || <NaiveDate as ToSql>::accepts(ty)
            || <NaiveTime as ToSql>::accepts(ty)
            || <NaiveDateTime as ToSql>::accepts(ty)
            || <DateTime<Utc> as ToSql>::accepts(ty)
    }

    to_sql_checked!();
}
