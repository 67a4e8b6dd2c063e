use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use mysql_async::{consts::ColumnType, prelude::ToValue, Column};
use procmap_core::{Error, Result, Value as CoreValue};
use rust_decimal::Decimal;

/// Character set id MySQL reports for binary columns.
const BINARY_CHARSET: u16 = 63;

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts a MySQL result cell to a procmap value, using the column
    /// metadata to tell decimals, dates and binary data apart.
    pub fn from_sql(value: mysql_async::Value, column: &Column) -> Result<Self> {
        use mysql_async::Value as Sql;

        let core = match value {
            Sql::NULL => CoreValue::Null,
            Sql::Int(v) => CoreValue::I64(v),
            Sql::UInt(v) => CoreValue::U64(v),
            Sql::Float(v) => CoreValue::F32(v),
            Sql::Double(v) => CoreValue::F64(v),
            Sql::Bytes(bytes) => match column.column_type() {
                ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => {
                    let text = String::from_utf8(bytes).map_err(Error::driver)?;
                    let decimal = text
                        .parse::<Decimal>()
                        .map_err(|_| Error::conversion_failed(CoreValue::String(text), "Decimal"))?;
                    CoreValue::Decimal(decimal)
                }
                _ if column.character_set() == BINARY_CHARSET => CoreValue::Bytes(bytes),
                _ => CoreValue::String(String::from_utf8(bytes).map_err(Error::driver)?),
            },
            Sql::Date(year, month, day, hour, minute, second, micros) => {
                let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
                    .ok_or_else(|| {
                        Error::invalid_result(format!(
                            "MySQL returned an invalid date {year:04}-{month:02}-{day:02}"
                        ))
                    })?;

                match column.column_type() {
                    ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => {
                        CoreValue::Date(date)
                    }
                    _ => CoreValue::DateTime(NaiveDateTime::new(
                        date,
                        time_of_day(hour, minute, second, micros)?,
                    )),
                }
            }
            Sql::Time(negative, days, hour, minute, second, micros) => {
                if negative || days > 0 {
                    return Err(Error::invalid_result(
                        "MySQL TIME values outside a single day are not supported",
                    ));
                }

                CoreValue::Time(time_of_day(hour, minute, second, micros)?)
            }
        };

        Ok(Self(core))
    }

    pub fn into_inner(self) -> CoreValue {
        self.0
    }
}

fn time_of_day(hour: u8, minute: u8, second: u8, micros: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_micro_opt(hour as u32, minute as u32, second as u32, micros).ok_or_else(
        || {
            Error::invalid_result(format!(
                "MySQL returned an invalid time {hour:02}:{minute:02}:{second:02}.{micros:06}"
            ))
        },
    )
}

fn date_time(value: &NaiveDateTime) -> mysql_async::Value {
    mysql_async::Value::Date(
        value.year() as u16,
        value.month() as u8,
        value.day() as u8,
        value.hour() as u8,
        value.minute() as u8,
        value.second() as u8,
        value.nanosecond() / 1_000,
    )
}

impl ToValue for Value {
    fn to_value(&self) -> mysql_async::Value {
        match &self.0 {
            CoreValue::Null => mysql_async::Value::NULL,
            CoreValue::Bool(value) => value.to_value(),
            CoreValue::I8(value) => value.to_value(),
            CoreValue::I16(value) => value.to_value(),
            CoreValue::I32(value) => value.to_value(),
            CoreValue::I64(value) => value.to_value(),
            CoreValue::U8(value) => value.to_value(),
            CoreValue::U16(value) => value.to_value(),
            CoreValue::U32(value) => value.to_value(),
            CoreValue::U64(value) => value.to_value(),
            CoreValue::F32(value) => value.to_value(),
            CoreValue::F64(value) => value.to_value(),
            CoreValue::Decimal(value) => value.to_string().to_value(),
            CoreValue::String(value) => value.to_value(),
            CoreValue::Bytes(value) => value.to_value(),
            CoreValue::Uuid(value) => value.to_string().to_value(),
            CoreValue::Date(value) => date_time(&value.and_time(NaiveTime::MIN)),
            CoreValue::Time(value) => mysql_async::Value::Time(
                false,
                0,
                value.hour() as u8,
                value.minute() as u8,
                value.second() as u8,
                value.nanosecond() / 1_000,
            ),
            CoreValue::DateTime(value) => date_time(value),
            CoreValue::DateTimeOffset(value) => date_time(&value.naive_utc()),
        }
    }
}
