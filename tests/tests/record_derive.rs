use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use procmap::{Load, Materializer, Param, ParamShape, Record, Row, Type, Value};
use tests::row;

#[derive(Debug, Default, PartialEq, procmap::Record)]
struct Shipment {
    #[rename("ShipmentId")]
    #[param("Id")]
    id: u32,

    #[param]
    r#ref: String,

    #[rename("ShippedOn")]
    shipped_on: Option<NaiveDate>,

    weight: f32,
}

#[test]
fn field_metadata() {
    let fields = Shipment::fields();

    let summary: Vec<_> = fields
        .iter()
        .map(|field| (field.name, field.param, field.ty, field.nullable))
        .collect();

    assert_eq!(
        summary,
        [
            ("ShipmentId", Some("Id"), Type::U32, false),
            ("ref", Some("ref"), Type::String, false),
            ("ShippedOn", None, Type::Date, true),
            ("weight", None, Type::F32, false),
        ]
    );
}

#[test]
fn fields_are_built_once() {
    assert!(std::ptr::eq(Shipment::fields(), Shipment::fields()));
}

#[test]
fn record_param_shape() {
    assert!(matches!(Shipment::shape(), ParamShape::Record(fields) if fields.len() == 4));
    assert!(<Option<i32> as Param>::shape().is_primitive());
}

#[test]
fn getters_and_setters() {
    let mut shipment = Shipment::default();
    let fields = Shipment::fields();

    (fields[1].set)(&mut shipment, Value::from("SH-9")).unwrap();
    (fields[2].set)(&mut shipment, Value::Null).unwrap();

    assert_eq!(shipment.r#ref, "SH-9");
    assert_eq!((fields[1].get)(&shipment), Value::from("SH-9"));
    assert_eq!((fields[2].get)(&shipment), Value::Null);
}

#[test]
fn null_into_required_field_fails() {
    let mut shipment = Shipment::default();

    let err = (Shipment::fields()[0].set)(&mut shipment, Value::Null).unwrap_err();
    assert!(err.is_conversion_failed());
}

#[test]
fn loads_rows_but_not_scalars() {
    let materializer = Materializer::new();
    let row = row!(
        "weight" => 1.5f32,
        "ShippedOn" => NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        "ref" => "SH-1",
        "ShipmentId" => 3u32,
    );

    let shipment = Shipment::load_row(row, &materializer).unwrap();
    assert_eq!(
        shipment,
        Shipment {
            id: 3,
            r#ref: "SH-1".to_string(),
            shipped_on: NaiveDate::from_ymd_opt(2024, 5, 1),
            weight: 1.5,
        }
    );

    let err = Shipment::load_scalar(Value::I32(1)).unwrap_err();
    assert!(err.is_invalid_result());
}

#[test]
fn primitives_load_the_first_column() {
    let materializer = Materializer::new();
    let row = Row::from_pairs([("Total", Value::I64(12)), ("Ignored", Value::Null)]);

    assert_eq!(i64::load_row(row, &materializer).unwrap(), 12);
}
