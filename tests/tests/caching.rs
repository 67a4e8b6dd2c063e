use pretty_assertions::assert_eq;
use procmap::{
    driver::Response, Db, Materializer, MappingTable, OperationDescriptor, Projector, ReturnShape,
    Translation, Value,
};
use std::sync::Arc;
use tests::{row, ScriptedDriver};

#[derive(Debug, Default, PartialEq, procmap::Record)]
struct Order {
    #[rename("OrderId")]
    #[param]
    id: i64,

    #[rename("Total")]
    #[param("Amount")]
    total: f64,

    #[rename("Note")]
    note: Option<String>,
}

#[derive(Debug, Default, PartialEq, procmap::Record)]
struct Customer {
    #[rename("CustomerId")]
    #[param]
    id: i32,
}

fn translation(pairs: &[(&str, &str)]) -> Translation {
    pairs
        .iter()
        .map(|(logical, wire)| (logical.to_string(), wire.to_string()))
        .collect()
}

fn order() -> Order {
    Order {
        id: 42,
        total: 9.5,
        note: None,
    }
}

#[test]
fn projection_is_idempotent_and_compiles_once() {
    let projector = Projector::new();
    let full = translation(&[("OrderId", "OrderId"), ("Total", "Amount")]);

    let first = projector.project(&order(), Some(&full));
    let second = projector.project(&order(), Some(&full));

    assert_eq!(first, second);
    assert_eq!(projector.compilations(), 1);
}

#[test]
fn different_translations_share_one_accessor() {
    let projector = Projector::new();

    let narrow = projector.project(&order(), Some(&translation(&[("Total", "Amount")])));
    let wide = projector.project(
        &order(),
        Some(&translation(&[("OrderId", "Id"), ("Total", "Amount")])),
    );

    // The second projection is not limited by the fields the first one used
    assert_eq!(narrow.len(), 1);
    assert_eq!(wide.len(), 2);
    assert_eq!(projector.compilations(), 1);
}

#[test]
fn each_record_type_compiles_separately() {
    let projector = Projector::new();

    projector.project(&order(), None);
    projector.project(&Customer { id: 1 }, None);
    projector.project(&order(), None);

    assert_eq!(projector.compilations(), 2);
}

#[test]
fn primitives_compile_nothing() {
    let projector = Projector::new();

    projector.project(&7i32, None);
    projector.project(&"x".to_string(), None);

    assert_eq!(projector.compilations(), 0);
    assert!(projector.accessor::<i32>().is_none());
}

#[test]
fn cached_accessor_is_shared() {
    let projector = Projector::new();

    let first = projector.accessor::<Order>().unwrap();
    let second = projector.accessor::<Order>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn accessor_reads_every_field_in_declaration_order() {
    let projector = Projector::new();
    let accessor = projector.accessor::<Order>().unwrap();

    assert_eq!(
        accessor.read(&order()),
        vec![
            ("OrderId", Value::I64(42)),
            ("Total", Value::F64(9.5)),
            ("Note", Value::Null),
        ]
    );
}

#[test]
fn materializer_compiles_once_per_type() {
    let materializer = Materializer::new();

    for id in 0..3 {
        let order: Order = materializer
            .materialize(row!("Note" => "gift", "Total" => 1.0, "OrderId" => id as i64))
            .unwrap();
        assert_eq!(order.id, id as i64);
        assert_eq!(order.note.as_deref(), Some("gift"));
    }

    assert_eq!(materializer.compilations(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_use_compiles_each_type_once() {
    tests::init_tracing();

    let driver = ScriptedDriver::new();
    driver.respond(
        "usp_GetOrder",
        Response::Rows(vec![row!("OrderId" => 42i64, "Total" => 9.5, "Note" => Value::Null)]),
    );

    let mut builder = MappingTable::builder();
    builder
        .insert(
            OperationDescriptor::new("GetOrder", "usp_GetOrder", ReturnShape::SingleRow)
                .param("OrderId", "OrderId"),
        )
        .unwrap();
    let db = Db::builder()
        .table(builder.build().unwrap())
        .build(driver.clone())
        .unwrap();

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let db = db.clone();
            tokio::spawn(async move {
                db.exec_with::<_, Order>("GetOrder", &order())
                    .await
                    .unwrap()
                    .into_row()
                    .unwrap()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), Some(order()));
    }

    assert_eq!(db.projector().compilations(), 1);
    assert_eq!(db.executor().materializer().compilations(), 1);
    assert_eq!(driver.log().len(), 16);
}
