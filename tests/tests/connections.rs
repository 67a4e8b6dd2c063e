use procmap::{
    driver::Response, Db, Error, Executor, MappingTable, OperationDescriptor, ProcExecutor,
    ReturnShape, Value,
};
use tests::ScriptedDriver;

fn db(driver: &ScriptedDriver) -> Db {
    let mut builder = MappingTable::builder();
    builder
        .insert(OperationDescriptor::new(
            "Touch",
            "usp_Touch",
            ReturnShape::NoResult,
        ))
        .unwrap();

    Db::builder()
        .table(builder.build().unwrap())
        .build(driver.clone())
        .unwrap()
}

#[tokio::test]
async fn every_call_uses_its_own_connection() {
    let driver = ScriptedDriver::new();
    driver.respond("usp_Touch", Response::Count(3));
    let db = db(&driver);

    for _ in 0..3 {
        let count = db
            .exec::<Value>("Touch")
            .await
            .unwrap()
            .into_count()
            .unwrap();
        assert_eq!(count, 3);
    }

    assert_eq!(driver.opened(), 3);
    assert_eq!(driver.closed(), 3);
}

#[tokio::test]
async fn connection_is_released_when_the_call_fails() {
    let driver = ScriptedDriver::new();
    driver.fail("usp_Touch", Error::invalid_result("deadlock victim"));
    let db = db(&driver);

    let err = db.exec::<Value>("Touch").await.unwrap_err();

    assert!(err.is_invalid_result());
    assert_eq!(driver.opened(), 1);
    assert_eq!(driver.closed(), 1);
}

#[tokio::test]
async fn refused_connection_surfaces_the_driver_error() {
    let driver = ScriptedDriver::new();
    driver.refuse_connections(Error::driver(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    )));
    let db = db(&driver);

    let err = db.exec::<Value>("Touch").await.unwrap_err();

    assert!(err.is_driver());
    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn executor_can_be_used_directly() {
    let driver = ScriptedDriver::new();
    driver.respond("usp_Answer", Response::Scalar(Value::I32(42)));
    let executor = ProcExecutor::new(driver.clone());

    let answer = executor
        .execute_scalar::<i64>("usp_Answer", None)
        .await
        .unwrap();
    assert_eq!(answer, Some(42));

    let err = executor.execute_non_query("", None).await.unwrap_err();
    assert!(err.is_empty_procedure_name());
    assert_eq!(driver.opened(), 1);
}
