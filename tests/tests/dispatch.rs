use pretty_assertions::assert_eq;
use procmap::{
    driver::{ProcedureCall, Response},
    Db, Error, MappingTable, OperationDescriptor, Parameter, ReturnShape, Value, PRIMITIVE,
};
use tests::{row, ScriptedDriver};

#[derive(Debug, Default, Clone, PartialEq, procmap::Record)]
struct User {
    #[rename("Id")]
    #[param("UserId")]
    id: i32,

    #[rename("Name")]
    #[param]
    name: String,

    #[rename("Email")]
    email: Option<String>,
}

fn alice() -> User {
    User {
        id: 7,
        name: "alice".to_string(),
        email: Some("alice@example.com".to_string()),
    }
}

fn table() -> MappingTable {
    let mut builder = MappingTable::builder();

    for op in [
        OperationDescriptor::new("GetUser", "usp_GetUser", ReturnShape::SingleRow)
            .param("Id", "UserId"),
        OperationDescriptor::new("GetUserById", "usp_GetUser", ReturnShape::SingleRow)
            .param(PRIMITIVE, "UserId"),
        OperationDescriptor::new("ListUsers", "usp_ListUsers", ReturnShape::Collection),
        OperationDescriptor::new("CountUsers", "usp_CountUsers", ReturnShape::Scalar),
        OperationDescriptor::new("AddUser", "usp_AddUser", ReturnShape::NoResult)
            .param("Id", "UserId")
            .param("Name", "Name"),
        OperationDescriptor::new("Echo", "usp_Echo", ReturnShape::Scalar),
        OperationDescriptor::new("Broken", "", ReturnShape::NoResult),
    ] {
        builder.insert(op).unwrap();
    }

    builder.build().unwrap()
}

fn setup() -> (Db, ScriptedDriver) {
    tests::init_tracing();

    let driver = ScriptedDriver::new();
    let db = Db::builder().table(table()).build(driver.clone()).unwrap();
    (db, driver)
}

#[tokio::test]
async fn single_row_translates_keys_and_materializes() {
    let (db, driver) = setup();
    driver.respond(
        "usp_GetUser",
        Response::Rows(vec![row!(
            "Email" => "alice@example.com",
            "Name" => "alice",
            "Id" => 7,
        )]),
    );

    let user = db
        .exec_params::<User, _, _>("GetUser", [("Id", 7)])
        .await
        .unwrap()
        .into_row()
        .unwrap();

    assert_eq!(user, Some(alice()));
    assert_eq!(
        driver.log().last(),
        ProcedureCall::new(
            "usp_GetUser",
            ReturnShape::SingleRow,
            Some(vec![Parameter::new("UserId", 7)]),
        )
    );
}

#[tokio::test]
async fn single_row_without_rows_is_none() {
    let (db, _driver) = setup();

    let user = db
        .exec_params::<User, _, _>("GetUser", [("Id", 404)])
        .await
        .unwrap()
        .into_row()
        .unwrap();

    assert_eq!(user, None);
}

#[tokio::test]
async fn single_row_ignores_extra_rows() {
    let (db, driver) = setup();
    driver.respond(
        "usp_GetUser",
        Response::Rows(vec![
            row!("Id" => 1, "Name" => "first", "Email" => Value::Null),
            row!("Id" => 2, "Name" => "second", "Email" => Value::Null),
        ]),
    );

    let user = db
        .exec_params::<User, _, _>("GetUser", [("Id", 1)])
        .await
        .unwrap()
        .into_row()
        .unwrap()
        .unwrap();

    assert_eq!(user.name, "first");
    assert_eq!(user.email, None);
}

#[tokio::test]
async fn collection_keeps_backend_order() {
    let (db, driver) = setup();
    driver.respond(
        "usp_ListUsers",
        Response::Rows(vec![
            row!("Id" => 2, "Name" => "bob", "Email" => Value::Null),
            row!("Id" => 7, "Name" => "alice", "Email" => "alice@example.com"),
        ]),
    );

    let users = db
        .exec::<User>("ListUsers")
        .await
        .unwrap()
        .into_collection()
        .unwrap();

    let names: Vec<_> = users.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, ["bob", "alice"]);
    assert_eq!(driver.log().last_params(), None);
}

#[tokio::test]
async fn empty_collection() {
    let (db, _driver) = setup();

    let users = db
        .exec::<User>("ListUsers")
        .await
        .unwrap()
        .into_collection()
        .unwrap();

    assert!(users.is_empty());
}

#[tokio::test]
async fn scalar_values() {
    let (db, driver) = setup();
    driver.respond("usp_CountUsers", Response::Scalar(Value::I64(3)));

    let count = db
        .exec::<i64>("CountUsers")
        .await
        .unwrap()
        .into_scalar()
        .unwrap();
    assert_eq!(count, Some(3));

    driver.respond("usp_CountUsers", Response::Scalar(Value::Null));

    let count = db
        .exec::<i64>("CountUsers")
        .await
        .unwrap()
        .into_scalar()
        .unwrap();
    assert_eq!(count, None);
}

#[tokio::test]
async fn record_input_projects_only_mapped_fields() {
    let (db, driver) = setup();
    driver.respond("usp_AddUser", Response::Count(1));

    let affected = db
        .exec_with::<_, Value>("AddUser", &alice())
        .await
        .unwrap()
        .into_count()
        .unwrap();

    assert_eq!(affected, 1);
    assert_eq!(
        driver.log().last_params(),
        Some(vec![
            Parameter::new("UserId", 7),
            Parameter::new("Name", "alice"),
        ])
    );
}

#[tokio::test]
async fn record_input_without_translation_sends_nothing() {
    let (db, driver) = setup();

    db.exec_with::<_, Value>("ListUsers", &alice())
        .await
        .unwrap();

    assert_eq!(driver.log().last_params(), Some(vec![]));
}

#[tokio::test]
async fn primitive_input_takes_registered_wire_name() {
    let (db, driver) = setup();

    db.exec_with::<_, User>("GetUserById", &7)
        .await
        .unwrap();

    assert_eq!(
        driver.log().last_params(),
        Some(vec![Parameter::new("UserId", 7)])
    );
}

#[tokio::test]
async fn primitive_input_without_wire_name_passes_through() {
    let (db, driver) = setup();
    driver.respond("usp_Echo", Response::Scalar(Value::from("hi")));

    let echoed = db
        .exec_with::<_, String>("Echo", &"hi".to_string())
        .await
        .unwrap()
        .into_scalar()
        .unwrap();

    assert_eq!(echoed.as_deref(), Some("hi"));
    assert_eq!(
        driver.log().last_params(),
        Some(vec![Parameter::primitive("hi")])
    );
}

#[tokio::test]
async fn paired_inputs_concatenate_in_order() {
    let (db, driver) = setup();

    db.exec_with_pair::<_, _, Value>("AddUser", &alice(), &alice())
        .await
        .unwrap();

    let params = driver.log().last_params().unwrap();
    let names: Vec<_> = params.iter().map(|param| param.name.as_str()).collect();
    assert_eq!(names, ["UserId", "Name", "UserId", "Name"]);
}

#[tokio::test]
async fn unknown_operation() {
    let (db, driver) = setup();

    let err = db.exec::<User>("DeleteEverything").await.unwrap_err();

    assert!(err.is_unknown_operation());
    assert_eq!(err.to_string(), "unknown operation `DeleteEverything`");
    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn unmapped_key_is_rejected_before_calling() {
    let (db, driver) = setup();

    let err = db
        .exec_params::<User, _, _>("GetUser", [("Id", 7), ("Nickname", 1)])
        .await
        .unwrap_err();

    assert!(err.is_key_not_mapped());
    assert_eq!(driver.opened(), 0);
}

#[tokio::test]
async fn empty_procedure_name_is_rejected_before_connecting() {
    let (db, driver) = setup();

    let err = db.exec::<Value>("Broken").await.unwrap_err();

    assert!(err.is_empty_procedure_name());
    assert_eq!(driver.opened(), 0);
}

#[tokio::test]
async fn mismatched_response_is_invalid_result() {
    let (db, driver) = setup();
    driver.respond("usp_GetUser", Response::Count(1));

    let err = db
        .exec_params::<User, _, _>("GetUser", [("Id", 7)])
        .await
        .unwrap_err();

    assert!(err.is_invalid_result());
}

#[tokio::test]
async fn outcome_accessor_must_match_shape() {
    let (db, _driver) = setup();

    let outcome = db.exec::<User>("ListUsers").await.unwrap();
    assert_eq!(outcome.shape(), ReturnShape::Collection);

    let err = outcome.into_row().unwrap_err();
    assert!(err.is_invalid_result());
}

#[tokio::test]
async fn conversion_errors_name_the_field() {
    let (db, driver) = setup();
    driver.respond(
        "usp_GetUser",
        Response::Rows(vec![row!("Id" => "seven", "Name" => "alice", "Email" => Value::Null)]),
    );

    let err = db
        .exec_params::<User, _, _>("GetUser", [("Id", 7)])
        .await
        .unwrap_err();

    assert!(err.is_conversion_failed());
    assert!(err.to_string().contains("for field `Id`"), "{err}");
}

#[tokio::test]
async fn missing_column_is_reported() {
    let (db, driver) = setup();
    driver.respond(
        "usp_GetUser",
        Response::Rows(vec![row!("Id" => 7, "Email" => Value::Null)]),
    );

    let err = db
        .exec_params::<User, _, _>("GetUser", [("Id", 7)])
        .await
        .unwrap_err();

    assert!(err.is_column_not_found());
}

#[tokio::test]
async fn driver_errors_propagate_unchanged() {
    let (db, driver) = setup();
    driver.fail(
        "usp_GetUser",
        Error::driver(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "server went away",
        )),
    );

    let err = db
        .exec_params::<User, _, _>("GetUser", [("Id", 7)])
        .await
        .unwrap_err();

    assert!(err.is_driver());
    assert_eq!(err.to_string(), "server went away");
}
