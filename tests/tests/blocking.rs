use pretty_assertions::assert_eq;
use procmap::{
    blocking, driver::Response, MappingTable, OperationDescriptor, Parameter, ReturnShape,
};
use tests::{row, ScriptedDriver};

#[derive(Debug, Default, PartialEq, procmap::Record)]
struct Account {
    #[rename("AccountId")]
    #[param]
    id: i64,

    /// Whole cents
    #[rename("Balance")]
    balance: i64,
}

fn table() -> MappingTable {
    let mut builder = MappingTable::builder();
    builder
        .insert(
            OperationDescriptor::new("GetAccount", "usp_GetAccount", ReturnShape::SingleRow)
                .param("AccountId", "AccountId"),
        )
        .unwrap();
    builder.build().unwrap()
}

#[test]
fn blocking_handle_runs_operations_synchronously() {
    let driver = ScriptedDriver::new();
    driver.respond(
        "usp_GetAccount",
        Response::Rows(vec![row!("AccountId" => 5i64, "Balance" => 1250i64)]),
    );

    let db = blocking::Db::new(table(), driver.clone()).unwrap();

    let account = db
        .exec_params::<Account, _, _>("GetAccount", [("AccountId", 5i64)])
        .unwrap()
        .into_row()
        .unwrap();

    assert_eq!(
        account,
        Some(Account {
            id: 5,
            balance: 1250,
        })
    );
    assert_eq!(
        driver.log().last_params(),
        Some(vec![Parameter::new("AccountId", 5i64)])
    );
}

#[test]
fn blocking_and_async_handles_share_caches() {
    let driver = ScriptedDriver::new();
    let db = blocking::Db::new(table(), driver).unwrap();

    let account = Account {
        id: 9,
        balance: 0,
    };
    db.exec_with::<_, Account>("GetAccount", &account).unwrap();
    db.exec_with::<_, Account>("GetAccount", &account).unwrap();

    assert_eq!(db.as_async().projector().compilations(), 1);
}
