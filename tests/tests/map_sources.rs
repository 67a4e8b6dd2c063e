use pretty_assertions::assert_eq;
use procmap::{
    driver::Response, Db, JsonMap, MapSource, MappingTable, OperationDef, OperationDescriptor,
    Parameter, ReturnShape, RuntimeMap, Value, XmlMap,
};
use tests::{row, ScriptedDriver};

#[derive(Debug, Default, PartialEq, procmap::Record)]
struct Product {
    #[rename("Sku")]
    #[param("ProductSku")]
    sku: String,

    #[rename("Price")]
    #[param]
    price: f64,

    #[rename("Description")]
    description: Option<String>,
}

const MAPPING: &str = r#"[
    {
        "Name": "GetProduct",
        "SpName": "usp_GetProduct",
        "ReturnDataType": "SingleRow",
        "Parameters": [{ "ParameterName": "Sku", "SpParameterName": "ProductSku" }]
    },
    {
        "name": "ListProducts",
        "spName": "usp_ListProducts",
        "returnDataType": "Enumerable",
        "parameters": null
    },
    {
        "name": "CountProducts",
        "spName": "usp_CountProducts",
        "returnDataType": "Scalar",
        "parameters": { "MinPrice": "MinimumPrice" }
    }
]"#;

#[tokio::test]
async fn json_mapping_file_drives_dispatch() {
    tests::init_tracing();

    let path = std::env::temp_dir().join(format!("procmap-mapping-{}.json", std::process::id()));
    std::fs::write(&path, MAPPING).unwrap();

    let driver = ScriptedDriver::new();
    driver.respond(
        "usp_GetProduct",
        Response::Rows(vec![row!("Sku" => "A-1", "Price" => 2.5, "Description" => Value::Null)]),
    );

    let db = Db::builder()
        .source(JsonMap::from_path(&path).unwrap())
        .unwrap()
        .build(driver.clone())
        .unwrap();
    std::fs::remove_file(&path).unwrap();

    let product = db
        .exec_params::<Product, _, _>("GetProduct", [("Sku", "A-1")])
        .await
        .unwrap()
        .into_row()
        .unwrap();

    assert_eq!(
        product,
        Some(Product {
            sku: "A-1".to_string(),
            price: 2.5,
            description: None,
        })
    );
    assert_eq!(
        driver.log().last_params(),
        Some(vec![Parameter::new("ProductSku", "A-1")])
    );

    let names: Vec<_> = db.table().iter().map(|op| op.name.as_str()).collect();
    assert_eq!(names, ["GetProduct", "ListProducts", "CountProducts"]);
    assert_eq!(
        db.table().lookup("ListProducts").unwrap().shape,
        ReturnShape::Collection
    );
    assert_eq!(
        db.table().lookup("CountProducts").unwrap().translate("MinPrice"),
        Some("MinimumPrice")
    );
}

#[tokio::test]
async fn xml_mapping_file_drives_dispatch() {
    let path = std::env::temp_dir().join(format!("procmap-mapping-{}.xml", std::process::id()));
    std::fs::write(
        &path,
        r#"<operations>
             <operation name="GetProduct">
               <spName>usp_GetProduct</spName>
               <returnDataType>SingleRow</returnDataType>
               <parameters>
                 <parameter>
                   <parameterName>Sku</parameterName>
                   <spParameterName>ProductSku</spParameterName>
                 </parameter>
               </parameters>
             </operation>
           </operations>"#,
    )
    .unwrap();

    let driver = ScriptedDriver::new();
    driver.respond(
        "usp_GetProduct",
        Response::Rows(vec![row!("Sku" => "A-1", "Price" => 2.5, "Description" => "boxed")]),
    );

    let db = Db::builder()
        .source(XmlMap::from_path(&path).unwrap())
        .unwrap()
        .build(driver.clone())
        .unwrap();
    std::fs::remove_file(&path).unwrap();

    let product = db
        .exec_params::<Product, _, _>("GetProduct", [("Sku", "A-1")])
        .await
        .unwrap()
        .into_row()
        .unwrap()
        .unwrap();

    assert_eq!(product.description.as_deref(), Some("boxed"));
    assert_eq!(
        driver.log().last_params(),
        Some(vec![Parameter::new("ProductSku", "A-1")])
    );
}

#[test]
fn failed_source_is_not_half_registered() {
    let mut map = JsonMap::from_json(
        r#"[
            { "name": "A", "spName": "usp_A", "returnDataType": "Scalar" },
            { "name": "B", "spName": "usp_B", "returnDataType": "Many" },
            { "name": "C", "spName": "usp_C", "returnDataType": "Scalar" }
        ]"#,
    )
    .unwrap();

    assert!(map.build().is_err());

    let retried = map.build().unwrap_err();
    assert!(retried.to_string().contains("unrecognized return shape `Many`"), "{retried}");
}

#[test]
fn missing_mapping_file() {
    let err = JsonMap::from_path("/nonexistent/procmap/mapping.json").unwrap_err();
    assert!(
        err.to_string()
            .starts_with("reading mapping file /nonexistent/procmap/mapping.json"),
        "{err}"
    );
}

#[test]
fn unknown_shape_names_the_operation() {
    let mut map = JsonMap::from_json(
        r#"[{ "name": "Explode", "spName": "usp_Explode", "returnDataType": "Fireworks" }]"#,
    )
    .unwrap();

    let err = map.build().unwrap_err();
    assert_eq!(
        err.to_string(),
        "operation `Explode`: invalid mapping: unrecognized return shape `Fireworks`"
    );
}

#[test]
fn malformed_json_is_invalid_mapping() {
    let err = JsonMap::from_json("{ not json").unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[tokio::test]
async fn runtime_map_uses_param_attributes() {
    let driver = ScriptedDriver::new();

    let mut map = RuntimeMap::new();
    map.register::<Product>(OperationDef::new("AddProduct"))
        .unwrap()
        .register::<String>(
            OperationDef::new("GetProduct")
                .procedure("usp_ProductBySku")
                .shape(ReturnShape::SingleRow)
                .primitive_param("Sku"),
        )
        .unwrap();

    let db = Db::builder()
        .source(map)
        .unwrap()
        .build(driver.clone())
        .unwrap();

    let product = Product {
        sku: "B-2".to_string(),
        price: 10.0,
        description: Some("boxed".to_string()),
    };
    db.exec_with::<_, Value>("AddProduct", &product)
        .await
        .unwrap();

    let call = driver.log().last();
    assert_eq!(call.procedure, "uspAddProduct");
    assert_eq!(call.shape, ReturnShape::NoResult);
    assert_eq!(
        call.params,
        Some(vec![
            Parameter::new("ProductSku", "B-2"),
            Parameter::new("Price", 10.0),
        ])
    );

    db.exec_with::<_, Product>("GetProduct", &"B-2".to_string())
        .await
        .unwrap();

    assert_eq!(
        driver.log().last_params(),
        Some(vec![Parameter::new("Sku", "B-2")])
    );
    assert_eq!(driver.log().procedures(), ["uspAddProduct", "usp_ProductBySku"]);
}

#[test]
fn builder_merges_sources_left_biased() {
    let mut first = MappingTable::builder();
    first
        .insert(OperationDescriptor::new(
            "Ping",
            "usp_Ping_v2",
            ReturnShape::Scalar,
        ))
        .unwrap();

    let mut second = RuntimeMap::new();
    second
        .register_bare(OperationDef::new("Ping"))
        .unwrap()
        .register_bare(OperationDef::new("Pong"))
        .unwrap();

    let db = Db::builder()
        .source(first)
        .unwrap()
        .source(second)
        .unwrap()
        .build(ScriptedDriver::new())
        .unwrap();

    assert_eq!(db.table().len(), 2);
    assert_eq!(db.table().lookup("Ping").unwrap().procedure, "usp_Ping_v2");
    assert_eq!(db.table().lookup("Pong").unwrap().procedure, "uspPong");
}

#[test]
fn builder_without_table_fails() {
    let err = Db::builder().build(ScriptedDriver::new()).unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[tokio::test]
async fn connect_rejects_unknown_scheme() {
    let mut builder = Db::builder();
    builder.table(MappingTable::default());

    let err = builder.connect("oracle://localhost/app").await.unwrap_err();
    assert!(err.to_string().starts_with("unsupported database"), "{err}");
}
