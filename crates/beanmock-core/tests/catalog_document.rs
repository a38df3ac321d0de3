use beanmock_core::{
    Bean, Error, TypeCatalog, TypeDef, Value, field_names, resolve, type_ids,
};

#[test]
fn serializes_catalog_deterministically() {
    let catalog = TypeCatalog::new(vec![TypeDef::new("Tag").property("label", type_ids::STRING)])
        .expect("valid catalog");

    let json = serde_json::to_string_pretty(&catalog.to_document()).expect("serialize catalog");
    let expected = r#"{
  "catalog_version": "0.1",
  "types": [
    {
      "name": "Tag",
      "fields": [
        {
          "name": "label",
          "type": "string"
        }
      ],
      "methods": [
        "getLabel",
        "setLabel"
      ],
      "constructible": true
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn loaded_catalog_supports_introspection() {
    let input = r#"{
        "catalog_version": "0.1",
        "types": [
            {
                "name": "Vehicle",
                "fields": [{"name": "wheels", "type": "short"}],
                "methods": ["getWheels", "setWheels"]
            },
            {
                "name": "Car",
                "extends": "Vehicle",
                "fields": [
                    {"name": "plate", "type": "string"},
                    {"name": "electric", "type": "boolean"}
                ],
                "methods": ["getPlate", "setPlate", "isElectric"]
            }
        ]
    }"#;
    let catalog = TypeCatalog::from_json_str(input).expect("parse catalog");

    assert_eq!(
        field_names(&catalog, "Car"),
        vec!["plate", "electric", "wheels"]
    );
    let wheels = resolve(&catalog, "Car", "wheels").expect("inherited field");
    assert_eq!(wheels.declared_in, "Vehicle");
    assert_eq!(wheels.declared_type, type_ids::SHORT);
    assert!(matches!(
        resolve(&catalog, "Car", "electric"),
        Err(Error::Introspection { .. })
    ));

    let car = Bean::from_json(
        &catalog,
        "Car",
        &serde_json::json!({"plate": "AB-12", "wheels": 4, "electric": true}),
    )
    .expect("decode car");
    assert_eq!(car.get("wheels"), &Value::Short(4));
    assert!(car.is_null("electric"));
}

#[test]
fn invalid_documents_are_rejected() {
    let input = r#"{
        "catalog_version": "0.1",
        "types": [{"name": "Loop", "extends": "Loop"}]
    }"#;
    assert!(matches!(
        TypeCatalog::from_json_str(input),
        Err(Error::InvalidCatalog(_))
    ));
    assert!(matches!(
        TypeCatalog::from_json_str("not json"),
        Err(Error::Json(_))
    ));
}
