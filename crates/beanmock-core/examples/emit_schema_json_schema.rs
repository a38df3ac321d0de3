use beanmock_core::catalog_json_schema;

fn main() {
    let json = serde_json::to_string_pretty(&catalog_json_schema()).expect("serialize json schema");
    println!("{json}");
}
