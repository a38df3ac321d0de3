use std::env;
use std::path::PathBuf;

use beanmock_core::TypeCatalog;
use beanmock_generate::logging::init_logging;
use beanmock_generate::{MockConfig, MockEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    init_logging(&filter)?;

    let mut args = env::args().skip(1);
    let mut catalog_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut type_name: Option<String> = None;
    let mut recurse: Option<bool> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => catalog_path = args.next().map(PathBuf::from),
            "--config" => config_path = args.next().map(PathBuf::from),
            "--no-recurse" => recurse = Some(false),
            _ => {
                if type_name.is_none() {
                    type_name = Some(arg);
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let catalog_path = catalog_path.ok_or("missing --catalog <path>")?;
    let type_name = type_name.ok_or("missing type name")?;
    let config = match config_path {
        Some(path) => MockConfig::load(&path)?,
        None => MockConfig::default(),
    };

    let catalog = TypeCatalog::from_json_str(&std::fs::read_to_string(&catalog_path)?)?;
    let mut engine = MockEngine::from_config(catalog, &config)?;
    let recurse = recurse.unwrap_or(config.default_recurse);
    let bean = engine.try_build(&type_name, recurse)?;

    println!("{}", serde_json::to_string_pretty(&bean.to_json())?);
    Ok(())
}
