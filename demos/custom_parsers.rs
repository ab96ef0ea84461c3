//! Example demonstrating parser overrides by keyword, type and kind

use envbind::{Binder, Kind, Params, Parsers, Record, TypeInfo};
use std::time::Duration;

#[derive(Debug, Default, Record)]
struct Config {
    // Default: built-in JSON decoding
    #[env(name = "JSON_TAGS")]
    pub json_tags: Vec<String>,

    // Keyword override with parameters
    #[env(name = "LIST_TAGS", parser = "split", params = "sep=;,trim")]
    pub list_tags: Vec<String>,

    // Type override: every Duration field
    #[env(name = "TIMEOUT")]
    pub timeout: Duration,

    // Kind override: every unsigned integer field
    #[env(name = "WORKERS")]
    pub workers: u8,
}

// Splits on the `sep` parameter, optionally trimming each item
fn split(_ty: &TypeInfo, raw: &str, params: &Params) -> Result<Box<dyn std::any::Any>, envbind::BoxError> {
    let sep = params.get("sep").unwrap_or(",");
    let trim = params.args().iter().any(|arg| arg == "trim");
    let items: Vec<String> = raw
        .split(sep)
        .map(|item| if trim { item.trim() } else { item })
        .map(str::to_string)
        .collect();
    Ok(Box::new(items))
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("JSON_TAGS", r#"["prod","api","v2"]"#);
    std::env::set_var("LIST_TAGS", "tag1; tag2; tag3");
    std::env::set_var("TIMEOUT", "1500ms");
    std::env::set_var("WORKERS", "max");

    let parsers = Parsers::new()
        .keyword("split", split)
        .for_type::<Duration, _>(|raw, _params| {
            let millis = raw.trim_end_matches("ms").parse::<u64>()?;
            Ok(Duration::from_millis(millis))
        })
        .for_kind(Kind::Uint, |ty, raw, _params| {
            if ty.is::<u8>() && raw == "max" {
                return Ok(Box::new(u8::MAX));
            }
            Err(format!("unsupported {} value {raw:?}", ty.name()).into())
        });

    let mut config = Config::default();
    Binder::new().parsers(parsers).bind(&mut config)?;

    println!("Configuration loaded:");
    println!("  JSON Tags: {:?}", config.json_tags);
    println!("  List Tags: {:?}", config.list_tags);
    println!("  Timeout: {:?}", config.timeout);
    println!("  Workers: {}", config.workers);

    Ok(())
}
