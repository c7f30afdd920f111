//! `coresmith get` command

use anyhow::Result;
use serde_json::{Map, Number, Value as JsonValue};
use toml::Value;

use crate::cli::GetArgs;
use coresmith::CoreManager;

pub fn execute(args: GetArgs, manager: &CoreManager) -> Result<()> {
    let values = manager.get_property(&args.name, &args.attribute, !args.shallow)?;

    if args.json {
        let object: Map<String, JsonValue> = values
            .iter()
            .map(|(core, value)| (core.clone(), to_json(value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
        return Ok(());
    }

    if values.is_empty() {
        eprintln!("No core defines `{}`", args.attribute);
        return Ok(());
    }

    for (core, value) in &values {
        match value {
            Value::String(s) => println!("{}: {}", core, s),
            other => println!("{}: {}", core, other),
        }
    }

    Ok(())
}

/// Convert a TOML value to JSON. Datetimes become their TOML text.
fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Integer(i) => JsonValue::from(*i),
        Value::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Datetime(dt) => JsonValue::String(dt.to_string()),
        Value::Array(items) => items.iter().map(to_json).collect(),
        Value::Table(table) => table
            .iter()
            .map(|(key, value)| (key.clone(), to_json(value)))
            .collect::<Map<_, _>>()
            .into(),
    }
}
