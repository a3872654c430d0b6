use serde_json::{Map, Value};
use trial_schema::SchemaKind;

use crate::cli::{GlobalFlags, SchemaArgs};
use crate::output::output;

/// Handle `trials schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&export(args.kind.as_deref())?, flags.format)
}

/// One schema by name, or every schema keyed by name.
fn export(kind: Option<&str>) -> anyhow::Result<Value> {
    if let Some(name) = kind {
        let kind: SchemaKind = name.parse()?;
        return Ok(kind.definition()?);
    }

    let mut all = Map::new();
    for kind in SchemaKind::ALL {
        all.insert(kind.to_string(), kind.definition()?);
    }
    Ok(Value::Object(all))
}
