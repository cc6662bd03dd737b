//! Encoding of [`Metadata`] back into a delimited front matter block.

use super::errors::FrontMatterError;
use super::types::{FormatMark, Metadata, Value};

/// Encode metadata as a complete front matter block for `mark`.
///
/// The block carries its delimiters (none for JSON) and always ends with a
/// single `\n`, so content can be appended directly.
pub fn encode(mark: FormatMark, metadata: &Metadata) -> Result<Vec<u8>, FrontMatterError> {
    let block = match mark {
        FormatMark::Dash => delimited("---", &to_yaml_string(metadata)?),
        FormatMark::Plus => delimited("+++", &to_toml_string(metadata)?),
        FormatMark::Brace => {
            let mut json = to_json_string(metadata)?;
            json.push('\n');
            json
        }
    };
    Ok(block.into_bytes())
}

fn delimited(delimiter: &str, payload: &str) -> String {
    let mut out = String::with_capacity(payload.len() + 2 * delimiter.len() + 3);
    out.push_str(delimiter);
    out.push('\n');
    out.push_str(payload);
    if !payload.is_empty() && !payload.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(delimiter);
    out.push('\n');
    out
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() { key.to_string() } else { format!("{path}.{key}") }
}

/// YAML payload without delimiters, empty for an empty mapping.
pub fn to_yaml_string(metadata: &Metadata) -> Result<String, FrontMatterError> {
    if metadata.is_empty() {
        return Ok(String::new());
    }
    serde_yaml::to_string(&yaml_mapping(metadata)).map_err(|e| {
        FrontMatterError::unrepresentable(FormatMark::Dash, "", e.to_string())
    })
}

fn yaml_mapping(metadata: &Metadata) -> serde_yaml::Value {
    let mapping: serde_yaml::Mapping = metadata
        .iter()
        .map(|(k, v)| (serde_yaml::Value::String(k.clone()), to_yaml(v)))
        .collect();
    serde_yaml::Value::Mapping(mapping)
}

fn to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Integer(i) => serde_yaml::Value::Number((*i).into()),
        Value::UnsignedInteger(u) => serde_yaml::Value::Number((*u).into()),
        Value::Float(f) => serde_yaml::Value::Number((*f).into()),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        // YAML front matter has no timestamp type here; keep the RFC 3339 text.
        Value::Timestamp(ts) => serde_yaml::Value::String(ts.to_string()),
        Value::Sequence(seq) => serde_yaml::Value::Sequence(seq.iter().map(to_yaml).collect()),
        Value::Mapping(map) => yaml_mapping(map),
    }
}

/// TOML payload without delimiters. Null entries of tables are omitted.
pub fn to_toml_string(metadata: &Metadata) -> Result<String, FrontMatterError> {
    let table = toml_table(metadata, "")?;
    toml::to_string(&table)
        .map_err(|e| FrontMatterError::unrepresentable(FormatMark::Plus, "", e.to_string()))
}

fn toml_table(metadata: &Metadata, path: &str) -> Result<toml::Table, FrontMatterError> {
    let mut table = toml::Table::new();
    for (key, value) in metadata {
        if value.is_null() {
            continue;
        }
        table.insert(key.clone(), to_toml(value, &child_path(path, key))?);
    }
    Ok(table)
}

fn to_toml(value: &Value, path: &str) -> Result<toml::Value, FrontMatterError> {
    Ok(match value {
        Value::Null => {
            return Err(FrontMatterError::unrepresentable(
                FormatMark::Plus,
                path,
                "TOML has no null value",
            ));
        }
        Value::Bool(b) => toml::Value::Boolean(*b),
        Value::Integer(i) => toml::Value::Integer(*i),
        Value::UnsignedInteger(u) => {
            return Err(FrontMatterError::unrepresentable(
                FormatMark::Plus,
                path,
                format!("{u} does not fit a TOML integer"),
            ));
        }
        Value::Float(f) => toml::Value::Float(*f),
        Value::String(s) => toml::Value::String(s.clone()),
        Value::Timestamp(ts) => {
            let text = ts.to_string();
            match text.parse::<toml::value::Datetime>() {
                Ok(dt) => toml::Value::Datetime(dt),
                Err(_) => toml::Value::String(text),
            }
        }
        Value::Sequence(seq) => toml::Value::Array(
            seq.iter()
                .enumerate()
                .map(|(i, item)| to_toml(item, &format!("{path}[{i}]")))
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(map) => toml::Value::Table(toml_table(map, path)?),
    })
}

/// Pretty printed JSON object (two-space indent), without trailing newline.
pub fn to_json_string(metadata: &Metadata) -> Result<String, FrontMatterError> {
    let object = json_object(metadata, "")?;
    serde_json::to_string_pretty(&object)
        .map_err(|e| FrontMatterError::unrepresentable(FormatMark::Brace, "", e.to_string()))
}

fn json_object(metadata: &Metadata, path: &str) -> Result<serde_json::Value, FrontMatterError> {
    let map = metadata
        .iter()
        .map(|(k, v)| -> Result<_, FrontMatterError> {
            Ok((k.clone(), to_json(v, &child_path(path, k))?))
        })
        .collect::<Result<serde_json::Map<_, _>, _>>()?;
    Ok(serde_json::Value::Object(map))
}

fn to_json(value: &Value, path: &str) -> Result<serde_json::Value, FrontMatterError> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::UnsignedInteger(u) => serde_json::Value::Number((*u).into()),
        Value::Float(f) => match serde_json::Number::from_f64(*f) {
            Some(n) => serde_json::Value::Number(n),
            None => {
                return Err(FrontMatterError::unrepresentable(
                    FormatMark::Brace,
                    path,
                    format!("JSON cannot hold the float {f}"),
                ));
            }
        },
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Timestamp(ts) => serde_json::Value::String(ts.to_string()),
        Value::Sequence(seq) => serde_json::Value::Array(
            seq.iter()
                .enumerate()
                .map(|(i, item)| to_json(item, &format!("{path}[{i}]")))
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(map) => json_object(map, path)?,
    })
}
