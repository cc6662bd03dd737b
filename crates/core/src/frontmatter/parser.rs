//! Decoding of front matter payloads into [`Metadata`].

use super::errors::{DecodeCause, FrontMatterError};
use super::types::{FormatMark, Metadata, Timestamp, Value};

/// Decode the payload of a front matter block (without delimiters).
pub fn decode(mark: FormatMark, payload: &[u8]) -> Result<Metadata, FrontMatterError> {
    let decoded = match mark {
        FormatMark::Dash => decode_yaml(payload),
        FormatMark::Plus => decode_toml(payload),
        FormatMark::Brace => decode_json(payload),
    };
    decoded.map_err(|cause| FrontMatterError::decode(mark, cause))
}

fn decode_yaml(payload: &[u8]) -> Result<Metadata, DecodeCause> {
    let text = std::str::from_utf8(payload)?;
    if text.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    match value {
        serde_yaml::Value::Null => Ok(Metadata::new()),
        serde_yaml::Value::Mapping(map) => yaml_mapping(map),
        other => Err(top_level_shape(yaml_kind(&other))),
    }
}

fn yaml_mapping(map: serde_yaml::Mapping) -> Result<Metadata, DecodeCause> {
    map.into_iter()
        .map(|(k, v)| -> Result<_, DecodeCause> { Ok((yaml_key(k)?, from_yaml(v)?)) })
        .collect()
}

/// YAML allows any node as a key; scalars are kept by their text.
fn yaml_key(key: serde_yaml::Value) -> Result<String, DecodeCause> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(DecodeCause::Shape(format!(
            "mapping keys must be scalars, found a {}",
            yaml_kind(&other)
        ))),
    }
}

fn from_yaml(value: serde_yaml::Value) -> Result<Value, DecodeCause> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => number(n.as_i64(), n.as_u64(), n.as_f64()),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Sequence(seq.into_iter().map(from_yaml).collect::<Result<_, _>>()?)
        }
        serde_yaml::Value::Mapping(map) => Value::Mapping(yaml_mapping(map)?),
        // Tags such as `!foo` carry no meaning for page metadata.
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

fn decode_toml(payload: &[u8]) -> Result<Metadata, DecodeCause> {
    let text = std::str::from_utf8(payload)?;
    let table: toml::Table = toml::from_str(text)?;
    toml_table(table)
}

fn toml_table(table: toml::Table) -> Result<Metadata, DecodeCause> {
    table
        .into_iter()
        .map(|(k, v)| -> Result<_, DecodeCause> { Ok((k, from_toml(v)?)) })
        .collect()
}

fn from_toml(value: toml::Value) -> Result<Value, DecodeCause> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Integer(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => {
            let text = dt.to_string();
            let ts: Timestamp = text.parse().map_err(|_| {
                DecodeCause::Shape(format!("unsupported date-time '{text}'"))
            })?;
            Value::Timestamp(ts)
        }
        toml::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(from_toml).collect::<Result<_, _>>()?)
        }
        toml::Value::Table(table) => Value::Mapping(toml_table(table)?),
    })
}

fn decode_json(payload: &[u8]) -> Result<Metadata, DecodeCause> {
    let value: serde_json::Value = serde_json::from_slice(payload)?;
    match value {
        serde_json::Value::Object(map) => Ok(json_object(map)),
        other => Err(top_level_shape(json_kind(&other))),
    }
}

fn json_object(map: serde_json::Map<String, serde_json::Value>) -> Metadata {
    map.into_iter().map(|(k, v)| (k, from_json(v))).collect()
}

fn from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => number(n.as_i64(), n.as_u64(), n.as_f64()),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => Value::Mapping(json_object(map)),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Integers stay exact: signed first, then unsigned, otherwise a float.
fn number(signed: Option<i64>, unsigned: Option<u64>, float: Option<f64>) -> Value {
    match (signed, unsigned) {
        (Some(i), _) => Value::Integer(i),
        (None, Some(u)) => Value::UnsignedInteger(u),
        (None, None) => Value::Float(float.unwrap_or(f64::NAN)),
    }
}

fn top_level_shape(found: &str) -> DecodeCause {
    DecodeCause::Shape(format!("front matter must be a mapping, found a {found}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn decode_yaml_scalars_and_sequences() {
        let payload = b"title: Test\ncount: 42\nratio: 0.5\ndraft: false\nnothing: ~\ntags:\n  - rust\n  - cli\nflow: [a, b]\n";
        let fm = decode(FormatMark::Dash, payload).unwrap();
        assert_eq!(fm["title"], Value::from("Test"));
        assert_eq!(fm["count"], Value::Integer(42));
        assert_eq!(fm["ratio"], Value::Float(0.5));
        assert_eq!(fm["draft"], Value::Bool(false));
        assert_eq!(fm["nothing"], Value::Null);
        assert_eq!(fm["tags"], Value::from(vec!["rust", "cli"]));
        assert_eq!(fm["flow"], Value::from(vec!["a", "b"]));
    }

    #[test]
    fn decode_yaml_keeps_key_order() {
        let fm = decode(FormatMark::Dash, b"zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<&str> = fm.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn decode_yaml_dates_stay_strings() {
        let fm = decode(FormatMark::Dash, b"date: 2024-01-15\n").unwrap();
        assert_eq!(fm["date"], Value::from("2024-01-15"));
    }

    #[test]
    fn decode_yaml_non_string_keys_and_tags() {
        let fm = decode(FormatMark::Dash, b"1: one\ntrue: yes\nweird: !custom text\n").unwrap();
        assert_eq!(fm["1"], Value::from("one"));
        assert_eq!(fm["true"], Value::from("yes"));
        assert_eq!(fm["weird"], Value::from("text"));
    }

    #[test]
    fn decode_yaml_empty_and_null() {
        assert!(decode(FormatMark::Dash, b"").unwrap().is_empty());
        assert!(decode(FormatMark::Dash, b"\n  \n").unwrap().is_empty());
        assert!(decode(FormatMark::Dash, b"~\n").unwrap().is_empty());
    }

    #[test]
    fn decode_yaml_rejects_non_mapping() {
        let err = decode(FormatMark::Dash, b"- a\n- b\n").unwrap_err();
        match err {
            FrontMatterError::Decode { format: FormatMark::Dash, source: DecodeCause::Shape(msg) } => {
                assert!(msg.contains("sequence"), "{msg}");
            }
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn decode_yaml_malformed() {
        let err = decode(FormatMark::Dash, b"title: [unclosed\n").unwrap_err();
        assert!(matches!(
            err,
            FrontMatterError::Decode { format: FormatMark::Dash, source: DecodeCause::Yaml(_) }
        ));
    }

    #[test]
    fn decode_toml_native_datetime() {
        let payload = b"title = \"Post\"\ndate = 2024-01-15\nupdated = 2024-01-16T10:30:00Z\ntags = [\"a\", \"b\"]\n\n[extra]\nweight = 3\n";
        let fm = decode(FormatMark::Plus, payload).unwrap();
        assert_eq!(fm["title"], Value::from("Post"));
        assert_eq!(
            fm["date"],
            Value::Timestamp(Timestamp::LocalDate(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()))
        );
        match &fm["updated"] {
            Value::Timestamp(ts @ Timestamp::OffsetDateTime { zulu: true, .. }) => {
                assert_eq!(ts.to_string(), "2024-01-16T10:30:00Z");
            }
            other => panic!("expected offset date-time, got {other:?}"),
        }
        assert_eq!(fm["tags"], Value::from(vec!["a", "b"]));
        let extra = fm["extra"].as_mapping().unwrap();
        assert_eq!(extra["weight"], Value::Integer(3));
    }

    #[test]
    fn decode_toml_malformed() {
        let err = decode(FormatMark::Plus, b"title = \n").unwrap_err();
        assert!(matches!(
            err,
            FrontMatterError::Decode { format: FormatMark::Plus, source: DecodeCause::Toml(_) }
        ));
    }

    #[test]
    fn decode_json_structure() {
        let payload = br#"{"title": "J", "tags": ["a", "b"], "n": 7, "f": 1.5, "none": null, "nested": {"k": true}}"#;
        let fm = decode(FormatMark::Brace, payload).unwrap();
        assert_eq!(fm["title"], Value::from("J"));
        assert_eq!(fm["tags"], Value::from(vec!["a", "b"]));
        assert_eq!(fm["n"], Value::Integer(7));
        assert_eq!(fm["f"], Value::Float(1.5));
        assert_eq!(fm["none"], Value::Null);
        assert_eq!(fm["nested"].as_mapping().unwrap()["k"], Value::Bool(true));
    }

    #[test]
    fn decode_keeps_extreme_integers_exact() {
        let yaml = decode(FormatMark::Dash, b"big: 18446744073709551615\nlow: -9223372036854775808\n")
            .unwrap();
        assert_eq!(yaml["big"], Value::UnsignedInteger(u64::MAX));
        assert_eq!(yaml["low"], Value::Integer(i64::MIN));

        let json = decode(FormatMark::Brace, b"{\"big\": 18446744073709551615, \"f\": 1e300}").unwrap();
        assert_eq!(json["big"], Value::UnsignedInteger(u64::MAX));
        assert_eq!(json["f"], Value::Float(1e300));
    }

    #[test]
    fn decode_json_dates_stay_strings() {
        let fm = decode(FormatMark::Brace, br#"{"date": "2024-01-15T00:00:00Z"}"#).unwrap();
        assert_eq!(fm["date"], Value::from("2024-01-15T00:00:00Z"));
    }

    #[test]
    fn decode_json_rejects_non_object() {
        let err = decode(FormatMark::Brace, b"[1, 2]").unwrap_err();
        assert!(matches!(
            err,
            FrontMatterError::Decode { format: FormatMark::Brace, source: DecodeCause::Shape(_) }
        ));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = decode(FormatMark::Plus, b"title = \"\xff\"\n").unwrap_err();
        assert!(matches!(
            err,
            FrontMatterError::Decode { source: DecodeCause::Utf8(_), .. }
        ));
    }
}
