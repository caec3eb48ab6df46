//! Feature values given on the command line.
//!
//! `--set NAME=VALUE` pairs and `--from FILE` maps (TOML, or JSON when the
//! extension is `.json`). Later sources win: file values first, then `--set`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context};
use oncoai_common::features::feature_names;

/// Parse one `NAME=VALUE` argument.
pub fn parse_assignment(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("expected NAME=VALUE, got '{}'", arg),
    }
}

fn scalar_json(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn scalar_toml(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Parse a feature map. `json` selects the format.
pub fn parse_map(content: &str, json: bool) -> anyhow::Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    if json {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
        for (name, value) in &map {
            let Some(v) = scalar_json(value) else { bail!("feature '{}' must be a number or string", name) };
            values.insert(name.clone(), v);
        }
    } else {
        let table: toml::Table = toml::from_str(content)?;
        for (name, value) in &table {
            let Some(v) = scalar_toml(value) else { bail!("feature '{}' must be a number or string", name) };
            values.insert(name.clone(), v);
        }
    }
    Ok(values)
}

/// Merge `--from` and `--set` into one map of feature name to raw value.
/// Names outside the model's feature set are rejected.
pub fn collect(assignments: &[String], from: Option<&Path>) -> anyhow::Result<BTreeMap<String, String>> {
    let mut values = match from {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            parse_map(&content, json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => BTreeMap::new(),
    };
    for arg in assignments {
        let (name, value) = parse_assignment(arg)?;
        values.insert(name, value);
    }

    let known = feature_names();
    if let Some(unknown) = values.keys().find(|name| !known.contains(*name)) {
        bail!("unknown feature '{}'", unknown);
    }
    Ok(values)
}
