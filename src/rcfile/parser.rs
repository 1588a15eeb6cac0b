// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parses the rc-file's irregular keyed-node grammar.
//!
//! The rc-file itself is ordinary YAML; what is irregular is that its
//! top-level keys are compound "keyword name" strings (`project kcalc`,
//! `group kdeutils`, `override kcalc`, `include path/to/file.yml`) rather
//! than a fixed struct shape, so `serde_yaml`'s normal struct derivation
//! doesn't apply. This module decodes the top level into a generic
//! [`serde_yaml::Value`] mapping and classifies each key with a small
//! regex, then flattens each node's value mapping into [`super::Node`].

use std::path::Path;

use regex::Regex;
use serde_yaml::Value;
use std::sync::OnceLock;

use super::{Node, NodeKind, RcFile};
use crate::error::{ConfigError, MobResult};

fn keyed_node_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(project|group|override)\s+(\S+)$").expect("static regex is valid")
    })
}

/// Parses an rc-file from disk, following `include` directives relative
/// to each file's own directory.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, is not valid
/// YAML, or an `include` target cannot be read.
pub fn parse_file(path: &Path) -> MobResult<RcFile> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_str(&text, path.parent().unwrap_or_else(|| Path::new(".")))
}

/// Parses rc-file YAML text; `base_dir` is used to resolve relative
/// `include` paths.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the text is not valid YAML or an
/// `include` target cannot be read.
pub fn parse_str(text: &str, base_dir: &Path) -> MobResult<RcFile> {
    let value: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: base_dir.display().to_string(),
        message: e.to_string(),
    })?;

    let Value::Mapping(map) = value else {
        return Err(ConfigError::ParseError {
            path: base_dir.display().to_string(),
            message: "rc-file must be a top-level mapping".to_string(),
        }
        .into());
    };

    let mut nodes = Vec::new();
    for (key, value) in map {
        let Some(key) = key.as_str() else { continue };

        if key == "global" {
            nodes.push(node_from_value(NodeKind::Global, &value));
        } else if let Some(rest) = key.strip_prefix("include ").map(str::trim) {
            let include_path = base_dir.join(rest);
            let included = parse_file(&include_path)?;
            nodes.extend(included.nodes);
        } else if let Some(caps) = keyed_node_pattern().captures(key) {
            let name = caps[2].to_string();
            let kind = match &caps[1] {
                "project" => NodeKind::Project(name),
                "group" => NodeKind::Group(name),
                "override" => NodeKind::Override(name),
                _ => unreachable!("regex only matches these three keywords"),
            };
            nodes.push(node_from_value(kind, &value));
        } else {
            return Err(ConfigError::ParseError {
                path: base_dir.display().to_string(),
                message: format!("unrecognized rc-file node key: '{key}'"),
            }
            .into());
        }
    }

    Ok(RcFile { nodes })
}

fn node_from_value(kind: NodeKind, value: &Value) -> Node {
    let mut options = std::collections::BTreeMap::new();
    let mut use_projects = Vec::new();

    if let Value::Mapping(map) = value {
        for (k, v) in map {
            let Some(k) = k.as_str() else { continue };
            if k == "use-projects" {
                use_projects = sequence_to_strings(v);
            } else {
                options.insert(k.to_string(), scalar_to_string(v));
            }
        }
    }

    Node {
        kind,
        options,
        use_projects,
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        Value::Sequence(_) => sequence_to_strings(value).join(","),
        Value::Mapping(_) | Value::Tagged(_) => {
            serde_yaml::to_string(value).unwrap_or_default().trim().to_string()
        }
    }
}

fn sequence_to_strings(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().map(scalar_to_string).collect(),
        Value::String(s) => s.split(',').map(|s| s.trim().to_string()).collect(),
        other => vec![scalar_to_string(other)],
    }
}
