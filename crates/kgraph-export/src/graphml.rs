//! GraphML writer for the flat interchange graph.

use std::collections::BTreeMap;
use std::io::Write;

use crate::flat::{FlatGraph, FlatValue};

fn graphml_type(value: &FlatValue) -> &'static str {
    match value {
        FlatValue::Bool(_) => "boolean",
        FlatValue::Int(_) => "long",
        FlatValue::Float(_) => "double",
        FlatValue::Text(_) => "string",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn render(value: &FlatValue) -> String {
    match value {
        FlatValue::Bool(b) => b.to_string(),
        FlatValue::Int(i) => i.to_string(),
        FlatValue::Float(f) => f.to_string(),
        FlatValue::Text(s) => escape(s),
    }
}

/// Key declarations as (domain, attribute name) -> type, first value wins.
fn collect_keys(flat: &FlatGraph) -> BTreeMap<(&'static str, String), &'static str> {
    let mut keys = BTreeMap::new();
    for node in &flat.nodes {
        for (name, value) in &node.attributes {
            keys.entry(("node", name.clone()))
                .or_insert_with(|| graphml_type(value));
        }
    }
    for edge in &flat.edges {
        for (name, value) in &edge.attributes {
            keys.entry(("edge", name.clone()))
                .or_insert_with(|| graphml_type(value));
        }
    }
    keys
}

fn key_id(domain: &str, name: &str) -> String {
    format!("{}_{}", domain, name)
}

/// Write `flat` as a GraphML document.
pub fn write_graphml<W: Write>(flat: &FlatGraph, out: &mut W) -> std::io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#)?;
    for ((domain, name), ty) in collect_keys(flat) {
        writeln!(
            out,
            r#"  <key id="{}" for="{}" attr.name="{}" attr.type="{}"/>"#,
            escape(&key_id(domain, &name)),
            domain,
            escape(&name),
            ty
        )?;
    }

    let edgedefault = if flat.directed { "directed" } else { "undirected" };
    writeln!(out, r#"  <graph edgedefault="{}">"#, edgedefault)?;
    for node in &flat.nodes {
        writeln!(out, r#"    <node id="{}">"#, escape(&node.id))?;
        for (name, value) in &node.attributes {
            writeln!(
                out,
                r#"      <data key="{}">{}</data>"#,
                escape(&key_id("node", name)),
                render(value)
            )?;
        }
        writeln!(out, "    </node>")?;
    }
    for edge in &flat.edges {
        writeln!(
            out,
            r#"    <edge source="{}" target="{}">"#,
            escape(&edge.source),
            escape(&edge.target)
        )?;
        for (name, value) in &edge.attributes {
            writeln!(
                out,
                r#"      <data key="{}">{}</data>"#,
                escape(&key_id("edge", name)),
                render(value)
            )?;
        }
        writeln!(out, "    </edge>")?;
    }
    writeln!(out, "  </graph>")?;
    writeln!(out, "</graphml>")?;
    Ok(())
}
