//! GraphQL text for one page of the `projects` connection.
//!
//! The requested node fields are a [`FieldTree`] built from the configured
//! dotted paths, so `a.b` and `a.c` share a single `a { ... }` selection.

use crate::domain::constants::IDENTITY_FIELDS;
use crate::domain::models::{Expected, Settings};
use indexmap::IndexMap;
use serde_json::{Map, Value};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldTree {
    children: IndexMap<String, FieldTree>,
}

impl FieldTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: AsRef<str>>(&mut self, segments: &[S]) {
        let mut node = self;
        for seg in segments {
            node = node.children.entry(seg.as_ref().to_string()).or_default();
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Renders the children of this node, one field per line, at `indent` spaces.
    pub fn render(&self, indent: usize) -> String {
        let mut out = String::new();
        self.render_into(indent, &mut out);
        out
    }

    fn render_into(&self, indent: usize, out: &mut String) {
        let pad = " ".repeat(indent);
        for (name, node) in &self.children {
            if node.is_leaf() {
                out.push_str(&format!("{}{}\n", pad, name));
            } else {
                out.push_str(&format!("{}{} {{\n", pad, name));
                node.render_into(indent + 2, out);
                out.push_str(&format!("{}}}\n", pad));
            }
        }
    }
}

/// Identity fields first, then every rule path in settings order.
/// Any-element rules also request their sub-mapping keys under the path.
pub fn field_tree(settings: &Settings) -> FieldTree {
    let mut tree = FieldTree::new();
    for f in IDENTITY_FIELDS {
        tree.insert(&[f]);
    }
    for rule in &settings.rules {
        let segments = rule.path.segments();
        tree.insert(segments);
        if let Expected::AnyElement { fields, .. } = &rule.expected {
            insert_keys(&mut tree, segments.to_vec(), fields);
        }
    }
    tree
}

fn insert_keys(tree: &mut FieldTree, prefix: Vec<String>, fields: &Map<String, Value>) {
    for (key, value) in fields {
        let mut path = prefix.clone();
        path.push(key.clone());
        match value {
            Value::Object(nested) if !nested.is_empty() => insert_keys(tree, path, nested),
            _ => tree.insert(path.as_slice()),
        }
    }
}

fn string_literal(s: &str) -> String {
    // JSON string escaping is valid GraphQL string syntax.
    serde_json::Value::String(s.to_string()).to_string()
}

fn projects_arguments(settings: &Settings, cursor: Option<&str>, page_size: u32) -> String {
    let mut args = vec![format!("first: {}", page_size)];
    let topics = settings.general.topics.list();
    if !topics.is_empty() {
        let quoted: Vec<String> = topics.iter().map(|t| string_literal(t)).collect();
        args.push(format!("topics: [{}]", quoted.join(", ")));
    }
    if settings.general.membership {
        args.push("membership: true".to_string());
    }
    if let Some(c) = cursor {
        args.push(format!("after: {}", string_literal(c)));
    }
    args.join(", ")
}

pub fn build_query(settings: &Settings, cursor: Option<&str>, page_size: u32) -> String {
    let fields = field_tree(settings).render(6);
    format!(
        "query {{\n  projects({}) {{\n    pageInfo {{\n      endCursor\n      hasNextPage\n    }}\n    nodes {{\n{}    }}\n  }}\n}}\n",
        projects_arguments(settings, cursor, page_size),
        fields
    )
}
