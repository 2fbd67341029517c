//! SOM expressions
//!
//! Dotted paths such as `xfa.form.root[0].row[1]` that address nodes by
//! name (or `#class`) and sibling rank.
//!
//! Supported syntax:
//! - segments: `name`, `#class`, `*`, each optionally followed by `[n]` or `[*]`
//! - leading shortcuts: `xfa`, `$form`, `$template`, `$data`, `$` (current node)
//! - `..` steps to the parent
//!
//! A relative first segment is looked up among the current node's children,
//! then among the children of each ancestor in turn.

use crate::document::Document;
use crate::element::PacketType;
use crate::hash::name_hash;
use crate::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Index {
    Nth(usize),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step<'a> {
    Parent,
    Select { name: &'a str, index: Index },
}

fn parse_step(token: &str) -> Option<Step<'_>> {
    if token == "^" {
        return Some(Step::Parent);
    }
    let (name, index) = match token.find('[') {
        Some(open) => {
            let inner = token[open + 1..].strip_suffix(']')?.trim();
            let index = if inner == "*" {
                Index::All
            } else {
                Index::Nth(inner.parse().ok()?)
            };
            (&token[..open], index)
        }
        None => (token, Index::Nth(0)),
    };
    if name.is_empty() {
        return None;
    }
    Some(Step::Select { name, index })
}

fn tokenize(expr: &str) -> Option<Vec<Step<'_>>> {
    let mut steps = Vec::new();
    let mut rest = expr.trim();
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("..") {
            steps.push(Step::Parent);
            rest = after;
            continue;
        }
        if let Some(after) = rest.strip_prefix('.') {
            rest = after;
            continue;
        }
        let end = rest.find('.').unwrap_or(rest.len());
        steps.push(parse_step(&rest[..end])?);
        rest = &rest[end..];
    }
    Some(steps)
}

impl Document {
    /// Canonical SOM path of `node`
    pub fn som_expression(&self, node: NodeId) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(entry) = self.node(id) else {
                break;
            };
            if entry.object_type().is_model_node() {
                if entry.packet() != PacketType::Xdp {
                    parts.push(entry.element().name().to_string());
                }
                parts.push("xfa".to_string());
                break;
            }
            let name = self.name(id);
            if name.is_empty() {
                parts.push(format!("#{}[{}]", entry.element().name(), self.same_class_index(id)));
            } else {
                parts.push(format!("{}[{}]", name, self.same_name_index(id)));
            }
            current = self.parent(id);
        }
        parts.reverse();
        parts.join(".")
    }

    /// First node matched by `expr`, resolved relative to `from`
    pub fn resolve_node(&self, from: NodeId, expr: &str) -> Option<NodeId> {
        self.resolve_nodes(from, expr).into_iter().next()
    }

    /// Every node matched by `expr`, in document order per step
    pub fn resolve_nodes(&self, from: NodeId, expr: &str) -> Vec<NodeId> {
        let Some(steps) = tokenize(expr) else {
            return Vec::new();
        };
        let mut steps = steps.into_iter();
        let Some(first) = steps.next() else {
            return Vec::new();
        };

        let mut current: Vec<NodeId> = match first {
            Step::Parent => self.parent(from).into_iter().collect(),
            Step::Select { name, index } => match name {
                "xfa" => self.root().into_iter().collect(),
                "$" => vec![from],
                "$form" => self.packet_root(PacketType::Form).into_iter().collect(),
                "$template" => self.packet_root(PacketType::Template).into_iter().collect(),
                "$data" => self.data_root().into_iter().collect(),
                _ => self.resolve_relative(from, name, index),
            },
        };

        for step in steps {
            current = current
                .into_iter()
                .flat_map(|node| match step {
                    Step::Parent => self.parent(node).into_iter().collect(),
                    Step::Select { name, index } => self.select_children(node, name, index),
                })
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }

    fn resolve_relative(&self, from: NodeId, name: &str, index: Index) -> Vec<NodeId> {
        let mut scope = Some(from);
        while let Some(node) = scope {
            let found = self.select_children(node, name, index);
            if !found.is_empty() {
                return found;
            }
            scope = self.parent(node);
        }
        Vec::new()
    }

    fn select_children(&self, parent: NodeId, name: &str, index: Index) -> Vec<NodeId> {
        let hash = name_hash(name);
        let class = name.strip_prefix('#');
        let matches = |child: NodeId| {
            let Some(node) = self.node(child) else {
                return false;
            };
            match class {
                Some(class) => node.element().name() == class,
                None if name == "*" => true,
                None => {
                    node.name_hash() == hash
                        || (node.name_hash() == 0 && node.element().name() == name)
                }
            }
        };
        let candidates = self.children(parent).iter().copied().filter(|&child| matches(child));
        match index {
            Index::All => candidates.collect(),
            Index::Nth(n) => candidates.skip(n).take(1).collect(),
        }
    }
}
