//! Hierarchical parameter tree.
//!
//! A tree of named nodes, each leaf a pair of plain function pointers
//! over some context type `C`:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  ParamNode::Branch                                       │
//! │  ├── "version"   Leaf { get: fn(&C) -> Value, set: None }│
//! │  └── "leds"      Branch                                  │
//! │       ├── "red"  Leaf { get, set: Some(fn(&mut C, ..)) } │
//! │       └── ...                                            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The tree holds no state of its own and is built once at startup.
//! The context is passed in on every call, so the tree and the state it
//! exposes can live side by side in the same owner.
//!
//! Paths are `/`-separated; empty segments are ignored, so `""` and `"/"`
//! both name the root.

use serde_json::{Map, Value};

use crate::app::outputs::Level;
use crate::error::{Error, Result};

/// Leaf reader.
pub type Getter<C> = fn(&C) -> Value;

/// Leaf writer.  Receives the full leaf path for error reporting.
pub type Setter<C> = fn(&mut C, &str, &Value) -> Result<()>;

pub enum ParamNode<C> {
    Leaf {
        get: Getter<C>,
        /// `None` makes the leaf read-only.
        set: Option<Setter<C>>,
    },
    Branch(Vec<(&'static str, ParamNode<C>)>),
}

impl<C> ParamNode<C> {
    pub fn read_only(get: Getter<C>) -> Self {
        Self::Leaf { get, set: None }
    }

    pub fn read_write(get: Getter<C>, set: Setter<C>) -> Self {
        Self::Leaf {
            get,
            set: Some(set),
        }
    }

    pub fn branch(children: Vec<(&'static str, ParamNode<C>)>) -> Self {
        Self::Branch(children)
    }

    fn child(&self, name: &str) -> Option<&ParamNode<C>> {
        match self {
            Self::Branch(children) => children
                .iter()
                .find(|(child, _)| *child == name)
                .map(|(_, node)| node),
            Self::Leaf { .. } => None,
        }
    }

    fn render(&self, ctx: &C) -> Value {
        match self {
            Self::Leaf { get, .. } => get(ctx),
            Self::Branch(children) => Value::Object(
                children
                    .iter()
                    .map(|(name, node)| ((*name).to_owned(), node.render(ctx)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

pub struct ParameterTree<C> {
    root: ParamNode<C>,
}

impl<C> ParameterTree<C> {
    pub fn new(root: ParamNode<C>) -> Self {
        Self { root }
    }

    /// Read a leaf value, or a whole subtree as a JSON object.
    pub fn get(&self, ctx: &C, path: &str) -> Result<Value> {
        Ok(self.resolve(path)?.render(ctx))
    }

    /// Write `value` at `path`.
    ///
    /// A branch takes an object whose keys name its children, recursively.
    /// A leaf takes the bare value, or `{"<leaf name>": value}`.  Every
    /// target is checked for existence and writability before the first
    /// setter runs.
    pub fn set(&self, ctx: &mut C, path: &str, value: &Value) -> Result<()> {
        let node = self.resolve(path)?;
        let name = segments(path).last().unwrap_or("");
        let mut writes = Vec::new();
        plan(node, &normalise(path), name, value, &mut writes)?;
        for (setter, leaf_path, leaf_value) in writes {
            setter(ctx, &leaf_path, leaf_value)?;
        }
        Ok(())
    }

    fn resolve(&self, path: &str) -> Result<&ParamNode<C>> {
        segments(path).try_fold(&self.root, |node, segment| {
            node.child(segment)
                .ok_or_else(|| Error::NotFound(path.to_owned()))
        })
    }
}

type PlannedWrite<'v, C> = (Setter<C>, String, &'v Value);

fn plan<'v, C>(
    node: &ParamNode<C>,
    path: &str,
    name: &str,
    value: &'v Value,
    writes: &mut Vec<PlannedWrite<'v, C>>,
) -> Result<()> {
    match node {
        ParamNode::Leaf { set, .. } => {
            let setter = set.ok_or_else(|| Error::ReadOnly(path.to_owned()))?;
            let value = match value {
                Value::Object(map) if map.len() == 1 && map.contains_key(name) => &map[name],
                other => other,
            };
            writes.push((setter, path.to_owned(), value));
            Ok(())
        }
        ParamNode::Branch(_) => {
            let Value::Object(map) = value else {
                return Err(Error::invalid(path, "expected an object"));
            };
            for (key, child_value) in map {
                let child_path = join(path, key);
                let child = node
                    .child(key)
                    .ok_or_else(|| Error::NotFound(child_path.clone()))?;
                plan(child, &child_path, key, child_value, writes)?;
            }
            Ok(())
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn normalise(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_owned()
    } else {
        format!("{parent}/{child}")
    }
}

// ── Value decoding for setters ────────────────────────────────

pub fn expect_f64(path: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::invalid(path, "expected a number"))
}

pub fn expect_bool(path: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => n
            .as_f64()
            .map(|v| v != 0.0)
            .ok_or_else(|| Error::invalid(path, "expected a boolean")),
        _ => Err(Error::invalid(path, "expected a boolean")),
    }
}

pub fn expect_str<'v>(path: &str, value: &'v Value) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| Error::invalid(path, "expected a string"))
}

/// `true`/`false` or any number; non-zero is high.
pub fn expect_level(path: &str, value: &Value) -> Result<Level> {
    expect_bool(path, value)
        .map(Level::from)
        .map_err(|_| Error::invalid(path, "expected 0/1 or a boolean"))
}
