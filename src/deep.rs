//! Deep-key access into nested values
//!
//! [`DeepDict`] wraps a borrowed root [`Value`] and addresses nodes inside it
//! with delimited path strings such as `"db.connection.timeout"`. The free
//! functions (`deep_get`, `deep_set`, ...) do the same work on an explicit
//! [`Path`] and are what [`DeepDict`] and the config layers delegate to.
//!
//! ## Resolution rules
//!
//! - A mapping is indexed by the segment's key text.
//! - A sequence is indexed only by an integer segment.
//! - A scalar cannot be descended into.
//! - The empty path is the root itself.
//!
//! Writes create missing intermediate levels as empty mappings, never as
//! sequences. A failed write leaves behind the levels it created before the
//! failing segment.
//!
//! ## Example
//!
//! ```
//! use deep_dict::DeepDict;
//! use serde_json::json;
//!
//! let mut root = json!({});
//! let mut dict = DeepDict::new(&mut root);
//! dict.set("x.y.z", 5).unwrap();
//! assert_eq!(dict.get("x.y.z").unwrap(), &json!(5));
//! assert_eq!(root, json!({"x": {"y": {"z": 5}}}));
//! ```

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::path::{Path, PathSegment, DEFAULT_DELIMITER};
use crate::value::{kind_name, render};

fn not_found(path: &Path, depth: usize) -> Error {
    Error::KeyNotFound {
        path: path.to_string(),
        segment: path.segments()[depth].to_string(),
    }
}

fn mismatch(path: &Path, depth: usize, found: &'static str) -> Error {
    Error::TypeMismatch {
        path: path.to_string(),
        segment: path.segments()[depth].to_string(),
        found,
    }
}

/// Resolve one segment against one node.
fn step<'a>(node: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment.as_key().as_ref()),
        Value::Array(items) => items.get(segment.as_index()?),
        _ => None,
    }
}

fn step_mut<'a>(node: &'a mut Value, segment: &PathSegment) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment.as_key().as_ref()),
        Value::Array(items) => items.get_mut(segment.as_index()?),
        _ => None,
    }
}

/// Walk the first `depth` segments of `path`.
fn walk<'a>(root: &'a Value, path: &Path, depth: usize) -> Result<&'a Value> {
    let mut current = root;
    for (i, segment) in path.segments()[..depth].iter().enumerate() {
        current = step(current, segment).ok_or_else(|| not_found(path, i))?;
    }
    Ok(current)
}

fn walk_mut<'a>(root: &'a mut Value, path: &Path, depth: usize) -> Result<&'a mut Value> {
    let mut current = root;
    for (i, segment) in path.segments()[..depth].iter().enumerate() {
        current = step_mut(current, segment).ok_or_else(|| not_found(path, i))?;
    }
    Ok(current)
}

/// Get the node at `path`.
///
/// # Errors
///
/// Returns `Error::KeyNotFound` naming the first segment that could not be
/// resolved.
pub fn deep_get<'a>(root: &'a Value, path: &Path) -> Result<&'a Value> {
    walk(root, path, path.len())
}

/// Get a mutable reference to the node at `path`.
pub fn deep_get_mut<'a>(root: &'a mut Value, path: &Path) -> Result<&'a mut Value> {
    walk_mut(root, path, path.len())
}

/// True iff [`deep_get`] would succeed.
pub fn deep_contains(root: &Value, path: &Path) -> bool {
    deep_get(root, path).is_ok()
}

/// Descend through `path` except its last segment, creating missing mapping
/// levels along the way.
fn descend_creating<'a>(root: &'a mut Value, path: &Path) -> Result<&'a mut Value> {
    let mut current = root;
    for (i, segment) in path.segments()[..path.len() - 1].iter().enumerate() {
        current = match current {
            Value::Object(map) => map
                .entry(segment.as_key().into_owned())
                .or_insert_with(|| Value::Object(Map::new())),
            Value::Array(items) => match segment.as_index() {
                Some(idx) if idx < items.len() => &mut items[idx],
                Some(idx) if idx == items.len() => {
                    items.push(Value::Object(Map::new()));
                    &mut items[idx]
                }
                Some(_) => return Err(not_found(path, i)),
                None => return Err(mismatch(path, i, "sequence")),
            },
            other => return Err(mismatch(path, i, kind_name(other))),
        };
    }
    Ok(current)
}

/// Store `value` under the last segment of `path` in `parent`.
fn assign(parent: &mut Value, path: &Path, value: Value, replace: bool) -> Result<Option<Value>> {
    let depth = path.len() - 1;
    let segment = &path.segments()[depth];
    match parent {
        Value::Object(map) => {
            let key = segment.as_key();
            if !replace && map.contains_key(key.as_ref()) {
                return Err(Error::AlreadyExists {
                    path: path.to_string(),
                });
            }
            Ok(map.insert(key.into_owned(), value))
        }
        Value::Array(items) => match segment.as_index() {
            Some(idx) if idx < items.len() => {
                if !replace {
                    return Err(Error::AlreadyExists {
                        path: path.to_string(),
                    });
                }
                Ok(Some(std::mem::replace(&mut items[idx], value)))
            }
            Some(idx) if idx == items.len() => {
                items.push(value);
                Ok(None)
            }
            Some(_) => Err(not_found(path, depth)),
            None => Err(mismatch(path, depth, "sequence")),
        },
        other => Err(mismatch(path, depth, kind_name(other))),
    }
}

/// Set the node at `path`, creating missing intermediate mappings.
///
/// Returns the node that was replaced, if any. The empty path replaces the
/// root. An index equal to a sequence's length appends to it.
///
/// # Errors
///
/// - `Error::TypeMismatch` if an existing level on the way is a scalar, or a
///   sequence addressed with a non-integer segment.
/// - `Error::KeyNotFound` if a sequence index is past the end.
///
/// Intermediate mappings created before the failing segment are kept.
pub fn deep_set(root: &mut Value, path: &Path, value: Value) -> Result<Option<Value>> {
    if path.is_empty() {
        return Ok(Some(std::mem::replace(root, value)));
    }
    let parent = descend_creating(root, path)?;
    assign(parent, path, value, true)
}

/// Like [`deep_set`], but fails with `Error::AlreadyExists` if `path` is
/// already occupied.
pub fn deep_insert(root: &mut Value, path: &Path, value: Value) -> Result<()> {
    if path.is_empty() {
        return Err(Error::AlreadyExists {
            path: String::new(),
        });
    }
    let parent = descend_creating(root, path)?;
    assign(parent, path, value, false).map(|_| ())
}

/// Remove the node at `path` from its parent and return it.
///
/// Mapping entries keep the order of their remaining siblings; sequence
/// elements after the removed one shift down, so a sequence path still
/// resolves afterwards while an element remains at that index.
///
/// # Errors
///
/// Returns `Error::KeyNotFound` if the parent or the entry itself is missing,
/// and for the empty path, since the root has no parent.
pub fn deep_delete(root: &mut Value, path: &Path) -> Result<Value> {
    let Some((last, _)) = path.split_last() else {
        return Err(Error::KeyNotFound {
            path: String::new(),
            segment: String::new(),
        });
    };
    let depth = path.len() - 1;
    let parent = walk_mut(root, path, depth)?;
    let removed = match parent {
        Value::Object(map) => map.shift_remove(last.as_key().as_ref()),
        Value::Array(items) => match last.as_index() {
            Some(idx) if idx < items.len() => Some(items.remove(idx)),
            _ => None,
        },
        _ => None,
    };
    removed.ok_or_else(|| not_found(path, depth))
}

/// Iterate over every leaf below `root` as `(joined path, node)` pairs.
pub fn deep_flatten<'a>(root: &'a Value, delimiter: &'a str) -> Flatten<'a> {
    Flatten::new(root, delimiter)
}

struct Frame<'a> {
    path: String,
    node: &'a Value,
    depth: usize,
}

/// Lazy depth-first traversal of the leaves of a value.
///
/// Leaves are scalars and empty containers below the root. Sequence elements
/// are addressed by their index. As long as mapping keys are non-empty and do
/// not contain the delimiter, every yielded path resolves with [`deep_get`] to
/// the yielded node. Keys are joined verbatim otherwise: an empty root-level
/// key yields the empty path, and `"x.y"` yields a path that splits into two
/// segments. A scalar root yields a single pair with the empty path.
pub struct Flatten<'a> {
    stack: Vec<Frame<'a>>,
    delimiter: &'a str,
}

impl<'a> Flatten<'a> {
    fn new(root: &'a Value, delimiter: &'a str) -> Self {
        Self {
            stack: vec![Frame {
                path: String::new(),
                node: root,
                depth: 0,
            }],
            delimiter,
        }
    }

    fn child_path(&self, parent: &Frame<'a>, key: &str) -> String {
        if parent.depth == 0 {
            key.to_string()
        } else {
            format!("{}{}{}", parent.path, self.delimiter, key)
        }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let children: Vec<Frame<'a>> = match frame.node {
                Value::Object(map) if !map.is_empty() => map
                    .iter()
                    .map(|(key, node)| Frame {
                        path: self.child_path(&frame, key),
                        node,
                        depth: frame.depth + 1,
                    })
                    .collect(),
                Value::Array(items) if !items.is_empty() => items
                    .iter()
                    .enumerate()
                    .map(|(idx, node)| Frame {
                        path: self.child_path(&frame, &idx.to_string()),
                        node,
                        depth: frame.depth + 1,
                    })
                    .collect(),
                Value::Object(_) | Value::Array(_) if frame.depth == 0 => continue,
                leaf => return Some((frame.path, leaf)),
            };
            self.stack.extend(children.into_iter().rev());
        }
        None
    }
}

/// Path-string access to a borrowed nested value.
///
/// A `DeepDict` owns nothing but the delimiter: every mutation lands in the
/// wrapped root.
#[derive(Debug)]
pub struct DeepDict<'a> {
    root: &'a mut Value,
    delimiter: String,
}

impl<'a> DeepDict<'a> {
    /// Wrap `root` using the default `.` delimiter.
    pub fn new(root: &'a mut Value) -> Self {
        Self::with_delimiter(root, DEFAULT_DELIMITER)
    }

    /// Wrap `root` splitting paths on `delimiter`.
    pub fn with_delimiter(root: &'a mut Value, delimiter: impl Into<String>) -> Self {
        Self {
            root,
            delimiter: delimiter.into(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn root(&self) -> &Value {
        self.root
    }

    /// Parse `path` with this dict's delimiter.
    pub fn path(&self, path: &str) -> Path {
        Path::parse(path, &self.delimiter)
    }

    /// Get the node at `path`, failing with `Error::KeyNotFound` if absent.
    pub fn get(&self, path: &str) -> Result<&Value> {
        deep_get(self.root, &self.path(path))
    }

    /// Get the node at `path`, or `default` if it cannot be resolved.
    pub fn get_or<'s>(&'s self, path: &str, default: &'s Value) -> &'s Value {
        self.get(path).unwrap_or(default)
    }

    pub fn get_mut(&mut self, path: &str) -> Result<&mut Value> {
        let path = self.path(path);
        deep_get_mut(self.root, &path)
    }

    /// See [`deep_set`].
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        let path = self.path(path);
        deep_set(self.root, &path, value.into())
    }

    /// See [`deep_insert`].
    pub fn insert(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let path = self.path(path);
        deep_insert(self.root, &path, value.into())
    }

    /// See [`deep_delete`].
    pub fn delete(&mut self, path: &str) -> Result<Value> {
        let path = self.path(path);
        deep_delete(self.root, &path)
    }

    pub fn contains(&self, path: &str) -> bool {
        deep_contains(self.root, &self.path(path))
    }

    /// Leaves as `(path, node)` pairs, paths joined with this dict's
    /// delimiter. Each call starts a fresh traversal.
    pub fn flatten(&self) -> Flatten<'_> {
        deep_flatten(self.root, &self.delimiter)
    }
}

/// `path=value` pairs separated by `"; "`.
impl fmt::Display for DeepDict<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, node)) in self.flatten().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}={}", path, render(node))?;
        }
        Ok(())
    }
}
