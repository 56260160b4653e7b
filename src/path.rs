//! Paths into nested values
//!
//! A path string like `"servers.0.host"` is split on a delimiter into
//! [`PathSegment`]s that are resolved one nesting level at a time.
//!
//! Splitting is literal: consecutive or trailing delimiters yield empty-string
//! keys, and only the empty string itself is the root path.
//!
//! ```
//! use deep_dict::path::{Path, PathSegment};
//!
//! let path = Path::parse("servers.0.host", ".");
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.segments()[1], PathSegment::Index(0));
//! ```

use std::borrow::Cow;
use std::fmt;

/// The delimiter used when none is given
pub const DEFAULT_DELIMITER: &str = ".";

/// Represents a segment in a path expression for navigating nested structures
///
/// A segment written in canonical decimal form (`"0"`, `"17"`, but not
/// `"007"`) is an `Index`; anything else is a `Key`. An `Index` still matches a
/// mapping key with the same text, so the distinction only matters when a
/// sequence is reached.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named key for accessing object/map members
    Key(String),
    /// A numeric index for accessing array/sequence elements
    Index(usize),
}

impl PathSegment {
    /// The key this segment addresses in a mapping.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            PathSegment::Key(key) => Cow::Borrowed(key),
            PathSegment::Index(idx) => Cow::Owned(idx.to_string()),
        }
    }

    /// The index this segment addresses in a sequence, if it is one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Key(_) => None,
            PathSegment::Index(idx) => Some(*idx),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(text: &str) -> Self {
        match parse_index(text) {
            Some(idx) => PathSegment::Index(idx),
            None => PathSegment::Key(text.to_string()),
        }
    }
}

impl From<String> for PathSegment {
    fn from(text: String) -> Self {
        match parse_index(&text) {
            Some(idx) => PathSegment::Index(idx),
            None => PathSegment::Key(text),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// Canonical decimal only, so that the segment text survives a round trip.
fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

/// An ordered sequence of segments; the empty path is the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split `path` on `delimiter`.
    ///
    /// The empty string is the root path. An empty delimiter disables
    /// splitting, making the whole string a single key.
    pub fn parse(path: &str, delimiter: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        if delimiter.is_empty() {
            return Self {
                segments: vec![PathSegment::from(path)],
            };
        }
        Self {
            segments: path.split(delimiter).map(PathSegment::from).collect(),
        }
    }

    /// Build a path from explicit segments, without any splitting.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment and the segments leading to it.
    pub fn split_last(&self) -> Option<(&PathSegment, &[PathSegment])> {
        self.segments.split_last()
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Join the segments back into a string.
    pub fn join(&self, delimiter: &str) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push_str(delimiter);
            }
            out.push_str(&segment.as_key());
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(DEFAULT_DELIMITER))
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Path::parse(path, DEFAULT_DELIMITER)
    }
}
