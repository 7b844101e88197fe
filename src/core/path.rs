//! Document paths.
//!
//! A [`DocPath`] records where a node lives while walking a document. The first
//! segment is always the domain (or template name), so `spells.3.range` addresses
//! `document[3]["range"]` inside the `spells` document.

use std::fmt;

use serde_json::Value;

/// One step into a document: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// Positional segments are array indices or purely numeric object keys.
    pub fn is_positional(&self) -> bool {
        match self {
            Segment::Index(_) => true,
            Segment::Key(key) => !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DocPath {
    segments: Vec<Segment>,
}

impl DocPath {
    /// Path rooted at a domain or template name.
    pub fn root(name: &str) -> Self {
        Self {
            segments: vec![Segment::Key(name.to_string())],
        }
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The first `len` segments as a new path.
    pub fn prefix(&self, len: usize) -> DocPath {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Second-to-last segment, e.g. `components` for `spells.3.components.0`.
    pub fn parent_segment(&self) -> Option<&Segment> {
        self.segments
            .len()
            .checked_sub(2)
            .and_then(|i| self.segments.get(i))
    }

    /// Follow this path (minus its root segment) inside `document`.
    pub fn lookup<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        lookup(document, self.segments.get(1..).unwrap_or_default())
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Follow `segments` from `value`, tolerating numeric keys on objects and
/// numeric strings on arrays.
pub fn lookup<'a>(value: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(value, |current, segment| match (current, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get(key),
            (Value::Object(map), Segment::Index(index)) => map.get(&index.to_string()),
            (Value::Array(items), Segment::Index(index)) => items.get(*index),
            (Value::Array(items), Segment::Key(key)) => {
                key.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            _ => None,
        })
}
