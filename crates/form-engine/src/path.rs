//! Addresses of live node instances
//!
//! A [`Path`] identifies one node instance in an expanded form tree. Record
//! fields contribute a key segment; collection members contribute an index
//! segment after their collection's key. The same schema field instantiated
//! under different collection items therefore gets distinct paths.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `voice.range.low`
//! - Array indexing: `chords[0].name`
//! - Combined: `chords[2].weights[5]`
//! - The root record is the empty path `""`
//!
//! # Examples
//!
//! ```
//! use form_engine::path::{Path, PathSegment};
//!
//! let path = Path::parse("chords[2].name").unwrap();
//! assert_eq!(path.segments(), &[
//!     PathSegment::Key("chords".to_string()),
//!     PathSegment::Index(2),
//!     PathSegment::Key("name".to_string()),
//! ]);
//! assert_eq!(path.to_string(), "chords[2].name");
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A segment of a path - either a record key or a collection index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A field of a record (e.g., "name" in `chords[0].name`)
    Key(String),
    /// A member of a collection (e.g., 0 in `chords[0]`)
    Index(usize),
}

/// Address of one node instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The root record's path
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a path string into segments.
    ///
    /// Every dot-separated part must start with a field name, optionally
    /// followed by bracketed indices. Anything else is rejected, so a
    /// mistyped path never addresses an ancestor of the intended node.
    ///
    /// ```
    /// use form_engine::path::{Path, PathSegment};
    ///
    /// let path = Path::parse("weights[3]").unwrap();
    /// assert_eq!(path.segments(), &[
    ///     PathSegment::Key("weights".to_string()),
    ///     PathSegment::Index(3),
    /// ]);
    /// assert!(Path::parse("").unwrap().is_root());
    /// assert!(Path::parse("weights[-1]").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self> {
        let mut segments = Vec::new();
        if path.is_empty() {
            return Ok(Self { segments });
        }

        for part in path.split('.') {
            let (key, mut rest) = part.split_at(part.find('[').unwrap_or(part.len()));
            if key.is_empty() || key.contains(']') {
                return Err(Error::invalid_path(path, "expected a field name"));
            }
            segments.push(PathSegment::Key(key.to_string()));

            while !rest.is_empty() {
                let Some(close) = rest.find(']') else {
                    return Err(Error::invalid_path(path, "unclosed '['"));
                };
                let index_str = &rest[1..close];
                let index = index_str.parse::<usize>().map_err(|_| {
                    Error::invalid_path(path, format!("'{index_str}' is not an index"))
                })?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(Error::invalid_path(path, "unexpected text after ']'"));
                }
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path of the record field `key` below this node
    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Path of collection member `index` below this node
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Path of the enclosing node; `None` for the root
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Whether `prefix` addresses this node or one of its ancestors
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
