//! Normalized paths into the remote virtual filesystem.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ROOT_PATH;

/// A normalized absolute path on the remote side.
///
/// Always has exactly one leading slash and no trailing slash (except for
/// root, which is `/`). `.` segments are dropped and `..` segments pop the
/// previous one, never climbing above root. Two paths are equal iff their
/// normalized strings are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VirtualPath(String);

/// One clickable element of a path bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    pub path: VirtualPath,
}

impl VirtualPath {
    /// The filesystem root (`/`).
    pub fn root() -> Self {
        Self(ROOT_PATH.to_string())
    }

    /// Normalize an arbitrary path string, treating it as absolute.
    pub fn new(input: &str) -> Self {
        let mut parts: Vec<&str> = Vec::new();
        for segment in input.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                other => parts.push(other),
            }
        }
        Self::from_segments(&parts)
    }

    fn from_segments(parts: &[&str]) -> Self {
        if parts.is_empty() {
            Self::root()
        } else {
            Self(format!("/{}", parts.join("/")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_PATH
    }

    /// Iterate the non-empty segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Drop the last segment. Root is its own parent.
    pub fn parent(&self) -> Self {
        let parts: Vec<&str> = self.segments().collect();
        match parts.split_last() {
            Some((_, init)) => Self::from_segments(init),
            None => Self::root(),
        }
    }

    /// Last segment, or `None` at root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Append a child name (which may itself contain slashes or `..`).
    pub fn join(&self, name: &str) -> Self {
        Self::new(&format!("{}/{}", self.0, name))
    }

    /// Resolve user input against this path.
    ///
    /// Input starting with `/` is absolute; anything else is relative to
    /// `self`. Empty input resolves to `self`.
    pub fn resolve(&self, input: &str) -> Self {
        let input = input.trim();
        if input.starts_with('/') {
            Self::new(input)
        } else if input.is_empty() {
            self.clone()
        } else {
            self.join(input)
        }
    }

    /// Root crumb followed by one crumb per segment.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            label: ROOT_PATH.to_string(),
            path: Self::root(),
        }];
        let mut current = Self::root();
        for segment in self.segments() {
            current = current.join(segment);
            crumbs.push(Breadcrumb {
                label: segment.to_string(),
                path: current.clone(),
            });
        }
        crumbs
    }
}

impl Default for VirtualPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for VirtualPath {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for VirtualPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<VirtualPath> for String {
    fn from(path: VirtualPath) -> Self {
        path.0
    }
}

impl PartialEq<str> for VirtualPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for VirtualPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
