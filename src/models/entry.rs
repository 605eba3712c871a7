use std::fmt;

use serde::{Deserialize, Serialize};

use super::VirtualPath;

// =============================================================================
// Entries
// =============================================================================

/// Whether an entry is a regular file or a directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One member of a directory listing.
///
/// Entries are immutable snapshots; a reload replaces them wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Name, unique within the parent directory
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes (None for directories or unknown)
    pub size: Option<u64>,
    /// Last modification time as Unix timestamp (seconds)
    pub modified_at: Option<i64>,
}

impl Entry {
    pub fn file(name: impl Into<String>, size: u64, modified_at: Option<i64>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            size: Some(size),
            modified_at,
        }
    }

    pub fn directory(name: impl Into<String>, modified_at: Option<i64>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            size: None,
            modified_at,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Structural key of this entry inside `parent`.
    pub fn key(&self, parent: &VirtualPath) -> EntryKey {
        EntryKey::new(parent.clone(), self.name.clone())
    }
}

/// Stable identity of an entry: its parent directory plus its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub parent: VirtualPath,
    pub name: String,
}

impl EntryKey {
    pub fn new(parent: VirtualPath, name: impl Into<String>) -> Self {
        Self {
            parent,
            name: name.into(),
        }
    }

    /// Full path of the keyed entry.
    pub fn path(&self) -> VirtualPath {
        self.parent.join(&self.name)
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

// =============================================================================
// Remote Payloads
// =============================================================================

/// A directory listing as returned by the remote service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryListing {
    pub current_path: VirtualPath,
    pub parent_path: VirtualPath,
    pub entries: Vec<Entry>,
}

/// Disk usage in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiskUsage {
    pub used: u64,
    pub total: u64,
}

/// Volume statistics shown in the sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SystemInfo {
    pub disk_usage: DiskUsage,
    pub file_count: u64,
    pub directory_count: u64,
}

impl SystemInfo {
    /// Used space as a percentage of total, `0.0` for an empty volume.
    pub fn usage_percent(&self) -> f64 {
        if self.disk_usage.total == 0 {
            return 0.0;
        }
        self.disk_usage.used as f64 / self.disk_usage.total as f64 * 100.0
    }
}

/// Outcome of a generic command dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandReply {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_constructors() {
        let file = Entry::file("a.txt", 12, Some(100));
        assert!(!file.is_dir());
        assert_eq!(file.size, Some(12));

        let dir = Entry::directory("docs", None);
        assert!(dir.is_dir());
        assert_eq!(dir.size, None);
    }

    #[test]
    fn test_entry_key_path() {
        let root_key = Entry::file("a.txt", 1, None).key(&VirtualPath::root());
        assert_eq!(root_key.path(), "/a.txt");

        let nested = EntryKey::new(VirtualPath::new("/docs"), "b.md");
        assert_eq!(nested.path(), "/docs/b.md");
        assert_eq!(nested.to_string(), "/docs/b.md");
    }

    #[test]
    fn test_usage_percent() {
        let info = SystemInfo {
            disk_usage: DiskUsage {
                used: 25,
                total: 100,
            },
            ..Default::default()
        };
        assert!((info.usage_percent() - 25.0).abs() < f64::EPSILON);
        assert_eq!(SystemInfo::default().usage_percent(), 0.0);
    }

    #[test]
    fn test_system_info_wire_shape() {
        let json = r#"{
            "disk_usage": {"total": 200, "free": 50, "available": 40, "used": 150},
            "file_count": 7,
            "directory_count": 3,
            "current_path": "/",
            "vfs_root": "/srv/vfs"
        }"#;
        let info: SystemInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.disk_usage.used, 150);
        assert_eq!(info.file_count, 7);
        assert_eq!(info.directory_count, 3);
    }
}
