//! Explorer-related data types for the file browser state.

use crate::config::{DEFAULT_SORT_DIRECTION, DEFAULT_SORT_KEY};

use super::VirtualPath;

/// Field the listing is ordered by (within each entry kind).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive name (default)
    #[default]
    Name,
    /// Size in bytes, absent sizes count as 0
    Size,
    /// Modification time
    ModifiedAt,
}

impl SortKey {
    /// Parse the identifiers used by the sort dropdown.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "size" => Some(Self::Size),
            "modified" | "modifiedAt" => Some(Self::ModifiedAt),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active ordering of the listing view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortOptions {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_SORT_KEY,
            direction: DEFAULT_SORT_DIRECTION,
        }
    }
}

/// Modifier keys held during a click on a file row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    /// Ctrl (or Cmd): toggle the clicked entry
    pub toggle: bool,
    /// Shift: extend from the anchor to the clicked entry
    pub range: bool,
}

impl ClickModifiers {
    pub fn toggle() -> Self {
        Self {
            toggle: true,
            range: false,
        }
    }

    pub fn range() -> Self {
        Self {
            toggle: false,
            range: true,
        }
    }
}

/// File currently open in the preview editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenFile {
    pub path: VirtualPath,
    pub content: String,
}

/// Severity of a status line message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// Most recent user-visible status message.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    /// Clock time (milliseconds) the message was raised
    pub at: f64,
}

/// Aggregate result of a multi-entry delete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Paths removed before the batch stopped
    pub deleted: Vec<VirtualPath>,
    /// First failing path and the reason, if the batch was cut short
    pub failed: Option<(VirtualPath, String)>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_from_name() {
        assert_eq!(SortKey::from_name("name"), Some(SortKey::Name));
        assert_eq!(SortKey::from_name("size"), Some(SortKey::Size));
        assert_eq!(SortKey::from_name("modified"), Some(SortKey::ModifiedAt));
        assert_eq!(SortKey::from_name("colour"), None);
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(
            SortDirection::Ascending.toggled(),
            SortDirection::Descending
        );
        assert_eq!(
            SortDirection::Descending.toggled().toggled(),
            SortDirection::Descending
        );
    }

    #[test]
    fn test_batch_outcome_complete() {
        let mut outcome = BatchOutcome::default();
        assert!(outcome.is_complete());
        outcome.failed = Some((VirtualPath::new("/x"), "denied".into()));
        assert!(!outcome.is_complete());
    }
}
