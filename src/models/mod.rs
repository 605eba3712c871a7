//! Data models and types for the explorer.
//!
//! Contains domain types for:
//! - [`VirtualPath`], [`Breadcrumb`] - Normalized remote paths
//! - [`Entry`], [`EntryKey`], [`DirectoryListing`], [`SystemInfo`] - Remote filesystem data
//! - [`ConsoleLine`], [`ConsoleKind`] - Command console transcript
//! - [`SortOptions`], [`ClickModifiers`], [`StatusMessage`] - View and interaction state

mod console;
mod entry;
mod explorer;
mod path;

pub use console::{ConsoleKind, ConsoleLine};
pub use entry::{
    CommandReply, DirectoryListing, DiskUsage, Entry, EntryKey, EntryKind, SystemInfo,
};
pub use explorer::{
    BatchOutcome, ClickModifiers, OpenFile, SortDirection, SortKey, SortOptions, StatusLevel,
    StatusMessage,
};
pub use path::{Breadcrumb, VirtualPath};
