//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the explorer.

use crate::models::{SortDirection, SortKey};

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the command prompt.
pub const APP_NAME: &str = "FileXplore";

/// Root of the remote virtual filesystem.
pub const ROOT_PATH: &str = "/";

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Remote API endpoints, relative to the server origin.
pub mod endpoints {
    /// Directory listing (`GET ?path=`).
    pub const FILESYSTEM: &str = "/api/filesystem";
    /// Disk usage and entry counts (`GET`).
    pub const SYSTEM: &str = "/api/system";
    /// File content prefix; the URL-encoded path is appended (`GET`/`POST`).
    pub const FILE: &str = "/api/file/";
    /// Generic command dispatch (`POST { command, args }`).
    pub const COMMAND: &str = "/api/command";
}

// =============================================================================
// Console Configuration
// =============================================================================

/// Maximum number of commands kept for up/down recall.
pub const MAX_COMMAND_HISTORY: usize = 100;

/// Command verbs whose success changes what the listing should show.
pub mod verbs {
    pub const CD: &str = "cd";
    pub const LS: &str = "ls";
    pub const PWD: &str = "pwd";
    pub const CREATE: &str = "create";
    pub const MKDIR: &str = "mkdir";
    pub const DELETE: &str = "delete";
}

/// Transcript text used when the command endpoint itself is unreachable.
pub const COMMAND_FAILED_TEXT: &str = "Command execution failed";

// =============================================================================
// Listing Configuration
// =============================================================================

/// Sort field used when a session starts.
pub const DEFAULT_SORT_KEY: SortKey = SortKey::Name;

/// Sort direction used when a session starts.
pub const DEFAULT_SORT_DIRECTION: SortDirection = SortDirection::Ascending;
