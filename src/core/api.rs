//! Seams the session depends on: the remote file service and a clock.
//!
//! Both are injected so the session can run against an in-memory service
//! and a fixed clock in tests.

use std::cell::Cell;

use crate::core::error::FetchError;
use crate::models::{CommandReply, DirectoryListing, SystemInfo, VirtualPath};

/// Request/response contract of the remote file service.
///
/// Futures are awaited on a single-threaded executor, so they need not be
/// `Send`.
#[allow(async_fn_in_trait)]
pub trait ExplorerApi {
    /// Entries of the directory at `path`.
    async fn listing(&self, path: &VirtualPath) -> Result<DirectoryListing, FetchError>;

    /// Disk usage and entry counts.
    async fn system_info(&self) -> Result<SystemInfo, FetchError>;

    /// Text content of the file at `path`.
    async fn file_content(&self, path: &VirtualPath) -> Result<String, FetchError>;

    /// Overwrite (or create) the file at `path`.
    async fn save_file(&self, path: &VirtualPath, content: &str) -> Result<(), FetchError>;

    /// Generic verb dispatch (`delete`, `create`, `mkdir`, `cd`, ...).
    ///
    /// A reply with `success: false` is a normal outcome, not an `Err`.
    async fn command(&self, verb: &str, args: &[String]) -> Result<CommandReply, FetchError>;

    /// URL the browser can fetch directly to download the file at `path`.
    fn download_url(&self, path: &VirtualPath) -> String;
}

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Browser clock under WASM, system clock elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or_default()
    }
}

/// Manually advanced clock.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: Cell<f64>,
}

impl FixedClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(1000.0);
        assert_eq!(clock.now_ms(), 1000.0);
        clock.advance(250.0);
        assert_eq!(clock.now_ms(), 1250.0);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.now_ms() > 0.0);
    }
}
