//! Core state logic for the explorer.
//!
//! This module provides:
//! - [`ExplorerSession`] - Orchestrates every state transition
//! - [`NavigationHistory`], [`SelectionModel`], [`ListingView`], [`CommandConsole`] -
//!   The pure state components the session composes
//! - [`ExplorerApi`] and [`HttpExplorerApi`] - The remote service seam and its HTTP client
//! - [`Clock`] - Injectable time source for status and console timestamps

pub mod api;
mod console;
pub mod error;
mod history;
mod listing;
pub mod remote;
mod selection;
mod session;

pub use api::{Clock, ExplorerApi, FixedClock, SystemClock};
pub use console::CommandConsole;
pub use error::{ExplorerError, FetchError};
pub use history::NavigationHistory;
pub use listing::ListingView;
pub use remote::HttpExplorerApi;
pub use selection::SelectionModel;
pub use session::{ExplorerSession, Transition};
