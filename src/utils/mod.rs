//! Utility modules for networking, formatting, and data structures.
//!
//! Provides:
//! - [`RingBuffer`] - Fixed-capacity buffer that evicts its oldest element
//! - [`fetch`] - Browser Fetch API wrappers with timeout
//! - [`format`] - Size, date and status text formatting

pub mod fetch;
pub mod format;
mod ring_buffer;

pub use ring_buffer::RingBuffer;
