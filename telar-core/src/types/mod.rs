//! Core domain types for telar.

pub mod image;
pub mod link;
pub mod platform;
pub mod slice;
pub mod vm;

// Re-exports
pub use image::Image;
pub use link::Link;
pub use platform::Platform;
pub use slice::{LogEntry, Slice, SliceStatus};
pub use vm::VmSpec;
