//! Application-level helpers
//!
//! Caller-owned state layered on top of the platform types.

pub mod window_cache;

pub use window_cache::WindowCache;
