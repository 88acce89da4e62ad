//! Platform-specific implementations
//!
//! This module encapsulates all window-system interactions behind the
//! `ControlSurface` trait and provides the window and monitor types built
//! on top of it.

pub mod fake;
pub mod monitors;
pub mod surface;
#[cfg(windows)]
pub mod win32;
pub mod window;
