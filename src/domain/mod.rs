//! Domain logic and core data structures
//!
//! This module contains pure geometry that is independent
//! of Win32 APIs and platform-specific implementations.

pub mod core;
