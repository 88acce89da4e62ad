//! Configuration module for winframe
//!
//! Settings that shape how positioning calls reach the control surface.
//! Defaults are usable as-is; `from_env` lets the demo binary override them.

pub mod positioning;

pub use positioning::{ConfigError, PositioningConfig};
