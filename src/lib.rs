//! Monitor-relative window geometry
//!
//! Locates an OS window and expresses its rectangle as a fraction of the
//! monitor that contains it, and back. Native calls go through the
//! [`platform::surface::ControlSurface`] trait so the geometry logic is
//! independent of the windowing backend.

pub mod app;
pub mod config;
pub mod domain;
pub mod logging;
pub mod platform;

pub use config::PositioningConfig;
pub use domain::core::{GeometryError, Point, Rect, UNIT};
pub use platform::monitors::{Monitor, MonitorError, MonitorRegistry};
pub use platform::surface::{ControlSurface, MonitorHandle, SurfaceError, WindowHandle};
pub use platform::window::{RepaintPolicy, Window, WindowError};
