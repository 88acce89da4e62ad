//! Window control surface
//!
//! The primitive, handle-keyed operations the rest of the crate is built
//! on. `Win32Surface` forwards them to the OS; `FakeSurface` keeps them in
//! memory so geometry logic can be exercised on any host.

use std::fmt;

use thiserror::Error;

use crate::domain::core::Rect;

/// Opaque OS identifier for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> isize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque OS identifier for a display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorHandle(isize);

impl MonitorHandle {
    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> isize {
        self.0
    }
}

/// One attached display as reported by the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayInfo {
    pub handle: MonitorHandle,
    /// Absolute bounds in pixels
    pub rect: Rect,
}

/// Errors reported by a native call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("{call} failed for window {handle}: {message}")]
    CallFailed {
        call: &'static str,
        handle: WindowHandle,
        message: String,
    },
    #[error("Display enumeration failed: {0}")]
    EnumerationFailed(String),
}

/// Native window primitives keyed by handle
///
/// Every method is a direct, blocking call. Implementations do not
/// validate handles beyond what the OS itself does; the predicates exist
/// so callers can check first.
pub trait ControlSurface {
    /// Absolute window bounds as `(left, top, right, bottom)`
    fn window_rect(&self, handle: WindowHandle) -> Result<(i32, i32, i32, i32), SurfaceError>;

    fn move_window(
        &self,
        handle: WindowHandle,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
        repaint: bool,
    ) -> Result<(), SurfaceError>;

    /// Currently focused window, or whatever sentinel the OS uses for none
    fn foreground_window(&self) -> WindowHandle;

    fn set_foreground_window(&self, handle: WindowHandle) -> Result<(), SurfaceError>;

    fn bring_window_to_top(&self, handle: WindowHandle) -> Result<(), SurfaceError>;

    fn destroy_window(&self, handle: WindowHandle) -> Result<(), SurfaceError>;

    fn window_text(&self, handle: WindowHandle) -> Result<String, SurfaceError>;

    fn class_name(&self, handle: WindowHandle) -> Result<String, SurfaceError>;

    fn is_window(&self, handle: WindowHandle) -> bool;

    fn is_window_enabled(&self, handle: WindowHandle) -> bool;

    fn is_window_visible(&self, handle: WindowHandle) -> bool;

    fn is_iconic(&self, handle: WindowHandle) -> bool;

    /// All attached displays in OS enumeration order
    fn displays(&self) -> Result<Vec<DisplayInfo>, SurfaceError>;
}
