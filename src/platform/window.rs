//! Window geometry and positioning
//!
//! This module handles:
//! - Wrapping an OS window handle (or the absence of one)
//! - Reading and writing the window's absolute rectangle
//! - Expressing that rectangle relative to its containing monitor
//! - Forwarding the plain state queries and actions to the control surface
//!
//! A `Window` never owns the OS window; it only names it. Dropping a
//! `Window` has no effect on the desktop.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::core::{GeometryError, Rect, UNIT};
use crate::platform::monitors::{Monitor, MonitorError, MonitorRegistry};
use crate::platform::surface::{ControlSurface, SurfaceError, WindowHandle};

/// Whether the window should redraw after being moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepaintPolicy {
    #[default]
    Always,
    Never,
}

impl RepaintPolicy {
    fn as_bool(self) -> bool {
        matches!(self, RepaintPolicy::Always)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindowError {
    #[error("Window has no handle bound")]
    NoHandle,
    #[error("Window handle {0} does not refer to an existing window")]
    InvalidHandle(WindowHandle),
    #[error("Window handles cannot be negative (got {0})")]
    NegativeHandle(isize),
    #[error("Cannot move window {handle} to ({x}, {y}) {width}x{height}: coordinates must be finite")]
    NonFiniteRect {
        handle: WindowHandle,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    #[error("Cannot size window {handle} to {width}x{height}: dimensions must be non-negative")]
    NegativeDimensions {
        handle: WindowHandle,
        width: f64,
        height: f64,
    },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Reference to one OS window by handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Window {
    handle: Option<WindowHandle>,
}

impl Window {
    /// Wraps a handle, rejecting negative values
    pub fn new(handle: WindowHandle) -> Result<Self, WindowError> {
        Self::from_raw(handle.raw())
    }

    /// Wraps a handle reported by the surface itself
    pub(crate) fn from_surface(handle: WindowHandle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// A window with no handle; every geometry call on it fails fast
    pub fn unbound() -> Self {
        Self { handle: None }
    }

    /// Wraps a raw handle, rejecting negative values
    pub fn from_raw(raw: isize) -> Result<Self, WindowError> {
        let mut window = Self::unbound();
        window.set_handle(Some(raw))?;
        Ok(window)
    }

    /// Wraps whatever the surface reports as focused
    ///
    /// No error if nothing has focus: the OS sentinel is wrapped as-is and
    /// later calls fail through the validity checks.
    pub fn foreground(surface: &dyn ControlSurface) -> Self {
        let handle = surface.foreground_window();
        debug!(event = "winframe.window.foreground_queried", handle = handle.raw());
        Self::from_surface(handle)
    }

    pub fn handle(&self) -> Option<WindowHandle> {
        self.handle
    }

    /// Rebinds this value to another handle, or to none
    pub fn set_handle(&mut self, raw: Option<isize>) -> Result<(), WindowError> {
        match raw {
            Some(raw) if raw < 0 => Err(WindowError::NegativeHandle(raw)),
            Some(raw) => {
                self.handle = Some(WindowHandle::from_raw(raw));
                Ok(())
            }
            None => {
                self.handle = None;
                Ok(())
            }
        }
    }

    fn bound(&self) -> Result<WindowHandle, WindowError> {
        self.handle.ok_or(WindowError::NoHandle)
    }

    /// Bound handle that the surface still recognises
    fn live(&self, surface: &dyn ControlSurface) -> Result<WindowHandle, WindowError> {
        let handle = self.bound()?;
        if surface.is_window(handle) {
            Ok(handle)
        } else {
            Err(WindowError::InvalidHandle(handle))
        }
    }

    // Geometry ---------------------------------------------------------------

    /// Absolute rectangle of the window in pixels
    pub fn position(&self, surface: &dyn ControlSurface) -> Result<Rect, WindowError> {
        let handle = self.live(surface)?;
        let (left, top, right, bottom) = surface.window_rect(handle)?;
        let rect = Rect::from_ltrb(left, top, right, bottom);
        debug!(
            event = "winframe.window.position_read",
            handle = handle.raw(),
            x = rect.x,
            y = rect.y,
            w = rect.w,
            h = rect.h
        );
        Ok(rect)
    }

    /// Moves and resizes the window to an absolute rectangle
    ///
    /// Edges are rounded to whole pixels before the move. NaN or infinite
    /// components and negative sizes are rejected without calling the
    /// surface.
    pub fn set_position(
        &self,
        surface: &dyn ControlSurface,
        rect: &Rect,
        repaint: RepaintPolicy,
    ) -> Result<(), WindowError> {
        let handle = self.bound()?;
        if !rect.is_finite() {
            return Err(WindowError::NonFiniteRect {
                handle,
                x: rect.x,
                y: rect.y,
                width: rect.w,
                height: rect.h,
            });
        }
        if rect.w < 0.0 || rect.h < 0.0 {
            return Err(WindowError::NegativeDimensions {
                handle,
                width: rect.w,
                height: rect.h,
            });
        }
        let handle = self.live(surface)?;

        let (left, top, width, height) = rect.to_pixels();
        surface.move_window(handle, left, top, width, height, repaint.as_bool())?;

        info!(
            event = "winframe.window.moved",
            handle = handle.raw(),
            left,
            top,
            width,
            height,
            repaint = repaint.as_bool()
        );
        Ok(())
    }

    /// Monitor that owns this window: the one containing its center
    ///
    /// Falls back to the first registered monitor when none contains it.
    pub fn containing_monitor(
        &self,
        surface: &dyn ControlSurface,
        monitors: &MonitorRegistry,
    ) -> Result<Monitor, WindowError> {
        let center = self.position(surface)?.center();
        Ok(*monitors.containing(center)?)
    }

    /// Position as a fraction of the containing monitor, in the unit frame
    pub fn normalized_position(
        &self,
        surface: &dyn ControlSurface,
        monitors: &MonitorRegistry,
    ) -> Result<Rect, WindowError> {
        let position = self.position(surface)?;
        let monitor = monitors.containing(position.center())?;
        Ok(position.renormalize(&monitor.rect, &UNIT)?)
    }

    /// Places the window at a unit-frame rectangle on `monitor`, always
    /// repainting
    ///
    /// Without an explicit monitor the one currently containing the window
    /// is used, i.e. the monitor is chosen before the move.
    pub fn set_normalized_position(
        &self,
        surface: &dyn ControlSurface,
        monitors: &MonitorRegistry,
        unit_rect: &Rect,
        monitor: Option<&Monitor>,
    ) -> Result<(), WindowError> {
        self.set_normalized_position_with(
            surface,
            monitors,
            unit_rect,
            monitor,
            RepaintPolicy::Always,
        )
    }

    /// [`Window::set_normalized_position`] with an explicit repaint policy
    pub fn set_normalized_position_with(
        &self,
        surface: &dyn ControlSurface,
        monitors: &MonitorRegistry,
        unit_rect: &Rect,
        monitor: Option<&Monitor>,
        repaint: RepaintPolicy,
    ) -> Result<(), WindowError> {
        let monitor = match monitor {
            Some(monitor) => *monitor,
            None => self.containing_monitor(surface, monitors)?,
        };

        let target = unit_rect.renormalize(&UNIT, &monitor.rect)?;
        debug!(
            event = "winframe.window.normalized_target",
            monitor_index = monitor.index,
            x = target.x,
            y = target.y,
            w = target.w,
            h = target.h
        );
        self.set_position(surface, &target, repaint)
    }

    // Pass-through queries and actions ----------------------------------------

    /// False for an unbound window as well as a stale handle
    pub fn is_valid(&self, surface: &dyn ControlSurface) -> bool {
        self.handle.is_some_and(|h| surface.is_window(h))
    }

    pub fn is_enabled(&self, surface: &dyn ControlSurface) -> Result<bool, WindowError> {
        Ok(surface.is_window_enabled(self.bound()?))
    }

    pub fn is_visible(&self, surface: &dyn ControlSurface) -> Result<bool, WindowError> {
        Ok(surface.is_window_visible(self.bound()?))
    }

    pub fn is_minimized(&self, surface: &dyn ControlSurface) -> Result<bool, WindowError> {
        Ok(surface.is_iconic(self.bound()?))
    }

    pub fn bring_to_foreground(&self, surface: &dyn ControlSurface) -> Result<(), WindowError> {
        let handle = self.bound()?;
        surface.set_foreground_window(handle)?;
        info!(event = "winframe.window.focused", handle = handle.raw());
        Ok(())
    }

    pub fn bring_to_top(&self, surface: &dyn ControlSurface) -> Result<(), WindowError> {
        Ok(surface.bring_window_to_top(self.bound()?)?)
    }

    pub fn destroy(&self, surface: &dyn ControlSurface) -> Result<(), WindowError> {
        let handle = self.bound()?;
        surface.destroy_window(handle)?;
        info!(event = "winframe.window.destroyed", handle = handle.raw());
        Ok(())
    }

    pub fn title_text(&self, surface: &dyn ControlSurface) -> Result<String, WindowError> {
        Ok(surface.window_text(self.bound()?)?)
    }

    pub fn class_name(&self, surface: &dyn ControlSurface) -> Result<String, WindowError> {
        Ok(surface.class_name(self.bound()?)?)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.handle {
            Some(handle) => write!(f, "Window({handle})"),
            None => write!(f, "Window(none)"),
        }
    }
}
