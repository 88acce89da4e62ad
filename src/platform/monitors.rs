//! Monitor registry and containing-monitor selection
//!
//! This module is responsible for:
//! - Snapshotting the attached displays in OS enumeration order
//! - Deciding which monitor "owns" a point in the absolute frame
//!
//! The registry is a read-only snapshot. Refreshing it after a display
//! topology change is the caller's job: take a new snapshot.

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::core::{Point, Rect};
use crate::platform::surface::{ControlSurface, MonitorHandle, SurfaceError};

/// A physical display in the absolute frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monitor {
    /// OS handle to the display
    pub handle: MonitorHandle,
    /// Zero-based registration order
    pub index: usize,
    /// Absolute bounds in pixels
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    #[error("No monitors are registered")]
    EmptyRegistry,
    #[error("Failed to enumerate monitors: {0}")]
    EnumerationFailed(#[from] SurfaceError),
}

/// Ordered snapshot of all attached monitors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorRegistry {
    monitors: Vec<Monitor>,
}

impl MonitorRegistry {
    /// Builds a registry from `(handle, bounds)` pairs, keeping their order
    pub fn new(displays: impl IntoIterator<Item = (MonitorHandle, Rect)>) -> Self {
        let monitors = displays
            .into_iter()
            .enumerate()
            .map(|(index, (handle, rect))| Monitor {
                handle,
                index,
                rect,
            })
            .collect();
        Self { monitors }
    }

    /// Queries the surface for the current display topology
    pub fn snapshot(surface: &dyn ControlSurface) -> Result<Self, MonitorError> {
        let displays = surface.displays()?;
        let registry = Self::new(displays.into_iter().map(|d| (d.handle, d.rect)));

        if registry.is_empty() {
            warn!(event = "winframe.monitors.snapshot_empty");
        } else {
            debug!(
                event = "winframe.monitors.snapshot_completed",
                count = registry.len()
            );
        }

        Ok(registry)
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// First registered monitor
    pub fn primary(&self) -> Result<&Monitor, MonitorError> {
        self.monitors.first().ok_or(MonitorError::EmptyRegistry)
    }

    /// Monitor whose bounds contain `point`, scanning in registration order
    ///
    /// When no monitor contains the point (off-screen window, gap between
    /// displays, stale snapshot) the first registered monitor is returned
    /// instead of an error. Callers positioning windows rely on always
    /// getting a monitor back.
    pub fn containing(&self, point: Point) -> Result<&Monitor, MonitorError> {
        if let Some(monitor) = self.monitors.iter().find(|m| m.rect.contains(point)) {
            return Ok(monitor);
        }

        let fallback = self.primary()?;
        warn!(
            event = "winframe.monitors.no_containing_monitor",
            x = point.x,
            y = point.y,
            fallback_index = fallback.index
        );
        Ok(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakeSurface;

    fn dual_registry() -> MonitorRegistry {
        MonitorRegistry::new([
            (MonitorHandle::from_raw(1), Rect::new(0.0, 0.0, 1920.0, 1080.0)),
            (MonitorHandle::from_raw(2), Rect::new(1920.0, 0.0, 1920.0, 1080.0)),
        ])
    }

    #[test]
    fn indices_follow_registration_order() {
        let registry = dual_registry();
        for (i, monitor) in registry.monitors().iter().enumerate() {
            assert_eq!(monitor.index, i);
        }
        assert_eq!(registry.primary().unwrap().handle, MonitorHandle::from_raw(1));
    }

    #[test]
    fn containing_picks_the_monitor_under_the_point() {
        let registry = dual_registry();
        assert_eq!(registry.containing(Point::new(100.0, 100.0)).unwrap().index, 0);
        assert_eq!(registry.containing(Point::new(2000.0, 100.0)).unwrap().index, 1);
    }

    #[test]
    fn shared_edge_belongs_to_the_right_hand_monitor() {
        let registry = dual_registry();
        assert_eq!(registry.containing(Point::new(1920.0, 500.0)).unwrap().index, 1);
    }

    #[test]
    fn off_screen_point_falls_back_to_first_monitor() {
        let registry = dual_registry();
        assert_eq!(registry.containing(Point::new(5000.0, 100.0)).unwrap().index, 0);
        assert_eq!(registry.containing(Point::new(-10.0, -10.0)).unwrap().index, 0);
    }

    #[test]
    fn overlapping_monitors_resolve_to_first_match() {
        let registry = MonitorRegistry::new([
            (MonitorHandle::from_raw(1), Rect::new(0.0, 0.0, 1920.0, 1080.0)),
            (MonitorHandle::from_raw(2), Rect::new(0.0, 0.0, 1280.0, 720.0)),
        ]);
        assert_eq!(registry.containing(Point::new(10.0, 10.0)).unwrap().index, 0);
    }

    #[test]
    fn empty_registry_is_an_error() {
        let registry = MonitorRegistry::default();
        assert_eq!(registry.primary(), Err(MonitorError::EmptyRegistry));
        assert_eq!(
            registry.containing(Point::new(0.0, 0.0)),
            Err(MonitorError::EmptyRegistry)
        );
    }

    #[test]
    fn snapshot_reads_displays_from_surface() {
        let surface = FakeSurface::new()
            .with_display(10, Rect::new(-1280.0, 0.0, 1280.0, 1024.0))
            .with_display(11, Rect::new(0.0, 0.0, 2560.0, 1440.0));

        let registry = MonitorRegistry::snapshot(&surface).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.monitors()[0].rect.x, -1280.0);
        assert_eq!(registry.monitors()[1].handle, MonitorHandle::from_raw(11));
    }
}
