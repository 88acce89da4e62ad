//! In-memory control surface
//!
//! Holds a small desktop model (windows, displays, focus) and records every
//! move request so positioning logic can be checked without a real OS.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::domain::core::Rect;
use crate::platform::surface::{
    ControlSurface, DisplayInfo, MonitorHandle, SurfaceError, WindowHandle,
};

/// State of one simulated window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeWindow {
    /// `(left, top, right, bottom)` in absolute pixels
    pub ltrb: (i32, i32, i32, i32),
    pub title: String,
    pub class_name: String,
    pub enabled: bool,
    pub visible: bool,
    pub minimized: bool,
}

impl FakeWindow {
    /// A visible, enabled window at `(left, top, width, height)`
    pub fn at(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            ltrb: (left, top, left + width, top + height),
            title: String::new(),
            class_name: String::from("FakeWindowClass"),
            enabled: true,
            visible: true,
            minimized: false,
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
}

/// One recorded `move_window` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub handle: WindowHandle,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub repaint: bool,
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    windows: RefCell<BTreeMap<WindowHandle, FakeWindow>>,
    displays: Vec<DisplayInfo>,
    foreground: Cell<isize>,
    moves: RefCell<Vec<MoveRequest>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a display after the ones already registered
    pub fn with_display(mut self, raw: isize, rect: Rect) -> Self {
        self.displays.push(DisplayInfo {
            handle: MonitorHandle::from_raw(raw),
            rect,
        });
        self
    }

    pub fn with_window(self, raw: isize, window: FakeWindow) -> Self {
        self.insert_window(raw, window);
        self
    }

    pub fn insert_window(&self, raw: isize, window: FakeWindow) {
        self.windows
            .borrow_mut()
            .insert(WindowHandle::from_raw(raw), window);
    }

    /// Simulates the OS window going away without our involvement
    pub fn remove_window(&self, raw: isize) -> Option<FakeWindow> {
        self.windows
            .borrow_mut()
            .remove(&WindowHandle::from_raw(raw))
    }

    pub fn window(&self, raw: isize) -> Option<FakeWindow> {
        self.windows
            .borrow()
            .get(&WindowHandle::from_raw(raw))
            .cloned()
    }

    pub fn set_foreground_raw(&self, raw: isize) {
        self.foreground.set(raw);
    }

    pub fn moves(&self) -> Vec<MoveRequest> {
        self.moves.borrow().clone()
    }

    fn with_existing<T>(
        &self,
        call: &'static str,
        handle: WindowHandle,
        f: impl FnOnce(&mut FakeWindow) -> T,
    ) -> Result<T, SurfaceError> {
        let mut windows = self.windows.borrow_mut();
        match windows.get_mut(&handle) {
            Some(window) => Ok(f(window)),
            None => Err(SurfaceError::CallFailed {
                call,
                handle,
                message: String::from("no such window"),
            }),
        }
    }

    fn check<F>(&self, handle: WindowHandle, predicate: F) -> bool
    where
        F: Fn(&FakeWindow) -> bool,
    {
        self.windows.borrow().get(&handle).is_some_and(predicate)
    }
}

impl ControlSurface for FakeSurface {
    fn window_rect(&self, handle: WindowHandle) -> Result<(i32, i32, i32, i32), SurfaceError> {
        self.with_existing("GetWindowRect", handle, |w| w.ltrb)
    }

    fn move_window(
        &self,
        handle: WindowHandle,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
        repaint: bool,
    ) -> Result<(), SurfaceError> {
        self.with_existing("MoveWindow", handle, |w| {
            w.ltrb = (left, top, left + width, top + height);
        })?;
        self.moves.borrow_mut().push(MoveRequest {
            handle,
            left,
            top,
            width,
            height,
            repaint,
        });
        Ok(())
    }

    fn foreground_window(&self) -> WindowHandle {
        WindowHandle::from_raw(self.foreground.get())
    }

    fn set_foreground_window(&self, handle: WindowHandle) -> Result<(), SurfaceError> {
        self.with_existing("SetForegroundWindow", handle, |w| w.minimized = false)?;
        self.foreground.set(handle.raw());
        Ok(())
    }

    fn bring_window_to_top(&self, handle: WindowHandle) -> Result<(), SurfaceError> {
        self.with_existing("BringWindowToTop", handle, |_| ())
    }

    fn destroy_window(&self, handle: WindowHandle) -> Result<(), SurfaceError> {
        self.remove_window(handle.raw())
            .map(|_| ())
            .ok_or(SurfaceError::CallFailed {
                call: "DestroyWindow",
                handle,
                message: String::from("no such window"),
            })?;
        if self.foreground.get() == handle.raw() {
            self.foreground.set(0);
        }
        Ok(())
    }

    fn window_text(&self, handle: WindowHandle) -> Result<String, SurfaceError> {
        self.with_existing("GetWindowText", handle, |w| w.title.clone())
    }

    fn class_name(&self, handle: WindowHandle) -> Result<String, SurfaceError> {
        self.with_existing("GetClassName", handle, |w| w.class_name.clone())
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        self.check(handle, |_| true)
    }

    fn is_window_enabled(&self, handle: WindowHandle) -> bool {
        self.check(handle, |w| w.enabled)
    }

    fn is_window_visible(&self, handle: WindowHandle) -> bool {
        self.check(handle, |w| w.visible)
    }

    fn is_iconic(&self, handle: WindowHandle) -> bool {
        self.check(handle, |w| w.minimized)
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, SurfaceError> {
        Ok(self.displays.clone())
    }
}
