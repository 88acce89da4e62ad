//! Window lookup cache
//!
//! Remembers windows by handle and by title so repeated lookups skip the
//! surface. Entries are dropped as soon as their handle stops being a
//! valid window; nothing else expires them.

use std::collections::HashMap;

use tracing::debug;

use crate::platform::surface::{ControlSurface, WindowHandle};
use crate::platform::window::{Window, WindowError};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedWindow {
    window: Window,
    title: String,
}

/// Handle- and title-keyed cache owned by the caller
#[derive(Debug, Default)]
pub struct WindowCache {
    by_handle: HashMap<WindowHandle, CachedWindow>,
    by_title: HashMap<String, WindowHandle>,
}

impl WindowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }

    /// Records `window` under its handle and current title
    ///
    /// A later window with the same title replaces the earlier one in the
    /// title index.
    pub fn insert(
        &mut self,
        surface: &dyn ControlSurface,
        window: Window,
    ) -> Result<(), WindowError> {
        let handle = window.handle().ok_or(WindowError::NoHandle)?;
        if !surface.is_window(handle) {
            return Err(WindowError::InvalidHandle(handle));
        }
        let title = window.title_text(surface)?;

        if let Some(previous) = self.by_handle.remove(&handle) {
            self.unindex_title(&previous.title, handle);
        }
        self.by_title.insert(title.clone(), handle);
        self.by_handle.insert(handle, CachedWindow { window, title });
        Ok(())
    }

    /// Cached window for `handle`, evicting it if it has gone stale
    pub fn get_by_handle(
        &mut self,
        surface: &dyn ControlSurface,
        handle: WindowHandle,
    ) -> Option<Window> {
        let window = self.by_handle.get(&handle)?.window;
        if window.is_valid(surface) {
            Some(window)
        } else {
            self.evict(handle);
            None
        }
    }

    /// Cached window recorded under `title`, evicting it if stale
    pub fn get_by_title(&mut self, surface: &dyn ControlSurface, title: &str) -> Option<Window> {
        let handle = *self.by_title.get(title)?;
        self.get_by_handle(surface, handle)
    }

    /// Drops every entry whose handle is no longer valid; returns how many
    pub fn prune(&mut self, surface: &dyn ControlSurface) -> usize {
        let stale: Vec<WindowHandle> = self
            .by_handle
            .iter()
            .filter(|(_, cached)| !cached.window.is_valid(surface))
            .map(|(handle, _)| *handle)
            .collect();

        for handle in &stale {
            self.evict(*handle);
        }

        if !stale.is_empty() {
            debug!(event = "winframe.cache.pruned", removed = stale.len());
        }
        stale.len()
    }

    fn evict(&mut self, handle: WindowHandle) {
        if let Some(cached) = self.by_handle.remove(&handle) {
            self.unindex_title(&cached.title, handle);
        }
    }

    fn unindex_title(&mut self, title: &str, handle: WindowHandle) {
        if self.by_title.get(title) == Some(&handle) {
            self.by_title.remove(title);
        }
    }
}
