//! Win32 control surface
//!
//! Thin forwarding layer over user32. Each method is one native call plus
//! the conversion between Win32 types and our handle/geometry types.
//!
//! CRITICAL: Secondary monitors can have negative coordinates in the
//! virtual screen; nothing here clamps or shifts the reported rectangles.

use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::UI::Input::KeyboardAndMouse::IsWindowEnabled;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::config::PositioningConfig;
use crate::domain::core::Rect;
use crate::platform::surface::{
    ControlSurface, DisplayInfo, MonitorHandle, SurfaceError, WindowHandle,
};

/// Control surface backed by the live Windows desktop
#[derive(Debug, Clone)]
pub struct Win32Surface {
    /// Capacity, in UTF-16 units, of the buffers used for text queries
    text_buffer_len: usize,
}

impl Win32Surface {
    pub fn new(config: &PositioningConfig) -> Self {
        Self {
            text_buffer_len: config.text_buffer_len,
        }
    }

    fn read_text(
        &self,
        call: &'static str,
        handle: WindowHandle,
        read: unsafe fn(HWND, &mut [u16]) -> i32,
    ) -> Result<String, SurfaceError> {
        let mut buffer = vec![0u16; self.text_buffer_len];
        let (length, last_error) = unsafe {
            SetLastError(WIN32_ERROR(0));
            let length = read(hwnd(handle), &mut buffer);
            (length, windows::core::Error::from_win32())
        };
        decode_text(call, handle, &buffer, length, last_error)
    }
}

impl Default for Win32Surface {
    fn default() -> Self {
        Self::new(&PositioningConfig::default())
    }
}

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.raw())
}

fn call_failed(call: &'static str, handle: WindowHandle, err: windows::core::Error) -> SurfaceError {
    SurfaceError::CallFailed {
        call,
        handle,
        message: err.to_string(),
    }
}

/// Turns a text query's result into a string
///
/// A zero length is only an empty string when the call left no error
/// behind; otherwise it is a failure such as a stale handle.
fn decode_text(
    call: &'static str,
    handle: WindowHandle,
    buffer: &[u16],
    length: i32,
    last_error: windows::core::Error,
) -> Result<String, SurfaceError> {
    if length > 0 {
        let length = (length as usize).min(buffer.len());
        return Ok(String::from_utf16_lossy(&buffer[..length]));
    }
    if last_error.code().is_ok() {
        Ok(String::new())
    } else {
        Err(call_failed(call, handle, last_error))
    }
}

unsafe fn get_window_text(hwnd: HWND, buffer: &mut [u16]) -> i32 {
    unsafe { GetWindowTextW(hwnd, buffer) }
}

unsafe fn get_class_name(hwnd: HWND, buffer: &mut [u16]) -> i32 {
    unsafe { GetClassNameW(hwnd, buffer) }
}

impl ControlSurface for Win32Surface {
    fn window_rect(&self, handle: WindowHandle) -> Result<(i32, i32, i32, i32), SurfaceError> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd(handle), &mut rect) }
            .map_err(|e| call_failed("GetWindowRect", handle, e))?;
        Ok((rect.left, rect.top, rect.right, rect.bottom))
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
        // SWP_NOZORDER: keep Z-order (insert-after handle ignored)
        // SWP_NOACTIVATE: moving must not steal focus
        let base = SWP_NOZORDER | SWP_NOACTIVATE;
        let flags = if repaint { base } else { base | SWP_NOREDRAW };

        unsafe { SetWindowPos(hwnd(handle), HWND(0), left, top, width, height, flags) }
            .map_err(|e| call_failed("SetWindowPos", handle, e))
    }

    fn foreground_window(&self) -> WindowHandle {
        let hwnd = unsafe { GetForegroundWindow() };
        WindowHandle::from_raw(hwnd.0)
    }

    fn set_foreground_window(&self, handle: WindowHandle) -> Result<(), SurfaceError> {
        if unsafe { SetForegroundWindow(hwnd(handle)) }.as_bool() {
            Ok(())
        } else {
            Err(SurfaceError::CallFailed {
                call: "SetForegroundWindow",
                handle,
                message: String::from("foreground change was refused"),
            })
        }
    }

    fn bring_window_to_top(&self, handle: WindowHandle) -> Result<(), SurfaceError> {
        unsafe { BringWindowToTop(hwnd(handle)) }
            .map_err(|e| call_failed("BringWindowToTop", handle, e))
    }

    fn destroy_window(&self, handle: WindowHandle) -> Result<(), SurfaceError> {
        unsafe { DestroyWindow(hwnd(handle)) }.map_err(|e| call_failed("DestroyWindow", handle, e))
    }

    fn window_text(&self, handle: WindowHandle) -> Result<String, SurfaceError> {
        self.read_text("GetWindowTextW", handle, get_window_text)
    }

    fn class_name(&self, handle: WindowHandle) -> Result<String, SurfaceError> {
        self.read_text("GetClassNameW", handle, get_class_name)
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindow(hwnd(handle)) }.as_bool()
    }

    fn is_window_enabled(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindowEnabled(hwnd(handle)) }.as_bool()
    }

    fn is_window_visible(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindowVisible(hwnd(handle)) }.as_bool()
    }

    fn is_iconic(&self, handle: WindowHandle) -> bool {
        unsafe { IsIconic(hwnd(handle)) }.as_bool()
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, SurfaceError> {
        let mut displays: Vec<DisplayInfo> = Vec::new();

        let ok = unsafe {
            EnumDisplayMonitors(
                None,
                None,
                Some(enum_display_proc),
                LPARAM(&mut displays as *mut _ as isize),
            )
        };
        if ok == FALSE {
            return Err(SurfaceError::EnumerationFailed(String::from(
                "EnumDisplayMonitors returned FALSE",
            )));
        }

        Ok(displays)
    }
}

/// Callback for display enumeration
///
/// Displays whose info cannot be read are skipped rather than aborting
/// the whole enumeration.
unsafe extern "system" fn enum_display_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    unsafe {
        let displays = &mut *(lparam.0 as *mut Vec<DisplayInfo>);

        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if GetMonitorInfoW(hmonitor, &mut info) == FALSE {
            return TRUE;
        }

        let bounds = info.rcMonitor;
        displays.push(DisplayInfo {
            handle: MonitorHandle::from_raw(hmonitor.0),
            rect: Rect::from_ltrb(bounds.left, bounds.top, bounds.right, bounds.bottom),
        });

        TRUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn decode_text_reads_reported_length() {
        let buffer = utf16("Notepad");
        let text = decode_text(
            "GetWindowTextW",
            WindowHandle::from_raw(1),
            &buffer,
            4,
            windows::core::Error::from(windows::core::HRESULT(0)),
        )
        .unwrap();
        assert_eq!(text, "Note");
    }

    #[test]
    fn zero_length_without_error_is_empty_text() {
        let text = decode_text(
            "GetWindowTextW",
            WindowHandle::from_raw(1),
            &[0u16; 8],
            0,
            windows::core::Error::from(windows::core::HRESULT(0)),
        )
        .unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn zero_length_with_error_is_reported() {
        let result = decode_text(
            "GetClassNameW",
            WindowHandle::from_raw(99),
            &[0u16; 8],
            0,
            windows::core::Error::from(ERROR_INVALID_WINDOW_HANDLE.to_hresult()),
        );
        assert!(matches!(
            result,
            Err(SurfaceError::CallFailed { call: "GetClassNameW", .. })
        ));
    }

    #[test]
    fn class_name_of_stale_handle_fails() {
        let surface = Win32Surface::default();
        let result = surface.class_name(WindowHandle::from_raw(0x7fff_fff0));
        assert!(result.is_err());
    }
}
