/*
 * Live desktop queries backed by Win32: window rect, placement, monitor work
 * area, sizing frame metrics and DWM composition state. Failed calls are
 * reported as `None` (or `false`) and logged at trace level only; the
 * resolver turns them into "no adjustment".
 */
use crate::frame_geometry::DesktopQueries;
use crate::types::{Rect, ShowCommand, Size, WindowHandle};
use crate::window_common::{hwnd_from_handle, rect_from_native};

use windows::Win32::{
    Foundation::RECT,
    Graphics::{
        Dwm::DwmIsCompositionEnabled,
        Gdi::{GetMonitorInfoW, MONITOR_DEFAULTTONULL, MONITORINFO, MonitorFromWindow},
    },
    UI::WindowsAndMessaging::{
        GetSystemMetrics, GetWindowPlacement, GetWindowRect, SM_CXFRAME, SM_CYFRAME,
        WINDOWPLACEMENT,
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Desktop;

impl DesktopQueries for Win32Desktop {
    fn window_rect(&self, window: WindowHandle) -> Option<Rect> {
        let hwnd = hwnd_from_handle(window);
        let mut rect = RECT::default();
        match unsafe { GetWindowRect(hwnd, &mut rect) } {
            Ok(()) => Some(rect_from_native(&rect)),
            Err(err) => {
                log::trace!("Platform: GetWindowRect failed for {hwnd:?}: {err:?}");
                None
            }
        }
    }

    fn show_command(&self, window: WindowHandle) -> Option<ShowCommand> {
        let hwnd = hwnd_from_handle(window);
        let mut placement = WINDOWPLACEMENT {
            length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
            ..Default::default()
        };
        match unsafe { GetWindowPlacement(hwnd, &mut placement) } {
            Ok(()) => Some(ShowCommand::from_native(placement.showCmd)),
            Err(err) => {
                log::trace!("Platform: GetWindowPlacement failed for {hwnd:?}: {err:?}");
                None
            }
        }
    }

    fn monitor_work_area(&self, window: WindowHandle) -> Option<Rect> {
        let hwnd = hwnd_from_handle(window);
        let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONULL) };
        if monitor.is_invalid() {
            log::trace!("Platform: no monitor for {hwnd:?}");
            return None;
        }

        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
            log::trace!("Platform: GetMonitorInfoW failed for {monitor:?}");
            return None;
        }
        Some(rect_from_native(&info.rcWork))
    }

    fn frame_border(&self) -> Size {
        unsafe { Size::new(GetSystemMetrics(SM_CXFRAME), GetSystemMetrics(SM_CYFRAME)) }
    }

    fn composition_enabled(&self) -> bool {
        match unsafe { DwmIsCompositionEnabled() } {
            Ok(enabled) => enabled.as_bool(),
            Err(err) => {
                log::trace!("Platform: DwmIsCompositionEnabled failed: {err:?}");
                false
            }
        }
    }
}
