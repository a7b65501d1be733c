/*
 * Win32 chrome customizer: reads and writes `GWL_STYLE`, extends the DWM
 * frame for the drop shadow, and requests non-client recalculation.
 *
 * The frame refresh is posted rather than performed inline. The shell calls
 * `refresh_frame` while its state is mutably borrowed by the window
 * procedure's caller, and a synchronous `SetWindowPos(SWP_FRAMECHANGED)`
 * would deliver `WM_NCCALCSIZE` back into that same state.
 */
use crate::chrome::ChromeCustomizer;
use crate::frame_style::FrameMargins;
use crate::window_common::WM_APP_REFRESH_FRAME;

use windows::Win32::{
    Foundation::{HWND, LPARAM, WPARAM},
    Graphics::Dwm::DwmExtendFrameIntoClientArea,
    UI::{
        Controls::MARGINS,
        WindowsAndMessaging::{
            GWL_STYLE, GetWindowLongPtrW, PostMessageW, SWP_FRAMECHANGED, SWP_NOACTIVATE,
            SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetWindowLongPtrW, SetWindowPos,
        },
    },
};

#[derive(Debug, Clone, Copy)]
pub struct Win32Chrome {
    hwnd: HWND,
}

impl Win32Chrome {
    pub(crate) fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

impl ChromeCustomizer for Win32Chrome {
    fn is_supported(&self) -> bool {
        !self.hwnd.is_invalid()
    }

    fn window_style(&self) -> Option<u32> {
        let style = unsafe { GetWindowLongPtrW(self.hwnd, GWL_STYLE) };
        // Zero is also the failure value; a live top-level window always has style bits.
        (style != 0).then_some(style as u32)
    }

    fn set_window_style(&mut self, style: u32) {
        unsafe { SetWindowLongPtrW(self.hwnd, GWL_STYLE, style as isize) };
    }

    fn extend_frame(&mut self, margins: FrameMargins) {
        let native = MARGINS {
            cxLeftWidth: margins.left,
            cxRightWidth: margins.right,
            cyTopHeight: margins.top,
            cyBottomHeight: margins.bottom,
        };
        if let Err(err) = unsafe { DwmExtendFrameIntoClientArea(self.hwnd, &native) } {
            log::debug!(
                "Platform: DwmExtendFrameIntoClientArea failed for {:?}: {err:?}",
                self.hwnd
            );
        }
    }

    fn refresh_frame(&mut self) {
        if let Err(err) =
            unsafe { PostMessageW(Some(self.hwnd), WM_APP_REFRESH_FRAME, WPARAM(0), LPARAM(0)) }
        {
            log::debug!(
                "Platform: could not post frame refresh for {:?}, refreshing inline: {err:?}",
                self.hwnd
            );
            apply_frame_changed(self.hwnd);
        }
    }
}

/// Recomputes the non-client frame without moving, sizing or activating.
pub(crate) fn apply_frame_changed(hwnd: HWND) {
    unsafe {
        _ = SetWindowPos(
            hwnd,
            None,
            0,
            0,
            0,
            0,
            SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::frame_style::{
        StylePreset, WS_CAPTION, WS_MAXIMIZEBOX, WS_MINIMIZEBOX, WS_OVERLAPPEDWINDOW, WS_POPUP,
        WS_SYSMENU, WS_THICKFRAME,
    };
    use windows::Win32::UI::WindowsAndMessaging as wm;

    #[test]
    fn portable_style_bits_match_win32() {
        assert_eq!(WS_POPUP, wm::WS_POPUP.0);
        assert_eq!(WS_CAPTION, wm::WS_CAPTION.0);
        assert_eq!(WS_SYSMENU, wm::WS_SYSMENU.0);
        assert_eq!(WS_THICKFRAME, wm::WS_THICKFRAME.0);
        assert_eq!(WS_MINIMIZEBOX, wm::WS_MINIMIZEBOX.0);
        assert_eq!(WS_MAXIMIZEBOX, wm::WS_MAXIMIZEBOX.0);
        assert_eq!(WS_OVERLAPPEDWINDOW, wm::WS_OVERLAPPEDWINDOW.0);
    }

    #[test]
    fn aero_preset_matches_native_composition() {
        let native = wm::WS_POPUP
            | wm::WS_THICKFRAME
            | wm::WS_CAPTION
            | wm::WS_SYSMENU
            | wm::WS_MAXIMIZEBOX
            | wm::WS_MINIMIZEBOX;
        assert_eq!(StylePreset::AeroBorderless.bits(), native.0);
    }
}
