/*
 * Native panels used as caption and content regions. A panel is a plain
 * STATIC child window acting as a container for the application's own
 * controls. It installs a forwarding window procedure so notifications from
 * those controls bubble up to the shell window as if they were its direct
 * children.
 *
 * STATIC windows without `SS_NOTIFY` answer `WM_NCHITTEST` with
 * `HTTRANSPARENT`, so a panel never hides the shell's own hit testing: the
 * OS falls through to the top-level window, which classifies borders and
 * the caption band.
 *
 * Windows adopted from the application answer `WM_NCHITTEST` themselves, so
 * they get a comctl32 subclass that asks the root window first and steps
 * aside over its resize borders and caption.
 */

use crate::error::{PlatformError, Result as PlatformResult};
use crate::region::Region;
use crate::types::{HitRegion, Point, Rect, WindowHandle};
use crate::window_common::{WC_STATIC, handle_from_hwnd, hwnd_from_handle, rect_from_native};

use windows::Win32::{
    Foundation::{
        ERROR_INVALID_WINDOW_HANDLE, GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT,
        WPARAM,
    },
    Graphics::Gdi::ScreenToClient,
    UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
    UI::WindowsAndMessaging::{
        CWP_SKIPINVISIBLE, CallWindowProcW, ChildWindowFromPointEx, CreateWindowExW,
        DefWindowProcW, DestroyWindow, GA_ROOT, GWLP_USERDATA, GWLP_WNDPROC, GetAncestor,
        GetClientRect, GetParent,
        GetWindowLongPtrW, MoveWindow, SW_HIDE, SW_SHOW, SendMessageW, SetParent,
        SetWindowLongPtrW, ShowWindow, WINDOW_EX_STYLE, WINDOW_STYLE, WM_COMMAND,
        WM_COMPAREITEM, WM_CTLCOLORBTN, WM_CTLCOLORDLG, WM_CTLCOLOREDIT, WM_CTLCOLORLISTBOX,
        WM_CTLCOLORSCROLLBAR, WM_CTLCOLORSTATIC, WM_DELETEITEM, WM_DRAWITEM, WM_HSCROLL,
        WM_MEASUREITEM, WM_NCHITTEST, WM_NOTIFY, WM_VSCROLL, WNDPROC, WS_CHILD, WS_CLIPCHILDREN,
        WS_CLIPSIBLINGS,
    },
};

/// Strongly-typed window style for panels to enforce required flags (correctness-by-construction).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PanelWindowStyle(WINDOW_STYLE);

impl PanelWindowStyle {
    /// Base style: a hidden child that clips its children and siblings.
    /// The owning region slot shows it once installed.
    fn base() -> Self {
        Self(WS_CHILD | WS_CLIPCHILDREN | WS_CLIPSIBLINGS)
    }

    const fn as_raw(self) -> WINDOW_STYLE {
        self.0
    }
}

fn is_parent_notification(msg: u32) -> bool {
    matches!(
        msg,
        WM_COMMAND
            | WM_NOTIFY
            | WM_DRAWITEM
            | WM_MEASUREITEM
            | WM_DELETEITEM
            | WM_COMPAREITEM
            | WM_CTLCOLORBTN
            | WM_CTLCOLOREDIT
            | WM_CTLCOLORSTATIC
            | WM_CTLCOLORLISTBOX
            | WM_CTLCOLORSCROLLBAR
            | WM_CTLCOLORDLG
            | WM_HSCROLL
            | WM_VSCROLL
    )
}

unsafe extern "system" fn forwarding_panel_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        if is_parent_notification(msg)
            && let Ok(parent) = GetParent(hwnd)
            && !parent.is_invalid()
        {
            return SendMessageW(parent, msg, Some(wparam), Some(lparam));
        }

        let prev = GetWindowLongPtrW(hwnd, GWLP_USERDATA);
        if prev != 0 {
            let prev_proc: WNDPROC = std::mem::transmute(prev);
            return CallWindowProcW(prev_proc, hwnd, msg, wparam, lparam);
        }
        DefWindowProcW(hwnd, msg, wparam, lparam)
    }
}

const ADOPTED_SUBCLASS_ID: usize = 0x4348;

// HTTRANSPARENT
const PASS_TO_PARENT: LRESULT = LRESULT(-1);

/// Whether an adopted window yields a hit to the shell, given the root's own classification.
fn defers_to_root(root_hit: Option<HitRegion>) -> bool {
    matches!(root_hit, Some(hit) if hit.is_resize_border() || hit == HitRegion::Caption)
}

unsafe extern "system" fn adopted_region_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _subclass_id: usize,
    _ref_data: usize,
) -> LRESULT {
    unsafe {
        if msg == WM_NCHITTEST {
            let root = GetAncestor(hwnd, GA_ROOT);
            if !root.is_invalid() && root != hwnd {
                let root_hit = SendMessageW(root, WM_NCHITTEST, Some(wparam), Some(lparam));
                if defers_to_root(HitRegion::from_native(root_hit.0 as u32)) {
                    return PASS_TO_PARENT;
                }
            }
        }
        DefSubclassProc(hwnd, msg, wparam, lparam)
    }
}

/*
 * Region backed by a native child window. The panel owns its HWND: dropping
 * the region destroys the window together with every control inside it.
 */
#[derive(Debug)]
pub struct PanelRegion {
    hwnd: HWND,
    adopted: bool,
}

impl PanelRegion {
    /*
     * Creates a hidden STATIC panel under `parent` and installs the
     * forwarding procedure.
     */
    pub(crate) fn create(parent: HWND, h_instance: HINSTANCE) -> PlatformResult<Self> {
        if parent.is_invalid() {
            return Err(PlatformError::InvalidHandle(
                "Parent HWND for panel region is invalid".to_string(),
            ));
        }

        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                WC_STATIC,
                None,
                PanelWindowStyle::base().as_raw(),
                0,
                0,
                0,
                0,
                Some(parent),
                None,
                Some(h_instance),
                None,
            )?
        };

        unsafe {
            #[allow(clippy::fn_to_numeric_cast)]
            let prev = SetWindowLongPtrW(hwnd, GWLP_WNDPROC, forwarding_panel_proc as isize);
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, prev);
        }

        log::debug!("PanelHandler: created panel {hwnd:?} under {parent:?}");
        Ok(Self {
            hwnd,
            adopted: false,
        })
    }

    /*
     * Takes ownership of a child window created by the application. It is
     * reparented to the shell when installed and destroyed when replaced.
     */
    pub fn adopt(handle: WindowHandle) -> PlatformResult<Self> {
        let hwnd = hwnd_from_handle(handle);
        if hwnd.is_invalid() {
            return Err(PlatformError::InvalidHandle(format!(
                "cannot adopt invalid window handle {handle:?}"
            )));
        }
        let subclassed =
            unsafe { SetWindowSubclass(hwnd, Some(adopted_region_proc), ADOPTED_SUBCLASS_ID, 0) };
        if !subclassed.as_bool() {
            return Err(PlatformError::OperationFailed(format!(
                "SetWindowSubclass failed for adopted window {hwnd:?}"
            )));
        }
        log::debug!("PanelHandler: adopted window {hwnd:?}");
        Ok(Self {
            hwnd,
            adopted: true,
        })
    }

    pub fn handle(&self) -> WindowHandle {
        handle_from_hwnd(self.hwnd)
    }
}

impl Region for PanelRegion {
    fn attach(&mut self, host: WindowHandle) {
        let host_hwnd = hwnd_from_handle(host);
        let current = unsafe { GetParent(self.hwnd) };
        if matches!(current, Ok(parent) if parent == host_hwnd) {
            return;
        }
        if let Err(err) = unsafe { SetParent(self.hwnd, Some(host_hwnd)) } {
            log::warn!(
                "PanelHandler: SetParent({:?}, {host_hwnd:?}) failed: {err:?}",
                self.hwnd
            );
        }
    }

    fn set_geometry(&mut self, rect: Rect) {
        unsafe {
            _ = MoveWindow(
                self.hwnd,
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                true,
            );
        }
    }

    fn show(&mut self) {
        unsafe { _ = ShowWindow(self.hwnd, SW_SHOW) };
    }

    fn hide(&mut self) {
        unsafe { _ = ShowWindow(self.hwnd, SW_HIDE) };
    }

    fn map_from_screen(&self, screen: Point) -> Option<Point> {
        let mut point = POINT {
            x: screen.x,
            y: screen.y,
        };
        unsafe { ScreenToClient(self.hwnd, &mut point) }
            .as_bool()
            .then_some(Point::new(point.x, point.y))
    }

    fn bounds(&self) -> Rect {
        let mut client = RECT::default();
        match unsafe { GetClientRect(self.hwnd, &mut client) } {
            Ok(()) => rect_from_native(&client),
            Err(_) => Rect::default(),
        }
    }

    fn has_child_at(&self, local: Point) -> bool {
        let point = POINT {
            x: local.x,
            y: local.y,
        };
        let child = unsafe { ChildWindowFromPointEx(self.hwnd, point, CWP_SKIPINVISIBLE) };
        // The panel itself comes back when no child is under the point.
        !child.is_invalid() && child != self.hwnd
    }

    fn native_handle(&self) -> Option<WindowHandle> {
        Some(self.handle())
    }
}

impl Drop for PanelRegion {
    fn drop(&mut self) {
        unsafe {
            if self.adopted {
                _ = RemoveWindowSubclass(self.hwnd, Some(adopted_region_proc), ADOPTED_SUBCLASS_ID);
            }
            if DestroyWindow(self.hwnd).is_err() {
                let last_error = GetLastError();
                // Already gone when the shell window tore its children down first.
                if last_error.0 != ERROR_INVALID_WINDOW_HANDLE.0 {
                    log::error!("PanelHandler: DestroyWindow({:?}) failed: {last_error:?}", self.hwnd);
                }
            } else {
                log::debug!("PanelHandler: destroyed panel {:?}", self.hwnd);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::WS_VISIBLE;

    #[test]
    fn panel_style_is_hidden_clipping_child() {
        let style = PanelWindowStyle::base().as_raw();
        assert_ne!(style.0 & WS_CLIPCHILDREN.0, 0);
        assert_ne!(style.0 & WS_CHILD.0, 0);
        assert_eq!(style.0 & WS_VISIBLE.0, 0);
    }

    #[test]
    fn control_notifications_are_forwarded() {
        assert!(is_parent_notification(WM_COMMAND));
        assert!(is_parent_notification(WM_NOTIFY));
        assert!(is_parent_notification(WM_DRAWITEM));
        assert!(is_parent_notification(WM_CTLCOLORBTN));
        assert!(is_parent_notification(WM_CTLCOLORSTATIC));
        assert!(is_parent_notification(WM_HSCROLL));
    }

    #[test]
    fn hit_testing_is_not_forwarded() {
        assert!(!is_parent_notification(WM_NCHITTEST));
    }

    #[test]
    fn adopted_window_yields_borders_and_caption_to_root() {
        // Arrange
        let yielding = [
            HitRegion::Left,
            HitRegion::Right,
            HitRegion::Bottom,
            HitRegion::BottomLeft,
            HitRegion::BottomRight,
            HitRegion::TopLeft,
            HitRegion::Caption,
        ];
        let keeping = [HitRegion::Client, HitRegion::Nowhere];

        // Act & Assert
        for hit in yielding {
            assert!(defers_to_root(Some(hit)), "{hit:?} should pass through");
        }
        for hit in keeping {
            assert!(!defers_to_root(Some(hit)), "{hit:?} should stay with the child");
        }
        assert!(!defers_to_root(None));
    }

    #[test]
    fn root_left_border_code_passes_adopted_hit_through() {
        let root_hit = HitRegion::from_native(HitRegion::Left.to_native());
        assert!(defers_to_root(root_hit));
        assert_eq!(PASS_TO_PARENT.0, -1);
    }

    #[test]
    fn adopt_rejects_null_handle() {
        assert!(PanelRegion::adopt(WindowHandle(0)).is_err());
    }
}
