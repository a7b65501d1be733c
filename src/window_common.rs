/*
 * Common Win32 plumbing for borderless shell windows: window class
 * registration, native window creation, the window procedure router, and
 * the translation between raw window messages and the portable
 * `NativeMessage` / `Disposition` pair the shell controller works with.
 *
 * The router keeps the shell state in a `RefCell`. Handlers that mutate the
 * shell (resize, first show, destroy) may trigger nested messages from the
 * OS; a nested message that finds the shell already borrowed is left to
 * `DefWindowProcW`.
 */
use crate::chrome_windows::{Win32Chrome, apply_frame_changed};
use crate::desktop_windows::Win32Desktop;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::frame_style::StylePreset;
use crate::message_router::{Disposition, MessageReply, NativeMessage};
use crate::shell::ShellController;
use crate::types::{Point, Rect, Size, WindowHandle};

use windows::Win32::{
    Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM},
    Graphics::Gdi::{COLOR_WINDOW, HBRUSH},
    UI::WindowsAndMessaging::*,
};
use windows::core::{HSTRING, PCWSTR};

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::rc::Rc;

// Common control class names
pub(crate) const WC_STATIC: PCWSTR = windows::core::w!("STATIC");

// Posted by the chrome customizer; the handler recomputes the non-client frame.
pub(crate) const WM_APP_REFRESH_FRAME: u32 = WM_APP + 0x200;

const SUCCESS_CODE: LRESULT = LRESULT(0);

pub(crate) type Win32Shell = ShellController<Win32Chrome, Win32Desktop>;
pub(crate) type SharedShell = Rc<RefCell<Option<Win32Shell>>>;

#[inline]
pub(crate) fn hwnd_from_handle(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

#[inline]
pub(crate) fn handle_from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

pub(crate) fn rect_from_native(rect: &RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

pub(crate) fn rect_to_native(rect: Rect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

#[inline]
pub(crate) fn loword_from_lparam(lparam: LPARAM) -> i32 {
    (lparam.0 & 0xFFFF) as i32
}
#[inline]
pub(crate) fn hiword_from_lparam(lparam: LPARAM) -> i32 {
    ((lparam.0 >> 16) & 0xFFFF) as i32
}

// Screen coordinates are signed 16-bit values; monitors left of or above the primary are negative.
#[inline]
pub(crate) fn signed_x_from_lparam(lparam: LPARAM) -> i32 {
    i32::from((lparam.0 & 0xFFFF) as u16 as i16)
}
#[inline]
pub(crate) fn signed_y_from_lparam(lparam: LPARAM) -> i32 {
    i32::from(((lparam.0 >> 16) & 0xFFFF) as u16 as i16)
}

/*
 * Decodes the chrome-related non-client messages.
 *
 * # Safety
 * For `WM_NCCALCSIZE` with a non-zero `wparam`, `lparam` must point to a
 * valid `NCCALCSIZE_PARAMS`, as it does for messages delivered by the OS.
 */
pub(crate) unsafe fn decode_native_message(msg: u32, wparam: WPARAM, lparam: LPARAM) -> NativeMessage {
    match msg {
        WM_NCCALCSIZE => {
            if wparam.0 != 0 && lparam.0 != 0 {
                let params = unsafe { &*(lparam.0 as *const NCCALCSIZE_PARAMS) };
                NativeMessage::CalcSize {
                    for_current_state: true,
                    proposed: rect_from_native(&params.rgrc[0]),
                }
            } else {
                NativeMessage::CalcSize {
                    for_current_state: false,
                    proposed: Rect::default(),
                }
            }
        }
        WM_NCHITTEST => NativeMessage::HitTest {
            cursor: Point::new(
                signed_x_from_lparam(lparam),
                signed_y_from_lparam(lparam),
            ),
        },
        WM_NCACTIVATE => NativeMessage::Activate {
            active: wparam.0 != 0,
        },
        other => NativeMessage::Other { id: other },
    }
}

/*
 * Writes a handled reply back into the message parameters and produces the
 * window procedure result.
 *
 * # Safety
 * Same contract as `decode_native_message` for `ClientArea` replies.
 */
pub(crate) unsafe fn encode_reply(reply: MessageReply, lparam: LPARAM) -> LRESULT {
    match reply {
        MessageReply::ClientArea(client) => {
            if lparam.0 != 0 {
                let params = unsafe { &mut *(lparam.0 as *mut NCCALCSIZE_PARAMS) };
                params.rgrc[0] = rect_to_native(client);
            }
            // Zero inset: the whole window is client area.
            SUCCESS_CODE
        }
        MessageReply::Hit(region) => LRESULT(region.to_native() as isize),
        MessageReply::Activated => LRESULT(1),
    }
}

/*
 * Context handed to `CreateWindowExW` and kept in `GWLP_USERDATA` for the
 * lifetime of the native window. The shell slot is empty until creation
 * completes and again after `WM_NCDESTROY`.
 */
pub(crate) struct WindowCreationContext {
    pub(crate) shell: SharedShell,
    pub(crate) live_windows: Rc<Cell<usize>>,
}

/*
 * Registers the shell window class if not already registered.
 */
pub(crate) fn register_window_class(class_name: &HSTRING, h_instance: HINSTANCE) -> PlatformResult<()> {
    let class_name_pcwstr = PCWSTR(class_name.as_ptr());

    unsafe {
        let mut wc_test = WNDCLASSEXW::default();
        if GetClassInfoExW(Some(h_instance), class_name_pcwstr, &mut wc_test).is_ok() {
            log::debug!("Platform: Window class '{class_name}' already registered.");
            return Ok(());
        }

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(facade_wnd_proc_router),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: h_instance,
            hIcon: LoadIconW(None, IDI_APPLICATION)?,
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as *mut c_void),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: class_name_pcwstr,
            hIconSm: LoadIconW(None, IDI_APPLICATION)?,
        };

        if RegisterClassExW(&wc) == 0 {
            let error = GetLastError();
            log::error!("Platform: RegisterClassExW failed: {error:?}");
            Err(PlatformError::InitializationFailed(format!(
                "RegisterClassExW failed: {error:?}"
            )))
        } else {
            log::debug!("Platform: Window class '{class_name}' registered successfully.");
            Ok(())
        }
    }
}

/*
 * Creates the hidden top-level window. It starts with the windowed preset;
 * the borderless preset replaces it on first show, while the frame-size
 * handler already strips the native border from the first layout on.
 */
pub(crate) fn create_native_window(
    class_name: &HSTRING,
    h_instance: HINSTANCE,
    context: WindowCreationContext,
    title: &str,
    size: Size,
) -> PlatformResult<HWND> {
    let creation_context = Box::new(context);
    let style = WINDOW_STYLE(StylePreset::Windowed.bits()) | WS_CLIPCHILDREN;

    unsafe {
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            class_name,
            &HSTRING::from(title),
            style,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            size.width,
            size.height,
            None,
            None,
            Some(h_instance),
            Some(Box::into_raw(creation_context) as *mut c_void), // lParam for WM_NCCREATE
        )?;
        Ok(hwnd)
    }
}

/*
 * Window procedure router. Retrieves the `WindowCreationContext` and hands
 * the message to `handle_window_message`.
 */
unsafe extern "system" fn facade_wnd_proc_router(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let context_ptr = if msg == WM_NCCREATE {
        let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
        let context_raw_ptr = create_struct.lpCreateParams as *mut WindowCreationContext;
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, context_raw_ptr as isize) };
        if let Some(context) = unsafe { context_raw_ptr.as_ref() } {
            context.live_windows.set(context.live_windows.get() + 1);
        }
        context_raw_ptr
    } else {
        unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowCreationContext }
    };

    if context_ptr.is_null() {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }

    let context = unsafe { &*context_ptr };
    let result = unsafe { context.handle_window_message(hwnd, msg, wparam, lparam) };

    if msg == WM_NCDESTROY {
        let _ = unsafe { Box::from_raw(context_ptr) };
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) };
    }
    result
}

impl WindowCreationContext {
    /*
     * # Safety
     * Called from the window procedure with the parameters the OS delivered.
     */
    unsafe fn handle_window_message(
        &self,
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_NCCALCSIZE | WM_NCHITTEST | WM_NCACTIVATE => {
                let message = unsafe { decode_native_message(msg, wparam, lparam) };
                let disposition = match self.shell.try_borrow() {
                    Ok(shell) => shell
                        .as_ref()
                        .map_or(Disposition::Default, |shell| shell.handle_native(&message)),
                    Err(_) => {
                        log::trace!("Platform: shell busy, default handling for message {msg:#06x}");
                        Disposition::Default
                    }
                };
                if let Disposition::Handled(reply) = disposition {
                    return unsafe { encode_reply(reply, lparam) };
                }
            }
            WM_APP_REFRESH_FRAME => {
                apply_frame_changed(hwnd);
                return SUCCESS_CODE;
            }
            WM_SHOWWINDOW => {
                if wparam.0 != 0 {
                    self.with_shell_mut(|shell| shell.on_first_show());
                }
            }
            WM_SIZE => {
                let client_width = loword_from_lparam(lparam);
                let client_height = hiword_from_lparam(lparam);
                log::trace!("Platform: WM_SIZE for HWND {hwnd:?}. Client: {client_width}x{client_height}");
                self.with_shell_mut(|shell| shell.resize(Size::new(client_width, client_height)));
            }
            WM_DESTROY => {
                // Children are still alive here; release them through their owning slots.
                log::debug!("Platform: WM_DESTROY for HWND {hwnd:?}. Releasing regions.");
                self.with_shell_mut(|shell| shell.teardown());
            }
            WM_NCDESTROY => {
                log::debug!("Platform: WM_NCDESTROY for HWND {hwnd:?}. Final cleanup.");
                if let Ok(mut slot) = self.shell.try_borrow_mut() {
                    slot.take();
                }
                let remaining = self.live_windows.get().saturating_sub(1);
                self.live_windows.set(remaining);
                if remaining == 0 {
                    log::debug!("Platform: last shell window destroyed, posting WM_QUIT.");
                    unsafe { PostQuitMessage(0) };
                }
            }
            _ => {}
        }

        unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
    }

    fn with_shell_mut(&self, f: impl FnOnce(&mut Win32Shell)) {
        match self.shell.try_borrow_mut() {
            Ok(mut slot) => {
                if let Some(shell) = slot.as_mut() {
                    f(shell);
                }
            }
            Err(_) => log::trace!("Platform: shell busy, skipping nested notification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HitRegion;

    fn make_lparam(x: i16, y: i16) -> LPARAM {
        LPARAM((((y as u16 as u32) << 16) | (x as u16 as u32)) as isize)
    }

    #[test]
    fn hit_test_decodes_signed_coordinates() {
        let message = unsafe { decode_native_message(WM_NCHITTEST, WPARAM(0), make_lparam(-1200, 35)) };
        assert_eq!(
            message,
            NativeMessage::HitTest {
                cursor: Point::new(-1200, 35)
            }
        );
    }

    #[test]
    fn calc_size_reads_and_writes_first_rect() {
        // Arrange
        let mut params = NCCALCSIZE_PARAMS::default();
        params.rgrc[0] = RECT {
            left: -8,
            top: -8,
            right: 1928,
            bottom: 1088,
        };
        let lparam = LPARAM(&mut params as *mut NCCALCSIZE_PARAMS as isize);

        // Act
        let message = unsafe { decode_native_message(WM_NCCALCSIZE, WPARAM(1), lparam) };
        let result = unsafe {
            encode_reply(MessageReply::ClientArea(Rect::new(0, 0, 1920, 1040)), lparam)
        };

        // Assert
        assert_eq!(
            message,
            NativeMessage::CalcSize {
                for_current_state: true,
                proposed: Rect::new(-8, -8, 1928, 1088)
            }
        );
        assert_eq!(result, SUCCESS_CODE);
        assert_eq!(rect_from_native(&params.rgrc[0]), Rect::new(0, 0, 1920, 1040));
    }

    #[test]
    fn calc_size_without_wparam_is_not_for_current_state() {
        let message = unsafe { decode_native_message(WM_NCCALCSIZE, WPARAM(0), LPARAM(0)) };
        assert!(matches!(
            message,
            NativeMessage::CalcSize {
                for_current_state: false,
                ..
            }
        ));
    }

    #[test]
    fn hit_replies_encode_native_codes() {
        let cases = [
            (HitRegion::Nowhere, HTNOWHERE as isize),
            (HitRegion::Client, HTCLIENT as isize),
            (HitRegion::Caption, HTCAPTION as isize),
            (HitRegion::Left, HTLEFT as isize),
            (HitRegion::Right, HTRIGHT as isize),
            (HitRegion::Top, HTTOP as isize),
            (HitRegion::TopLeft, HTTOPLEFT as isize),
            (HitRegion::TopRight, HTTOPRIGHT as isize),
            (HitRegion::Bottom, HTBOTTOM as isize),
            (HitRegion::BottomLeft, HTBOTTOMLEFT as isize),
            (HitRegion::BottomRight, HTBOTTOMRIGHT as isize),
        ];
        for (region, expected) in cases {
            let result = unsafe { encode_reply(MessageReply::Hit(region), LPARAM(0)) };
            assert_eq!(result, LRESULT(expected), "{region:?}");
        }
    }

    #[test]
    fn activation_reply_is_true() {
        let result = unsafe { encode_reply(MessageReply::Activated, LPARAM(0)) };
        assert_eq!(result, LRESULT(1));
    }

    #[test]
    fn handle_round_trips_through_hwnd() {
        let handle = WindowHandle(0x1234);
        assert_eq!(handle_from_hwnd(hwnd_from_handle(handle)), handle);
    }
}
