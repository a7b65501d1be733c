/*
 * Public Win32 entry points: `ShellApp` registers the window class and runs
 * the message loop, `BorderlessWindow` is the application's handle to one
 * borderless shell window and its caption/content regions.
 *
 * Everything here is UI-thread only. The handles are `!Send` because they
 * share the shell state with the window procedure through `Rc<RefCell<_>>`.
 */
use crate::chrome_windows::{Win32Chrome, apply_frame_changed};
use crate::controls::panel_handler::PanelRegion;
use crate::desktop_windows::Win32Desktop;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::region::Region;
use crate::shell::ShellController;
use crate::types::{ShellConfig, Size, WindowHandle};
use crate::window_common::{
    SharedShell, Win32Shell, WindowCreationContext, create_native_window, handle_from_hwnd,
    register_window_class,
};

use windows::{
    Win32::{
        Foundation::{HINSTANCE, HWND, RECT},
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            DestroyWindow, DispatchMessageW, GetClientRect, GetMessageW, MSG, SW_HIDE, SW_SHOW,
            SetWindowTextW, ShowWindow, TranslateMessage,
        },
    },
    core::HSTRING,
};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct ShellApp {
    h_instance: HINSTANCE,
    class_name: HSTRING,
    live_windows: Rc<Cell<usize>>,
}

impl ShellApp {
    pub fn new(app_name: &str) -> PlatformResult<Self> {
        let h_instance: HINSTANCE = unsafe { GetModuleHandleW(None)? }.into();
        let class_name = HSTRING::from(format!("{app_name}_BorderlessShellClass"));
        register_window_class(&class_name, h_instance)?;
        log::debug!("Platform: ShellApp initialized for '{app_name}'");
        Ok(Self {
            h_instance,
            class_name,
            live_windows: Rc::new(Cell::new(0)),
        })
    }

    /*
     * Creates a hidden borderless window. The placeholder caption panel is
     * installed before this returns, so the window is borderless from its
     * first paint; call `show` when the caption and content are in place.
     */
    pub fn create_window(&self, config: &ShellConfig) -> PlatformResult<BorderlessWindow> {
        config.validate()?;

        let shell: SharedShell = Rc::new(RefCell::new(None));
        let context = WindowCreationContext {
            shell: Rc::clone(&shell),
            live_windows: Rc::clone(&self.live_windows),
        };
        let hwnd = create_native_window(
            &self.class_name,
            self.h_instance,
            context,
            &config.title,
            Size::new(config.width, config.height),
        )?;

        let placeholder: Option<Box<dyn Region>> = match PanelRegion::create(hwnd, self.h_instance) {
            Ok(panel) => Some(Box::new(panel)),
            Err(err) => {
                log::warn!("Platform: placeholder caption for {hwnd:?} unavailable: {err}");
                None
            }
        };
        let mut controller: Win32Shell = ShellController::new(
            handle_from_hwnd(hwnd),
            Win32Chrome::new(hwnd),
            Win32Desktop,
            placeholder,
            config,
        );

        // WM_SIZE during creation arrived before the controller existed.
        let mut client = RECT::default();
        if unsafe { GetClientRect(hwnd, &mut client) }.is_ok() {
            controller.resize(Size::new(client.right - client.left, client.bottom - client.top));
        }
        *shell.borrow_mut() = Some(controller);

        // The refresh posted during construction would only run once the loop starts.
        apply_frame_changed(hwnd);

        log::debug!("Platform: created borderless window {hwnd:?} '{}'", config.title);
        Ok(BorderlessWindow {
            hwnd,
            h_instance: self.h_instance,
            shell,
        })
    }

    /// Pumps messages until `WM_QUIT`, posted once the last shell window is destroyed.
    pub fn run(&self) -> PlatformResult<()> {
        let mut msg = MSG::default();
        loop {
            let status = unsafe { GetMessageW(&mut msg, None, 0, 0) };
            match status.0 {
                0 => break,
                -1 => {
                    return Err(PlatformError::OperationFailed(
                        "GetMessageW failed".to_string(),
                    ));
                }
                _ => unsafe {
                    _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                },
            }
        }
        log::debug!("Platform: message loop finished");
        Ok(())
    }
}

pub struct BorderlessWindow {
    hwnd: HWND,
    h_instance: HINSTANCE,
    shell: SharedShell,
}

impl BorderlessWindow {
    pub fn handle(&self) -> WindowHandle {
        handle_from_hwnd(self.hwnd)
    }

    /// Creates an empty native panel parented to this window, for use as a region.
    pub fn create_panel(&self) -> PlatformResult<PanelRegion> {
        PanelRegion::create(self.hwnd, self.h_instance)
    }

    /*
     * Replaces the caption band (`None` removes it). With
     * `follow_system_caption` the band drags the window like a native title
     * bar, while child controls inside it stay clickable.
     */
    pub fn set_custom_caption(
        &self,
        caption: Option<Box<dyn Region>>,
        follow_system_caption: bool,
        height: i32,
    ) -> PlatformResult<()> {
        self.with_shell_mut(|shell| {
            shell.set_custom_caption(caption, follow_system_caption, height)
        })
    }

    pub fn caption_handle(&self) -> PlatformResult<Option<WindowHandle>> {
        self.with_shell(|shell| shell.caption().and_then(|region| region.native_handle()))
    }

    pub fn set_content(&self, content: Option<Box<dyn Region>>) -> PlatformResult<()> {
        self.with_shell_mut(|shell| shell.set_content(content))
    }

    pub fn content_handle(&self) -> PlatformResult<Option<WindowHandle>> {
        self.with_shell(|shell| shell.content().and_then(|region| region.native_handle()))
    }

    pub fn set_title(&self, title: &str) -> PlatformResult<()> {
        log::debug!("Platform: setting title for {:?} to '{title}'", self.hwnd);
        self.ensure_alive()?;
        unsafe { SetWindowTextW(self.hwnd, &HSTRING::from(title))? };
        Ok(())
    }

    pub fn show(&self, visible: bool) -> PlatformResult<()> {
        log::debug!("Platform: setting visibility for {:?} to {visible}", self.hwnd);
        self.ensure_alive()?;
        let cmd = if visible { SW_SHOW } else { SW_HIDE };
        unsafe { _ = ShowWindow(self.hwnd, cmd) };
        Ok(())
    }

    pub fn close(&self) -> PlatformResult<()> {
        self.ensure_alive()?;
        unsafe { DestroyWindow(self.hwnd)? };
        Ok(())
    }

    fn ensure_alive(&self) -> PlatformResult<()> {
        self.with_shell(|_| ())
    }

    fn with_shell<T>(&self, f: impl FnOnce(&Win32Shell) -> T) -> PlatformResult<T> {
        let slot = self.shell.try_borrow().map_err(|_| {
            PlatformError::OperationFailed(format!("shell for {:?} is busy", self.hwnd))
        })?;
        slot.as_ref().map(f).ok_or_else(|| {
            PlatformError::InvalidHandle(format!("window {:?} has been destroyed", self.hwnd))
        })
    }

    fn with_shell_mut<T>(&self, f: impl FnOnce(&mut Win32Shell) -> T) -> PlatformResult<T> {
        let mut slot = self.shell.try_borrow_mut().map_err(|_| {
            PlatformError::OperationFailed(format!("shell for {:?} is busy", self.hwnd))
        })?;
        slot.as_mut().map(f).ok_or_else(|| {
            PlatformError::InvalidHandle(format!("window {:?} has been destroyed", self.hwnd))
        })
    }
}

impl std::fmt::Debug for BorderlessWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BorderlessWindow")
            .field("hwnd", &self.hwnd)
            .finish()
    }
}
