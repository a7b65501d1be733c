/*
 * Window shell controller: owns the caption and content regions of one
 * borderless window, applies the borderless style and compositor shadow,
 * and answers the chrome-related native messages through the frame geometry
 * resolver.
 *
 * The controller is platform-agnostic. The native layer feeds it decoded
 * messages and lifecycle notifications (first show, resize, destroy) from
 * the UI thread, one at a time and in delivery order; all OS access goes
 * through the `ChromeCustomizer` and `DesktopQueries` it was built with.
 */
use crate::chrome::ChromeCustomizer;
use crate::frame_geometry::DesktopQueries;
use crate::frame_style::{self, FrameMargins, StylePreset};
use crate::message_router::{self, Disposition, NativeMessage, RouteContext};
use crate::region::{Region, RegionSlot};
use crate::types::{Rect, ShellConfig, Size, WindowHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Constructed,
    Styled,
    Shown,
    Destroyed,
}

pub struct ShellController<C: ChromeCustomizer, D: DesktopQueries> {
    window: WindowHandle,
    chrome: C,
    desktop: D,
    caption: RegionSlot,
    content: RegionSlot,
    follow_system_caption: bool,
    caption_height: i32,
    size: Size,
    drop_shadow: bool,
    shadow_enabled: bool,
    lifecycle: Lifecycle,
}

impl<C: ChromeCustomizer, D: DesktopQueries> ShellController<C, D> {
    /*
     * Builds the controller and installs `placeholder` as the caption right
     * away, so the borderless frame is in place before the first paint.
     */
    pub fn new(
        window: WindowHandle,
        chrome: C,
        desktop: D,
        placeholder: Option<Box<dyn Region>>,
        config: &ShellConfig,
    ) -> Self {
        let mut shell = Self {
            window,
            chrome,
            desktop,
            caption: RegionSlot::new("caption"),
            content: RegionSlot::new("content"),
            follow_system_caption: config.follow_system_caption,
            caption_height: config.caption_height,
            size: Size::new(config.width, config.height),
            drop_shadow: config.drop_shadow,
            shadow_enabled: false,
            lifecycle: Lifecycle::Constructed,
        };
        shell.set_custom_caption(placeholder, config.follow_system_caption, config.caption_height);
        shell
    }

    pub fn window(&self) -> WindowHandle {
        self.window
    }

    /*
     * Replaces the caption band. `None` removes it, leaving the whole top of
     * the window as client area. The previous caption is destroyed before the
     * new one is shown, then the frame is recomputed.
     */
    pub fn set_custom_caption(
        &mut self,
        region: Option<Box<dyn Region>>,
        follow_system_caption: bool,
        height: i32,
    ) {
        if self.lifecycle == Lifecycle::Destroyed {
            log::warn!("ShellController: set_custom_caption after teardown of {:?}", self.window);
            return;
        }
        let height = if height < 0 {
            log::warn!("ShellController: negative caption height {height}, using 0");
            0
        } else {
            height
        };

        self.caption.replace(region, self.window);
        self.follow_system_caption = follow_system_caption;
        self.caption_height = height;
        self.layout();

        if self.lifecycle == Lifecycle::Shown {
            // Re-applied so a style changed by the application since first show is rebased.
            self.apply_borderless_style(self.drop_shadow);
        } else {
            self.lifecycle = Lifecycle::Styled;
        }
        self.chrome.refresh_frame();
        log::debug!(
            "ShellController: caption set for {:?} (present: {}, follow system: {follow_system_caption}, height: {height})",
            self.window,
            self.caption.is_occupied()
        );
    }

    pub fn caption(&self) -> Option<&dyn Region> {
        self.caption.get()
    }

    pub fn set_content(&mut self, region: Option<Box<dyn Region>>) {
        if self.lifecycle == Lifecycle::Destroyed {
            log::warn!("ShellController: set_content after teardown of {:?}", self.window);
            return;
        }
        self.content.replace(region, self.window);
        self.layout();
    }

    pub fn content(&self) -> Option<&dyn Region> {
        self.content.get()
    }

    pub fn follow_system_caption(&self) -> bool {
        self.follow_system_caption
    }

    pub fn caption_height(&self) -> i32 {
        self.caption_height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn shadow_enabled(&self) -> bool {
        self.shadow_enabled
    }

    /*
     * First transition to visible: rebase the style on the borderless preset
     * for the current compositor state and, with composition, extend the
     * frame to get the drop shadow. Later show notifications are ignored.
     */
    pub fn on_first_show(&mut self) {
        if matches!(self.lifecycle, Lifecycle::Shown | Lifecycle::Destroyed) {
            return;
        }
        self.lifecycle = Lifecycle::Shown;
        self.apply_borderless_style(self.drop_shadow);
    }

    fn apply_borderless_style(&mut self, shadow: bool) {
        if !self.chrome.is_supported() {
            log::debug!("ShellController: chrome unsupported, keeping native frame");
            return;
        }

        let composition = self.desktop.composition_enabled();
        let preset = StylePreset::borderless(composition);
        match self.chrome.window_style() {
            Some(live) => {
                let merged = frame_style::merge_style(preset, live);
                if merged != live {
                    log::debug!(
                        "ShellController: style {live:#010x} -> {merged:#010x} ({preset:?}) for {:?}",
                        self.window
                    );
                    self.chrome.set_window_style(merged);
                    // Style bits only take effect once the frame is recomputed.
                    self.chrome.refresh_frame();
                }
            }
            None => log::debug!("ShellController: window style unreadable for {:?}", self.window),
        }

        if composition {
            self.chrome.extend_frame(FrameMargins::shadow(shadow));
            self.shadow_enabled = shadow;
        } else {
            self.shadow_enabled = false;
        }
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.layout();
    }

    /// Caption band in client coordinates; empty when no caption is installed.
    pub fn caption_band(&self) -> Rect {
        let band = if self.caption.is_occupied() {
            self.caption_height.clamp(0, self.size.height.max(0))
        } else {
            0
        };
        Rect::new(0, 0, self.size.width, band)
    }

    pub fn content_band(&self) -> Rect {
        let caption = self.caption_band();
        Rect::new(0, caption.bottom, self.size.width, self.size.height.max(caption.bottom))
    }

    fn layout(&mut self) {
        let caption_band = self.caption_band();
        let content_band = self.content_band();
        if let Some(caption) = self.caption.get_mut() {
            caption.set_geometry(caption_band);
        }
        if let Some(content) = self.content.get_mut() {
            content.set_geometry(content_band);
        }
    }

    /*
     * Answers a decoded native message. Only the frame-size, hit-test and
     * activation messages can be handled; under an unsupported chrome every
     * message goes to default handling.
     */
    pub fn handle_native(&self, message: &NativeMessage) -> Disposition {
        if !self.chrome.is_supported() {
            return Disposition::Default;
        }
        let ctx = RouteContext {
            window: self.window,
            desktop: &self.desktop,
            caption: self.caption.get(),
            follow_system_caption: self.follow_system_caption,
        };
        message_router::dispatch(message, &ctx)
    }

    /// Releases both regions. Further replacement calls are ignored.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        log::debug!("ShellController: tearing down {:?}", self.window);
        self.caption.release();
        self.content.release();
        self.lifecycle = Lifecycle::Destroyed;
    }
}

impl<C: ChromeCustomizer, D: DesktopQueries> std::fmt::Debug for ShellController<C, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellController")
            .field("window", &self.window)
            .field("caption", &self.caption)
            .field("content", &self.content)
            .field("caption_height", &self.caption_height)
            .field("size", &self.size)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
