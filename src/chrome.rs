/*
 * Chrome customizer capability: the mutating side of borderless chrome
 * (style bits, compositor margins, frame refresh). The shell controller only
 * talks to this trait, so one implementation exists per supported platform
 * plus `NoopChrome`, under which the shell behaves as a plain bordered
 * window whose caption/content bands are still laid out.
 */
use crate::frame_style::FrameMargins;

pub trait ChromeCustomizer {
    /// False for the fallback; the shell then leaves native messages alone.
    fn is_supported(&self) -> bool;

    /// Live window style bits, `None` if they cannot be read.
    fn window_style(&self) -> Option<u32>;

    fn set_window_style(&mut self, style: u32);

    /// Extends the compositor frame into the client area.
    fn extend_frame(&mut self, margins: FrameMargins);

    /// Makes the OS recompute the non-client frame without moving or sizing.
    fn refresh_frame(&mut self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChrome;

impl ChromeCustomizer for NoopChrome {
    fn is_supported(&self) -> bool {
        false
    }

    fn window_style(&self) -> Option<u32> {
        None
    }

    fn set_window_style(&mut self, _style: u32) {}

    fn extend_frame(&mut self, _margins: FrameMargins) {}

    fn refresh_frame(&mut self) {}
}
