/*
 * Public entry point for the chromeshell crate: a borderless ("custom
 * chrome") top-level window that keeps native resizing, aero snap,
 * minimize/maximize/restore and the compositor drop shadow, while the
 * application supplies its own caption and content regions.
 *
 * The frame geometry resolver, the message router and the shell controller
 * are portable and compile (and test) on every platform. Conditional
 * compilation keeps the Win32 pieces (live desktop queries, the chrome
 * customizer, the window procedure and native panels) to Windows; elsewhere
 * the shell falls back to `NoopChrome` and a detached desktop, so it never
 * touches native messages but still lays out the caption and content bands.
 */
#[cfg(target_os = "windows")]
pub mod app;
pub mod chrome;
#[cfg(target_os = "windows")]
pub(crate) mod chrome_windows;
#[cfg(target_os = "windows")]
pub mod controls;
#[cfg(target_os = "windows")]
pub(crate) mod desktop_windows;
pub mod error;
pub mod frame_geometry;
pub mod frame_style;
pub mod message_router;
pub mod region;
pub mod shell;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;
#[cfg(target_os = "windows")]
pub(crate) mod window_common;

#[cfg(target_os = "windows")]
pub use app::{BorderlessWindow, ShellApp};
pub use chrome::{ChromeCustomizer, NoopChrome};
#[cfg(target_os = "windows")]
pub use chrome_windows::Win32Chrome;
#[cfg(target_os = "windows")]
pub use controls::panel_handler::PanelRegion;
#[cfg(target_os = "windows")]
pub use desktop_windows::Win32Desktop;
pub use error::{PlatformError, Result as PlatformResult};
pub use frame_geometry::{DesktopQueries, DetachedDesktop};
pub use frame_style::{FrameMargins, StylePreset};
pub use message_router::{Disposition, MessageReply, NativeMessage};
pub use region::{Region, RegionSlot};
pub use shell::ShellController;
pub use types::{
    DEFAULT_CAPTION_HEIGHT, HitRegion, Point, Rect, ShellConfig, ShowCommand, Size, WindowHandle,
};

/// Chrome customizer for the platform being built.
#[cfg(target_os = "windows")]
pub type PlatformChrome = Win32Chrome;
#[cfg(not(target_os = "windows"))]
pub type PlatformChrome = NoopChrome;

/// Desktop queries for the platform being built.
#[cfg(target_os = "windows")]
pub type PlatformDesktop = Win32Desktop;
#[cfg(not(target_os = "windows"))]
pub type PlatformDesktop = DetachedDesktop;
