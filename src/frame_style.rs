/*
 * Window style presets for the borderless shell and the compositor margins
 * used to draw its drop shadow.
 *
 * The bit values mirror the Win32 `WS_*` constants so the presets can be
 * reasoned about and tested on every platform. The Win32 layer cross-checks
 * them against the `windows` crate.
 *
 * A plain popup is not enough for a borderless window:
 * - `THICKFRAME` keeps resizing, which aero snap, restore and minimize rely on.
 * - `SYSMENU` keeps the move/size/close menu on the task bar button.
 * - `CAPTION` enables the minimize animation under composition.
 * - `MINIMIZEBOX`/`MAXIMIZEBOX` keep the minimize and maximize commands.
 */

pub const WS_POPUP: u32 = 0x8000_0000;
pub const WS_CAPTION: u32 = 0x00C0_0000;
pub const WS_SYSMENU: u32 = 0x0008_0000;
pub const WS_THICKFRAME: u32 = 0x0004_0000;
pub const WS_MINIMIZEBOX: u32 = 0x0002_0000;
pub const WS_MAXIMIZEBOX: u32 = 0x0001_0000;
pub const WS_OVERLAPPEDWINDOW: u32 = 0x00CF_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePreset {
    Windowed,
    AeroBorderless,
    BasicBorderless,
}

impl StylePreset {
    pub const fn bits(self) -> u32 {
        match self {
            StylePreset::Windowed => {
                WS_OVERLAPPEDWINDOW
                    | WS_THICKFRAME
                    | WS_CAPTION
                    | WS_SYSMENU
                    | WS_MINIMIZEBOX
                    | WS_MAXIMIZEBOX
            }
            StylePreset::AeroBorderless => {
                WS_POPUP | WS_THICKFRAME | WS_CAPTION | WS_SYSMENU | WS_MAXIMIZEBOX | WS_MINIMIZEBOX
            }
            StylePreset::BasicBorderless => {
                WS_POPUP | WS_THICKFRAME | WS_SYSMENU | WS_MAXIMIZEBOX | WS_MINIMIZEBOX
            }
        }
    }

    /// Borderless preset matching the compositor state.
    pub const fn borderless(composition_enabled: bool) -> Self {
        if composition_enabled {
            StylePreset::AeroBorderless
        } else {
            StylePreset::BasicBorderless
        }
    }
}

/// Union of every bit owned by a preset. Anything outside belongs to the application.
pub const PRESET_MASK: u32 = StylePreset::Windowed.bits()
    | StylePreset::AeroBorderless.bits()
    | StylePreset::BasicBorderless.bits();

/*
 * Rebases `live` onto `preset`: preset bits are replaced wholesale, every
 * application bit (clip children, visible, disabled, ...) is carried over.
 */
pub const fn merge_style(preset: StylePreset, live: u32) -> u32 {
    preset.bits() | (live & !PRESET_MASK)
}

/// Margins extended into the client area through the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameMargins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl FrameMargins {
    // One pixel on every side is enough for the compositor to draw its shadow.
    pub const fn shadow(enabled: bool) -> Self {
        let m = if enabled { 1 } else { 0 };
        Self {
            left: m,
            right: m,
            top: m,
            bottom: m,
        }
    }
}
