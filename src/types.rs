/*
 * Platform-agnostic value types shared by the frame geometry resolver, the
 * shell controller and the Win32 layer. Coordinates follow the Win32
 * convention: `right` and `bottom` are exclusive, and screen coordinates may
 * be negative on multi-monitor setups.
 */
use crate::error::{PlatformError, Result as PlatformResult};

/// Caption band height used when the caller does not provide one.
pub const DEFAULT_CAPTION_HEIGHT: i32 = 20;

/*
 * Opaque native window handle. On Windows this is the raw `HWND` value; other
 * platforms never hand one out. Kept as an integer so portable code and tests
 * can carry handles without touching FFI types.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rect from an origin and a size.
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    // Half-open: the right and bottom edges are outside.
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// True when the two rects share at least one pixel.
    pub const fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/*
 * Result of classifying a cursor position against the borderless frame.
 * The variants map one-to-one onto the Win32 `HT*` codes returned from a
 * non-client hit test; `to_native` gives that code.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    Nowhere,
    Client,
    Caption,
    Left,
    Right,
    Top,
    TopLeft,
    TopRight,
    Bottom,
    BottomLeft,
    BottomRight,
}

impl HitRegion {
    pub const fn to_native(self) -> u32 {
        match self {
            HitRegion::Nowhere => 0,
            HitRegion::Client => 1,
            HitRegion::Caption => 2,
            HitRegion::Left => 10,
            HitRegion::Right => 11,
            HitRegion::Top => 12,
            HitRegion::TopLeft => 13,
            HitRegion::TopRight => 14,
            HitRegion::Bottom => 15,
            HitRegion::BottomLeft => 16,
            HitRegion::BottomRight => 17,
        }
    }

    /// Inverse of `to_native`; codes this crate never produces map to `None`.
    pub const fn from_native(code: u32) -> Option<Self> {
        let region = match code {
            0 => HitRegion::Nowhere,
            1 => HitRegion::Client,
            2 => HitRegion::Caption,
            10 => HitRegion::Left,
            11 => HitRegion::Right,
            12 => HitRegion::Top,
            13 => HitRegion::TopLeft,
            14 => HitRegion::TopRight,
            15 => HitRegion::Bottom,
            16 => HitRegion::BottomLeft,
            17 => HitRegion::BottomRight,
            _ => return None,
        };
        Some(region)
    }

    /// Edges and corners hand the cursor to the OS sizing loop.
    pub const fn is_resize_border(self) -> bool {
        matches!(
            self,
            HitRegion::Left
                | HitRegion::Right
                | HitRegion::Top
                | HitRegion::TopLeft
                | HitRegion::TopRight
                | HitRegion::Bottom
                | HitRegion::BottomLeft
                | HitRegion::BottomRight
        )
    }
}

/// Show state recorded in the window placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    Normal,
    Minimized,
    Maximized,
    Other(u32),
}

impl ShowCommand {
    // SW_SHOWNORMAL = 1, SW_SHOWMINIMIZED = 2, SW_MAXIMIZE = 3.
    pub const fn from_native(raw: u32) -> Self {
        match raw {
            1 => ShowCommand::Normal,
            2 => ShowCommand::Minimized,
            3 => ShowCommand::Maximized,
            other => ShowCommand::Other(other),
        }
    }
}

/*
 * Construction parameters for a borderless shell window. The caption values
 * are the ones applied to the placeholder caption band installed at
 * construction time; `set_custom_caption` overrides them later.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub caption_height: i32,
    pub follow_system_caption: bool,
    pub drop_shadow: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "Borderless Window".to_string(),
            width: 800,
            height: 600,
            caption_height: DEFAULT_CAPTION_HEIGHT,
            follow_system_caption: true,
            drop_shadow: true,
        }
    }
}

impl ShellConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_caption(mut self, height: i32, follow_system_caption: bool) -> Self {
        self.caption_height = height;
        self.follow_system_caption = follow_system_caption;
        self
    }

    pub fn with_drop_shadow(mut self, enabled: bool) -> Self {
        self.drop_shadow = enabled;
        self
    }

    pub fn validate(&self) -> PlatformResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(PlatformError::InvalidConfiguration(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.caption_height < 0 {
            return Err(PlatformError::InvalidConfiguration(format!(
                "caption height must not be negative, got {}",
                self.caption_height
            )));
        }
        Ok(())
    }
}
