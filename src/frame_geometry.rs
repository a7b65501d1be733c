/*
 * Frame geometry resolver: the pure side of borderless chrome.
 *
 * Every function here takes the ambient desktop state it needs, either as a
 * plain value or through `DesktopQueries`, so it can run against a live
 * desktop session or a fixed fake. Nothing is cached: the window rect, the
 * placement, the monitor work area and the frame border metrics are read
 * fresh on every call, since any of them can change between two messages.
 *
 * None of these functions fail. A failed OS query means "no adjustment" or
 * "no special region"; chrome geometry is cosmetic and must never stall the
 * message loop.
 */
use crate::region::Region;
use crate::types::{HitRegion, Point, Rect, ShowCommand, Size, WindowHandle};

/*
 * Read-only view of the OS state the resolver depends on. `None` stands for
 * a failed query.
 */
pub trait DesktopQueries {
    /// Window rect in screen coordinates.
    fn window_rect(&self, window: WindowHandle) -> Option<Rect>;

    /// Show command from the window placement record.
    fn show_command(&self, window: WindowHandle) -> Option<ShowCommand>;

    /// Work area (screen rect minus task bar) of the monitor under the window.
    fn monitor_work_area(&self, window: WindowHandle) -> Option<Rect>;

    /// Sizing border thickness from the system metrics.
    fn frame_border(&self) -> Size;

    /// Whether desktop composition is active.
    fn composition_enabled(&self) -> bool;
}

/*
 * Desktop used where there is no native window manager to talk to. Every
 * query fails, so the resolver always takes its "do nothing" path.
 */
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedDesktop;

impl DesktopQueries for DetachedDesktop {
    fn window_rect(&self, _window: WindowHandle) -> Option<Rect> {
        None
    }

    fn show_command(&self, _window: WindowHandle) -> Option<ShowCommand> {
        None
    }

    fn monitor_work_area(&self, _window: WindowHandle) -> Option<Rect> {
        None
    }

    fn frame_border(&self) -> Size {
        Size::default()
    }

    fn composition_enabled(&self) -> bool {
        false
    }
}

pub fn is_maximized<D: DesktopQueries + ?Sized>(desktop: &D, window: WindowHandle) -> bool {
    matches!(desktop.show_command(window), Some(ShowCommand::Maximized))
}

pub fn is_composition_enabled<D: DesktopQueries + ?Sized>(desktop: &D) -> bool {
    desktop.composition_enabled()
}

/*
 * Client rect for a borderless window. `proposed` is the window rect the OS
 * is about to apply. A maximized window is positioned with its (removed)
 * sizing border hanging off the monitor, so its client area is pinned to
 * the work area instead; in every other case `proposed` comes back as is.
 */
pub fn adjust_maximized_client_rect<D: DesktopQueries + ?Sized>(
    desktop: &D,
    window: WindowHandle,
    proposed: Rect,
) -> Rect {
    if !is_maximized(desktop, window) {
        return proposed;
    }

    match desktop.monitor_work_area(window) {
        Some(work_area) => {
            log::trace!(
                "FrameGeometry: maximized {window:?}, client {proposed:?} -> work area {work_area:?}"
            );
            work_area
        }
        None => {
            log::debug!("FrameGeometry: no monitor info for maximized {window:?}, keeping proposed rect");
            proposed
        }
    }
}

const EDGE_LEFT: u8 = 0b0001;
const EDGE_RIGHT: u8 = 0b0010;
const EDGE_TOP: u8 = 0b0100;
const EDGE_BOTTOM: u8 = 0b1000;

/*
 * Classifies `cursor` against the border band of `window`. Returns `None`
 * when the cursor is inside the band, i.e. over the client area.
 *
 * Each edge flag is independent; a corner is exactly the union of its two
 * edges. Three or four flags at once can only happen when the border is
 * wider than half the window and classify as `Nowhere`.
 */
pub fn classify_edges(cursor: Point, window: Rect, border: Size) -> Option<HitRegion> {
    let mut mask = 0u8;
    if cursor.x < window.left + border.width {
        mask |= EDGE_LEFT;
    }
    if cursor.x >= window.right - border.width {
        mask |= EDGE_RIGHT;
    }
    if cursor.y < window.top + border.height {
        mask |= EDGE_TOP;
    }
    if cursor.y >= window.bottom - border.height {
        mask |= EDGE_BOTTOM;
    }

    let region = match mask {
        0 => return None,
        EDGE_LEFT => HitRegion::Left,
        EDGE_RIGHT => HitRegion::Right,
        EDGE_TOP => HitRegion::Top,
        EDGE_BOTTOM => HitRegion::Bottom,
        m if m == EDGE_TOP | EDGE_LEFT => HitRegion::TopLeft,
        m if m == EDGE_TOP | EDGE_RIGHT => HitRegion::TopRight,
        m if m == EDGE_BOTTOM | EDGE_LEFT => HitRegion::BottomLeft,
        m if m == EDGE_BOTTOM | EDGE_RIGHT => HitRegion::BottomRight,
        _ => HitRegion::Nowhere,
    };
    Some(region)
}

/*
 * Client-area refinement: inside the caption bounds the band is draggable,
 * except over one of the caption's own child controls, which stay clickable.
 */
pub fn caption_hit_test(cursor: Point, caption: Option<&dyn Region>) -> HitRegion {
    let Some(caption) = caption else {
        return HitRegion::Client;
    };
    let Some(local) = caption.map_from_screen(cursor) else {
        return HitRegion::Client;
    };
    if !caption.bounds().contains(local) {
        return HitRegion::Client;
    }
    if caption.has_child_at(local) {
        HitRegion::Client
    } else {
        HitRegion::Caption
    }
}

pub fn classify_hit(
    cursor: Point,
    window: Rect,
    border: Size,
    caption: Option<&dyn Region>,
    follow_system_caption: bool,
) -> HitRegion {
    match classify_edges(cursor, window, border) {
        Some(edge) => edge,
        None if follow_system_caption => caption_hit_test(cursor, caption),
        None => HitRegion::Client,
    }
}

/*
 * Live hit test: reads the window rect and the border metrics for this call
 * only. A window rect that cannot be read yields `Nowhere`.
 */
pub fn hit_test<D: DesktopQueries + ?Sized>(
    desktop: &D,
    window: WindowHandle,
    cursor: Point,
    caption: Option<&dyn Region>,
    follow_system_caption: bool,
) -> HitRegion {
    let border = desktop.frame_border();
    let Some(window_rect) = desktop.window_rect(window) else {
        log::trace!("FrameGeometry: window rect unavailable for {window:?}");
        return HitRegion::Nowhere;
    };
    classify_hit(cursor, window_rect, border, caption, follow_system_caption)
}
