/*
 * Routes the three chrome-related non-client messages to the frame geometry
 * resolver. Each dispatch entry is a plain function of the decoded message
 * and a read-only view of the shell, so routing can be exercised without a
 * live window. Messages without an entry are left to default handling.
 */
use crate::frame_geometry::{self, DesktopQueries};
use crate::region::Region;
use crate::types::{HitRegion, Point, Rect, WindowHandle};

/// Native messages after decoding from their raw parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeMessage {
    /// Non-client size calculation. `for_current_state` is set when the OS
    /// asks for the client area of the rect it is about to apply.
    CalcSize { for_current_state: bool, proposed: Rect },
    /// Non-client hit test, cursor in screen coordinates.
    HitTest { cursor: Point },
    /// Non-client activation change.
    Activate { active: bool },
    Other { id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    CalcSize,
    HitTest,
    Activate,
}

impl NativeMessage {
    pub fn kind(&self) -> Option<MessageKind> {
        match self {
            NativeMessage::CalcSize { .. } => Some(MessageKind::CalcSize),
            NativeMessage::HitTest { .. } => Some(MessageKind::HitTest),
            NativeMessage::Activate { .. } => Some(MessageKind::Activate),
            NativeMessage::Other { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageReply {
    /// Client rect to report, with a zero non-client inset.
    ClientArea(Rect),
    Hit(HitRegion),
    /// Activation accepted unconditionally.
    Activated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Handled(MessageReply),
    Default,
}

/// What a dispatch entry may see of the shell.
pub struct RouteContext<'a> {
    pub window: WindowHandle,
    pub desktop: &'a dyn DesktopQueries,
    pub caption: Option<&'a dyn Region>,
    pub follow_system_caption: bool,
}

type Handler = fn(&NativeMessage, &RouteContext<'_>) -> Disposition;

const DISPATCH_TABLE: [(MessageKind, Handler); 3] = [
    (MessageKind::CalcSize, on_calc_size),
    (MessageKind::HitTest, on_hit_test),
    (MessageKind::Activate, on_activate),
];

pub fn dispatch(message: &NativeMessage, ctx: &RouteContext<'_>) -> Disposition {
    let Some(kind) = message.kind() else {
        return Disposition::Default;
    };
    DISPATCH_TABLE
        .iter()
        .find(|(entry, _)| *entry == kind)
        .map_or(Disposition::Default, |(_, handler)| handler(message, ctx))
}

fn on_calc_size(message: &NativeMessage, ctx: &RouteContext<'_>) -> Disposition {
    match *message {
        NativeMessage::CalcSize {
            for_current_state: true,
            proposed,
        } => {
            let client =
                frame_geometry::adjust_maximized_client_rect(ctx.desktop, ctx.window, proposed);
            Disposition::Handled(MessageReply::ClientArea(client))
        }
        _ => Disposition::Default,
    }
}

fn on_hit_test(message: &NativeMessage, ctx: &RouteContext<'_>) -> Disposition {
    let NativeMessage::HitTest { cursor } = *message else {
        return Disposition::Default;
    };
    let hit = frame_geometry::hit_test(
        ctx.desktop,
        ctx.window,
        cursor,
        ctx.caption,
        ctx.follow_system_caption,
    );
    Disposition::Handled(MessageReply::Hit(hit))
}

/*
 * Without composition the classic theme repaints the native frame on every
 * activation change. Reporting "activated" unconditionally keeps it hidden.
 */
fn on_activate(message: &NativeMessage, ctx: &RouteContext<'_>) -> Disposition {
    if !matches!(message, NativeMessage::Activate { .. }) {
        return Disposition::Default;
    }
    if frame_geometry::is_composition_enabled(ctx.desktop) {
        Disposition::Default
    } else {
        Disposition::Handled(MessageReply::Activated)
    }
}
