/*
 * Fakes shared by the unit tests: a scriptable desktop, a chrome that
 * records every mutation, and regions that log their lifecycle into a
 * shared `EventLog`.
 */
use crate::chrome::ChromeCustomizer;
use crate::frame_geometry::DesktopQueries;
use crate::frame_style::FrameMargins;
use crate::region::Region;
use crate::types::{Point, Rect, ShowCommand, Size, WindowHandle};

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

#[derive(Debug)]
pub(crate) struct FakeDesktop {
    window_rect: Option<Rect>,
    show_command: Option<ShowCommand>,
    work_area: Option<Rect>,
    border: Cell<Size>,
    border_reads: Cell<usize>,
    composition: bool,
}

impl FakeDesktop {
    pub(crate) fn new() -> Self {
        Self {
            window_rect: None,
            show_command: None,
            work_area: None,
            border: Cell::new(Size::new(8, 8)),
            border_reads: Cell::new(0),
            composition: true,
        }
    }

    pub(crate) fn with_window_rect(mut self, rect: Rect) -> Self {
        self.window_rect = Some(rect);
        self
    }

    pub(crate) fn with_show_command(mut self, command: ShowCommand) -> Self {
        self.show_command = Some(command);
        self
    }

    pub(crate) fn with_work_area(mut self, rect: Rect) -> Self {
        self.work_area = Some(rect);
        self
    }

    pub(crate) fn with_composition(mut self, enabled: bool) -> Self {
        self.composition = enabled;
        self
    }

    pub(crate) fn set_border(&self, border: Size) {
        self.border.set(border);
    }

    pub(crate) fn border_reads(&self) -> usize {
        self.border_reads.get()
    }
}

impl DesktopQueries for FakeDesktop {
    fn window_rect(&self, _window: WindowHandle) -> Option<Rect> {
        self.window_rect
    }

    fn show_command(&self, _window: WindowHandle) -> Option<ShowCommand> {
        self.show_command
    }

    fn monitor_work_area(&self, _window: WindowHandle) -> Option<Rect> {
        self.work_area
    }

    fn frame_border(&self) -> Size {
        self.border_reads.set(self.border_reads.get() + 1);
        self.border.get()
    }

    fn composition_enabled(&self) -> bool {
        self.composition
    }
}

#[derive(Debug, Default)]
struct ChromeState {
    style: Option<u32>,
    style_writes: usize,
    margins: Vec<FrameMargins>,
    refreshes: usize,
}

/// Cloning shares the recorded state, so a test keeps a handle after moving one into the shell.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingChrome {
    state: Rc<RefCell<ChromeState>>,
}

impl RecordingChrome {
    pub(crate) fn new(initial_style: u32) -> Self {
        let chrome = Self::default();
        chrome.state.borrow_mut().style = Some(initial_style);
        chrome
    }

    pub(crate) fn style(&self) -> Option<u32> {
        self.state.borrow().style
    }

    /// Changes the live style behind the shell's back, as an application call would.
    pub(crate) fn overwrite_style(&self, style: u32) {
        self.state.borrow_mut().style = Some(style);
    }

    pub(crate) fn style_writes(&self) -> usize {
        self.state.borrow().style_writes
    }

    pub(crate) fn margins(&self) -> Vec<FrameMargins> {
        self.state.borrow().margins.clone()
    }

    pub(crate) fn refreshes(&self) -> usize {
        self.state.borrow().refreshes
    }
}

impl ChromeCustomizer for RecordingChrome {
    fn is_supported(&self) -> bool {
        true
    }

    fn window_style(&self) -> Option<u32> {
        self.state.borrow().style
    }

    fn set_window_style(&mut self, style: u32) {
        let mut state = self.state.borrow_mut();
        state.style = Some(style);
        state.style_writes += 1;
    }

    fn extend_frame(&mut self, margins: FrameMargins) {
        self.state.borrow_mut().margins.push(margins);
    }

    fn refresh_frame(&mut self) {
        self.state.borrow_mut().refreshes += 1;
    }
}

#[derive(Debug, Default)]
struct LogState {
    events: Vec<String>,
    geometries: HashMap<String, Rect>,
    live: BTreeSet<String>,
    last_host: Option<WindowHandle>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog {
    inner: Rc<RefCell<LogState>>,
}

impl EventLog {
    fn push(&self, name: &str, event: &str) {
        self.inner.borrow_mut().events.push(format!("{name}:{event}"));
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.inner.borrow().events.clone()
    }

    pub(crate) fn clear(&self) {
        self.inner.borrow_mut().events.clear();
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.inner.borrow().events.iter().filter(|e| *e == event).count()
    }

    pub(crate) fn geometry_of(&self, name: &str) -> Option<Rect> {
        self.inner.borrow().geometries.get(name).copied()
    }

    /// Names of regions created and not yet dropped.
    pub(crate) fn live(&self) -> Vec<String> {
        self.inner.borrow().live.iter().cloned().collect()
    }

    pub(crate) fn last_host(&self) -> Option<WindowHandle> {
        self.inner.borrow().last_host
    }
}

/*
 * Region whose host window sits at `screen_origin`. Screen points are mapped
 * through the host origin and the region's own geometry; child controls are
 * rects in region-local coordinates.
 */
#[derive(Debug)]
pub(crate) struct RecordingRegion {
    name: String,
    log: EventLog,
    screen_origin: Point,
    geometry: Rect,
    children: Vec<Rect>,
}

impl RecordingRegion {
    pub(crate) fn new(name: &str, log: &EventLog) -> Self {
        log.inner.borrow_mut().live.insert(name.to_string());
        Self {
            name: name.to_string(),
            log: log.clone(),
            screen_origin: Point::default(),
            geometry: Rect::default(),
            children: Vec::new(),
        }
    }

    pub(crate) fn boxed(name: &str, log: &EventLog) -> Box<dyn Region> {
        Self::new(name, log).into_boxed()
    }

    pub(crate) fn at_screen_origin(mut self, origin: Point) -> Self {
        self.screen_origin = origin;
        self
    }

    pub(crate) fn with_child(mut self, rect: Rect) -> Self {
        self.children.push(rect);
        self
    }

    pub(crate) fn into_boxed(self) -> Box<dyn Region> {
        Box::new(self)
    }
}

impl Region for RecordingRegion {
    fn attach(&mut self, host: WindowHandle) {
        self.log.inner.borrow_mut().last_host = Some(host);
        self.log.push(&self.name, "attach");
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
        self.log
            .inner
            .borrow_mut()
            .geometries
            .insert(self.name.clone(), rect);
    }

    fn show(&mut self) {
        self.log.push(&self.name, "show");
    }

    fn hide(&mut self) {
        self.log.push(&self.name, "hide");
    }

    fn map_from_screen(&self, screen: Point) -> Option<Point> {
        Some(Point::new(
            screen.x - self.screen_origin.x - self.geometry.left,
            screen.y - self.screen_origin.y - self.geometry.top,
        ))
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.geometry.width(), self.geometry.height())
    }

    fn has_child_at(&self, local: Point) -> bool {
        self.children.iter().any(|child| child.contains(local))
    }
}

impl Drop for RecordingRegion {
    fn drop(&mut self) {
        self.log.push(&self.name, "drop");
        self.log.inner.borrow_mut().live.remove(&self.name);
    }
}
