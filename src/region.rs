/*
 * Caption and content regions supplied by the embedding application, and the
 * single-owner slot the shell keeps them in.
 *
 * A region is an opaque rectangle: the shell only positions it, shows or
 * hides it, and asks the caption region whether a point lands on one of its
 * own child controls. Destruction is `Drop`; once a region is handed to a
 * slot, nothing else may reparent or destroy it.
 */
use crate::types::{Point, Rect, WindowHandle};

pub trait Region {
    /// Parents the region to the shell window.
    fn attach(&mut self, host: WindowHandle);

    /// Places the region in host client coordinates.
    fn set_geometry(&mut self, rect: Rect);

    fn show(&mut self);

    fn hide(&mut self);

    /// Maps a screen point into region-local coordinates.
    fn map_from_screen(&self, screen: Point) -> Option<Point>;

    /// Local bounds, origin at (0, 0).
    fn bounds(&self) -> Rect;

    /// True when a visible child control sits at `local`.
    fn has_child_at(&self, local: Point) -> bool;

    /// Native handle, if the region is backed by a native window.
    fn native_handle(&self) -> Option<WindowHandle> {
        None
    }
}

/*
 * Holds at most one region. `replace` takes the previous occupant out of the
 * slot, hides and drops it before the new one is attached, so two occupants
 * are never alive at once even if installing the new one unwinds.
 */
pub struct RegionSlot {
    label: &'static str,
    occupant: Option<Box<dyn Region>>,
}

impl RegionSlot {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            occupant: None,
        }
    }

    pub fn replace(&mut self, next: Option<Box<dyn Region>>, host: WindowHandle) {
        self.release();

        if let Some(mut region) = next {
            region.attach(host);
            region.show();
            log::debug!(
                "RegionSlot: installed {} region {:?}",
                self.label,
                region.native_handle()
            );
            self.occupant = Some(region);
        }
    }

    /// Detaches and destroys the current occupant, if any.
    pub fn release(&mut self) {
        if let Some(mut previous) = self.occupant.take() {
            previous.hide();
            log::debug!(
                "RegionSlot: releasing {} region {:?}",
                self.label,
                previous.native_handle()
            );
            drop(previous);
        }
    }

    pub fn get(&self) -> Option<&dyn Region> {
        self.occupant.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut (dyn Region + 'static)> {
        self.occupant.as_deref_mut()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

impl Drop for RegionSlot {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for RegionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionSlot")
            .field("label", &self.label)
            .field("occupied", &self.is_occupied())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EventLog, RecordingRegion};

    const HOST: WindowHandle = WindowHandle(0x42);

    #[test]
    fn replace_detaches_previous_before_installing_next() {
        // Arrange
        let log = EventLog::default();
        let mut slot = RegionSlot::new("caption");
        slot.replace(Some(RecordingRegion::boxed("first", &log)), HOST);
        log.clear();

        // Act
        slot.replace(Some(RecordingRegion::boxed("second", &log)), HOST);

        // Assert
        assert_eq!(
            log.events(),
            vec![
                "first:hide",
                "first:drop",
                "second:attach",
                "second:show"
            ]
        );
        assert!(slot.is_occupied());
    }

    #[test]
    fn replace_with_none_empties_the_slot() {
        let log = EventLog::default();
        let mut slot = RegionSlot::new("content");
        slot.replace(Some(RecordingRegion::boxed("only", &log)), HOST);

        slot.replace(None, HOST);

        assert!(!slot.is_occupied());
        assert!(log.events().ends_with(&["only:hide".to_string(), "only:drop".to_string()]));
    }

    #[test]
    fn dropping_the_slot_destroys_the_occupant() {
        let log = EventLog::default();
        {
            let mut slot = RegionSlot::new("content");
            slot.replace(Some(RecordingRegion::boxed("body", &log)), HOST);
        }
        assert_eq!(log.count("body:drop"), 1);
    }

    #[test]
    fn attach_receives_the_host_handle() {
        let log = EventLog::default();
        let mut slot = RegionSlot::new("caption");
        slot.replace(Some(RecordingRegion::boxed("bar", &log)), HOST);
        assert_eq!(log.last_host(), Some(HOST));
    }
}
