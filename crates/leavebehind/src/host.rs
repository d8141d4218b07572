//! The surrounding event-routing layer, as seen from the widget.

use crate::geometry::HorizontalSpan;
use smallvec::SmallVec;

/// Opaque id of an ancestor container that does nested scrolling.
pub type AncestorId = u64;

/// Capabilities the widget needs from whoever routes pointer events to it.
///
/// Only [`GestureHost::request_disallow_intercept`] is required; hosts without
/// nested scrolling ancestors or damage tracking can keep the defaults.
pub trait GestureHost {
    /// Asks ancestors not to steal the current gesture (`true`) or lifts that request.
    fn request_disallow_intercept(&mut self, disallow: bool);

    fn nested_scrolling_ancestors(&self) -> SmallVec<[AncestorId; 4]> {
        SmallVec::new()
    }

    fn is_ancestor_enabled(&self, _ancestor: AncestorId) -> bool {
        true
    }

    fn set_ancestor_enabled(&mut self, _ancestor: AncestorId, _enabled: bool) {}

    /// Marks a horizontal region of the container for redraw.
    fn invalidate(&mut self, _span: HorizontalSpan) {}
}

/// Host used before the widget is attached to a real event-routing layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl GestureHost for DetachedHost {
    fn request_disallow_intercept(&mut self, _disallow: bool) {}
}

/// Enabled flags of nested scrolling ancestors captured when a swipe starts.
#[derive(Debug, Default)]
pub(crate) struct AncestorSnapshot {
    saved: SmallVec<[(AncestorId, bool); 4]>,
}

impl AncestorSnapshot {
    /// Records every ancestor's enabled flag, then disables them all.
    pub(crate) fn capture(host: &mut dyn GestureHost) -> Self {
        let saved: SmallVec<[(AncestorId, bool); 4]> = host
            .nested_scrolling_ancestors()
            .into_iter()
            .map(|ancestor| (ancestor, host.is_ancestor_enabled(ancestor)))
            .collect();
        for &(ancestor, _) in &saved {
            host.set_ancestor_enabled(ancestor, false);
        }
        Self { saved }
    }

    pub(crate) fn restore(self, host: &mut dyn GestureHost) {
        for (ancestor, enabled) in self.saved {
            host.set_ancestor_enabled(ancestor, enabled);
        }
    }
}
