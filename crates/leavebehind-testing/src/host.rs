//! A [`GestureHost`] that records everything the widget asks of it.

use leavebehind::{AncestorId, GestureHost, HorizontalSpan};
use smallvec::SmallVec;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Everything a [`RecordingHost`] has been asked to do so far.
#[derive(Debug, Default, Clone)]
pub struct HostLog {
    /// Every `request_disallow_intercept` argument, in call order.
    pub disallow_requests: Vec<bool>,
    /// Nested scrolling ancestors and their current enabled flag.
    pub ancestors: Vec<(AncestorId, bool)>,
    pub invalidated: Vec<HorizontalSpan>,
}

impl HostLog {
    pub fn ancestor_enabled(&self, ancestor: AncestorId) -> Option<bool> {
        self.ancestors
            .iter()
            .find(|(id, _)| *id == ancestor)
            .map(|(_, enabled)| *enabled)
    }

    /// Whether the last disallow request is still in force.
    pub fn intercept_disallowed(&self) -> bool {
        self.disallow_requests.last().copied().unwrap_or(false)
    }
}

/// Cloneable handle; the widget owns one clone and the test keeps another.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    log: Rc<RefCell<HostLog>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with nested scrolling ancestors in the given enabled states.
    pub fn with_ancestors(ancestors: impl IntoIterator<Item = (AncestorId, bool)>) -> Self {
        let host = Self::new();
        host.log.borrow_mut().ancestors.extend(ancestors);
        host
    }

    pub fn log(&self) -> Ref<'_, HostLog> {
        self.log.borrow()
    }

    pub fn clear_invalidations(&self) {
        self.log.borrow_mut().invalidated.clear();
    }
}

impl GestureHost for RecordingHost {
    fn request_disallow_intercept(&mut self, disallow: bool) {
        self.log.borrow_mut().disallow_requests.push(disallow);
    }

    fn nested_scrolling_ancestors(&self) -> SmallVec<[AncestorId; 4]> {
        self.log.borrow().ancestors.iter().map(|(id, _)| *id).collect()
    }

    fn is_ancestor_enabled(&self, ancestor: AncestorId) -> bool {
        self.log.borrow().ancestor_enabled(ancestor).unwrap_or(true)
    }

    fn set_ancestor_enabled(&mut self, ancestor: AncestorId, enabled: bool) {
        let mut log = self.log.borrow_mut();
        match log.ancestors.iter_mut().find(|(id, _)| *id == ancestor) {
            Some(entry) => entry.1 = enabled,
            None => log.ancestors.push((ancestor, enabled)),
        }
    }

    fn invalidate(&mut self, span: HorizontalSpan) {
        self.log.borrow_mut().invalidated.push(span);
    }
}
