//! Horizontal extents of the three panels and the clamping rules that keep a
//! dragged panel physically valid.
//!
//! All coordinates are container-relative pixels. At rest CENTER sits at 0,
//! LEFT ends where CENTER begins and RIGHT starts where CENTER ends.

use crate::event::LeaveBehindEvent;
use crate::params::{Gravity, PanelParameters};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Closed-open horizontal range `[left, right)` in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HorizontalSpan {
    pub left: i32,
    pub right: i32,
}

impl HorizontalSpan {
    pub fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    pub fn union(self, other: HorizontalSpan) -> HorizontalSpan {
        HorizontalSpan {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub gravity: Gravity,
    pub left: i32,
    pub width: i32,
    pub params: PanelParameters,
}

impl Panel {
    pub fn new(params: PanelParameters, left: i32, width: i32) -> Self {
        Self {
            gravity: params.gravity,
            left,
            width,
            params,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn span(&self) -> HorizontalSpan {
        HorizontalSpan::new(self.left, self.right())
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.left as f32 && x < self.right() as f32
    }

    /// Moves the panel and returns the region it covered before and after.
    fn offset(&mut self, dx: i32) -> HorizontalSpan {
        let before = self.span();
        self.left += dx;
        before.union(self.span())
    }
}

/// Computes each panel's left edge once widths are known.
///
/// CENTER keeps `center_left` (0 on first layout, the current offset after);
/// LEFT and RIGHT hug its edges. Entries come back in LEFT, CENTER, RIGHT order.
pub fn layout_panels(
    container_width: i32,
    center_left: i32,
    widths: impl IntoIterator<Item = (Gravity, i32)>,
) -> IndexMap<Gravity, i32> {
    let widths: IndexMap<Gravity, i32> = widths.into_iter().collect();
    let center_width = widths
        .get(&Gravity::Center)
        .copied()
        .unwrap_or(container_width);

    let mut lefts = IndexMap::with_capacity(3);
    if let Some(&width) = widths.get(&Gravity::Left) {
        lefts.insert(Gravity::Left, center_left - width);
    }
    if widths.contains_key(&Gravity::Center) {
        lefts.insert(Gravity::Center, center_left);
    }
    if widths.contains_key(&Gravity::Right) {
        lefts.insert(Gravity::Right, center_left + center_width);
    }
    lefts
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelGeometry {
    container_width: i32,
    center: Panel,
    left: Option<Panel>,
    right: Option<Panel>,
}

impl PanelGeometry {
    pub fn new(container_width: i32, center: Panel, left: Option<Panel>, right: Option<Panel>) -> Self {
        Self {
            container_width,
            center,
            left,
            right,
        }
    }

    /// Convenience constructor placing panels at rest with the given widths.
    pub fn at_rest(
        container_width: i32,
        center: (PanelParameters, i32),
        left: Option<(PanelParameters, i32)>,
        right: Option<(PanelParameters, i32)>,
    ) -> Self {
        let center_panel = Panel::new(center.0, 0, center.1);
        let left_panel = left.map(|(params, width)| Panel::new(params, -width, width));
        let right_panel = right.map(|(params, width)| Panel::new(params, center.1, width));
        Self::new(container_width, center_panel, left_panel, right_panel)
    }

    pub fn container_width(&self) -> i32 {
        self.container_width
    }

    pub fn center(&self) -> &Panel {
        &self.center
    }

    pub fn left_panel(&self) -> Option<&Panel> {
        self.left.as_ref()
    }

    pub fn right_panel(&self) -> Option<&Panel> {
        self.right.as_ref()
    }

    pub fn panel(&self, gravity: Gravity) -> Option<&Panel> {
        match gravity {
            Gravity::Left => self.left.as_ref(),
            Gravity::Center => Some(&self.center),
            Gravity::Right => self.right.as_ref(),
        }
    }

    fn panel_mut(&mut self, gravity: Gravity) -> Option<&mut Panel> {
        match gravity {
            Gravity::Left => self.left.as_mut(),
            Gravity::Center => Some(&mut self.center),
            Gravity::Right => self.right.as_mut(),
        }
    }

    fn panels_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.left
            .iter_mut()
            .chain(std::iter::once(&mut self.center))
            .chain(self.right.iter_mut())
    }

    /// Left edge of `gravity`'s panel, falling back to CENTER's.
    pub fn left_of(&self, gravity: Gravity) -> i32 {
        self.panel(gravity).unwrap_or(&self.center).left
    }

    /// Topmost panel under `x`. CENTER is drawn above its siblings, so it wins ties.
    pub fn panel_at(&self, x: f32) -> Gravity {
        if self.center.contains(x) {
            return Gravity::Center;
        }
        [&self.left, &self.right]
            .into_iter()
            .flatten()
            .find(|panel| panel.contains(x))
            .map_or(Gravity::Center, |panel| panel.gravity)
    }

    /// Resolved clamping point (reveal distance) of the LEFT panel.
    pub fn left_clamp(&self) -> Option<i32> {
        self.left.as_ref().map(|panel| {
            panel
                .params
                .clamping_point
                .resolve(panel.width, self.container_width)
        })
    }

    pub fn right_clamp(&self) -> Option<i32> {
        self.right.as_ref().map(|panel| {
            panel
                .params
                .clamping_point
                .resolve(panel.width, self.container_width)
        })
    }

    /// How far the LEFT panel currently pokes into the container.
    pub fn left_reveal(&self) -> Option<i32> {
        self.left.as_ref().map(Panel::right)
    }

    /// How far the RIGHT panel currently pokes into the container.
    pub fn right_reveal(&self) -> Option<i32> {
        self.right
            .as_ref()
            .map(|panel| self.container_width - panel.left)
    }

    pub fn left_clamp_reached(&self) -> bool {
        matches!((self.left_reveal(), self.left_clamp()), (Some(reveal), Some(clamp)) if reveal >= clamp)
    }

    pub fn right_clamp_reached(&self) -> bool {
        matches!((self.right_reveal(), self.right_clamp()), (Some(reveal), Some(clamp)) if reveal >= clamp)
    }

    /// Largest left edge `dragged` may take while moving right.
    pub fn clamp_move_right(&self, dragged: Gravity, proposed_left: i32) -> i32 {
        let child_left = self.left_of(dragged);
        let Some(left_panel) = &self.left else {
            let bound = if dragged == Gravity::Center {
                0
            } else {
                self.container_width
            };
            return proposed_left.min(bound);
        };
        let clamp = left_panel
            .params
            .clamping_point
            .resolve(left_panel.width, self.container_width);
        proposed_left.min(child_left - left_panel.right() + clamp)
    }

    /// Smallest left edge `dragged` may take while moving left.
    pub fn clamp_move_left(&self, dragged: Gravity, proposed_left: i32) -> i32 {
        let child_left = self.left_of(dragged);
        let Some(right_panel) = &self.right else {
            let bound = if dragged == Gravity::Center {
                0
            } else {
                -self
                    .panel(dragged)
                    .map_or(self.center.width, |panel| panel.width)
            };
            return proposed_left.max(bound);
        };
        let clamp = right_panel
            .params
            .clamping_point
            .resolve(right_panel.width, self.container_width);
        proposed_left.max(self.container_width - right_panel.left + child_left - clamp)
    }

    /// Clamps a movement of `dx` for `dragged`, picking the bound by direction.
    pub fn clamp_move(&self, dragged: Gravity, proposed_left: i32, dx: i32) -> i32 {
        if dx > 0 {
            self.clamp_move_right(dragged, proposed_left)
        } else {
            self.clamp_move_left(dragged, proposed_left)
        }
    }

    /// Moves one panel by `dx`, returning the region to redraw.
    pub fn move_panel(&mut self, gravity: Gravity, dx: i32) -> Option<HorizontalSpan> {
        if dx == 0 {
            return None;
        }
        self.panel_mut(gravity).map(|panel| panel.offset(dx))
    }

    /// Rigidly shifts every panel except `exclude` by `dx`, returning the
    /// regions to redraw. No-op when `dx == 0`.
    pub fn offset_children(
        &mut self,
        exclude: Option<Gravity>,
        dx: i32,
    ) -> SmallVec<[HorizontalSpan; 3]> {
        if dx == 0 {
            return SmallVec::new();
        }
        self.panels_mut()
            .filter(|panel| Some(panel.gravity) != exclude)
            .map(|panel| panel.offset(dx))
            .collect()
    }

    /// Sticking-boundary crossings caused by the movement of `dx` that just
    /// happened. A boundary fires only when it changes sides, never while it
    /// stays put.
    pub fn sticky_edge_crossings(&self, dx: i32) -> SmallVec<[LeaveBehindEvent; 2]> {
        let mut crossings = SmallVec::new();
        if dx == 0 {
            return crossings;
        }
        let swiped_right = dx > 0;

        if let Some(panel) = &self.left {
            if let Some(bound) = panel.params.sticking_bound(panel.width) {
                let edge = panel.right() - bound;
                if crossed(edge, edge - dx) {
                    crossings.push(LeaveBehindEvent::LeftViewSticked { swiped_right });
                }
            }
        }

        if let Some(panel) = &self.right {
            if let Some(bound) = panel.params.sticking_bound(panel.width) {
                let edge = panel.left + bound - self.container_width;
                if crossed(edge, edge - dx) {
                    crossings.push(LeaveBehindEvent::RightViewSticked { swiped_right });
                }
            }
        }

        crossings
    }
}

fn crossed(now: i32, before: i32) -> bool {
    (now > 0 && before <= 0) || (now <= 0 && before > 0)
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
