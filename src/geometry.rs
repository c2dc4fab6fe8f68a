// Arena coordinates follow screen convention: the origin is the top-left
// corner and `y` grows downwards, so a `Rect`'s `min.y` is its top.

use crate::config::*;
use bevy::math::{Rect, Vec2};
use std::f32::consts::TAU;

/// Radius of a circle whose area corresponds to `size`.
pub fn radius(size: f32) -> f32 {
    (size * SIZE_SCALE / TAU).sqrt()
}

/// Keep a circle of `radius` inside the arena. The flag reports whether the
/// point had to move.
pub fn clamp_to_bounds(point: Vec2, radius: f32) -> (Vec2, bool) {
    let clamped = Vec2::new(
        point.x.max(radius).min(SIM_WIDTH - radius),
        point.y.max(radius).min(SIM_HEIGHT - radius),
    );
    (clamped, clamped != point)
}

/// Position just outside `rect` for a circle at `point` that overlaps it,
/// or `None` when there is no overlap.
///
/// A circle whose centre lies in the rectangle's vertical or horizontal band
/// is pushed out through the nearest crossed edge, or through the nearest
/// edge overall when the whole circle sits inside. Outside both bands only
/// a corner can be hit, and the circle is moved along the corner-to-centre
/// line until it just touches the corner.
pub fn rect_push_out(point: Vec2, radius: f32, rect: Rect) -> Option<Vec2> {
    if rect.is_empty() {
        return None;
    }

    let (cleft, cright) = (point.x - radius, point.x + radius);
    let (ctop, cbottom) = (point.y - radius, point.y + radius);
    let Rect { min, max } = rect;

    if min.y <= point.y && point.y <= max.y {
        if cright > min.x && cleft < min.x {
            return Some(Vec2::new(min.x - radius, point.y));
        }
        if cleft < max.x && cright > max.x {
            return Some(Vec2::new(max.x + radius, point.y));
        }
    }

    if min.x <= point.x && point.x <= max.x {
        if ctop < max.y && cbottom > max.y {
            return Some(Vec2::new(point.x, max.y + radius));
        }
        if cbottom > min.y && ctop < min.y {
            return Some(Vec2::new(point.x, min.y - radius));
        }
    }

    // centre deep inside: leave through the nearest edge that stays in the arena
    if rect.contains(point) {
        let exits = [
            Vec2::new(min.x - radius, point.y),
            Vec2::new(max.x + radius, point.y),
            Vec2::new(point.x, min.y - radius),
            Vec2::new(point.x, max.y + radius),
        ];
        return exits
            .into_iter()
            .filter(|exit| clamp_to_bounds(*exit, radius).0 == *exit)
            .min_by(|a, b| a.distance_squared(point).total_cmp(&b.distance_squared(point)));
    }

    let corners = [
        Vec2::new(min.x, max.y),
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
    ];
    for corner in corners {
        let to_corner = corner - point;
        let dist = to_corner.length();
        if dist < radius && dist > 0.0 {
            return Some(corner - to_corner / dist * radius);
        }
    }

    None
}

/// True when the segment `from -> to` touches `rect` (edges inclusive).
pub fn segment_intersects_rect(from: Vec2, to: Vec2, rect: Rect) -> bool {
    if rect.is_empty() {
        return false;
    }

    // Liang-Barsky clip of the segment parameter against each slab
    let d = to - from;
    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;
    let slabs = [
        (-d.x, from.x - rect.min.x),
        (d.x, rect.max.x - from.x),
        (-d.y, from.y - rect.min.y),
        (d.y, rect.max.y - from.y),
    ];

    for (p, q) in slabs {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return false;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return false;
            }
            t_exit = t_exit.min(t);
        }
    }

    true
}

/// Whether an observer can see a target.
pub trait Visibility {
    fn visible(&self, observer: Vec2, target: Vec2) -> bool;
}

/// The two bars splitting the arena, one hanging from the top edge and one
/// standing on the bottom edge, leaving a gap in the middle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separators {
    pub top: Rect,
    pub bottom: Rect,
}

impl Separators {
    /// `gap` is the fraction of the arena height left open between the bars.
    pub fn new(gap: f32) -> Self {
        let height = SIM_HEIGHT * (1.0 - gap.clamp(0.0, 1.0)) / 2.0;
        let left = SIM_WIDTH / 2.0 - SEPARATOR_WIDTH / 2.0;
        let right = SIM_WIDTH / 2.0 + SEPARATOR_WIDTH / 2.0;
        Self {
            top: Rect::new(left, 0.0, right, height),
            bottom: Rect::new(left, SIM_HEIGHT - height, right, SIM_HEIGHT),
        }
    }

    pub fn rects(&self) -> [Rect; 2] {
        [self.top, self.bottom]
    }

    /// True when the rectangle overlaps either bar with positive area.
    pub fn overlaps(&self, rect: Rect) -> bool {
        self.rects()
            .iter()
            .any(|sep| !sep.is_empty() && !rect.intersect(*sep).is_empty())
    }

    /// Clamp a circle into the arena, then push it out of each bar in turn.
    pub fn bound_position(&self, point: Vec2, radius: f32) -> Vec2 {
        let (mut pos, _) = clamp_to_bounds(point, radius);
        for rect in self.rects() {
            if let Some(pushed) = rect_push_out(pos, radius, rect) {
                pos = pushed;
            }
        }

        // a gap narrower than the circle sends it from one bar into the
        // other; both bars share their x extent, so leave sideways
        if self.rects().iter().any(|rect| rect_push_out(pos, radius, *rect).is_some()) {
            let left = self.top.min.x - radius;
            let right = self.top.max.x + radius;
            pos.x = if pos.x - left <= right - pos.x { left } else { right };
        }
        pos
    }
}

impl Visibility for Separators {
    fn visible(&self, observer: Vec2, target: Vec2) -> bool {
        !self
            .rects()
            .iter()
            .any(|sep| segment_intersects_rect(observer, target, *sep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 300.0)
    }

    #[test]
    fn radius_grows_with_square_root_of_size() {
        let r1 = radius(10.0);
        let r4 = radius(40.0);
        assert!((r4 / r1 - 2.0).abs() < 1e-5);
    }

    #[test]
    fn clamp_reports_change() {
        let (p, clamped) = clamp_to_bounds(Vec2::new(-5.0, 50.0), 10.0);
        assert_eq!(p, Vec2::new(10.0, 50.0));
        assert!(clamped);

        let (p, clamped) = clamp_to_bounds(Vec2::new(50.0, 50.0), 10.0);
        assert_eq!(p, Vec2::new(50.0, 50.0));
        assert!(!clamped);
    }

    #[test]
    fn push_out_through_nearest_edge() {
        let pushed = rect_push_out(Vec2::new(95.0, 200.0), 10.0, bar());
        assert_eq!(pushed, Some(Vec2::new(90.0, 200.0)));

        let pushed = rect_push_out(Vec2::new(205.0, 200.0), 10.0, bar());
        assert_eq!(pushed, Some(Vec2::new(210.0, 200.0)));

        let pushed = rect_push_out(Vec2::new(150.0, 305.0), 10.0, bar());
        assert_eq!(pushed, Some(Vec2::new(150.0, 310.0)));

        let pushed = rect_push_out(Vec2::new(150.0, 95.0), 10.0, bar());
        assert_eq!(pushed, Some(Vec2::new(150.0, 90.0)));
    }

    #[test]
    fn push_out_from_corner_lands_on_radius() {
        let start = Vec2::new(205.0, 305.0);
        let pushed = rect_push_out(start, 10.0, bar()).expect("corner overlap");
        let corner = Vec2::new(200.0, 300.0);
        assert!((pushed.distance(corner) - 10.0).abs() < 1e-4);
        // pushed away from the corner along the same diagonal
        assert!(pushed.x > start.x && pushed.y > start.y);
    }

    #[test]
    fn no_push_without_overlap() {
        assert_eq!(rect_push_out(Vec2::new(50.0, 50.0), 10.0, bar()), None);
        assert_eq!(rect_push_out(Vec2::new(215.0, 315.0), 10.0, bar()), None);
    }

    #[test]
    fn push_out_from_deep_inside_uses_nearest_edge() {
        // 5 from the left edge, 95 from the right, 100 from top and bottom
        let pushed = rect_push_out(Vec2::new(125.0, 200.0), 10.0, bar());
        assert_eq!(pushed, Some(Vec2::new(90.0, 200.0)));

        let pushed = rect_push_out(Vec2::new(150.0, 115.0), 10.0, bar());
        assert_eq!(pushed, Some(Vec2::new(150.0, 90.0)));
    }

    #[test]
    fn push_out_never_leaves_the_arena() {
        // a bar hanging from the top edge: the top exit is off the arena
        let hanging = Rect::new(760.0, 0.0, 840.0, 315.0);
        let pushed = rect_push_out(Vec2::new(800.0, 20.0), 15.0, hanging).expect("inside bar");
        assert!(pushed.y >= 15.0);
        assert!(pushed.x <= 760.0 - 15.0 || pushed.x >= 840.0 + 15.0);
    }

    #[test]
    fn bound_position_clears_bars_for_any_centre() {
        let r = 15.0;
        for gap in [0.0, 0.02, 0.3] {
            let seps = Separators::new(gap);
            for (x, y) in [(781.66, 263.48), (804.05, 802.42), (800.0, 450.0), (761.0, 14.0)] {
                let pos = seps.bound_position(Vec2::new(x, y), r);
                for rect in seps.rects() {
                    assert_eq!(rect_push_out(pos, r, rect), None, "gap {} from ({}, {})", gap, x, y);
                }
                assert_eq!(clamp_to_bounds(pos, r).0, pos);
            }
        }
    }

    #[test]
    fn segment_clip() {
        let rect = bar();
        assert!(segment_intersects_rect(
            Vec2::new(0.0, 200.0),
            Vec2::new(400.0, 200.0),
            rect
        ));
        assert!(!segment_intersects_rect(
            Vec2::new(0.0, 50.0),
            Vec2::new(400.0, 50.0),
            rect
        ));
        // stops short of the bar
        assert!(!segment_intersects_rect(
            Vec2::new(0.0, 200.0),
            Vec2::new(90.0, 200.0),
            rect
        ));
        // diagonal passing by a corner
        assert!(!segment_intersects_rect(
            Vec2::new(0.0, 90.0),
            Vec2::new(90.0, 0.0),
            rect
        ));
    }

    #[test]
    fn open_arena_has_no_blocking_bars() {
        let seps = Separators::new(1.0);
        assert!(seps.visible(Vec2::new(10.0, 10.0), Vec2::new(1590.0, 890.0)));
        assert!(!seps.overlaps(Rect::new(0.0, 0.0, SIM_WIDTH, SIM_HEIGHT)));
    }

    #[test]
    fn closed_arena_blocks_sight_between_halves() {
        let seps = Separators::new(0.0);
        assert!(!seps.visible(Vec2::new(100.0, 450.0), Vec2::new(1500.0, 450.0)));
        assert!(seps.visible(Vec2::new(100.0, 450.0), Vec2::new(700.0, 100.0)));
    }

    #[test]
    fn bound_position_clears_both_bars() {
        let seps = Separators::new(0.2);
        let r = 12.0;
        let pos = seps.bound_position(Vec2::new(SIM_WIDTH / 2.0 - 45.0, 100.0), r);
        assert!(pos.x <= seps.top.min.x - r + 1e-3);
    }
}
