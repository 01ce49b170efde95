//! Layout commands that move, resize and anchor widgets
//!
//! All of these report success. A command whose operand widgets cannot be
//! found, or whose numeric range is degenerate, leaves every widget untouched.
//!
//! Slider-style commands ([`CenterOnMouse`], [`Move`], [`MoveStep`]) place a
//! widget inside a track that starts at another widget's position and spans
//! `range` pixels. The widget's own extent is subtracted from the range, so
//! the usable range is `max(0, range - extent)`. With `steps > 1` positions
//! snap to `steps` equally spaced stops across the usable range.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Action, ActionName, Command, SharedAction};
use crate::context::EngineContext;
use crate::geometry::{anchor_position, Anchor, Axis, Vec2};
use crate::variable::Variable;

fn skipped(command: &'static str, id: &str) -> bool {
    trace!(command, id, "operand widget not found, skipping");
    true
}

fn continuous() -> Variable {
    Variable::Int(-1)
}

/// Pixels a widget of `extent` can travel inside a track of `range` pixels
fn usable_range(range: u32, extent: f32) -> f32 {
    (range as f32 - extent).max(0.0)
}

/// Snap `offset` to the nearest of `steps` stops spread over `usable`
///
/// Offsets pass through unchanged unless there are at least two stops and
/// room to move.
fn snap_to_step(offset: f32, steps: i64, usable: f32) -> f32 {
    if steps > 1 && usable > 0.0 {
        let last = (steps - 1) as f32;
        let index = (offset * last / usable).round();
        (index * usable / last).round()
    } else {
        offset
    }
}

/// Linearly map `value` from `input` onto `output`, rounded to a whole pixel
///
/// Returns `None` if either range is empty or inverted.
pub fn remap(value: i64, input: (i64, i64), output: (i32, i32)) -> Option<f32> {
    let (in_min, in_max) = input;
    let (out_min, out_max) = output;
    if in_max <= in_min || out_max <= out_min {
        return None;
    }
    let t = (value as f64 - in_min as f64) / (in_max as f64 - in_min as f64);
    let size = f64::from(out_min) + t * (f64::from(out_max) - f64::from(out_min));
    Some(size.round() as f32)
}

/// Move a widget by `offset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToPosition {
    pub id: String,
    pub offset: Vec2,
}

impl Action for AddToPosition {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("add_to_position", &self.id);
        };
        item.set_position(item.position() + self.offset);
        true
    }
}

/// Grow a widget by `offset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToSize {
    pub id: String,
    pub offset: Vec2,
}

impl Action for AddToSize {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("add_to_size", &self.id);
        };
        item.set_size(item.size() + self.offset);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPosition {
    pub id: String,
    pub position: Vec2,
    #[serde(default)]
    pub offset: Vec2,
}

impl Action for SetPosition {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("set_position", &self.id);
        };
        item.set_position(self.position + self.offset);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSize {
    pub id: String,
    pub size: Vec2,
}

impl Action for SetSize {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("set_size", &self.id);
        };
        item.set_size(self.size);
        true
    }
}

/// Set one coordinate of a widget's position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPositionAxis {
    pub id: String,
    pub axis: Axis,
    pub value: f32,
}

impl Action for SetPositionAxis {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("set_position_axis", &self.id);
        };
        item.set_position(item.position().with(self.axis, self.value));
        true
    }
}

/// Set one dimension of a widget's size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSizeAxis {
    pub id: String,
    pub axis: Axis,
    pub value: f32,
}

impl Action for SetSizeAxis {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("set_size_axis", &self.id);
        };
        item.set_size(item.size().with(self.axis, self.value));
        true
    }
}

/// Remove a widget from the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub id: String,
}

impl Action for Delete {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        if !ctx.delete_widget(&self.id) {
            trace!(id = %self.id, "delete: no such widget");
        }
        true
    }
}

/// Align a widget's anchor point with the same point of another widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorToWidget {
    pub id: String,
    pub anchor_to: String,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default)]
    pub offset: Vec2,
}

impl Action for AnchorToWidget {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(target) = ctx.placement(&self.anchor_to) else {
            return skipped("anchor", &self.anchor_to);
        };
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("anchor", &self.id);
        };
        let pos = anchor_position(
            self.anchor,
            item.size(),
            target.draw_position + self.offset,
            target.size,
        );
        item.set_position(pos);
        true
    }
}

/// Align a widget's anchor point with the focused widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorToFocused {
    pub id: String,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default)]
    pub offset: Vec2,
}

impl Action for AnchorToFocused {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(target) = ctx.focused().map(|w| w.placement()) else {
            trace!(id = %self.id, "anchor_to_focused: nothing focused");
            return true;
        };
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("anchor_to_focused", &self.id);
        };
        let pos = anchor_position(
            self.anchor,
            item.size(),
            target.draw_position + self.offset,
            target.size,
        );
        item.set_position(pos);
        true
    }
}

/// Copy one coordinate of the focused widget's draw position
///
/// `axis = x` is the horizontal variant, `axis = y` the vertical one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisAnchorToFocused {
    pub id: String,
    pub axis: Axis,
    #[serde(default)]
    pub offset: f32,
}

impl Action for AxisAnchorToFocused {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(focused) = ctx.focused().map(|w| w.draw_position()) else {
            trace!(id = %self.id, "axis_anchor_to_focused: nothing focused");
            return true;
        };
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("axis_anchor_to_focused", &self.id);
        };
        let value = focused.get(self.axis) + self.offset;
        item.set_position(item.position().with(self.axis, value));
        true
    }
}

/// Stretch a widget along one axis until it reaches another widget
///
/// Works on local positions; the size never goes below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorSize {
    pub id: String,
    pub anchor_to: String,
    pub axis: Axis,
    #[serde(default)]
    pub offset: f32,
}

impl Action for AnchorSize {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(target) = ctx.placement(&self.anchor_to) else {
            return skipped("anchor_size", &self.anchor_to);
        };
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("anchor_size", &self.id);
        };
        let extent = target.position.get(self.axis) - item.position().get(self.axis) + self.offset;
        item.set_size(item.size().with(self.axis, extent.max(0.0)));
        true
    }
}

/// Resize a widget so its far edge follows the mouse, within `range`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeOnMouse {
    pub id: String,
    pub axis: Axis,
    /// Minimum and maximum extent
    pub range: (f32, f32),
}

impl Action for ResizeOnMouse {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let mouse = ctx.mouse_position().get(self.axis);
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("resize_on_mouse", &self.id);
        };
        let (min, max) = self.range;
        let mut extent = mouse - item.position().get(self.axis);
        if extent < min {
            extent = min;
        }
        if extent > max {
            extent = max;
        }
        item.set_size(item.size().with(self.axis, extent));
        true
    }
}

/// Center a widget under the mouse inside a track
///
/// The track starts at `anchor_to`'s position. A negative step count tracks
/// the mouse continuously, more than one step snaps, and zero or one step
/// pins the widget to the start of the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterOnMouse {
    pub id: String,
    pub anchor_to: String,
    pub axis: Axis,
    pub range: u32,
    #[serde(default = "continuous")]
    pub steps: Variable,
}

impl Action for CenterOnMouse {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(track) = ctx.placement(&self.anchor_to) else {
            return skipped("center_on_mouse", &self.anchor_to);
        };
        let Some(item) = ctx.placement(&self.id) else {
            return skipped("center_on_mouse", &self.id);
        };
        let axis = self.axis;
        let start = track.position.get(axis);
        let extent = item.size.get(axis);
        let range = self.range as f32;
        let usable = usable_range(self.range, extent);

        let offset = (ctx.mouse_position().get(axis) - start).max(0.0).min(range);
        let offset = (offset - (extent / 2.0).round()).max(0.0).min(usable);
        let steps = ctx.int_or(&self.steps, -1);

        let new_pos = if steps > 1 && usable > 0.0 {
            start + snap_to_step(offset, steps, usable)
        } else if steps < 0 {
            (start + offset).max(start).min(start + usable)
        } else {
            start
        };

        // lands on the track's cross axis too, but only once the widget moves
        if item.position.get(axis) != new_pos {
            if let Some(w) = ctx.widget_mut(&self.id) {
                w.set_position(track.position.with(axis, new_pos));
            }
        }
        true
    }
}

/// Place a widget along a track proportionally to `position / max`
///
/// The widget is moved onto the track's draw position, offset along `axis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub id: String,
    pub anchor_to: String,
    pub axis: Axis,
    pub range: u32,
    /// Current value, defaults to `max` when it does not resolve to an integer
    pub position: Variable,
    pub max: u32,
    #[serde(default = "continuous")]
    pub steps: Variable,
}

impl Action for Move {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(track) = ctx.placement(&self.anchor_to) else {
            return skipped("move", &self.anchor_to);
        };
        let Some(item) = ctx.placement(&self.id) else {
            return skipped("move", &self.id);
        };
        let axis = self.axis;
        let base = track.draw_position;
        let usable = usable_range(self.range, item.size.get(axis));

        let value = ctx.int_or(&self.position, i64::from(self.max)) as f32;
        let offset = if self.max == 0 {
            0.0
        } else {
            (value * usable / self.max as f32).round()
        };
        let offset = snap_to_step(offset, ctx.int_or(&self.steps, -1), usable);

        let start = base.get(axis);
        let coord = (start + offset).max(start).min(start + usable);
        if let Some(w) = ctx.widget_mut(&self.id) {
            w.set_position(base.with(axis, coord));
        }
        true
    }
}

/// Step a widget sitting on one of `steps` track stops by `step_offset` stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveStep {
    pub id: String,
    pub anchor_to: String,
    pub axis: Axis,
    pub range: u32,
    pub steps: Variable,
    pub step_offset: i32,
}

impl Action for MoveStep {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(track) = ctx.placement(&self.anchor_to) else {
            return skipped("move_step", &self.anchor_to);
        };
        let Some(item) = ctx.placement(&self.id) else {
            return skipped("move_step", &self.id);
        };
        let axis = self.axis;
        let mut target = track.draw_position;
        let steps = ctx.int_or(&self.steps, -1);

        if steps > 1 {
            let last = (steps - 1) as f32;
            let usable = usable_range(self.range, item.size.get(axis));
            let current = if usable > 0.0 {
                let travelled = item.draw_position.get(axis) - target.get(axis);
                (travelled * last / usable).round()
            } else {
                0.0
            };
            let next = (current + self.step_offset as f32).max(0.0).min(last);
            // step 0 stays exactly on the track start
            if next >= 1.0 {
                target.set(axis, target.get(axis) + (next * usable / last).round());
            }
        }

        if let Some(w) = ctx.widget_mut(&self.id) {
            w.set_position(target);
        }
        true
    }
}

/// Size a widget along one axis by remapping a value from an input range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resize {
    pub id: String,
    pub axis: Axis,
    pub size: Variable,
    pub input_min: Variable,
    pub input_max: Variable,
    /// Output extent range, minimum then maximum
    pub size_range: (i32, i32),
}

impl Action for Resize {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let (out_min, out_max) = self.size_range;
        if out_max <= out_min {
            trace!(id = %self.id, out_min, out_max, "resize: empty size range");
            return true;
        }
        if !ctx.widgets().contains(&self.id) {
            return skipped("resize", &self.id);
        }
        let input = (ctx.resolve_i64(&self.input_min), ctx.resolve_i64(&self.input_max));
        let value = ctx.resolve_i64(&self.size);
        let Some(extent) = remap(value, input, self.size_range) else {
            trace!(id = %self.id, ?input, "resize: empty input range");
            return true;
        };
        if let Some(item) = ctx.widget_mut(&self.id) {
            item.set_size(item.size().with(self.axis, extent));
        }
        true
    }
}

/// Size a widget along one axis to reach another widget's draw position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeToPosition {
    pub id: String,
    pub to: String,
    pub axis: Axis,
    #[serde(default)]
    pub offset: f32,
}

impl Action for ResizeToPosition {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(to) = ctx.placement(&self.to) else {
            return skipped("resize_to_position", &self.to);
        };
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("resize_to_position", &self.id);
        };
        let axis = self.axis;
        let extent = to.draw_position.get(axis) - item.draw_position().get(axis) + self.offset;
        item.set_size(item.size().with(axis, extent));
        true
    }
}

/// Run an action bound to a widget, reporting its result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteAction {
    pub id: String,
    pub action: ActionName,
}

impl Action for ExecuteAction {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(item) = ctx.widget(&self.id) else {
            return skipped("execute_action", &self.id);
        };
        let Some(action) = item.action(self.action.hash()) else {
            trace!(id = %self.id, action = %self.action, "execute_action: no such action");
            return true;
        };
        action.execute(ctx)
    }
}

/// Bind `command` to a widget under the name `action`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAction {
    pub id: String,
    pub action: ActionName,
    pub command: Rc<Command>,
}

impl Action for SetAction {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        let Some(item) = ctx.widget_mut(&self.id) else {
            return skipped("set_action", &self.id);
        };
        let command: SharedAction = self.command.clone();
        item.set_action(self.action.hash(), command);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_range_never_negative() {
        assert_eq!(usable_range(200, 40.0), 160.0);
        assert_eq!(usable_range(30, 40.0), 0.0);
    }

    #[test]
    fn test_snap_to_step() {
        // five stops over 160px: 0, 40, 80, 120, 160
        assert_eq!(snap_to_step(0.0, 5, 160.0), 0.0);
        assert_eq!(snap_to_step(55.0, 5, 160.0), 40.0);
        assert_eq!(snap_to_step(61.0, 5, 160.0), 80.0);
        assert_eq!(snap_to_step(160.0, 5, 160.0), 160.0);
    }

    #[test]
    fn test_snap_passthrough() {
        assert_eq!(snap_to_step(37.0, -1, 160.0), 37.0);
        assert_eq!(snap_to_step(37.0, 1, 160.0), 37.0);
        assert_eq!(snap_to_step(37.0, 5, 0.0), 37.0);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for offset in [0.0, 13.0, 47.0, 99.0, 150.0] {
            let once = snap_to_step(offset, 7, 150.0);
            assert_eq!(snap_to_step(once, 7, 150.0), once);
        }
    }

    #[test]
    fn test_remap() {
        assert_eq!(remap(50, (0, 100), (0, 200)), Some(100.0));
        assert_eq!(remap(1, (0, 3), (10, 20)), Some(13.0));
        assert_eq!(remap(2, (0, 3), (10, 20)), Some(17.0));
        assert_eq!(remap(5, (5, 5), (0, 10)), None);
        assert_eq!(remap(5, (0, 10), (10, 10)), None);
        assert_eq!(remap(5, (0, 10), (20, 10)), None);
    }

    #[test]
    fn test_remap_full_integer_ranges() {
        assert_eq!(remap(0, (i64::MIN, i64::MAX), (0, 100)), Some(50.0));
        assert_eq!(remap(i64::MAX, (i64::MIN, i64::MAX), (0, 100)), Some(100.0));
        assert_eq!(remap(2, (0, 2), (i32::MIN, i32::MAX)), Some(i32::MAX as f32));
        assert!(remap(i64::MAX, (-1, 100), (0, 100)).is_some_and(|size| size > 100.0));
    }
}
