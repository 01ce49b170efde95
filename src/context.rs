//! The engine capabilities commands run against
//!
//! Commands see the engine only through [`EngineContext`]: widget lookup by
//! id, the focused widget, the mouse position, and variable/property
//! resolution. [`crate::Engine`] is the in-process implementation.

use crate::geometry::Vec2;
use crate::variable::Variable;
use crate::widget::{Placement, Widget, WidgetRegistry};

/// An object whose properties can be read by path, e.g. `size.x`
pub trait Queryable {
    fn query(&self, path: &str) -> Option<Variable>;
}

/// Capabilities the surrounding engine provides to commands
pub trait EngineContext {
    fn widgets(&self) -> &WidgetRegistry;

    fn widgets_mut(&mut self) -> &mut WidgetRegistry;

    /// Id of the widget that currently has focus
    fn focused_id(&self) -> Option<&str>;

    fn mouse_position(&self) -> Vec2;

    /// Look up a process-wide named variable
    fn variable(&self, key: &str) -> Option<Variable>;

    /// Look up a queryable property such as `game.mouse.x` or `hp_bar.size.x`
    fn property(&self, key: &str) -> Option<Variable>;

    fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets().get(id)
    }

    fn widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets_mut().get_mut(id)
    }

    fn placement(&self, id: &str) -> Option<Placement> {
        self.widget(id).map(Widget::placement)
    }

    fn focused(&self) -> Option<&Widget> {
        self.focused_id().and_then(|id| self.widgets().get(id))
    }

    /// Remove a widget; returns whether anything was removed
    fn delete_widget(&mut self, id: &str) -> bool {
        self.widgets_mut().remove(id).is_some()
    }

    /// Resolve a literal or an indirect reference
    ///
    /// Literals are returned unchanged. A string is a key, tried first as a
    /// variable and then as a property.
    fn resolve(&self, var: &Variable) -> Option<Variable> {
        match var.as_str() {
            Some(key) => self.variable(key).or_else(|| self.property(key)),
            None => Some(var.clone()),
        }
    }

    /// Integer value of `var` without coercion, or `default`
    fn int_or(&self, var: &Variable, default: i64) -> i64 {
        match var {
            Variable::Int(v) => *v,
            Variable::String(_) => self
                .resolve(var)
                .and_then(|v| v.as_i64())
                .unwrap_or(default),
            _ => default,
        }
    }

    fn resolve_bool(&self, var: &Variable) -> bool {
        self.resolve(var).and_then(|v| v.to_bool()).unwrap_or(false)
    }

    fn resolve_f64(&self, var: &Variable) -> f64 {
        self.resolve(var).and_then(|v| v.to_f64()).unwrap_or(0.0)
    }

    fn resolve_i64(&self, var: &Variable) -> i64 {
        self.resolve(var).and_then(|v| v.to_i64()).unwrap_or(0)
    }

    /// String form of `var`, empty when a key does not resolve
    fn resolve_string(&self, var: &Variable) -> String {
        self.resolve(var).map(|v| v.to_string()).unwrap_or_default()
    }
}
