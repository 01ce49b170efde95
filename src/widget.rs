//! Widget model and the string-keyed widget registry

use std::collections::{BTreeMap, HashMap};

use crate::action::{hash16, SharedAction};
use crate::context::Queryable;
use crate::geometry::Vec2;
use crate::text::TextBinding;
use crate::variable::Variable;

/// Named actions bound to a widget, keyed by the 16-bit hash of the name
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    actions: HashMap<u16, SharedAction>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash: u16) -> Option<SharedAction> {
        self.actions.get(&hash).cloned()
    }

    /// Bind `action` under `hash`, returning the action it replaces
    pub fn set(&mut self, hash: u16, action: SharedAction) -> Option<SharedAction> {
        self.actions.insert(hash, action)
    }

}

/// Snapshot of a widget's geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub draw_position: Vec2,
    pub size: Vec2,
}

/// An on-screen object
///
/// `origin` is the offset the surrounding container layout contributes; the
/// widget is drawn at `origin + position`.
#[derive(Debug, Clone)]
pub struct Widget {
    position: Vec2,
    size: Vec2,
    origin: Vec2,
    visible: bool,
    actions: ActionTable,
    text: Option<TextBinding>,
}

impl Default for Widget {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            origin: Vec2::ZERO,
            visible: true,
            actions: ActionTable::new(),
            text: None,
        }
    }
}

impl Widget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: impl Into<Vec2>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<Vec2>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_origin(mut self, origin: impl Into<Vec2>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_text(mut self, text: TextBinding) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_action(mut self, name: &str, action: SharedAction) -> Self {
        self.actions.set(hash16(name), action);
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Position on screen after container offsets
    pub fn draw_position(&self) -> Vec2 {
        self.origin + self.position
    }

    pub fn placement(&self) -> Placement {
        Placement {
            position: self.position,
            draw_position: self.draw_position(),
            size: self.size,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn action(&self, hash: u16) -> Option<SharedAction> {
        self.actions.get(hash)
    }

    pub fn set_action(&mut self, hash: u16, action: SharedAction) {
        self.actions.set(hash, action);
    }

    pub fn text(&self) -> Option<&TextBinding> {
        self.text.as_ref()
    }

    pub fn text_mut(&mut self) -> Option<&mut TextBinding> {
        self.text.as_mut()
    }
}

impl Queryable for Widget {
    fn query(&self, path: &str) -> Option<Variable> {
        let axis_of = |v: Vec2, rest: &str| match rest {
            "x" => Some(Variable::Float(f64::from(v.x))),
            "y" => Some(Variable::Float(f64::from(v.y))),
            _ => None,
        };
        match path {
            "visible" => return Some(Variable::Bool(self.visible)),
            "width" => return Some(Variable::Float(f64::from(self.size.x))),
            "height" => return Some(Variable::Float(f64::from(self.size.y))),
            "text" => return self.text.as_ref().map(|t| Variable::from(t.text())),
            _ => {}
        }
        let (prop, rest) = path.split_once('.')?;
        match prop {
            "position" => axis_of(self.position, rest),
            "drawPosition" | "draw_position" => axis_of(self.draw_position(), rest),
            "size" => axis_of(self.size, rest),
            _ => None,
        }
    }
}

/// All live widgets, keyed by their stable id
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: BTreeMap<String, Widget>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget, returning the one previously stored under `id`
    pub fn insert(&mut self, id: impl Into<String>, widget: Widget) -> Option<Widget> {
        self.widgets.insert(id.into(), widget)
    }

    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Widget> {
        self.widgets.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }

    /// Widgets in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Widget)> {
        self.widgets.iter().map(|(id, w)| (id.as_str(), w))
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_position_includes_origin() {
        let w = Widget::new()
            .with_position((10.0, 5.0))
            .with_origin((100.0, 200.0));
        assert_eq!(w.draw_position(), Vec2::new(110.0, 205.0));
        assert_eq!(w.position(), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_widget_properties() {
        let w = Widget::new()
            .with_position((3.0, 4.0))
            .with_size((30.0, 40.0))
            .with_origin((1.0, 1.0));
        assert_eq!(w.query("position.x"), Some(Variable::Float(3.0)));
        assert_eq!(w.query("drawPosition.y"), Some(Variable::Float(5.0)));
        assert_eq!(w.query("size.y"), Some(Variable::Float(40.0)));
        assert_eq!(w.query("width"), Some(Variable::Float(30.0)));
        assert_eq!(w.query("visible"), Some(Variable::Bool(true)));
        assert_eq!(w.query("text"), None);
        assert_eq!(w.query("position.z"), None);
        assert_eq!(w.query("colour"), None);
    }

    #[test]
    fn test_registry_insert_replace_remove() {
        let mut registry = WidgetRegistry::new();
        assert!(registry.insert("a", Widget::new()).is_none());
        assert!(registry
            .insert("a", Widget::new().with_size((1.0, 1.0)))
            .is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").map(Widget::size), Some(Vec2::new(1.0, 1.0)));
        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert!(registry.is_empty());
    }
}
