//! In-process engine context
//!
//! [`Engine`] owns the widget registry, the variable table, focus and mouse
//! state, and runs commands against itself. It is what the replay CLI and the
//! tests drive; a real game embeds the same state in its own main loop.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::debug;

use crate::action::Action;
use crate::context::{EngineContext, Queryable};
use crate::geometry::Vec2;
use crate::text::update_text;
use crate::variable::Variable;
use crate::widget::{Widget, WidgetRegistry};

#[derive(Debug, Default)]
pub struct Engine {
    widgets: WidgetRegistry,
    variables: BTreeMap<String, Variable>,
    focus: Option<String>,
    mouse: Vec2,
    frame: u64,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_widget(&mut self, id: impl Into<String>, widget: Widget) -> Option<Widget> {
        self.widgets.insert(id, widget)
    }

    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<Variable>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Give focus to `id`; focus on a missing widget reads as no focus
    pub fn set_focus(&mut self, id: Option<String>) {
        self.focus = id;
    }

    pub fn set_mouse_position(&mut self, position: impl Into<Vec2>) {
        self.mouse = position.into();
    }

    /// Number of completed [`Engine::update`] passes
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn run(&mut self, action: &dyn Action) -> bool {
        action.execute(self)
    }

    /// Run actions in order; reports whether all of them succeeded
    pub fn run_all<'a, I, A>(&mut self, actions: I) -> bool
    where
        I: IntoIterator<Item = &'a A>,
        A: Action + 'a,
    {
        let mut all_ok = true;
        for action in actions {
            all_ok &= action.execute(self);
        }
        all_ok
    }

    /// One frame of widget upkeep: refresh every bound text widget
    pub fn update(&mut self) {
        let text_ids: Vec<String> = self
            .widgets
            .iter()
            .filter(|(_, w)| w.text().is_some())
            .map(|(id, _)| id.to_string())
            .collect();
        for id in &text_ids {
            update_text(self, id);
        }
        self.frame += 1;
        debug!(frame = self.frame, texts = text_ids.len(), "update");
    }

    /// Table of all widgets and their geometry, one line per widget
    pub fn report(&self) -> String {
        let mut out = String::new();
        for (id, w) in self.widgets.iter() {
            let pos = w.position();
            let size = w.size();
            let _ = write!(
                out,
                "{id}: pos=({}, {}) size=({}, {})",
                pos.x, pos.y, size.x, size.y
            );
            if !w.is_visible() {
                out.push_str(" hidden");
            }
            if let Some(text) = w.text() {
                let _ = write!(out, " text={:?}", text.text());
            }
            out.push('\n');
        }
        out
    }

    fn game_property(&self, path: &str) -> Option<Variable> {
        match path {
            "mouse.x" => Some(Variable::Float(f64::from(self.mouse.x))),
            "mouse.y" => Some(Variable::Float(f64::from(self.mouse.y))),
            "focus" => self.focus.clone().map(Variable::String),
            "frame" => i64::try_from(self.frame).ok().map(Variable::Int),
            _ => None,
        }
    }
}

impl EngineContext for Engine {
    fn widgets(&self) -> &WidgetRegistry {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.widgets
    }

    fn focused_id(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    fn variable(&self, key: &str) -> Option<Variable> {
        self.variables.get(key).cloned()
    }

    fn property(&self, key: &str) -> Option<Variable> {
        let (object, path) = key.split_once('.')?;
        match object {
            "game" => self.game_property(path),
            "focus" => self.focused()?.query(path),
            id => self.widgets.get(id)?.query(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_shadow_properties() {
        let mut engine = Engine::new();
        engine.add_widget("bar", Widget::new().with_size((50.0, 8.0)));
        assert_eq!(
            engine.resolve(&Variable::from("bar.size.x")),
            Some(Variable::Float(50.0))
        );
        engine.set_variable("bar.size.x", 7);
        assert_eq!(
            engine.resolve(&Variable::from("bar.size.x")),
            Some(Variable::Int(7))
        );
    }

    #[test]
    fn test_game_properties() {
        let mut engine = Engine::new();
        engine.set_mouse_position((12.0, 34.0));
        engine.set_focus(Some("menu".to_string()));
        assert_eq!(engine.property("game.mouse.y"), Some(Variable::Float(34.0)));
        assert_eq!(engine.property("game.focus"), Some(Variable::from("menu")));
        assert_eq!(engine.property("game.unknown"), None);
        assert_eq!(engine.property("nodot"), None);
    }

    #[test]
    fn test_focus_on_missing_widget() {
        let mut engine = Engine::new();
        engine.set_focus(Some("gone".to_string()));
        assert!(engine.focused().is_none());
        assert_eq!(engine.property("focus.size.x"), None);
    }

    #[test]
    fn test_typed_resolution_defaults() {
        let mut engine = Engine::new();
        engine.set_variable("steps", 5);
        engine.set_variable("ratio", 0.5);
        engine.set_variable("name", "knob");

        assert_eq!(engine.int_or(&Variable::from("steps"), -1), 5);
        assert_eq!(engine.int_or(&Variable::from("ratio"), -1), -1);
        assert_eq!(engine.int_or(&Variable::from("missing"), -1), -1);
        assert_eq!(engine.int_or(&Variable::Float(3.0), -1), -1);

        assert_eq!(engine.resolve_i64(&Variable::from("ratio")), 0);
        assert_eq!(engine.resolve_f64(&Variable::from("steps")), 5.0);
        assert!(engine.resolve_bool(&Variable::from("steps")));
        assert!(!engine.resolve_bool(&Variable::from("missing")));
        assert_eq!(engine.resolve_string(&Variable::from("name")), "knob");
        assert_eq!(engine.resolve_string(&Variable::from("missing")), "");
    }
}
