//! Scene fixtures loaded from TOML
//!
//! A scene describes the starting state of an [`Engine`] (widgets, variables,
//! focus, mouse) and a list of frames to replay. Each frame may move the
//! mouse, change focus or variables, and run commands before the engine's
//! update pass.
//!
//! ```toml
//! mouse = [0, 0]
//!
//! [variables]
//! volume = 3
//!
//! [[widgets]]
//! id = "track"
//! position = [100, 200]
//! size = [200, 10]
//!
//! [[widgets]]
//! id = "knob"
//! size = [40, 10]
//!
//! [[frames]]
//! [[frames.commands]]
//! type = "move"
//! id = "knob"
//! anchor_to = "track"
//! axis = "x"
//! range = 200
//! position = "volume"
//! max = 4
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::action::{hash16, Command, SharedAction};
use crate::engine::Engine;
use crate::geometry::Vec2;
use crate::text::TextBinding;
use crate::variable::Variable;
use crate::widget::Widget;

/// Errors that can occur when loading a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("duplicate widget id '{0}'")]
    DuplicateWidget(String),
    #[error("focus on unknown widget '{0}'")]
    UnknownFocus(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub mouse: Vec2,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub variables: BTreeMap<String, Variable>,
    #[serde(default)]
    pub widgets: Vec<WidgetSpec>,
    #[serde(default)]
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WidgetSpec {
    pub id: String,
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub size: Vec2,
    #[serde(default)]
    pub origin: Vec2,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub text: Option<TextSpec>,
    /// Named actions, e.g. `change` or `click`
    #[serde(default)]
    pub actions: BTreeMap<String, Command>,
}

fn visible_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextSpec {
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub bindings: Vec<String>,
    #[serde(default)]
    pub text: String,
}

/// Input and commands for one replayed frame
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub mouse: Option<Vec2>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub variables: BTreeMap<String, Variable>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl WidgetSpec {
    fn to_widget(&self) -> Widget {
        let mut widget = Widget::new()
            .with_position(self.position)
            .with_size(self.size)
            .with_origin(self.origin)
            .with_visible(self.visible);
        if let Some(text) = &self.text {
            widget = widget.with_text(
                TextBinding::new(text.format.clone())
                    .with_bindings(text.bindings.iter().cloned())
                    .with_text(text.text.clone()),
            );
        }
        for (name, command) in &self.actions {
            let action: SharedAction = Rc::new(command.clone());
            widget.set_action(hash16(name), action);
        }
        widget
    }
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(content)?)
    }

    /// Create an engine in the scene's starting state
    ///
    /// Widget ids must be unique, and every focus the scene or its frames
    /// name must be one of them.
    pub fn build(&self) -> Result<Engine, SceneError> {
        let mut engine = Engine::new();
        let mut seen = HashSet::new();
        for spec in &self.widgets {
            if !seen.insert(spec.id.as_str()) {
                return Err(SceneError::DuplicateWidget(spec.id.clone()));
            }
            engine.add_widget(spec.id.clone(), spec.to_widget());
        }
        let frame_focus = self.frames.iter().filter_map(|f| f.focus.as_ref());
        for id in self.focus.iter().chain(frame_focus) {
            if !seen.contains(id.as_str()) {
                return Err(SceneError::UnknownFocus(id.clone()));
            }
        }
        for (key, value) in &self.variables {
            engine.set_variable(key.clone(), value.clone());
        }
        engine.set_focus(self.focus.clone());
        engine.set_mouse_position(self.mouse);
        Ok(engine)
    }

    /// Replay up to `limit` frames (all when `None`), returning how many ran
    pub fn play(&self, engine: &mut Engine, limit: Option<usize>) -> usize {
        let count = limit.map_or(self.frames.len(), |n| n.min(self.frames.len()));
        for frame in &self.frames[..count] {
            frame.apply(engine);
        }
        count
    }
}

impl Frame {
    /// Apply input changes, run the frame's commands, then update the engine
    pub fn apply(&self, engine: &mut Engine) {
        if let Some(mouse) = self.mouse {
            engine.set_mouse_position(mouse);
        }
        if let Some(focus) = &self.focus {
            engine.set_focus(Some(focus.clone()));
        }
        for (key, value) in &self.variables {
            engine.set_variable(key.clone(), value.clone());
        }
        let ok = engine.run_all(&self.commands);
        debug!(
            frame = engine.frame(),
            commands = self.commands.len(),
            ok,
            "frame commands"
        );
        engine.update();
    }
}
