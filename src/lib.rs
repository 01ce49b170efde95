//! Widget Actions - the command and layout core of a 2D game UI
//!
//! Externally authored commands move, resize and anchor on-screen widgets in
//! response to input and variable changes, once per frame. Commands refer to
//! widgets by id and resolve them on each execution, so a command aimed at a
//! widget that does not exist is simply inert.
//!
//! # Example
//!
//! ```rust
//! use widget_actions::{Action, Axis, Engine, EngineContext, MoveStep, Variable, Widget};
//!
//! let mut engine = Engine::new();
//! engine.add_widget("track", Widget::new().with_position((100.0, 200.0)));
//! engine.add_widget(
//!     "knob",
//!     Widget::new().with_position((100.0, 200.0)).with_size((40.0, 0.0)),
//! );
//!
//! let step = MoveStep {
//!     id: "knob".to_string(),
//!     anchor_to: "track".to_string(),
//!     axis: Axis::X,
//!     range: 200,
//!     steps: Variable::Int(5),
//!     step_offset: 2,
//! };
//! assert!(engine.run(&step));
//! assert_eq!(engine.widget("knob").unwrap().position().x, 180.0);
//! ```

pub mod action;
pub mod context;
pub mod engine;
pub mod geometry;
pub mod scene;
pub mod text;
pub mod variable;
pub mod widget;

pub use action::*;
pub use context::{EngineContext, Queryable};
pub use engine::Engine;
pub use geometry::{anchor_position, Anchor, Axis, ParseAnchorError, Vec2};
pub use scene::{Frame, Scene, SceneError};
pub use text::{format_bindings, update_text, TextBinding};
pub use variable::Variable;
pub use widget::{ActionTable, Placement, Widget, WidgetRegistry};

/// Load a scene file, replay its frames and return the final widget report
///
/// # Example
///
/// ```rust
/// use widget_actions::replay_str;
///
/// let report = replay_str(r#"
///     [[widgets]]
///     id = "panel"
///     size = [100, 50]
///
///     [[frames]]
///     [[frames.commands]]
///     type = "add_to_position"
///     id = "panel"
///     offset = [5, 5]
/// "#, None).unwrap();
///
/// assert_eq!(report, "panel: pos=(5, 5) size=(100, 50)\n");
/// ```
pub fn replay_str(source: &str, frames: Option<usize>) -> Result<String, SceneError> {
    let scene = Scene::from_str(source)?;
    let mut engine = scene.build()?;
    scene.play(&mut engine, frames);
    Ok(engine.report())
}
