//! Executable commands
//!
//! Every command implements [`Action`]: it runs against the engine context and
//! reports success. Commands never own widgets; they name them by id and
//! resolve them on every execution, so a command that refers to a missing
//! widget simply does nothing.
//!
//! [`Command`] is the closed set of built-in commands. Engines may put their
//! own [`Action`] implementations into widget action tables as well.

pub mod drawable;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::context::EngineContext;

pub use drawable::*;

/// A unit of work run against the engine context
pub trait Action: fmt::Debug {
    /// Run the action. Only delegated actions ever report `false`.
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool;
}

/// Shared handle to an action, as stored in widget action tables
pub type SharedAction = Rc<dyn Action>;

/// 16-bit hash of an action name
pub const fn hash16(name: &str) -> u16 {
    let bytes = name.as_bytes();
    let mut hash: u16 = 5381;
    let mut i = bytes.len();
    while i > 0 {
        i -= 1;
        hash = hash.wrapping_mul(33) ^ bytes[i] as u16;
    }
    hash
}

/// An action name together with its precomputed hash
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ActionName {
    name: String,
    hash: u16,
}

impl ActionName {
    /// Fired by text widgets when their rendered text changes
    pub const CHANGE: &'static str = "change";
    pub const CLICK: &'static str = "click";

    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let hash = hash16(&name);
        Self { name, hash }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hash(&self) -> u16 {
        self.hash
    }
}

impl From<String> for ActionName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for ActionName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<ActionName> for String {
    fn from(name: ActionName) -> Self {
        name.name
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Built-in commands, tagged by `type` when deserialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    AddToPosition(AddToPosition),
    AddToSize(AddToSize),
    SetPosition(SetPosition),
    SetSize(SetSize),
    SetPositionAxis(SetPositionAxis),
    SetSizeAxis(SetSizeAxis),
    Delete(Delete),
    Anchor(AnchorToWidget),
    AnchorToFocused(AnchorToFocused),
    AxisAnchorToFocused(AxisAnchorToFocused),
    AnchorSize(AnchorSize),
    ResizeOnMouse(ResizeOnMouse),
    CenterOnMouse(CenterOnMouse),
    Move(Move),
    MoveStep(MoveStep),
    Resize(Resize),
    ResizeToPosition(ResizeToPosition),
    ExecuteAction(ExecuteAction),
    SetAction(SetAction),
}

impl Action for Command {
    fn execute(&self, ctx: &mut dyn EngineContext) -> bool {
        match self {
            Command::AddToPosition(c) => c.execute(ctx),
            Command::AddToSize(c) => c.execute(ctx),
            Command::SetPosition(c) => c.execute(ctx),
            Command::SetSize(c) => c.execute(ctx),
            Command::SetPositionAxis(c) => c.execute(ctx),
            Command::SetSizeAxis(c) => c.execute(ctx),
            Command::Delete(c) => c.execute(ctx),
            Command::Anchor(c) => c.execute(ctx),
            Command::AnchorToFocused(c) => c.execute(ctx),
            Command::AxisAnchorToFocused(c) => c.execute(ctx),
            Command::AnchorSize(c) => c.execute(ctx),
            Command::ResizeOnMouse(c) => c.execute(ctx),
            Command::CenterOnMouse(c) => c.execute(ctx),
            Command::Move(c) => c.execute(ctx),
            Command::MoveStep(c) => c.execute(ctx),
            Command::Resize(c) => c.execute(ctx),
            Command::ResizeToPosition(c) => c.execute(ctx),
            Command::ExecuteAction(c) => c.execute(ctx),
            Command::SetAction(c) => c.execute(ctx),
        }
    }
}

macro_rules! impl_into_command {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Command {
                fn from(c: $ty) -> Self {
                    Command::$variant(c)
                }
            }
        )*
    };
}

impl_into_command!(
    AddToPosition(AddToPosition),
    AddToSize(AddToSize),
    SetPosition(SetPosition),
    SetSize(SetSize),
    SetPositionAxis(SetPositionAxis),
    SetSizeAxis(SetSizeAxis),
    Delete(Delete),
    Anchor(AnchorToWidget),
    AnchorToFocused(AnchorToFocused),
    AxisAnchorToFocused(AxisAnchorToFocused),
    AnchorSize(AnchorSize),
    ResizeOnMouse(ResizeOnMouse),
    CenterOnMouse(CenterOnMouse),
    Move(Move),
    MoveStep(MoveStep),
    Resize(Resize),
    ResizeToPosition(ResizeToPosition),
    ExecuteAction(ExecuteAction),
    SetAction(SetAction),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash16_is_stable() {
        const CHANGE: u16 = hash16("change");
        assert_eq!(CHANGE, hash16("change"));
        assert_ne!(hash16("change"), hash16("click"));
        assert_eq!(hash16(""), 5381);
    }

    #[test]
    fn test_hash16_known_value() {
        // "a": 5381 * 33 ^ 97, wrapped to 16 bits
        let expected = (5381u32 * 33 % 65536) as u16 ^ 97;
        assert_eq!(hash16("a"), expected);
    }

    #[test]
    fn test_action_name_carries_hash() {
        let name = ActionName::new(ActionName::CHANGE);
        assert_eq!(name.name(), "change");
        assert_eq!(name.hash(), hash16("change"));
        assert_eq!(name.to_string(), "change");
    }
}
