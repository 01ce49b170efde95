//! Dynamically typed values used by commands, bindings and the variable table

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value that is either a literal or, when it holds a string, a key naming
/// a variable or property to resolve through the engine context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variable {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Variable {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Variable::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variable::String(v) => Some(v),
            _ => None,
        }
    }

    /// Convert between bool and numeric tags; strings never convert
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Variable::Bool(v) => Some(*v),
            Variable::Int(v) => Some(*v != 0),
            Variable::Float(v) => Some(*v != 0.0),
            Variable::String(_) => None,
        }
    }

    /// Float values truncate toward zero
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Variable::Bool(v) => Some(i64::from(*v)),
            Variable::Int(v) => Some(*v),
            Variable::Float(v) => Some(*v as i64),
            Variable::String(_) => None,
        }
    }

    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Variable::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Variable::Int(v) => Some(*v as f64),
            Variable::Float(v) => Some(*v),
            Variable::String(_) => None,
        }
    }
}

impl Default for Variable {
    fn default() -> Self {
        Variable::Int(0)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Bool(v) => write!(f, "{v}"),
            Variable::Int(v) => write!(f, "{v}"),
            Variable::Float(v) => write!(f, "{v}"),
            Variable::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Variable {
    fn from(v: bool) -> Self {
        Variable::Bool(v)
    }
}

impl From<i64> for Variable {
    fn from(v: i64) -> Self {
        Variable::Int(v)
    }
}

impl From<i32> for Variable {
    fn from(v: i32) -> Self {
        Variable::Int(i64::from(v))
    }
}

impl From<u32> for Variable {
    fn from(v: u32) -> Self {
        Variable::Int(i64::from(v))
    }
}

impl From<f64> for Variable {
    fn from(v: f64) -> Self {
        Variable::Float(v)
    }
}

impl From<f32> for Variable {
    fn from(v: f32) -> Self {
        Variable::Float(f64::from(v))
    }
}

impl From<&str> for Variable {
    fn from(v: &str) -> Self {
        Variable::String(v.to_string())
    }
}

impl From<String> for Variable {
    fn from(v: String) -> Self {
        Variable::String(v)
    }
}
