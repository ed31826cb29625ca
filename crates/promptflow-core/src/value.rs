//! Values committed by flow steps

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Shape of a committed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Path,
    Selected,
    Selections,
}

impl ValueKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Path => "path",
            ValueKind::Selected => "selected value",
            ValueKind::Selections => "list of selected values",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A value produced by one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlowValue {
    /// Free text from a text step
    Text(String),
    /// Path from a path step, never checked for existence
    Path(PathBuf),
    /// The value half of the chosen item of a single-choice step
    Selected(String),
    /// Values of all checked items of a multi-choice step, in item order
    Selections(Vec<String>),
}

impl FlowValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FlowValue::Text(_) => ValueKind::Text,
            FlowValue::Path(_) => ValueKind::Path,
            FlowValue::Selected(_) => ValueKind::Selected,
            FlowValue::Selections(_) => ValueKind::Selections,
        }
    }
}

impl fmt::Display for FlowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowValue::Text(s) | FlowValue::Selected(s) => write!(f, "{}", s),
            FlowValue::Path(p) => write!(f, "{}", p.display()),
            FlowValue::Selections(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

/// Conversion used by typed retrieval from a `FlowContext`
///
/// Returns `None` when the value has a shape the target type cannot hold.
pub trait FromFlowValue: Sized {
    /// Kind reported in mismatch errors
    const EXPECTED: ValueKind;

    fn from_flow_value(value: &FlowValue) -> Option<Self>;
}

/// Text and single selections are both string-shaped
impl FromFlowValue for String {
    const EXPECTED: ValueKind = ValueKind::Text;

    fn from_flow_value(value: &FlowValue) -> Option<Self> {
        match value {
            FlowValue::Text(s) | FlowValue::Selected(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromFlowValue for PathBuf {
    const EXPECTED: ValueKind = ValueKind::Path;

    fn from_flow_value(value: &FlowValue) -> Option<Self> {
        match value {
            FlowValue::Path(p) => Some(p.clone()),
            _ => None,
        }
    }
}

impl FromFlowValue for Vec<String> {
    const EXPECTED: ValueKind = ValueKind::Selections;

    fn from_flow_value(value: &FlowValue) -> Option<Self> {
        match value {
            FlowValue::Selections(values) => Some(values.clone()),
            _ => None,
        }
    }
}
