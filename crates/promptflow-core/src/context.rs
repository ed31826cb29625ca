//! Flow context and result

use crate::value::{FlowValue, FromFlowValue, ValueKind};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Retrieval misuse on a `FlowContext`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("no value committed for '{id}'")]
    Missing { id: String },

    #[error("value for '{id}' is a {found}, not a {expected}")]
    ShapeMismatch {
        id: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Committed values keyed by step id, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlowContext {
    values: IndexMap<String, FlowValue>,
}

impl FlowContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Ids are unique per flow, so a step commits at most once
    pub(crate) fn commit(&mut self, id: &str, value: FlowValue) {
        debug_assert!(!self.values.contains_key(id), "step '{}' committed twice", id);
        self.values.insert(id.to_string(), value);
    }

    /// Typed retrieval, converting through `FromFlowValue`
    pub fn get<T: FromFlowValue>(&self, id: &str) -> Result<T, ContextError> {
        let value = self.value(id)?;
        T::from_flow_value(value).ok_or_else(|| ContextError::ShapeMismatch {
            id: id.to_string(),
            expected: T::EXPECTED,
            found: value.kind(),
        })
    }

    /// Raw access to a committed value
    pub fn value(&self, id: &str) -> Result<&FlowValue, ContextError> {
        self.values.get(id).ok_or_else(|| ContextError::Missing {
            id: id.to_string(),
        })
    }

    pub fn text(&self, id: &str) -> Result<&str, ContextError> {
        match self.value(id)? {
            FlowValue::Text(s) => Ok(s),
            other => Err(mismatch(id, ValueKind::Text, other)),
        }
    }

    pub fn path(&self, id: &str) -> Result<&Path, ContextError> {
        match self.value(id)? {
            FlowValue::Path(p) => Ok(p),
            other => Err(mismatch(id, ValueKind::Path, other)),
        }
    }

    pub fn selected(&self, id: &str) -> Result<&str, ContextError> {
        match self.value(id)? {
            FlowValue::Selected(s) => Ok(s),
            other => Err(mismatch(id, ValueKind::Selected, other)),
        }
    }

    pub fn selections(&self, id: &str) -> Result<&[String], ContextError> {
        match self.value(id)? {
            FlowValue::Selections(values) => Ok(values),
            other => Err(mismatch(id, ValueKind::Selections, other)),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in commit order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlowValue)> {
        self.values.iter().map(|(id, value)| (id.as_str(), value))
    }
}

fn mismatch(id: &str, expected: ValueKind, found: &FlowValue) -> ContextError {
    ContextError::ShapeMismatch {
        id: id.to_string(),
        expected,
        found: found.kind(),
    }
}

/// How a flow run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    Completed,
    Aborted,
}

/// Frozen outcome of one flow run
///
/// An aborted result keeps every value committed before the interrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowResult {
    status: FlowStatus,
    context: FlowContext,
}

impl FlowResult {
    pub(crate) fn new(status: FlowStatus, context: FlowContext) -> Self {
        Self { status, context }
    }

    pub fn status(&self) -> FlowStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == FlowStatus::Completed
    }

    pub fn context(&self) -> &FlowContext {
        &self.context
    }

    pub fn into_context(self) -> FlowContext {
        self.context
    }

    pub fn get<T: FromFlowValue>(&self, id: &str) -> Result<T, ContextError> {
        self.context.get(id)
    }
}
