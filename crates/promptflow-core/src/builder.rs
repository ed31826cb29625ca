//! Fluent flow construction
//!
//! Each `with_*` call opens a step scope that `and()` closes, handing the
//! top-level builder back. Only the top-level builder can `build()`, and
//! building consumes it, so an open scope or a reused builder does not compile.
//!
//! ```ignore
//! let flow = FlowBuilder::new()
//!     .with_text_input("field1")
//!         .name("Field1")
//!         .default_value("defaultField1Value")
//!         .and()
//!     .with_single_selector("single1")
//!         .name("Single1")
//!         .select_items([("key1", "value1"), ("key2", "value2")])
//!         .and()
//!     .build()?;
//! ```

use crate::context::FlowResult;
use crate::executor::{FlowError, FlowExecutor};
use crate::step::{ResultMode, SelectItem, StepDefinition, StepKind};
use crate::terminal::Terminal;
use crate::value::{FlowValue, ValueKind};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// A flow that cannot be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("step id must not be empty")]
    EmptyId,

    #[error("duplicate step id '{0}'")]
    DuplicateId(String),

    #[error("step '{id}' needs a preset {kind} for its result mode")]
    MissingPreset { id: String, kind: ValueKind },

    #[error("step '{id}' expects a preset {expected}, got a {found}")]
    PresetShapeMismatch {
        id: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("choice step '{id}' has no items")]
    EmptyItems { id: String },

    #[error("choice step '{id}' has more than one item labelled '{label}'")]
    DuplicateItem { id: String, label: String },

    #[error("preset value '{value}' of step '{id}' is not one of its items")]
    UnknownPresetValue { id: String, value: String },
}

/// Immutable, validated sequence of steps
///
/// Holds no run state, so it may be run any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowDefinition {
    steps: Vec<StepDefinition>,
}

impl FlowDefinition {
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run with the default theme
    pub fn run<T: Terminal + ?Sized>(&self, terminal: &mut T) -> Result<FlowResult, FlowError> {
        FlowExecutor::new(terminal).run(self)
    }
}

/// Accumulates steps in call order
#[derive(Debug, Default)]
pub struct FlowBuilder {
    steps: Vec<StepDefinition>,
}

impl FlowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully described step
    pub fn step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_text_input(self, id: impl Into<String>) -> TextInputBuilder {
        TextInputBuilder {
            parent: self,
            step: StepDefinition::new(id, StepKind::Text { default: None }),
        }
    }

    pub fn with_path_input(self, id: impl Into<String>) -> PathInputBuilder {
        PathInputBuilder {
            parent: self,
            step: StepDefinition::new(id, StepKind::Path { default: None }),
        }
    }

    pub fn with_single_selector(self, id: impl Into<String>) -> SingleSelectorBuilder {
        SingleSelectorBuilder {
            parent: self,
            step: StepDefinition::new(id, StepKind::SingleChoice { items: Vec::new() }),
        }
    }

    pub fn with_multi_selector(self, id: impl Into<String>) -> MultiSelectorBuilder {
        MultiSelectorBuilder {
            parent: self,
            step: StepDefinition::new(id, StepKind::MultiChoice { items: Vec::new() }),
        }
    }

    /// Validate every step and freeze the flow
    pub fn build(self) -> Result<FlowDefinition, ConfigurationError> {
        let mut ids = HashSet::new();
        for step in &self.steps {
            step.validate()?;
            if !ids.insert(step.id.as_str()) {
                return Err(ConfigurationError::DuplicateId(step.id.clone()));
            }
        }

        tracing::debug!(steps = self.steps.len(), "flow built");
        Ok(FlowDefinition { steps: self.steps })
    }
}

/// Setters shared by all step scopes
macro_rules! common_step_setters {
    ($builder:ident) => {
        impl $builder {
            /// Display text shown in the prompt
            pub fn name(mut self, name: impl Into<String>) -> Self {
                self.step.name = Some(name.into());
                self
            }

            pub fn result_mode(mut self, mode: ResultMode) -> Self {
                self.step.mode = mode;
                self
            }

            /// Close this step and return to the flow builder
            pub fn and(self) -> FlowBuilder {
                self.parent.step(self.step)
            }
        }
    };
}

#[derive(Debug)]
pub struct TextInputBuilder {
    parent: FlowBuilder,
    step: StepDefinition,
}

common_step_setters!(TextInputBuilder);

impl TextInputBuilder {
    /// Used when the user submits empty input
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.step.kind = StepKind::Text {
            default: Some(value.into()),
        };
        self
    }

    pub fn result_value(mut self, value: impl Into<String>) -> Self {
        self.step.preset = Some(FlowValue::Text(value.into()));
        self
    }
}

#[derive(Debug)]
pub struct PathInputBuilder {
    parent: FlowBuilder,
    step: StepDefinition,
}

common_step_setters!(PathInputBuilder);

impl PathInputBuilder {
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.step.kind = StepKind::Path {
            default: Some(value.into()),
        };
        self
    }

    pub fn result_value(mut self, value: impl Into<PathBuf>) -> Self {
        self.step.preset = Some(FlowValue::Path(value.into()));
        self
    }
}

#[derive(Debug)]
pub struct SingleSelectorBuilder {
    parent: FlowBuilder,
    step: StepDefinition,
}

common_step_setters!(SingleSelectorBuilder);

impl SingleSelectorBuilder {
    /// Items in display order
    pub fn select_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SelectItem>,
    {
        self.step.kind = StepKind::SingleChoice {
            items: items.into_iter().map(Into::into).collect(),
        };
        self
    }

    pub fn result_value(mut self, value: impl Into<String>) -> Self {
        self.step.preset = Some(FlowValue::Selected(value.into()));
        self
    }
}

#[derive(Debug)]
pub struct MultiSelectorBuilder {
    parent: FlowBuilder,
    step: StepDefinition,
}

common_step_setters!(MultiSelectorBuilder);

impl MultiSelectorBuilder {
    /// Items in display order; also the order of committed values
    pub fn select_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SelectItem>,
    {
        self.step.kind = StepKind::MultiChoice {
            items: items.into_iter().map(Into::into).collect(),
        };
        self
    }

    pub fn result_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step.preset = Some(FlowValue::Selections(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }
}
