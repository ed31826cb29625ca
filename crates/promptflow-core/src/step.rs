//! Step definitions

use crate::builder::ConfigurationError;
use crate::value::{FlowValue, ValueKind};
use std::collections::HashSet;

/// One selectable entry of a choice step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    /// Text shown to the user
    pub label: String,
    /// Value committed when the item is chosen
    pub value: String,
}

impl SelectItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl<L: Into<String>, V: Into<String>> From<(L, V)> for SelectItem {
    fn from((label, value): (L, V)) -> Self {
        SelectItem::new(label, value)
    }
}

/// Kind of prompt a step renders, with its kind-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    Text { default: Option<String> },
    Path { default: Option<String> },
    SingleChoice { items: Vec<SelectItem> },
    MultiChoice { items: Vec<SelectItem> },
}

impl StepKind {
    /// Shape of the value this kind commits
    pub fn value_kind(&self) -> ValueKind {
        match self {
            StepKind::Text { .. } => ValueKind::Text,
            StepKind::Path { .. } => ValueKind::Path,
            StepKind::SingleChoice { .. } => ValueKind::Selected,
            StepKind::MultiChoice { .. } => ValueKind::Selections,
        }
    }

    pub fn items(&self) -> &[SelectItem] {
        match self {
            StepKind::SingleChoice { items } | StepKind::MultiChoice { items } => items,
            _ => &[],
        }
    }
}

/// How a step obtains its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultMode {
    /// Render the prompt and read from the terminal
    #[default]
    Interactive,
    /// Commit the preset value without touching the terminal
    Preset,
    /// Render the prompt with the preset value as its starting point
    Verify,
}

/// Description of one prompt in a flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: String,
    /// Display text; the id is shown when absent
    pub name: Option<String>,
    pub kind: StepKind,
    pub mode: ResultMode,
    /// Required for `Preset` and `Verify` modes
    pub preset: Option<FlowValue>,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind,
            mode: ResultMode::Interactive,
            preset: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Check the step on its own; id uniqueness is checked by the builder
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.id.trim().is_empty() {
            return Err(ConfigurationError::EmptyId);
        }

        if let Some(preset) = &self.preset {
            let expected = self.kind.value_kind();
            if preset.kind() != expected {
                return Err(ConfigurationError::PresetShapeMismatch {
                    id: self.id.clone(),
                    expected,
                    found: preset.kind(),
                });
            }
        }

        if self.mode != ResultMode::Interactive && self.preset.is_none() {
            return Err(ConfigurationError::MissingPreset {
                id: self.id.clone(),
                kind: self.kind.value_kind(),
            });
        }

        // Preset choice steps never render, so they may carry no items
        let items = self.kind.items();
        if matches!(
            self.kind,
            StepKind::SingleChoice { .. } | StepKind::MultiChoice { .. }
        ) {
            if items.is_empty() && self.mode != ResultMode::Preset {
                return Err(ConfigurationError::EmptyItems {
                    id: self.id.clone(),
                });
            }

            let mut labels = HashSet::new();
            for item in items {
                if !labels.insert(item.label.as_str()) {
                    return Err(ConfigurationError::DuplicateItem {
                        id: self.id.clone(),
                        label: item.label.clone(),
                    });
                }
            }
        }

        if self.mode == ResultMode::Verify {
            self.check_verify_preset(items)?;
        }

        Ok(())
    }

    fn check_verify_preset(&self, items: &[SelectItem]) -> Result<(), ConfigurationError> {
        let wanted: Vec<&str> = match &self.preset {
            Some(FlowValue::Selected(value)) => vec![value.as_str()],
            Some(FlowValue::Selections(values)) => values.iter().map(String::as_str).collect(),
            _ => return Ok(()),
        };

        for value in wanted {
            if !items.iter().any(|item| item.value == value) {
                return Err(ConfigurationError::UnknownPresetValue {
                    id: self.id.clone(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}
