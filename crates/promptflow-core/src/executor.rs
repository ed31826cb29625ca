//! Sequential flow execution

use crate::builder::FlowDefinition;
use crate::config::PromptTheme;
use crate::context::{FlowContext, FlowResult, FlowStatus};
use crate::prompt::{
    interact, MultiChoicePrompt, Outcome, PathPrompt, SingleChoicePrompt, TextPrompt,
};
use crate::step::{ResultMode, StepDefinition, StepKind};
use crate::terminal::Terminal;
use crate::value::FlowValue;
use std::io;
use thiserror::Error;

/// Failure of the terminal underneath a run
///
/// A user interrupt is not an error; it yields an `Aborted` result.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("terminal I/O failed during step '{step}': {source}")]
    Terminal {
        step: String,
        #[source]
        source: io::Error,
    },
}

/// Walks a `FlowDefinition` step by step against one terminal
///
/// The executor borrows the terminal mutably for its whole lifetime, so no
/// other consumer can touch it while a run is in progress.
pub struct FlowExecutor<'t, T: Terminal + ?Sized> {
    terminal: &'t mut T,
    theme: PromptTheme,
}

impl<'t, T: Terminal + ?Sized> FlowExecutor<'t, T> {
    pub fn new(terminal: &'t mut T) -> Self {
        Self {
            terminal,
            theme: PromptTheme::default(),
        }
    }

    pub fn with_theme(mut self, theme: PromptTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Run every step in declaration order, blocking on terminal input
    pub fn run(&mut self, flow: &FlowDefinition) -> Result<FlowResult, FlowError> {
        let mut context = FlowContext::new();

        for step in flow.steps() {
            tracing::debug!(step = %step.id, mode = ?step.mode, "running step");

            let value = match self.run_step(step) {
                Ok(Outcome::Committed(value)) => value,
                Ok(Outcome::Aborted) => {
                    tracing::debug!(step = %step.id, committed = context.len(), "flow aborted");
                    return Ok(FlowResult::new(FlowStatus::Aborted, context));
                }
                Err(source) => {
                    return Err(FlowError::Terminal {
                        step: step.id.clone(),
                        source,
                    })
                }
            };

            tracing::debug!(step = %step.id, kind = %value.kind(), "step committed");
            context.commit(&step.id, value);
        }

        Ok(FlowResult::new(FlowStatus::Completed, context))
    }

    fn run_step(&mut self, step: &StepDefinition) -> io::Result<Outcome<FlowValue>> {
        if step.mode == ResultMode::Preset {
            if let Some(value) = &step.preset {
                tracing::debug!(step = %step.id, "preset value, skipping prompt");
                return Ok(Outcome::Committed(value.clone()));
            }
        }

        // Verify mode seeds the prompt with the preset value
        let seed = match step.mode {
            ResultMode::Verify => step.preset.as_ref(),
            _ => None,
        };
        let name = step.display_name();
        let terminal = &mut *self.terminal;
        let theme = &self.theme;

        let outcome = match &step.kind {
            StepKind::Text { default } => {
                let default = seed_text(seed).or_else(|| default.clone());
                let mut prompt = TextPrompt::new(name, default);
                map_outcome(interact(&mut prompt, terminal, theme)?, FlowValue::Text)
            }
            StepKind::Path { default } => {
                let default = seed_text(seed).or_else(|| default.clone());
                let mut prompt = PathPrompt::new(name, default);
                map_outcome(interact(&mut prompt, terminal, theme)?, FlowValue::Path)
            }
            StepKind::SingleChoice { items } => {
                let initial = match seed {
                    Some(FlowValue::Selected(value)) => Some(value.as_str()),
                    _ => None,
                };
                let mut prompt = SingleChoicePrompt::new(name, items.clone(), initial);
                map_outcome(interact(&mut prompt, terminal, theme)?, FlowValue::Selected)
            }
            StepKind::MultiChoice { items } => {
                let initial: &[String] = match seed {
                    Some(FlowValue::Selections(values)) => values,
                    _ => &[],
                };
                let mut prompt = MultiChoicePrompt::new(name, items.clone(), initial);
                map_outcome(interact(&mut prompt, terminal, theme)?, FlowValue::Selections)
            }
        };

        Ok(outcome)
    }
}

fn seed_text(seed: Option<&FlowValue>) -> Option<String> {
    match seed {
        Some(FlowValue::Text(text)) => Some(text.clone()),
        Some(FlowValue::Path(path)) => Some(path.display().to_string()),
        _ => None,
    }
}

fn map_outcome<V>(outcome: Outcome<V>, wrap: impl FnOnce(V) -> FlowValue) -> Outcome<FlowValue> {
    match outcome {
        Outcome::Committed(value) => Outcome::Committed(wrap(value)),
        Outcome::Aborted => Outcome::Aborted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FlowBuilder;
    use crate::terminal::scripted::ScriptedTerminal;
    use crate::terminal::Key;
    use std::path::PathBuf;

    fn typed(text: &str) -> Vec<Key> {
        text.chars().map(Key::Char).collect()
    }

    #[test]
    fn test_default_substitution() {
        let flow = FlowBuilder::new()
            .with_text_input("f1")
            .default_value("D")
            .and()
            .with_text_input("f2")
            .default_value("D")
            .and()
            .build()
            .unwrap();

        let mut keys = vec![Key::Enter];
        keys.extend(typed("X"));
        keys.push(Key::Enter);
        let mut terminal = ScriptedTerminal::from_keys(keys);

        let result = flow.run(&mut terminal).unwrap();
        assert!(result.is_completed());
        assert_eq!(result.context().text("f1").unwrap(), "D");
        assert_eq!(result.context().text("f2").unwrap(), "X");
    }

    #[test]
    fn test_preset_steps_never_touch_terminal() {
        let flow = FlowBuilder::new()
            .with_text_input("id1")
            .name("name")
            .result_value("value1")
            .result_mode(ResultMode::Preset)
            .and()
            .with_path_input("id2")
            .result_value("value2")
            .result_mode(ResultMode::Preset)
            .and()
            .with_single_selector("id3")
            .result_value("value3")
            .result_mode(ResultMode::Preset)
            .and()
            .with_multi_selector("id4")
            .result_values(["value4"])
            .result_mode(ResultMode::Preset)
            .and()
            .build()
            .unwrap();

        // No keys and no feeder: any read would fail
        let (feeder, mut terminal) = ScriptedTerminal::channel();
        drop(feeder);

        let result = flow.run(&mut terminal).unwrap();
        assert!(result.is_completed());
        assert_eq!(terminal.draw_count(), 0);
        assert_eq!(terminal.clear_count(), 0);
        assert!(terminal.lines().is_empty());

        let id1: String = result.get("id1").unwrap();
        let id2: PathBuf = result.get("id2").unwrap();
        let id3: String = result.get("id3").unwrap();
        let id4: Vec<String> = result.get("id4").unwrap();
        assert_eq!(id1, "value1");
        assert!(id2.to_string_lossy().contains("value2"));
        assert_eq!(id3, "value3");
        assert_eq!(id4, vec!["value4"]);
    }

    #[test]
    fn test_interrupt_keeps_prior_values() {
        let flow = FlowBuilder::new()
            .with_text_input("a")
            .and()
            .with_single_selector("b")
            .select_items([("k1", "v1"), ("k2", "v2")])
            .and()
            .with_text_input("c")
            .and()
            .build()
            .unwrap();

        let mut keys = typed("first");
        keys.extend([Key::Enter, Key::Down, Key::Interrupt]);
        let mut terminal = ScriptedTerminal::from_keys(keys);

        let result = flow.run(&mut terminal).unwrap();
        assert_eq!(result.status(), FlowStatus::Aborted);
        assert_eq!(result.context().text("a").unwrap(), "first");
        assert!(!result.context().contains("b"));
        assert!(!result.context().contains("c"));
        assert_eq!(result.context().len(), 1);
        assert_eq!(terminal.lines(), ["a first"]);
    }

    #[test]
    fn test_verify_mode_seeds_prompts() {
        let flow = FlowBuilder::new()
            .with_text_input("t")
            .default_value("ignored")
            .result_value("seeded")
            .result_mode(ResultMode::Verify)
            .and()
            .with_single_selector("s")
            .select_items([("k1", "v1"), ("k2", "v2"), ("k3", "v3")])
            .result_value("v3")
            .result_mode(ResultMode::Verify)
            .and()
            .with_multi_selector("m")
            .select_items([("k1", "v1"), ("k2", "v2"), ("k3", "v3")])
            .result_values(["v3"])
            .result_mode(ResultMode::Verify)
            .and()
            .build()
            .unwrap();

        let mut terminal =
            ScriptedTerminal::from_keys([Key::Enter, Key::Enter, Key::Char(' '), Key::Enter]);
        let result = flow.run(&mut terminal).unwrap();
        assert!(result.is_completed());
        assert_eq!(result.context().text("t").unwrap(), "seeded");
        assert_eq!(result.context().selected("s").unwrap(), "v3");
        assert_eq!(result.context().selections("m").unwrap(), ["v1", "v3"]);
    }

    #[test]
    fn test_exhausted_input_is_an_error() {
        let flow = FlowBuilder::new()
            .with_text_input("a")
            .and()
            .build()
            .unwrap();
        let mut terminal = ScriptedTerminal::from_keys(typed("abc"));

        match flow.run(&mut terminal) {
            Err(FlowError::Terminal { step, source }) => {
                assert_eq!(step, "a");
                assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_definition_can_run_twice() {
        let flow = FlowBuilder::new()
            .with_text_input("a")
            .default_value("D")
            .and()
            .build()
            .unwrap();

        for _ in 0..2 {
            let mut terminal = ScriptedTerminal::from_keys([Key::Enter]);
            let result = FlowExecutor::new(&mut terminal)
                .with_theme(PromptTheme::ascii())
                .run(&flow)
                .unwrap();
            assert_eq!(result.context().text("a").unwrap(), "D");
        }
    }

    #[test]
    fn test_empty_flow_completes() {
        let flow = FlowBuilder::new().build().unwrap();
        let (_feeder, mut terminal) = ScriptedTerminal::channel();
        let result = flow.run(&mut terminal).unwrap();
        assert!(result.is_completed());
        assert!(result.context().is_empty());
    }
}
