//! Prompt renderers, one per step kind
//!
//! Every renderer is a small state machine: it builds a frame from its
//! state, reacts to keys while idle and ends with a committed value.
//! Interrupts are handled once, in `interact`, for all of them.

pub mod choice;
pub mod text;

pub use choice::{MultiChoicePrompt, SingleChoicePrompt};
pub use text::{PathPrompt, TextPrompt};

use crate::config::PromptTheme;
use crate::terminal::{Frame, Key, Terminal};
use std::io;

/// Result of feeding one key to a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<V> {
    /// Keep waiting, possibly with updated state
    Idle,
    Commit(V),
}

/// How an interactive prompt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V> {
    Committed(V),
    Aborted,
}

pub trait Prompt {
    type Output;

    fn frame(&self, theme: &PromptTheme) -> Frame;

    fn handle_key(&mut self, key: Key) -> Transition<Self::Output>;

    /// Permanent line written once the prompt commits `value`
    fn summary(&self, value: &Self::Output) -> String;
}

/// Run `prompt` against `terminal` until it commits or the user interrupts
pub fn interact<P, T>(
    prompt: &mut P,
    terminal: &mut T,
    theme: &PromptTheme,
) -> io::Result<Outcome<P::Output>>
where
    P: Prompt,
    T: Terminal + ?Sized,
{
    loop {
        terminal.draw(&prompt.frame(theme))?;

        let key = terminal.read_key()?;
        if key == Key::Interrupt {
            terminal.clear()?;
            return Ok(Outcome::Aborted);
        }

        if let Transition::Commit(value) = prompt.handle_key(key) {
            terminal.clear()?;
            terminal.write_line(&prompt.summary(&value))?;
            return Ok(Outcome::Committed(value));
        }
    }
}

/// Title line shared by all prompts
fn title(theme: &PromptTheme, name: &str) -> String {
    format!("{} {}", theme.prompt_marker, name)
}
