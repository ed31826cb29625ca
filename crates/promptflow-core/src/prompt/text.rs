//! Free-text and path prompts

use super::{title, Prompt, Transition};
use crate::config::PromptTheme;
use crate::terminal::{Frame, Key, LineStyle};
use std::path::PathBuf;

/// Single-line editor with a char-indexed cursor
#[derive(Debug, Clone, Default)]
struct LineEditor {
    input: String,
    cursor: usize,
}

impl LineEditor {
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.input.insert(at, c);
        self.cursor += 1;
    }

    fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.input.remove(at);
        }
    }

    fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn move_cursor_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    /// Apply an editing key; returns true on Enter
    fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => self.insert_char(c),
            Key::Backspace => self.delete_char(),
            Key::Left => self.move_cursor_left(),
            Key::Right => self.move_cursor_right(),
            Key::Enter => return true,
            Key::Up | Key::Down | Key::Interrupt => {}
        }
        false
    }
}

/// Reads one line; empty input resolves to the default, or to ""
#[derive(Debug, Clone)]
pub struct TextPrompt {
    name: String,
    default: Option<String>,
    editor: LineEditor,
}

impl TextPrompt {
    pub fn new(name: impl Into<String>, default: Option<String>) -> Self {
        Self {
            name: name.into(),
            default,
            editor: LineEditor::default(),
        }
    }

    fn resolve(&self) -> String {
        if self.editor.input.is_empty() {
            self.default.clone().unwrap_or_default()
        } else {
            self.editor.input.clone()
        }
    }
}

impl Prompt for TextPrompt {
    type Output = String;

    fn frame(&self, theme: &PromptTheme) -> Frame {
        let mut head = title(theme, &self.name);
        if let Some(default) = &self.default {
            head.push_str(&format!(" [{}]", default));
        }
        head.push_str(" > ");

        let offset = head.chars().count() + self.editor.cursor;
        let mut frame = Frame::new();
        frame.push_input(format!("{}{}", head, self.editor.input), offset);
        if theme.show_help {
            let help = theme.help_line(&[("Enter", "Confirm"), ("Ctrl+C", "Cancel")]);
            frame.push(help, LineStyle::Hint);
        }
        frame
    }

    fn handle_key(&mut self, key: Key) -> Transition<String> {
        if self.editor.handle_key(key) {
            Transition::Commit(self.resolve())
        } else {
            Transition::Idle
        }
    }

    fn summary(&self, value: &String) -> String {
        format!("{} {}", self.name, value)
    }
}

/// Text prompt committing a path; the path is not checked for existence
#[derive(Debug, Clone)]
pub struct PathPrompt {
    inner: TextPrompt,
}

impl PathPrompt {
    pub fn new(name: impl Into<String>, default: Option<String>) -> Self {
        Self {
            inner: TextPrompt::new(name, default),
        }
    }
}

impl Prompt for PathPrompt {
    type Output = PathBuf;

    fn frame(&self, theme: &PromptTheme) -> Frame {
        self.inner.frame(theme)
    }

    fn handle_key(&mut self, key: Key) -> Transition<PathBuf> {
        match self.inner.handle_key(key) {
            Transition::Commit(raw) => Transition::Commit(PathBuf::from(raw)),
            Transition::Idle => Transition::Idle,
        }
    }

    fn summary(&self, value: &PathBuf) -> String {
        format!("{} {}", self.inner.name, value.display())
    }
}
