//! Terminal abstraction consumed by the flow engine
//!
//! This module provides:
//! - Abstract input events (`Key`)
//! - Plain, styled frames drawn by prompts (`Frame`)
//! - A scripted terminal for tests and non-interactive runs
//! - A console terminal (only with the `tui` feature)

pub mod scripted;

#[cfg(feature = "tui")]
pub mod console;

use std::io;

/// Input event read from a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Backspace,
    Left,
    Right,
    Up,
    Down,
    /// Confirms the current prompt
    Enter,
    /// Cancels the whole flow
    Interrupt,
}

/// Visual role of a frame line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Prompt,
    Item,
    Active,
    Hint,
}

/// One line of a prompt frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLine {
    pub text: String,
    pub style: LineStyle,
    /// Char offset of the edit cursor, for lines holding text input
    pub cursor: Option<usize>,
}

/// Everything a prompt shows at one moment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<FrameLine>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, style: LineStyle) {
        self.lines.push(FrameLine {
            text: text.into(),
            style,
            cursor: None,
        });
    }

    pub fn push_input(&mut self, text: impl Into<String>, cursor: usize) {
        self.lines.push(FrameLine {
            text: text.into(),
            style: LineStyle::Prompt,
            cursor: Some(cursor),
        });
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Unstyled text of all lines
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Terminal surface a flow runs against
///
/// A run needs exclusive use of the terminal for its whole duration.
pub trait Terminal {
    /// Block until the next input event arrives
    fn read_key(&mut self) -> io::Result<Key>;

    /// Replace the live prompt area with `frame`
    fn draw(&mut self, frame: &Frame) -> io::Result<()>;

    /// Erase the live prompt area
    fn clear(&mut self) -> io::Result<()>;

    /// Write a permanent line below earlier output
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn read_key(&mut self) -> io::Result<Key> {
        (**self).read_key()
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        (**self).draw(frame)
    }

    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

impl<T: Terminal + ?Sized> Terminal for Box<T> {
    fn read_key(&mut self) -> io::Result<Key> {
        (**self).read_key()
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        (**self).draw(frame)
    }

    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}
