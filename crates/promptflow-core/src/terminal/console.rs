//! Console terminal backed by `console::Term`

use super::{Frame, FrameLine, Key, LineStyle, Terminal};
use colored::Colorize;
use console::Term;
use std::io;

/// Interactive terminal on stdout/stderr
///
/// Frames are redrawn in place by erasing the rows of the previous frame,
/// including rows added by lines wrapping at the terminal width.
/// The cursor is hidden while a frame is live and restored on `clear` and drop.
/// Reading keys from a stream that is not a terminal fails with `UnexpectedEof`.
pub struct ConsoleTerminal {
    term: Term,
    drawn: usize,
}

impl ConsoleTerminal {
    pub fn new(term: Term) -> Self {
        Self { term, drawn: 0 }
    }

    pub fn stdout() -> Self {
        Self::new(Term::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(Term::stderr())
    }

    /// Whether the underlying stream is attached to a real terminal
    pub fn is_interactive(&self) -> bool {
        self.term.is_term()
    }

    fn erase_frame(&mut self) -> io::Result<()> {
        if self.drawn > 0 {
            self.term.clear_last_lines(self.drawn)?;
            self.drawn = 0;
        }
        Ok(())
    }
}

impl Terminal for ConsoleTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        if !self.term.is_term() {
            return Err(not_a_terminal());
        }

        loop {
            let key = match self.term.read_key() {
                Ok(key) => key,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(Key::Interrupt),
                Err(e) => return Err(e),
            };

            if let Some(key) = map_key(key)? {
                return Ok(key);
            }
        }
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        self.erase_frame()?;
        self.term.hide_cursor()?;
        let (_, columns) = self.term.size();
        let mut rows = 0;
        for line in &frame.lines {
            let styled = style_line(line);
            rows += wrapped_rows(console::measure_text_width(&styled), columns as usize);
            self.term.write_line(&styled)?;
        }
        self.drawn = rows;
        self.term.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.erase_frame()?;
        self.term.show_cursor()
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }
}

impl Drop for ConsoleTerminal {
    fn drop(&mut self) {
        let _ = self.term.show_cursor();
    }
}

fn not_a_terminal() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input is not a terminal")
}

/// Map console keys to flow keys; unmapped keys are skipped
///
/// `Unknown` is what `console` reports for a stream without a terminal.
fn map_key(key: console::Key) -> io::Result<Option<Key>> {
    let key = match key {
        console::Key::Unknown => return Err(not_a_terminal()),
        console::Key::Enter => Key::Enter,
        console::Key::Backspace => Key::Backspace,
        console::Key::ArrowUp => Key::Up,
        console::Key::ArrowDown => Key::Down,
        console::Key::ArrowLeft => Key::Left,
        console::Key::ArrowRight => Key::Right,
        console::Key::CtrlC => Key::Interrupt,
        // Raw control characters: Ctrl-C, Ctrl-P, Ctrl-N
        console::Key::Char('\u{3}') => Key::Interrupt,
        console::Key::Char('\u{10}') => Key::Up,
        console::Key::Char('\u{e}') => Key::Down,
        console::Key::Char(c) if !c.is_control() => Key::Char(c),
        _ => return Ok(None),
    };
    Ok(Some(key))
}

/// Rows a line of `width` columns occupies on a terminal `columns` wide
fn wrapped_rows(width: usize, columns: usize) -> usize {
    if columns == 0 || width <= columns {
        1
    } else {
        width.div_ceil(columns)
    }
}

fn style_line(line: &FrameLine) -> String {
    let text = match line.cursor {
        Some(cursor) => with_cursor(&line.text, cursor),
        None => line.text.clone(),
    };

    match line.style {
        LineStyle::Prompt => text.cyan().bold().to_string(),
        LineStyle::Active => text.yellow().bold().to_string(),
        LineStyle::Item => text,
        LineStyle::Hint => text.dimmed().to_string(),
    }
}

/// Render the edit cursor as a reversed cell at char offset `cursor`
fn with_cursor(text: &str, cursor: usize) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut placed = false;
    for (i, c) in text.chars().enumerate() {
        if i == cursor {
            out.push_str(&c.to_string().reversed().to_string());
            placed = true;
        } else {
            out.push(c);
        }
    }
    if !placed {
        out.push_str(&" ".reversed().to_string());
    }
    out
}
