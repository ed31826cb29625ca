//! Channel-backed terminal for tests and non-interactive runs

use super::{Frame, Key, Terminal};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};

/// Sending half of a `ScriptedTerminal`, usable from another thread
#[derive(Debug, Clone)]
pub struct KeyFeeder {
    sender: Sender<Key>,
}

impl KeyFeeder {
    /// Queue one key; returns false once the terminal is gone
    pub fn send(&self, key: Key) -> bool {
        self.sender.send(key).is_ok()
    }

    /// Queue each character of `text`
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|c| self.send(Key::Char(c)))
    }

    pub fn send_all(&self, keys: impl IntoIterator<Item = Key>) -> bool {
        keys.into_iter().all(|key| self.send(key))
    }
}

/// Terminal that reads queued keys and records everything drawn
///
/// Reading past the end of the queue, once every feeder is dropped, fails
/// with `UnexpectedEof` instead of blocking forever.
#[derive(Debug)]
pub struct ScriptedTerminal {
    keys: Receiver<Key>,
    frames: Vec<Frame>,
    lines: Vec<String>,
    clears: usize,
}

impl ScriptedTerminal {
    /// Terminal plus a feeder for supplying keys while a flow runs
    pub fn channel() -> (KeyFeeder, Self) {
        let (sender, keys) = mpsc::channel();
        let terminal = Self {
            keys,
            frames: Vec::new(),
            lines: Vec::new(),
            clears: 0,
        };
        (KeyFeeder { sender }, terminal)
    }

    /// Terminal with a fixed key script
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let (feeder, terminal) = Self::channel();
        feeder.send_all(keys);
        terminal
    }

    /// Every frame drawn so far, oldest first
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn draw_count(&self) -> usize {
        self.frames.len()
    }

    /// Permanent lines written so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Permanent output joined into one string
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }
}

impl Terminal for ScriptedTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        self.keys.recv().map_err(|_| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted")
        })
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_reads_script_in_order_then_eof() {
        let mut terminal = ScriptedTerminal::from_keys([Key::Down, Key::Enter]);
        assert_eq!(terminal.read_key().unwrap(), Key::Down);
        assert_eq!(terminal.read_key().unwrap(), Key::Enter);
        let err = terminal.read_key().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_feeder_works_across_threads() {
        let (feeder, mut terminal) = ScriptedTerminal::channel();
        let handle = thread::spawn(move || {
            feeder.type_text("ab");
        });
        assert_eq!(terminal.read_key().unwrap(), Key::Char('a'));
        assert_eq!(terminal.read_key().unwrap(), Key::Char('b'));
        handle.join().unwrap();
    }

    #[test]
    fn test_records_output() {
        let (_feeder, mut terminal) = ScriptedTerminal::channel();
        let mut frame = Frame::new();
        frame.push("? Name", crate::terminal::LineStyle::Prompt);
        terminal.draw(&frame).unwrap();
        terminal.clear().unwrap();
        terminal.write_line("Name value").unwrap();
        assert_eq!(terminal.draw_count(), 1);
        assert_eq!(terminal.clear_count(), 1);
        assert_eq!(terminal.output(), "Name value");
    }
}
