//! Key scripts for non-interactive runs
//!
//! A script is a comma-separated list of tokens:
//! `enter`, `up`, `down`, `left`, `right`, `space`, `backspace`,
//! `ctrl-c` (or `interrupt`), `comma` and `type:<text>`, which types each
//! character. Commas always separate tokens, so a comma inside typed text is
//! written as a `comma` token between two `type:` tokens.
//!
//! ```ignore
//! let keys = parse_keys("enter, type:V2, enter, down, space, enter")?;
//! ```

use crate::terminal::Key;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("unknown key '{token}' at position {position}")]
    UnknownKey { token: String, position: usize },
}

pub fn parse_keys(script: &str) -> Result<Vec<Key>, KeyParseError> {
    let mut keys = Vec::new();

    for (position, raw) in script.split(',').enumerate() {
        let token = raw.trim();
        if token.is_empty() {
            continue;
        }

        if let Some(text) = token.strip_prefix("type:") {
            keys.extend(text.chars().map(Key::Char));
            continue;
        }

        let key = match token.to_lowercase().as_str() {
            "enter" => Key::Enter,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "space" => Key::Char(' '),
            "comma" => Key::Char(','),
            "backspace" => Key::Backspace,
            "ctrl-c" | "interrupt" => Key::Interrupt,
            _ => {
                return Err(KeyParseError::UnknownKey {
                    token: token.to_string(),
                    position,
                })
            }
        };
        keys.push(key);
    }

    Ok(keys)
}
