//! Single and multi choice prompts
//!
//! Navigation wraps around at both ends of the item list.

use super::{title, Prompt, Transition};
use crate::config::PromptTheme;
use crate::step::SelectItem;
use crate::terminal::{Frame, Key, LineStyle};

/// Cursor over a non-empty, ordered item list
#[derive(Debug, Clone)]
struct ItemCursor {
    position: usize,
    len: usize,
}

impl ItemCursor {
    fn new(position: usize, len: usize) -> Self {
        Self { position, len }
    }

    fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.position = (self.position + 1) % self.len;
    }

    fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        self.position = if self.position == 0 {
            self.len - 1
        } else {
            self.position - 1
        };
    }
}

/// Highlights one item at a time; Enter commits the highlighted value
#[derive(Debug, Clone)]
pub struct SingleChoicePrompt {
    name: String,
    items: Vec<SelectItem>,
    cursor: ItemCursor,
}

impl SingleChoicePrompt {
    /// Highlight starts on the item whose value is `initial`, else the first item
    pub fn new(name: impl Into<String>, items: Vec<SelectItem>, initial: Option<&str>) -> Self {
        let position = initial
            .and_then(|value| items.iter().position(|item| item.value == value))
            .unwrap_or(0);
        let cursor = ItemCursor::new(position, items.len());

        Self {
            name: name.into(),
            items,
            cursor,
        }
    }

    pub fn highlighted(&self) -> Option<&SelectItem> {
        self.items.get(self.cursor.position)
    }
}

impl Prompt for SingleChoicePrompt {
    type Output = String;

    fn frame(&self, theme: &PromptTheme) -> Frame {
        let mut frame = Frame::new();
        frame.push(title(theme, &self.name), LineStyle::Prompt);

        for (i, item) in self.items.iter().enumerate() {
            if i == self.cursor.position {
                frame.push(format!("{}{}", theme.active_prefix, item.label), LineStyle::Active);
            } else {
                frame.push(format!("{}{}", theme.inactive_prefix, item.label), LineStyle::Item);
            }
        }

        if theme.show_help {
            let help = theme.help_line(&[
                (theme.nav_keys, "Navigate"),
                ("Enter", "Select"),
                ("Ctrl+C", "Cancel"),
            ]);
            frame.push(help, LineStyle::Hint);
        }
        frame
    }

    fn handle_key(&mut self, key: Key) -> Transition<String> {
        match key {
            Key::Up => self.cursor.previous(),
            Key::Down => self.cursor.next(),
            Key::Enter => {
                if let Some(item) = self.highlighted() {
                    return Transition::Commit(item.value.clone());
                }
            }
            _ => {}
        }
        Transition::Idle
    }

    fn summary(&self, value: &String) -> String {
        format!("{} {}", self.name, value)
    }
}

/// Checkbox list; Space toggles, Enter commits checked values in item order
#[derive(Debug, Clone)]
pub struct MultiChoicePrompt {
    name: String,
    items: Vec<SelectItem>,
    checked: Vec<bool>,
    cursor: ItemCursor,
}

impl MultiChoicePrompt {
    /// Items whose value appears in `initial` start checked
    pub fn new(name: impl Into<String>, items: Vec<SelectItem>, initial: &[String]) -> Self {
        let checked = items
            .iter()
            .map(|item| initial.contains(&item.value))
            .collect();
        let cursor = ItemCursor::new(0, items.len());

        Self {
            name: name.into(),
            items,
            checked,
            cursor,
        }
    }

    pub fn toggle(&mut self) {
        if let Some(checked) = self.checked.get_mut(self.cursor.position) {
            *checked = !*checked;
        }
    }

    /// Values of checked items, in declared item order
    pub fn selected_values(&self) -> Vec<String> {
        self.items
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(item, _)| item.value.clone())
            .collect()
    }
}

impl Prompt for MultiChoicePrompt {
    type Output = Vec<String>;

    fn frame(&self, theme: &PromptTheme) -> Frame {
        let mut frame = Frame::new();
        frame.push(title(theme, &self.name), LineStyle::Prompt);

        for (i, (item, checked)) in self.items.iter().zip(&self.checked).enumerate() {
            let mark = if *checked { theme.checked } else { theme.unchecked };
            let active = i == self.cursor.position;
            let prefix = if active {
                theme.active_prefix
            } else {
                theme.inactive_prefix
            };
            let style = if active { LineStyle::Active } else { LineStyle::Item };
            frame.push(format!("{}{} {}", prefix, mark, item.label), style);
        }

        if theme.show_help {
            let help = theme.help_line(&[
                (theme.nav_keys, "Navigate"),
                ("Space", "Toggle"),
                ("Enter", "Confirm"),
                ("Ctrl+C", "Cancel"),
            ]);
            frame.push(help, LineStyle::Hint);
        }
        frame
    }

    fn handle_key(&mut self, key: Key) -> Transition<Vec<String>> {
        match key {
            Key::Up => self.cursor.previous(),
            Key::Down => self.cursor.next(),
            Key::Char(' ') => self.toggle(),
            Key::Enter => return Transition::Commit(self.selected_values()),
            _ => {}
        }
        Transition::Idle
    }

    fn summary(&self, value: &Vec<String>) -> String {
        format!("{} {}", self.name, value.join(", "))
    }
}
