//! Prompt rendering configuration

/// Glyphs and flags used when prompts build their frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTheme {
    /// Marker in front of every prompt title
    pub prompt_marker: &'static str,
    /// Prefix of the item under the cursor
    pub active_prefix: &'static str,
    /// Prefix of every other item (same width as `active_prefix`)
    pub inactive_prefix: &'static str,
    pub checked: &'static str,
    pub unchecked: &'static str,
    /// Name of the up/down keys in the help line
    pub nav_keys: &'static str,
    /// Between entries of the help line
    pub help_separator: &'static str,
    /// Show a key help line under each prompt
    pub show_help: bool,
}

impl Default for PromptTheme {
    fn default() -> Self {
        Self {
            prompt_marker: "?",
            active_prefix: "▶ ",
            inactive_prefix: "  ",
            checked: "[✓]",
            unchecked: "[ ]",
            nav_keys: "↑↓",
            help_separator: " • ",
            show_help: true,
        }
    }
}

impl PromptTheme {
    /// Theme for terminals without Unicode support
    pub fn ascii() -> Self {
        Self {
            active_prefix: "> ",
            checked: "[x]",
            nav_keys: "Up/Down",
            help_separator: " | ",
            ..Self::default()
        }
    }

    /// Key help line built from `(key, action)` entries
    pub(crate) fn help_line(&self, entries: &[(&str, &str)]) -> String {
        entries
            .iter()
            .map(|(key, action)| format!("{} {}", key, action))
            .collect::<Vec<_>>()
            .join(self.help_separator)
    }
}
