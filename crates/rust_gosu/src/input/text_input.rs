//! Editable single-line text buffer fed by keyboard input
//!
//! Positions are byte offsets into the UTF-8 text and always fall on
//! character boundaries. The selection spans from `selection_start` to the
//! caret; it is empty when both are equal.

use std::fmt;

use super::{Button, Modifiers};

type Filter = Box<dyn Fn(&str) -> String>;

/// Text entry state
#[derive(Default)]
pub struct TextInput {
    text: String,
    caret: usize,
    selection: usize,
    filter: Option<Filter>,
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInput")
            .field("text", &self.text)
            .field("caret", &self.caret)
            .field("selection", &self.selection)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

impl TextInput {
    /// Empty text input
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text; caret and selection move to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.text.len();
        self.selection = self.caret;
    }

    /// Caret position
    pub fn caret_pos(&self) -> usize {
        self.caret
    }

    /// Move the caret; positions past the end or inside a character are clamped
    pub fn set_caret_pos(&mut self, pos: usize) {
        self.caret = self.clamp(pos);
    }

    /// Start of the selection
    pub fn selection_start(&self) -> usize {
        self.selection
    }

    /// Move the selection anchor
    pub fn set_selection_start(&mut self, pos: usize) {
        self.selection = self.clamp(pos);
    }

    /// Selected part of the text
    pub fn selected_text(&self) -> &str {
        let (from, to) = self.selection_range();
        &self.text[from..to]
    }

    /// Transform typed text before it is inserted
    ///
    /// Text set with [`TextInput::set_text`] is not filtered.
    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: Fn(&str) -> String + 'static,
    {
        self.filter = Some(Box::new(filter));
    }

    /// Replace the selection with `typed` and place the caret after it
    pub fn insert(&mut self, typed: &str) {
        let typed = match &self.filter {
            Some(filter) => filter(typed),
            None => typed.to_string(),
        };
        self.delete_selection();
        self.text.insert_str(self.caret, &typed);
        self.caret += typed.len();
        self.selection = self.caret;
    }

    /// Delete the selection, or the character before the caret
    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if let Some(prev) = self.prev_boundary(self.caret) {
            self.text.replace_range(prev..self.caret, "");
            self.caret = prev;
            self.selection = prev;
        }
    }

    /// Delete the selection, or the character after the caret
    pub fn delete(&mut self) {
        if self.delete_selection() {
            return;
        }
        if let Some(next) = self.next_boundary(self.caret) {
            self.text.replace_range(self.caret..next, "");
        }
    }

    /// Move the caret one character left
    pub fn move_left(&mut self, extend: bool) {
        let target = self.prev_boundary(self.caret).unwrap_or(self.caret);
        self.move_caret(target, extend);
    }

    /// Move the caret one character right
    pub fn move_right(&mut self, extend: bool) {
        let target = self.next_boundary(self.caret).unwrap_or(self.caret);
        self.move_caret(target, extend);
    }

    /// Move the caret to the start
    pub fn move_home(&mut self, extend: bool) {
        self.move_caret(0, extend);
    }

    /// Move the caret to the end
    pub fn move_end(&mut self, extend: bool) {
        self.move_caret(self.text.len(), extend);
    }

    /// Handle a typed character; control characters are ignored
    pub fn handle_char(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        let mut buf = [0u8; 4];
        self.insert(c.encode_utf8(&mut buf));
        true
    }

    /// Handle an editing key press
    ///
    /// Returns false for keys that are not editing keys, which the caller
    /// should then treat as regular button input.
    pub fn handle_key(&mut self, button: Button, modifiers: Modifiers) -> bool {
        let extend = modifiers.contains(Modifiers::SHIFT);
        match button {
            Button::Backspace => self.backspace(),
            Button::Delete => self.delete(),
            Button::Left => self.move_left(extend),
            Button::Right => self.move_right(extend),
            Button::Home => self.move_home(extend),
            Button::End => self.move_end(extend),
            _ => return false,
        }
        true
    }

    fn move_caret(&mut self, target: usize, extend: bool) {
        self.caret = target;
        if !extend {
            self.selection = target;
        }
    }

    fn selection_range(&self) -> (usize, usize) {
        (self.caret.min(self.selection), self.caret.max(self.selection))
    }

    fn delete_selection(&mut self) -> bool {
        let (from, to) = self.selection_range();
        if from == to {
            return false;
        }
        self.text.replace_range(from..to, "");
        self.caret = from;
        self.selection = from;
        true
    }

    fn clamp(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn prev_boundary(&self, pos: usize) -> Option<usize> {
        self.text[..pos].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self, pos: usize) -> Option<usize> {
        self.text[pos..].chars().next().map(|c| pos + c.len_utf8())
    }
}
