use crate::domain::models::{EntryId, TaskId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Entries,
    Search,
    ConfirmDelete,
}

/// The timer as this process believes it is running. Set optimistically
/// after a local start and replaced on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTimer {
    pub task_id: Option<TaskId>,
    pub task_name: Option<String>,
    pub since_ms: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteContext {
    pub entry_id: EntryId,
    pub display_label: String,
    pub display_detail: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut new_cursor = self.cursor - 1;
        while !self.value.is_char_boundary(new_cursor) {
            new_cursor -= 1;
        }
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backspace_removes_whole_multibyte_char() {
        let mut input = TextInput::new();
        input.insert('a');
        input.insert('é');
        input.backspace();
        assert_eq!(input.value, "a");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = TextInput::new();
        input.backspace();
        assert_eq!(input, TextInput::new());
    }
}
