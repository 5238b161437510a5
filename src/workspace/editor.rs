//! Generated-content editor state for one idea: the content string plus an
//! edit buffer that only touches the content on an explicit save.

use crate::error::AppError;

#[derive(Debug, Default, Clone)]
pub struct Editor {
    content: String,
    /// Present while edit mode is active.
    edit_buffer: Option<String>,
}

impl Editor {
    pub fn new(content: String) -> Self {
        Self {
            content,
            edit_buffer: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content directly (generation result, cached-draft seed,
    /// or in-place rich-text edits). Callers persist to the draft cache.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit_buffer.as_deref()
    }

    /// Enter edit mode, seeding the buffer from the current content.
    /// Re-entering while already editing keeps the existing buffer.
    pub fn begin_edit(&mut self) {
        if self.edit_buffer.is_none() {
            self.edit_buffer = Some(self.content.clone());
        }
    }

    pub fn update_buffer(&mut self, text: String) -> Result<(), AppError> {
        if self.edit_buffer.is_none() {
            return Err(AppError::Validation("not in edit mode".into()));
        }
        self.edit_buffer = Some(text);
        Ok(())
    }

    /// Commit the buffer into the content and exit edit mode.
    pub fn save_edit(&mut self) -> Result<&str, AppError> {
        match self.edit_buffer.take() {
            Some(buffer) => {
                self.content = buffer;
                Ok(&self.content)
            }
            None => Err(AppError::Validation("not in edit mode".into())),
        }
    }

    /// Discard the buffer and exit edit mode without touching the content.
    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
    }
}
