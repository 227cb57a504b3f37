//! Comment model and the comment form.

use serde::{Deserialize, Serialize};

use super::{char_len, MAX_COMMENT_CHARS, MAX_USERNAME_CHARS};
use crate::errors::AppError;

/// An author/text pair attached to one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique within the board only
    pub id: String,
    pub board_id: String,
    pub author: String,
    pub text: String,
}

/// Form body of `POST /<board_id>/add_comment`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddCommentForm {
    pub username: String,
    pub comment_text: String,
}

impl AddCommentForm {
    /// Check field lengths.
    ///
    /// Comment text is only bounded when `enforce_text_limit` is set; the
    /// deployed behavior never checked it.
    pub fn validate(&self, enforce_text_limit: bool) -> Result<(), AppError> {
        if char_len(&self.username) > MAX_USERNAME_CHARS {
            return Err(AppError::Validation(format!(
                "User name must be max {} symbol",
                MAX_USERNAME_CHARS
            )));
        }
        if enforce_text_limit && char_len(&self.comment_text) > MAX_COMMENT_CHARS {
            return Err(AppError::Validation(format!(
                "Length of comments maximum {} symbol",
                MAX_COMMENT_CHARS
            )));
        }
        Ok(())
    }
}
