//! Board model and the board-creation form.

use serde::{Deserialize, Serialize};

use super::{char_len, MAX_BOARD_NAME_CHARS, MAX_USERNAME_CHARS};
use crate::errors::AppError;

/// A named discussion board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub creator: String,
    /// RFC 3339 timestamp captured at creation
    pub created_at: String,
}

/// Board id and name, as listed on the front page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
}

/// Form body of `POST /new`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBoardForm {
    pub username: String,
    pub board_name: String,
}

impl NewBoardForm {
    /// Check field lengths. The first violation wins.
    pub fn validate(&self) -> Result<(), AppError> {
        if char_len(&self.username) > MAX_USERNAME_CHARS {
            return Err(AppError::Validation(format!(
                "User name must be max {} symbols",
                MAX_USERNAME_CHARS
            )));
        }
        if char_len(&self.board_name) > MAX_BOARD_NAME_CHARS {
            return Err(AppError::Validation(format!(
                "Board name max symbols is {}",
                MAX_BOARD_NAME_CHARS
            )));
        }
        Ok(())
    }
}
