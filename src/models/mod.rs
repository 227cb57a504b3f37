//! Data models for the boards service.
//!
//! Domain records, submitted forms and the view-models handed to the renderer.

mod board;
mod comment;
mod views;

pub use board::*;
pub use comment::*;
pub use views::*;

/// Longest accepted user name, in characters.
pub const MAX_USERNAME_CHARS: usize = 30;
/// Longest accepted board name, in characters.
pub const MAX_BOARD_NAME_CHARS: usize = 50;
/// Intended bound on comment text, in characters.
pub const MAX_COMMENT_CHARS: usize = 255;

/// Length as a visitor counts it: characters, not bytes.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
