//! View-models handed to the renderer.
//!
//! Each struct is serialized into the template context as-is.

use serde::Serialize;

use super::{Board, BoardSummary, Comment};

/// Context of `index.html`.
#[derive(Debug, Clone, Serialize)]
pub struct BoardListView {
    pub boards: Vec<BoardSummary>,
}

/// Context of `new_board.html`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewBoardView {
    pub error: Option<String>,
    pub creator: String,
    pub board_name: String,
}

/// One row of the comment list on `view_board.html`.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub username: String,
    pub text: String,
}

/// Context of `view_board.html`.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub board_id: String,
    pub board_name: String,
    pub creator: String,
    pub create_date: String,
    pub comments: Vec<CommentView>,
}

impl BoardView {
    pub fn new(board: Board, comments: Vec<Comment>) -> Self {
        Self {
            board_id: board.id,
            board_name: board.name,
            creator: board.creator,
            create_date: board.created_at,
            comments: comments
                .into_iter()
                .map(|c| CommentView {
                    username: c.author,
                    text: c.text,
                })
                .collect(),
        }
    }
}

/// Context of `add_comment.html`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddCommentView {
    pub board_id: String,
    pub error: Option<String>,
    pub username: String,
    pub text: String,
}
