//! Board pages.

use axum::response::Response;

use super::{redirect_to_board, render_page};
use crate::errors::AppError;
use crate::ids;
use crate::models::{BoardListView, BoardView, NewBoardForm, NewBoardView};
use crate::render::templates;
use crate::AppState;

/// `/` - List all boards.
pub async fn list_boards(state: &AppState) -> Result<Response, AppError> {
    let boards = state.repo.list_boards().await?;
    render_page(state, templates::INDEX, &BoardListView { boards })
}

/// `/<board_id>` - One board with its comments.
pub async fn view_board(state: &AppState, board_id: &str) -> Result<Response, AppError> {
    let board = state.repo.get_board(board_id).await?;
    let mut comments = state.repo.list_comments(board_id).await?;
    // Scan order is up to the store; show oldest first.
    comments.sort_by_key(|comment| ids::decode(&comment.id).ok());
    render_page(state, templates::VIEW_BOARD, &BoardView::new(board, comments))
}

/// `/new` - Creation form, or create on submit.
pub async fn new_board(
    state: &AppState,
    form: Option<NewBoardForm>,
) -> Result<Response, AppError> {
    let Some(form) = form else {
        return render_page(state, templates::NEW_BOARD, &NewBoardView::default());
    };

    if let Err(err) = form.validate() {
        tracing::debug!("Rejected new board: {}", err);
        let view = NewBoardView {
            error: Some(err.message()),
            creator: form.username,
            board_name: form.board_name,
        };
        return render_page(state, templates::NEW_BOARD, &view);
    }

    let board_id = state
        .repo
        .create_board(&form.username, &form.board_name)
        .await?;
    redirect_to_board(&board_id)
}
