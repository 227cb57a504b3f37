//! Comment pages.

use axum::response::Response;

use super::{redirect_to_board, render_page};
use crate::errors::AppError;
use crate::models::{AddCommentForm, AddCommentView};
use crate::render::templates;
use crate::AppState;

/// `/<board_id>/add_comment` - Comment form, or post on submit.
///
/// Unknown boards are a 404 either way, so no comment is ever written
/// under a board that does not exist.
pub async fn add_comment(
    state: &AppState,
    board_id: &str,
    form: Option<AddCommentForm>,
) -> Result<Response, AppError> {
    state.repo.get_board(board_id).await?;

    let Some(form) = form else {
        let view = AddCommentView {
            board_id: board_id.to_string(),
            ..Default::default()
        };
        return render_page(state, templates::ADD_COMMENT, &view);
    };

    if let Err(err) = form.validate(state.config.enforce_comment_length) {
        tracing::debug!("Rejected comment on board {}: {}", board_id, err);
        let view = AddCommentView {
            board_id: board_id.to_string(),
            error: Some(err.message()),
            username: form.username,
            text: form.comment_text,
        };
        return render_page(state, templates::ADD_COMMENT, &view);
    }

    state
        .repo
        .add_comment(board_id, &form.username, &form.comment_text)
        .await?;
    redirect_to_board(board_id)
}
