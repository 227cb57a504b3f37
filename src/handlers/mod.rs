//! Request handlers.
//!
//! Every request lands in [`dispatch`], which resolves the path to an
//! [`Endpoint`] and calls the matching handler. Handlers talk to the
//! repository, build a view-model and hand it to the renderer.

mod boards;
mod comments;

pub use boards::*;
pub use comments::*;

use axum::{
    extract::{FromRequest, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::dispatch::{resolve, Endpoint};
use crate::errors::AppError;
use crate::AppState;

/// Fallback service for the whole router.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    match route(&state, request).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn route(state: &AppState, request: Request) -> Result<Response, AppError> {
    let matched = resolve(request.uri().path())?;
    tracing::debug!(
        "{} {} -> {:?}",
        request.method(),
        request.uri().path(),
        matched.endpoint
    );

    match matched.endpoint {
        Endpoint::ListBoards => list_boards(state).await,
        Endpoint::ViewBoard => view_board(state, matched.params.require("board_id")?).await,
        Endpoint::NewBoard => {
            let form = submission(state, request).await?;
            new_board(state, form).await
        }
        Endpoint::AddComment => {
            let board_id = matched.params.require("board_id")?;
            let form = submission(state, request).await?;
            add_comment(state, board_id, form).await
        }
    }
}

/// The submitted form of a POST, `None` for every other method.
async fn submission<T>(state: &AppState, request: Request) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Send,
{
    if request.method() != Method::POST {
        return Ok(None);
    }
    let Form(form) = Form::<T>::from_request(request, state)
        .await
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(Some(form))
}

fn render_page<T: Serialize>(
    state: &AppState,
    template: &str,
    view: &T,
) -> Result<Response, AppError> {
    let context = serde_json::to_value(view)?;
    let page = state.renderer.render(template, &context)?;
    Ok(Html(page).into_response())
}

/// `302 Found` to the board's page.
fn redirect_to_board(board_id: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(&format!("/{}", board_id)).map_err(|_| {
        AppError::Internal(format!("board id {:?} is not a valid location", board_id))
    })?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
