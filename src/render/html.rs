use std::fmt::Write;

use serde_json::Value;

use super::{escape_html, templates, Renderer};
use crate::errors::AppError;

/// Built-in HTML pages. Every interpolated value is escaped.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, AppError> {
        let (title, body) = match template {
            templates::INDEX => ("Boards".to_string(), index(context)),
            templates::NEW_BOARD => ("New board".to_string(), new_board(context)),
            templates::VIEW_BOARD => (text(context, "board_name"), view_board(context)),
            templates::ADD_COMMENT => ("Add comment".to_string(), add_comment(context)),
            other => {
                return Err(AppError::Render(format!("Unknown template '{}'", other)));
            }
        };
        Ok(layout(&title, &body))
    }
}

fn text(context: &Value, field: &str) -> String {
    context
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn items<'a>(context: &'a Value, field: &str) -> &'a [Value] {
    context
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn error_block(context: &Value) -> String {
    match context.get("error").and_then(Value::as_str) {
        Some(error) if !error.is_empty() => {
            format!("<p class=\"error\">{}</p>\n", escape_html(error))
        }
        _ => String::new(),
    }
}

fn index(context: &Value) -> String {
    let mut body = String::from("<h1>Boards</h1>\n<p><a href=\"/new\">Create a board</a></p>\n");
    let boards = items(context, "boards");
    if boards.is_empty() {
        body.push_str("<p>No boards yet.</p>\n");
        return body;
    }

    body.push_str("<ul class=\"boards\">\n");
    for board in boards {
        let id = text(board, "id");
        let _ = writeln!(
            body,
            "<li><a href=\"/{}\">{}</a></li>",
            escape_html(&id),
            escape_html(&text(board, "name"))
        );
    }
    body.push_str("</ul>\n");
    body
}

fn new_board(context: &Value) -> String {
    format!(
        "<h1>New board</h1>\n{}<form method=\"post\" action=\"/new\">\n\
         <label>Your name <input name=\"username\" value=\"{}\"></label>\n\
         <label>Board name <input name=\"board_name\" value=\"{}\"></label>\n\
         <button type=\"submit\">Create</button>\n</form>\n<p><a href=\"/\">All boards</a></p>\n",
        error_block(context),
        escape_html(&text(context, "creator")),
        escape_html(&text(context, "board_name")),
    )
}

fn view_board(context: &Value) -> String {
    let board_id = escape_html(&text(context, "board_id"));
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"meta\">Created by <span class=\"creator\">{}</span> on <time>{}</time></p>\n",
        escape_html(&text(context, "board_name")),
        escape_html(&text(context, "creator")),
        escape_html(&text(context, "create_date")),
    );

    let comments = items(context, "comments");
    if comments.is_empty() {
        body.push_str("<p>No comments yet.</p>\n");
    } else {
        body.push_str("<ul class=\"comments\">\n");
        for comment in comments {
            let _ = writeln!(
                body,
                "<li><span class=\"author\">{}</span>: <span class=\"text\">{}</span></li>",
                escape_html(&text(comment, "username")),
                escape_html(&text(comment, "text"))
            );
        }
        body.push_str("</ul>\n");
    }

    let _ = writeln!(
        body,
        "<p><a href=\"/{}/add_comment\">Add a comment</a> | <a href=\"/\">All boards</a></p>",
        board_id
    );
    body
}

fn add_comment(context: &Value) -> String {
    let board_id = escape_html(&text(context, "board_id"));
    format!(
        "<h1>Add comment</h1>\n{}<form method=\"post\" action=\"/{id}/add_comment\">\n\
         <label>Your name <input name=\"username\" value=\"{}\"></label>\n\
         <label>Comment <textarea name=\"comment_text\">{}</textarea></label>\n\
         <button type=\"submit\">Post</button>\n</form>\n<p><a href=\"/{id}\">Back to board</a></p>\n",
        error_block(context),
        escape_html(&text(context, "username")),
        escape_html(&text(context, "text")),
        id = board_id,
    )
}
