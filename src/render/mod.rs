//! Page rendering.
//!
//! Handlers pass a template name and a JSON mapping; the renderer turns them
//! into a document. [`HtmlRenderer`] is the built-in implementation.

mod html;

pub use html::HtmlRenderer;

use serde_json::Value;

use crate::errors::AppError;

/// Template names known to the handlers.
pub mod templates {
    pub const INDEX: &str = "index.html";
    pub const NEW_BOARD: &str = "new_board.html";
    pub const VIEW_BOARD: &str = "view_board.html";
    pub const ADD_COMMENT: &str = "add_comment.html";
}

/// Turns a template name and context into a document.
pub trait Renderer: Send + Sync + 'static {
    fn render(&self, template: &str, context: &Value) -> Result<String, AppError>;
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
