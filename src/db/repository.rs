//! Board and comment records over the key-value store.
//!
//! The store has no structure of its own, so relations live in the key names:
//!
//! | Record | Key |
//! |---|---|
//! | board name | `board:<board_id>` |
//! | board creator | `creator:board:<board_id>` |
//! | board created-at | `create_date:board:<board_id>` |
//! | name claim | `name:board:<name>` |
//! | comment text | `comment:<comment_id>:board:<board_id>` |
//! | comment author | `username:comment:<comment_id>:board:<board_id>` |
//! | board counter | `last-board-id` |
//! | comment counter | `last-comment-id:board:<board_id>` |
//!
//! Prefix scans are the only way to discover keys; there is no index.

use std::sync::Arc;

use chrono::Utc;

use super::KeyValueStore;
use crate::errors::AppError;
use crate::ids;
use crate::models::{Board, BoardSummary, Comment};

const BOARD_PREFIX: &str = "board:";
const COMMENT_PREFIX: &str = "comment:";
const LAST_BOARD_ID: &str = "last-board-id";

fn board_key(board_id: &str) -> String {
    format!("board:{}", board_id)
}

fn creator_key(board_id: &str) -> String {
    format!("creator:board:{}", board_id)
}

fn create_date_key(board_id: &str) -> String {
    format!("create_date:board:{}", board_id)
}

fn name_claim_key(name: &str) -> String {
    format!("name:board:{}", name)
}

fn comment_key(comment_id: &str, board_id: &str) -> String {
    format!("comment:{}:board:{}", comment_id, board_id)
}

fn comment_author_key(comment_key: &str) -> String {
    format!("username:{}", comment_key)
}

fn last_comment_id_key(board_id: &str) -> String {
    format!("last-comment-id:board:{}", board_id)
}

/// Pull the comment id out of `comment:<comment_id>:board:<board_id>`.
///
/// Returns `None` for keys of any other board, including boards whose id
/// merely ends with `board_id`.
fn parse_comment_key<'a>(key: &'a str, board_id: &str) -> Option<&'a str> {
    let rest = key.strip_prefix(COMMENT_PREFIX)?;
    let (comment_id, owner) = rest.split_once(':')?;
    let owner = owner.strip_prefix(BOARD_PREFIX)?;
    (owner == board_id && !comment_id.is_empty()).then_some(comment_id)
}

/// Repository for all board and comment operations.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // ==================== BOARD OPERATIONS ====================

    /// Create a board, or return the id of the board already using `name`.
    ///
    /// Two lookups run before anything is allocated:
    /// - `board:<name>`, the historical probe. Names and ids share that
    ///   prefix, so a board named `7` finds board `7` and gets its stored
    ///   name back as the "id".
    /// - `name:board:<name>`, the claim written by earlier creations.
    ///
    /// The claim itself is a set-if-absent, so two concurrent creators of the
    /// same name agree on one id. The loser's counter value is never reused.
    pub async fn create_board(&self, creator: &str, name: &str) -> Result<String, AppError> {
        if let Some(existing) = self.store.get(&board_key(name)).await? {
            tracing::debug!("Board name {:?} matched board key, returning {:?}", name, existing);
            return Ok(existing);
        }

        let claim = name_claim_key(name);
        if let Some(existing) = self.store.get(&claim).await? {
            tracing::debug!("Board name {:?} already claimed by {}", name, existing);
            return Ok(existing);
        }

        let board_num = self.store.incr(LAST_BOARD_ID).await?;
        let board_id = ids::encode(board_num)?;

        if !self.store.set_if_absent(&claim, &board_id).await? {
            let winner = self.store.get(&claim).await?.ok_or_else(|| {
                AppError::Internal(format!("name claim for {:?} vanished", name))
            })?;
            tracing::info!(
                "Lost race for board name {:?}; id {} discarded in favour of {}",
                name,
                board_id,
                winner
            );
            return Ok(winner);
        }

        let created_at = Utc::now().to_rfc3339();
        self.store.set(&board_key(&board_id), name).await?;
        self.store.set(&creator_key(&board_id), creator).await?;
        self.store
            .set(&create_date_key(&board_id), &created_at)
            .await?;

        tracing::info!("Created board {} ({:?}) by {:?}", board_id, name, creator);
        Ok(board_id)
    }

    /// Get a board by ID.
    pub async fn get_board(&self, board_id: &str) -> Result<Board, AppError> {
        let name = self
            .store
            .get(&board_key(board_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Board {} not found", board_id)))?;

        let creator = self.store.get(&creator_key(board_id)).await?;
        let created_at = self.store.get(&create_date_key(board_id)).await?;
        if creator.is_none() || created_at.is_none() {
            tracing::warn!("Board {} is missing creator or creation date", board_id);
        }

        Ok(Board {
            id: board_id.to_string(),
            name,
            creator: creator.unwrap_or_default(),
            created_at: created_at.unwrap_or_default(),
        })
    }

    /// List all boards in store scan order.
    pub async fn list_boards(&self) -> Result<Vec<BoardSummary>, AppError> {
        let keys = self.store.keys_with_prefix(BOARD_PREFIX).await?;
        tracing::debug!("Board scan matched {} keys", keys.len());

        let mut boards = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(id) = key.strip_prefix(BOARD_PREFIX) else {
                continue;
            };
            // Key may disappear between the scan and the read.
            if let Some(name) = self.store.get(&key).await? {
                boards.push(BoardSummary {
                    id: id.to_string(),
                    name,
                });
            }
        }
        Ok(boards)
    }

    // ==================== COMMENT OPERATIONS ====================

    /// Add a comment to a board and return its id.
    ///
    /// Does not check that the board exists.
    pub async fn add_comment(
        &self,
        board_id: &str,
        author: &str,
        text: &str,
    ) -> Result<String, AppError> {
        let comment_num = self.store.incr(&last_comment_id_key(board_id)).await?;
        let comment_id = ids::encode(comment_num)?;

        let key = comment_key(&comment_id, board_id);
        self.store.set(&key, text).await?;
        self.store.set(&comment_author_key(&key), author).await?;

        tracing::info!("Added comment {} to board {} by {:?}", comment_id, board_id, author);
        Ok(comment_id)
    }

    /// List a board's comments in store scan order.
    pub async fn list_comments(&self, board_id: &str) -> Result<Vec<Comment>, AppError> {
        let keys = self.store.keys_with_prefix(COMMENT_PREFIX).await?;

        let mut comments = Vec::new();
        for key in &keys {
            let Some(comment_id) = parse_comment_key(key, board_id) else {
                continue;
            };
            let Some(text) = self.store.get(key).await? else {
                continue;
            };
            let Some(author) = self.store.get(&comment_author_key(key)).await? else {
                tracing::warn!(
                    "Comment {} on board {} has no author record, skipping",
                    comment_id,
                    board_id
                );
                continue;
            };
            comments.push(Comment {
                id: comment_id.to_string(),
                board_id: board_id.to_string(),
                author,
                text,
            });
        }

        tracing::debug!("Board {} has {} comments", board_id, comments.len());
        Ok(comments)
    }
}
