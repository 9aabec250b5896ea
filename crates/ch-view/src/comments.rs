//! # Comment Append Log
//!
//! Optimistic, non-persisted comments written on the active selection.
//! Local comments sit in their own list (newest first) and are merged in
//! front of the server-provided ones only when read.

use std::collections::VecDeque;

use tracing::debug;
use uuid::{NoContext, Timestamp, Uuid};

use ch_core::error::{AppError, Result};
use ch_core::models::{generated_avatar_url, Comment};
use ch_core::traits::Clock;

/// Author name shown on comments the viewer writes.
pub const LOCAL_AUTHOR: &str = "Tú";
/// Collapsed lists show this many comments by default.
pub const DEFAULT_PREVIEW: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct CommentLog {
    server: Vec<Comment>,
    local: VecDeque<Comment>,
    preview: usize,
    expanded: bool,
}

impl Default for CommentLog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CommentLog {
    /// Starts a log on top of the comments the server delivered.
    pub fn new(server: Vec<Comment>) -> Self {
        Self {
            server,
            local: VecDeque::new(),
            preview: DEFAULT_PREVIEW,
            expanded: false,
        }
    }

    pub fn with_preview(mut self, preview: usize) -> Self {
        self.preview = preview;
        self
    }

    /// Records a comment written by the viewer and returns it.
    ///
    /// Blank text is rejected with [`AppError::ValidationError`] and leaves
    /// the log untouched.
    pub fn append(&mut self, text: &str, clock: &dyn Clock) -> Result<Comment> {
        if text.trim().is_empty() {
            debug!("rejected blank comment");
            return Err(AppError::ValidationError(
                "comment text must not be empty".to_string(),
            ));
        }

        let now = clock.now();
        let ts = Timestamp::from_unix(
            NoContext,
            now.timestamp().max(0) as u64,
            now.timestamp_subsec_nanos(),
        );
        let comment = Comment {
            id: format!("c-{}", Uuid::new_v7(ts)),
            author_name: LOCAL_AUTHOR.to_string(),
            author_avatar_url: generated_avatar_url("Tu"),
            body: text.to_string(),
            created_at: now,
        };
        self.local.push_front(comment.clone());
        debug!(comment_id = %comment.id, local = self.local.len(), "appended local comment");
        Ok(comment)
    }

    /// Local comments (newest first) followed by server comments in server order.
    pub fn list(&self) -> Vec<&Comment> {
        self.local.iter().chain(self.server.iter()).collect()
    }

    pub fn len(&self) -> usize {
        self.local.len() + self.server.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Comments authored during this selection only.
    pub fn local(&self) -> impl Iterator<Item = &Comment> {
        self.local.iter()
    }

    pub fn server(&self) -> &[Comment] {
        &self.server
    }

    /// Size of the collapsed view.
    pub fn preview(&self) -> usize {
        self.preview
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn show_all(&mut self) {
        self.expanded = true;
    }

    /// Collapses the list to its first `n` entries.
    pub fn show_top(&mut self, n: usize) {
        self.preview = n;
        self.expanded = false;
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// The comments currently on screen.
    pub fn visible(&self) -> Vec<&Comment> {
        let all = self.list();
        if self.expanded || all.len() <= self.preview {
            return all;
        }
        all.into_iter().take(self.preview).collect()
    }

    /// How many comments the collapsed view hides.
    pub fn hidden_count(&self) -> usize {
        self.len() - self.visible().len()
    }
}
