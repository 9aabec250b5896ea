//! # Selection State
//!
//! Single slot holding the record the detail panel shows, together with the
//! comment log of that selection. Replacing or clearing the selection drops
//! the log; local comments never carry over.

use tracing::debug;

use ch_core::error::{AppError, Result};
use ch_core::models::{Comment, DetailExtras, DomainRecord, NormalizedDetail};
use ch_core::session::Session;
use ch_core::traits::Clock;

use crate::comments::{CommentLog, DEFAULT_PREVIEW};
use crate::normalize::{default_detail, Normalizer};

#[derive(Debug, Clone)]
struct Selected {
    detail: NormalizedDetail,
    extras: DetailExtras,
    comments: CommentLog,
}

#[derive(Debug, Clone)]
pub struct SelectionState {
    session: Session,
    placeholder: NormalizedDetail,
    placeholder_extras: DetailExtras,
    preview: usize,
    current: Option<Selected>,
}

impl SelectionState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            placeholder: default_detail(),
            placeholder_extras: DetailExtras::Empty,
            preview: DEFAULT_PREVIEW,
            current: None,
        }
    }

    /// Number of comments a fresh selection shows before "ver todos".
    pub fn with_preview(mut self, preview: usize) -> Self {
        self.preview = preview;
        self
    }

    /// Normalizes `record` and makes it the selection. The comment log
    /// restarts from the record's server comments.
    pub fn select(&mut self, record: &DomainRecord) -> &NormalizedDetail {
        let normalizer = Normalizer::new(&self.session);
        let detail = normalizer.normalize(record);
        let extras = normalizer.extras(record);
        let comments = CommentLog::new(detail.comments.clone()).with_preview(self.preview);
        debug!(
            id = %detail.id,
            kind = ?detail.kind,
            previous = self.current.as_ref().map(|s| s.detail.id.as_str()),
            "selection changed"
        );
        &self
            .current
            .insert(Selected {
                detail,
                extras,
                comments,
            })
            .detail
    }

    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!(id = %previous.detail.id, "selection cleared");
        }
    }

    pub fn current(&self) -> Option<&NormalizedDetail> {
        self.current.as_ref().map(|s| &s.detail)
    }

    /// The selection, or the welcome placeholder when nothing is selected.
    pub fn current_or_default(&self) -> &NormalizedDetail {
        self.current().unwrap_or(&self.placeholder)
    }

    /// Panel body of the selection, [`DetailExtras::Empty`] for the placeholder.
    pub fn current_extras(&self) -> &DetailExtras {
        self.current
            .as_ref()
            .map_or(&self.placeholder_extras, |s| &s.extras)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.current().is_some_and(|d| d.id == id)
    }

    pub fn comments(&self) -> Option<&CommentLog> {
        self.current.as_ref().map(|s| &s.comments)
    }

    pub fn comments_mut(&mut self) -> Option<&mut CommentLog> {
        self.current.as_mut().map(|s| &mut s.comments)
    }

    /// Appends a local comment to the active selection.
    pub fn comment(&mut self, text: &str, clock: &dyn Clock) -> Result<Comment> {
        match self.comments_mut() {
            Some(log) => log.append(text, clock),
            None => Err(AppError::ValidationError(
                "no item selected to comment on".to_string(),
            )),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ch_core::models::{DetailKind, Person, Post};
    use ch_core::traits::FixedClock;
    use chrono::{TimeZone, Utc};

    fn post(id: &str) -> DomainRecord {
        DomainRecord::Post(Post {
            id: id.to_string(),
            author: Person::new("Carlos Mendoza"),
            body: "Fotos del evento de ciencias de ayer".to_string(),
            media_url: Some("https://picsum.photos/400/300?random=1".to_string()),
            reaction_count: 42,
            comment_count: 0,
            created_at: Utc.with_ymd_and_hms(2025, 10, 16, 10, 15, 0).unwrap(),
            comments: Vec::new(),
        })
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 10, 17, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_state_renders_placeholder() {
        let state = SelectionState::new(Session::new("Laura Gómez", 0));
        assert!(state.current().is_none());
        assert_eq!(state.current_or_default().kind, DetailKind::Default);
        assert!(state.comments().is_none());
    }

    #[test]
    fn test_select_replaces_and_clear_empties() {
        let mut state = SelectionState::new(Session::new("Laura Gómez", 0));
        assert_eq!(state.select(&post("A")).id, "A");
        state.comment("comentario en A", &clock()).unwrap();

        state.select(&post("B"));
        assert!(state.is_selected("B"));
        assert!(!state.is_selected("A"));
        assert_eq!(state.comments().map(|c| c.len()), Some(0));
        state.comment("comentario en B", &clock()).unwrap();

        state.clear();
        assert!(state.current().is_none());
        assert!(state.comments().is_none());
        assert_eq!(state.current_or_default().id, "141");
    }

    #[test]
    fn test_extras_follow_the_selection() {
        let mut state = SelectionState::new(Session::new("Laura Gómez", 0));
        assert_eq!(state.current_extras(), &DetailExtras::Empty);

        state.select(&post("A"));
        assert!(matches!(
            state.current_extras(),
            DetailExtras::Post { body } if body == "Fotos del evento de ciencias de ayer"
        ));

        state.clear();
        assert_eq!(state.current_extras(), &DetailExtras::Empty);
    }

    #[test]
    fn test_reselecting_same_record_drops_local_comments() {
        let mut state = SelectionState::new(Session::new("Laura Gómez", 0));
        state.select(&post("A"));
        state.comment("hola", &clock()).unwrap();
        state.select(&post("A"));
        assert_eq!(state.comments().map(|c| c.local().count()), Some(0));
    }

    #[test]
    fn test_comment_without_selection_is_rejected() {
        let mut state = SelectionState::new(Session::new("Laura Gómez", 0));
        let err = state.comment("hola", &clock()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_preview_size_propagates_to_log() {
        let mut state = SelectionState::new(Session::new("Laura Gómez", 0)).with_preview(1);
        state.select(&post("A"));
        state.comment("uno", &clock()).unwrap();
        state.comment("dos", &clock()).unwrap();
        let log = state.comments().unwrap();
        assert_eq!(log.visible().len(), 1);
        assert_eq!(log.hidden_count(), 1);
    }
}
