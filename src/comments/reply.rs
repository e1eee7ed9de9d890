use crate::models::{CommentId, NewComment, PostId};

/// The single "currently replying to" slot of a post view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyState {
    #[default]
    Closed,
    Open(CommentId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplyBox {
    state: ReplyState,
    draft: String,
}

impl ReplyBox {
    #[inline]
    pub fn state(&self) -> ReplyState {
        self.state
    }

    #[inline]
    pub fn is_open_for(&self, id: CommentId) -> bool {
        self.state == ReplyState::Open(id)
    }

    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Opening a box closes whichever one was open before.
    pub fn open(&mut self, id: CommentId) {
        if !self.is_open_for(id) {
            self.draft.clear();
        }
        self.state = ReplyState::Open(id);
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    pub fn cancel(&mut self) {
        self.state = ReplyState::Closed;
        self.draft.clear();
    }

    /// Builds the request for the open box. Blank drafts never leave the client.
    pub fn submission(&self, post_id: PostId) -> Result<NewComment, String> {
        match self.state {
            ReplyState::Closed => Err("No reply is open".into()),
            ReplyState::Open(target) => NewComment::new(post_id, &self.draft, Some(target)),
        }
    }

    /// Called once the API accepted the reply.
    pub fn submitted(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_second_box_closes_first() {
        let mut reply = ReplyBox::default();
        reply.open(1);
        reply.set_draft("half written".into());
        reply.open(2);

        assert!(!reply.is_open_for(1));
        assert!(reply.is_open_for(2));
        assert_eq!(reply.state(), ReplyState::Open(2));
        assert_eq!(reply.draft(), "");
    }

    #[test]
    fn reopening_same_box_keeps_draft() {
        let mut reply = ReplyBox::default();
        reply.open(1);
        reply.set_draft("keep me".into());
        reply.open(1);
        assert_eq!(reply.draft(), "keep me");
    }

    #[test]
    fn cancel_and_submit_close_the_box() {
        let mut reply = ReplyBox::default();
        reply.open(3);
        reply.cancel();
        assert_eq!(reply.state(), ReplyState::Closed);

        reply.open(3);
        reply.set_draft("thanks!".into());
        let request = reply.submission(10).unwrap();
        assert_eq!(request.parent_comment_id, Some(3));
        assert_eq!(request.post_id, 10);
        assert_eq!(request.content, "thanks!");

        reply.submitted();
        assert_eq!(reply.state(), ReplyState::Closed);
        assert_eq!(reply.draft(), "");
    }

    #[test]
    fn blank_or_closed_submissions_are_rejected() {
        let mut reply = ReplyBox::default();
        assert!(reply.submission(1).is_err());

        reply.open(4);
        reply.set_draft("   ".into());
        assert!(reply.submission(1).is_err());
        assert!(reply.is_open_for(4));
    }
}
