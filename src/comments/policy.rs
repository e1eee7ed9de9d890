use crate::auth::{Claims, Role};
use crate::models::{CommentRecord, UserId};

use super::CommentNode;

/// Who is looking at the comments, as far as the local token says.
///
/// Only used to decide which controls to show; the API enforces the real rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewer {
    pub id: Option<UserId>,
    pub role: Role,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl From<Option<&Claims>> for Viewer {
    fn from(claims: Option<&Claims>) -> Self {
        claims.map_or_else(Self::anonymous, |claims| Self {
            id: Some(claims.id),
            role: claims.role,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommentActions {
    pub reply: bool,
    pub delete: bool,
    pub by_post_author: bool,
}

impl CommentActions {
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.reply && !self.delete
    }
}

pub fn permitted_actions(
    comment: &CommentRecord,
    post_author: Option<UserId>,
    viewer: &Viewer,
) -> CommentActions {
    CommentActions {
        reply: viewer.role == Role::Author,
        delete: viewer.id == Some(comment.user_id),
        by_post_author: post_author == Some(comment.user_id),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedComment {
    pub comment: CommentRecord,
    pub depth: usize,
    pub reply_count: usize,
    pub actions: CommentActions,
}

/// Depth-first, pre-order listing of the forest with the actions each comment
/// offers to `viewer`. Every node appears exactly once.
#[tracing::instrument(skip(forest))]
pub fn render_plan(
    forest: &[CommentNode],
    post_author: Option<UserId>,
    viewer: &Viewer,
) -> Vec<RenderedComment> {
    let mut rendered = Vec::new();
    let mut stack: Vec<(&CommentNode, usize)> = forest.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        rendered.push(RenderedComment {
            comment: node.comment.clone(),
            depth,
            reply_count: node.children.len(),
            actions: permitted_actions(&node.comment, post_author, viewer),
        });
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    rendered
}
