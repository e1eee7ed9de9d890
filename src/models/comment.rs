use serde::{Deserialize, Serialize};

use super::{CommentId, PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct CommentUser {
    pub username: String,
}

/// A comment exactly as the API lists it: flat, with an optional parent link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: CommentId,
    pub content: String,
    pub user_id: UserId,
    #[serde(default)]
    pub parent_comment_id: Option<CommentId>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub user: Option<CommentUser>,
}

impl CommentRecord {
    #[inline]
    pub fn author_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Anonymous")
    }

    #[inline]
    pub fn created_on(&self) -> String {
        super::format_date(&self.created_at)
    }
}

/// The post endpoint nests replies under their parent (`replys` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireComment {
    #[serde(flatten)]
    pub record: CommentRecord,
    #[serde(default, alias = "replys", alias = "children")]
    pub replies: Vec<WireComment>,
}

impl WireComment {
    /// Pre-order flattening. A nested reply without an explicit parent link
    /// inherits the id of the comment it was nested under.
    pub fn flatten(comments: Vec<WireComment>) -> Vec<CommentRecord> {
        let mut records = Vec::new();
        let mut stack: Vec<(WireComment, Option<CommentId>)> =
            comments.into_iter().rev().map(|c| (c, None)).collect();

        while let Some((WireComment { mut record, replies }, enclosing)) = stack.pop() {
            if record.parent_comment_id.is_none() {
                record.parent_comment_id = enclosing;
            }
            let id = record.id;
            records.push(record);
            stack.extend(replies.into_iter().rev().map(|reply| (reply, Some(id))));
        }

        records
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: PostId,
    pub content: String,
    pub parent_comment_id: Option<CommentId>,
}

impl NewComment {
    #[tracing::instrument]
    pub fn new(
        post_id: PostId,
        content: &str,
        parent_comment_id: Option<CommentId>,
    ) -> Result<Self, String> {
        let content = content.trim();
        if content.is_empty() {
            return Err("Comment cannot be empty".into());
        }
        Ok(Self {
            post_id,
            content: content.to_string(),
            parent_comment_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_replies_are_flattened_in_preorder() {
        let wire: Vec<WireComment> = serde_json::from_value(serde_json::json!([
            {
                "id": 1, "content": "root", "userId": 7, "parentCommentId": null,
                "createdAt": "2024-01-01T00:00:00Z",
                "replys": [
                    {
                        "id": 2, "content": "child", "userId": 8, "parentCommentId": 1,
                        "createdAt": "2024-01-02T00:00:00Z",
                        "replys": [
                            { "id": 4, "content": "grandchild", "userId": 7, "createdAt": "" }
                        ]
                    }
                ]
            },
            { "id": 3, "content": "second", "userId": 9, "createdAt": "", "user": { "username": "bo" } }
        ]))
        .unwrap();

        let records = WireComment::flatten(wire);
        let ids: Vec<_> = records.iter().map(|r| (r.id, r.parent_comment_id)).collect();
        assert_eq!(ids, vec![(1, None), (2, Some(1)), (4, Some(2)), (3, None)]);
        assert_eq!(records[3].author_name(), "bo");
        assert_eq!(records[0].author_name(), "Anonymous");
    }

    #[test]
    fn new_comment_rejects_blank_content() {
        assert!(NewComment::new(1, "   \n", None).is_err());
        let comment = NewComment::new(1, "  hi  ", Some(3)).unwrap();
        assert_eq!(comment.content, "hi");
        assert_eq!(
            serde_json::to_value(&comment).unwrap(),
            serde_json::json!({ "postId": 1, "content": "hi", "parentCommentId": 3 })
        );
    }

    #[test]
    fn top_level_comment_sends_null_parent() {
        let comment = NewComment::new(5, "first", None).unwrap();
        assert_eq!(
            serde_json::to_value(&comment).unwrap()["parentCommentId"],
            serde_json::Value::Null
        );
    }
}
