use serde::{Deserialize, Serialize};

use super::{CommentRecord, PostId, UserId, WireComment};

const EXCERPT_LENGTH: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PostAuthor {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub author_id: Option<UserId>,
    #[serde(default)]
    pub author: Option<PostAuthor>,
    #[serde(default)]
    pub comments: Vec<WireComment>,
}

impl Post {
    /// The owner of the post, from either `authorId` or the embedded author.
    pub fn author_user_id(&self) -> Option<UserId> {
        self.author_id
            .or_else(|| self.author.as_ref().and_then(|a| a.id))
    }

    #[inline]
    pub fn author_name(&self) -> String {
        self.author
            .as_ref()
            .map(|a| a.username.clone())
            .unwrap_or_default()
    }

    #[inline]
    pub fn created_on(&self) -> String {
        super::format_date(&self.created_at)
    }

    pub fn excerpt(&self) -> String {
        let mut excerpt: String = self.content.chars().take(EXCERPT_LENGTH).collect();
        if self.content.chars().nth(EXCERPT_LENGTH).is_some() {
            excerpt.push_str("...");
        }
        excerpt
    }

    pub fn comment_records(&self) -> Vec<CommentRecord> {
        WireComment::flatten(self.comments.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub post_title: String,
    pub post_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPost {
    pub id: PostId,
}

fn validate_post(title: &str, content: &str) -> Result<(String, String), String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title cannot be empty".into());
    }
    if content.trim().is_empty() {
        return Err("Content cannot be empty".into());
    }
    Ok((title.to_string(), content.to_string()))
}

impl NewPost {
    pub fn new(title: &str, content: &str) -> Result<Self, String> {
        let (post_title, post_content) = validate_post(title, content)?;
        Ok(Self {
            post_title,
            post_content,
        })
    }
}

impl PostUpdate {
    pub fn new(title: &str, content: &str) -> Result<Self, String> {
        let (title, content) = validate_post(title, content)?;
        Ok(Self { title, content })
    }
}
