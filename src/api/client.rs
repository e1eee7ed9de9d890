use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::ApiError;
use crate::auth::{DefaultSession, SessionStore};
use crate::models::{
    Author, CommentId, CommentRecord, CreatedPost, Credentials, NewComment, NewPost, Post,
    PostId, PostUpdate, ProfileUpdate, ProfileUpdated, Signup,
};

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
struct AuthorEnvelope {
    author: Author,
}

#[derive(Deserialize)]
struct PostEnvelope {
    post: Post,
}

#[derive(Deserialize)]
struct CommentEnvelope {
    comment: CommentRecord,
}

/// Parses a response body without serde_json's nesting limit. Reply threads
/// nest one object per level, so the stack grows on demand instead.
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let mut de = serde_json::Deserializer::from_str(body);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// What a 401 means for a given call.
#[derive(Clone, Copy, PartialEq)]
enum OnUnauthorized {
    /// The stored session is no longer accepted: drop it and go log in.
    SignOut,
    /// Bad credentials on the auth endpoints themselves.
    Reject,
}

/// Client for the remote Author API. Every call carries the stored bearer
/// token when there is one.
#[derive(Clone)]
pub struct AuthorApi<S = DefaultSession> {
    base_url: String,
    http: reqwest::Client,
    session: S,
}

impl<S: SessionStore> AuthorApi<S> {
    pub fn new(base_url: impl Into<String>, session: S) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            session,
        }
    }

    pub fn from_config(session: S) -> Self {
        Self::new(crate::config::Config::global().api_url.as_str(), session)
    }

    #[inline]
    pub fn session(&self) -> &S {
        &self.session
    }

    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::CONTENT_TYPE, "application/json");
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        on_unauthorized: OnUnauthorized,
    ) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && on_unauthorized == OnUnauthorized::SignOut {
            tracing::warn!("API refused the session, signing out");
            self.session.clear();
            crate::auth::redirect_to_login();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::rejected(status.as_u16(), &body);
            tracing::info!(status = status.as_u16(), "API rejected request: {err}");
            return Err(err);
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self
            .send(builder, OnUnauthorized::SignOut)
            .await?
            .text()
            .await?;
        decode_body(&body)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder, OnUnauthorized::SignOut).await.map(|_| ())
    }

    fn with_body<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> RequestBuilder {
        self.request(method, path).json(body)
    }

    #[tracing::instrument(skip_all)]
    pub async fn signup(&self, signup: &Signup) -> Result<(), ApiError> {
        self.send(
            self.with_body(Method::POST, "/api/author/signup", signup),
            OnUnauthorized::Reject,
        )
        .await
        .map(|_| ())
    }

    /// Exchanges credentials for a token and stores it in the session.
    #[tracing::instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self
            .send(
                self.with_body(Method::POST, "/api/author/login", credentials),
                OnUnauthorized::Reject,
            )
            .await?;
        let TokenResponse { token } = decode_body(&response.text().await?)?;
        self.session.set_token(&token);
        tracing::info!("logged in");
        Ok(())
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    #[tracing::instrument(skip_all)]
    pub async fn profile(&self) -> Result<Author, ApiError> {
        let AuthorEnvelope { author } = self
            .fetch(self.request(Method::GET, "/api/author/profile"))
            .await?;
        Ok(author)
    }

    /// A password change ends the session when the API asks for a new login.
    #[tracing::instrument(skip_all)]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileUpdated, ApiError> {
        let updated: ProfileUpdated = self
            .fetch(self.with_body(Method::PUT, "/api/author/profile", update))
            .await?;
        if updated.requires_relogin {
            self.session.clear();
        }
        Ok(updated)
    }

    #[tracing::instrument(skip_all)]
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, "/api/author/account"))
            .await?;
        self.session.clear();
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_post(&self, post: &NewPost) -> Result<PostId, ApiError> {
        let CreatedPost { id } = self
            .fetch(self.with_body(Method::POST, "/api/author/posts", post))
            .await?;
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn post(&self, id: PostId) -> Result<Post, ApiError> {
        let PostEnvelope { post } = self
            .fetch(self.request(Method::GET, &format!("/api/author/posts/{id}")))
            .await?;
        Ok(post)
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update_post(&self, id: PostId, update: &PostUpdate) -> Result<(), ApiError> {
        self.execute(self.with_body(Method::PUT, &format!("/api/author/posts/{id}"), update))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_post(&self, id: PostId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &format!("/api/author/posts/{id}")))
            .await
    }

    #[tracing::instrument(skip_all, fields(post = comment.post_id, parent = ?comment.parent_comment_id))]
    pub async fn create_comment(&self, comment: &NewComment) -> Result<CommentRecord, ApiError> {
        let CommentEnvelope { comment } = self
            .fetch(self.with_body(Method::POST, "/api/comments", comment))
            .await?;
        Ok(comment)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_comment(&self, id: CommentId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &format!("/api/comments/{id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySession;
    use crate::comments::{build_comment_tree, forest_len, render_plan, Viewer};

    fn nested_thread(depth: i64) -> String {
        let mut comments = String::new();
        for id in 1..=depth {
            comments.push_str(&format!(
                r#"{{"id":{id},"content":"level {id}","userId":1,"replys":["#
            ));
        }
        for _ in 0..depth {
            comments.push_str("]}");
        }
        format!(r#"{{"post":{{"id":7,"title":"t","content":"c","comments":[{comments}]}}}}"#)
    }

    #[test]
    fn deep_reply_threads_decode() {
        let PostEnvelope { post } = decode_body(&nested_thread(200)).unwrap();
        let records = post.comment_records();
        assert_eq!(records.len(), 200);
        assert_eq!(records[199].parent_comment_id, Some(199));

        let forest = build_comment_tree(records);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest_len(&forest), 200);
        let plan = render_plan(&forest, Some(1), &Viewer::anonymous());
        assert_eq!(plan.last().map(|c| c.depth), Some(199));
    }

    #[test]
    fn trailing_garbage_is_a_decode_error() {
        let result: Result<TokenResponse, _> = decode_body(r#"{"token":"abc"} extra"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let api = AuthorApi::new("http://localhost:3000/", MemorySession::default());
        assert_eq!(api.base_url(), "http://localhost:3000");
    }

    #[test]
    fn bearer_token_is_attached_when_present() {
        let api = AuthorApi::new("http://localhost:3000", MemorySession::with_token("abc"));
        let request = api
            .request(Method::GET, "/api/author/profile")
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:3000/api/author/profile");
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer abc"
        );

        api.logout();
        let request = api.request(Method::GET, "/x").build().unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
