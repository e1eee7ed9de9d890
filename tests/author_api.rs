use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use authordesk_leptos::api::{ApiError, AuthorApi};
use authordesk_leptos::auth::{MemorySession, SessionStore};
use authordesk_leptos::comments::build_comment_tree;
use authordesk_leptos::models::{Credentials, NewComment, NewPost, ProfileUpdate};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

const GOOD_TOKEN: &str = "header.payload.signature";

#[derive(Debug, Clone, PartialEq)]
struct Seen {
    route: String,
    bearer: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct Mock {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Mock {
    fn record(&self, route: &str, headers: &HeaderMap, body: Value) {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(String::from);
        self.seen.lock().unwrap().push(Seen {
            route: route.to_string(),
            bearer,
            body,
        });
    }

    fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().expect("no request seen")
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {GOOD_TOKEN}")[..])
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid or expired token" })),
    )
}

async fn login(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.record("login", &headers, body.clone());
    if body["password"] == "secret" {
        (StatusCode::OK, Json(json!({ "token": GOOD_TOKEN })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
    }
}

async fn profile(State(mock): State<Mock>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    mock.record("profile", &headers, Value::Null);
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "author": {
                "id": 1,
                "username": "ada",
                "name": "Ada",
                "email": "ada@example.org",
                "posts": []
            }
        })),
    )
}

async fn update_profile(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.record("update_profile", &headers, body.clone());
    let relogin = body.get("newPassword").is_some();
    (
        StatusCode::OK,
        Json(json!({ "message": "Profile updated", "requiresRelogin": relogin })),
    )
}

async fn create_post(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    mock.record("create_post", &headers, body);
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded".into())
}

async fn get_post(
    State(mock): State<Mock>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    mock.record("get_post", &headers, Value::Null);
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "post": {
                "id": id,
                "title": "Hello",
                "content": "World",
                "createdAt": "2024-01-02T03:04:05Z",
                "authorId": 1,
                "comments": [
                    {
                        "id": 1,
                        "content": "root",
                        "userId": 1,
                        "parentCommentId": null,
                        "user": { "username": "ada" },
                        "replys": [
                            { "id": 2, "content": "child", "userId": 2, "user": { "username": "bob" } }
                        ]
                    },
                    { "id": 3, "content": "orphan", "userId": 2, "parentCommentId": 42 }
                ]
            }
        })),
    )
}

async fn create_comment(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.record("create_comment", &headers, body.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "comment": {
                "id": 99,
                "content": body["content"],
                "userId": 1,
                "parentCommentId": body["parentCommentId"]
            }
        })),
    )
}

async fn delete_comment(
    State(mock): State<Mock>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    mock.record("delete_comment", &headers, Value::Null);
    match id {
        7 => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Not your comment" })),
        ),
        _ => (StatusCode::OK, Json(json!({ "message": "Comment deleted" }))),
    }
}

async fn spawn_mock() -> (SocketAddr, Mock) {
    let mock = Mock::default();
    let app = Router::new()
        .route("/api/author/login", post(login))
        .route("/api/author/profile", get(profile).put(update_profile))
        .route("/api/author/posts", post(create_post))
        .route("/api/author/posts/:id", get(get_post))
        .route("/api/comments", post(create_comment))
        .route("/api/comments/:id", delete(delete_comment))
        .with_state(mock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });
    (addr, mock)
}

fn client(addr: SocketAddr, session: MemorySession) -> AuthorApi<MemorySession> {
    AuthorApi::new(format!("http://{addr}/"), session)
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
    let (addr, mock) = spawn_mock().await;
    let api = client(addr, MemorySession::with_token(GOOD_TOKEN));

    let author = api.profile().await.unwrap();
    assert_eq!(author.username, "ada");
    assert_eq!(mock.last().bearer.as_deref(), Some(GOOD_TOKEN));
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let (addr, mock) = spawn_mock().await;
    let api = client(addr, MemorySession::default());

    let err = api.profile().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(mock.last().bearer, None);
}

#[tokio::test]
async fn rejected_session_is_cleared() {
    let (addr, _mock) = spawn_mock().await;
    let session = MemorySession::with_token("stale.token.value");
    let api = client(addr, session.clone());

    let err = api.post(5).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn bad_credentials_do_not_sign_out() {
    let (addr, _mock) = spawn_mock().await;
    let session = MemorySession::with_token("previous.token.value");
    let api = client(addr, session.clone());

    let err = api
        .login(&Credentials {
            username: "ada".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 401,
            message: "Invalid credentials".into()
        }
    );
    assert_eq!(session.token().as_deref(), Some("previous.token.value"));
}

#[tokio::test]
async fn login_stores_the_token() {
    let (addr, mock) = spawn_mock().await;
    let session = MemorySession::default();
    let api = client(addr, session.clone());

    api.login(&Credentials {
        username: "ada".into(),
        password: "secret".into(),
    })
    .await
    .unwrap();

    assert_eq!(session.token().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(
        mock.last().body,
        json!({ "username": "ada", "password": "secret" })
    );
}

#[tokio::test]
async fn error_body_without_message_falls_back() {
    let (addr, _mock) = spawn_mock().await;
    let api = client(addr, MemorySession::with_token(GOOD_TOKEN));

    let err = api
        .create_post(&NewPost::new("Title", "Body").unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 500,
            message: "Request failed".into()
        }
    );
}

#[tokio::test]
async fn fetched_post_builds_a_comment_tree() {
    let (addr, _mock) = spawn_mock().await;
    let api = client(addr, MemorySession::with_token(GOOD_TOKEN));

    let post = api.post(5).await.unwrap();
    assert_eq!(post.id, 5);
    assert_eq!(post.author_user_id(), Some(1));

    let forest = build_comment_tree(post.comment_records());
    let roots: Vec<_> = forest.iter().map(|n| n.id()).collect();
    assert_eq!(roots, vec![1, 3]);
    let children: Vec<_> = forest[0].children.iter().map(|n| n.id()).collect();
    assert_eq!(children, vec![2]);
    assert!(forest[1].children.is_empty());
}

#[tokio::test]
async fn comment_body_carries_explicit_parent() {
    let (addr, mock) = spawn_mock().await;
    let api = client(addr, MemorySession::with_token(GOOD_TOKEN));

    let created = api
        .create_comment(&NewComment::new(5, "  top level  ", None).unwrap())
        .await
        .unwrap();
    assert_eq!(created.id, 99);
    assert_eq!(created.parent_comment_id, None);
    assert_eq!(
        mock.last().body,
        json!({ "postId": 5, "content": "top level", "parentCommentId": null })
    );

    let reply = api
        .create_comment(&NewComment::new(5, "a reply", Some(1)).unwrap())
        .await
        .unwrap();
    assert_eq!(reply.parent_comment_id, Some(1));
    assert_eq!(mock.last().body["parentCommentId"], json!(1));
}

#[tokio::test]
async fn delete_reports_server_refusal() {
    let (addr, mock) = spawn_mock().await;
    let session = MemorySession::with_token(GOOD_TOKEN);
    let api = client(addr, session.clone());

    api.delete_comment(3).await.unwrap();
    assert_eq!(mock.last().route, "delete_comment");

    let err = api.delete_comment(7).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Not your comment");
    assert_eq!(session.token().as_deref(), Some(GOOD_TOKEN));
}

#[tokio::test]
async fn password_change_ends_the_session() {
    let (addr, mock) = spawn_mock().await;
    let session = MemorySession::with_token(GOOD_TOKEN);
    let api = client(addr, session.clone());

    let update = ProfileUpdate::from_form(
        String::new(),
        String::new(),
        "Ada L.".into(),
        String::new(),
        String::new(),
    )
    .unwrap();
    let updated = api.update_profile(&update).await.unwrap();
    assert!(!updated.requires_relogin);
    assert_eq!(mock.last().body, json!({ "name": "Ada L." }));
    assert!(session.token().is_some());

    let update = ProfileUpdate::from_form(
        String::new(),
        String::new(),
        String::new(),
        "n3w".into(),
        "old".into(),
    )
    .unwrap();
    let updated = api.update_profile(&update).await.unwrap();
    assert!(updated.requires_relogin);
    assert_eq!(
        mock.last().body,
        json!({ "newPassword": "n3w", "currentPassword": "old" })
    );
    assert_eq!(session.token(), None);
}
