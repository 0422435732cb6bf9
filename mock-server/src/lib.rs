use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Prefix the front-end expects the posts API to live under.
pub const API_PREFIX: &str = "/api/v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
}

/// Full replacement of the editable fields; `id` and `createdAt` are kept.
#[derive(Deserialize)]
pub struct UpdatePost {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    posts: BTreeMap<u64, Post>,
}

impl Store {
    pub fn insert(&mut self, title: String, content: String) -> Post {
        self.next_id += 1;
        let post = Post {
            id: self.next_id,
            title,
            content,
            created_at: Utc::now(),
        };
        self.posts.insert(post.id, post.clone());
        post
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Builds the app around an existing store so callers can seed it.
pub fn app_with(db: Db) -> Router {
    Router::new().nest(API_PREFIX, routes(db))
}

fn routes(db: Db) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(store.posts.values().cloned().collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<CreatePost>,
) -> (StatusCode, Json<Post>) {
    let post = db.write().await.insert(input.title, input.content);
    tracing::info!(id = post.id, "created post");
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdatePost>,
) -> Result<Json<Post>, StatusCode> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    post.title = input.title;
    post.content = input.content;
    tracing::info!(id, "updated post");
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let removed = store.posts.remove(&id);
    if removed.is_some() {
        tracing::info!(id, "deleted post");
    }
    removed.map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_created_at_in_camel_case() {
        let mut store = Store::default();
        let post = store.insert("Test".to_string(), "Body".to_string());
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["content"], "Body");
        assert!(json["createdAt"].is_string());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn store_assigns_sequential_ids() {
        let mut store = Store::default();
        let first = store.insert("a".to_string(), "a".to_string());
        let second = store.insert("b".to_string(), "b".to_string());
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn create_post_requires_content() {
        let result: Result<CreatePost, _> = serde_json::from_str(r#"{"title":"No body"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_post_requires_both_fields() {
        let result: Result<UpdatePost, _> = serde_json::from_str(r#"{"title":"Only title"}"#);
        assert!(result.is_err());
        let input: UpdatePost =
            serde_json::from_str(r#"{"title":"New","content":"Text"}"#).unwrap();
        assert_eq!(input.title, "New");
        assert_eq!(input.content, "Text");
    }
}
