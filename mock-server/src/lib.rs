use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const SEEDED_POSTS: i64 = 100;
pub const SEEDED_USERS: i64 = 10;
pub const SEEDED_COMMENTS: i64 = 500;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// In-memory store. Ids continue from the seeded ranges, so the first
/// created post is 101, user 11 and comment 501.
#[derive(Debug)]
pub struct Store {
    posts: BTreeMap<i64, Post>,
    users: BTreeMap<i64, User>,
    comments: BTreeMap<i64, Comment>,
}

impl Default for Store {
    fn default() -> Self {
        let posts = (1..=SEEDED_POSTS)
            .map(|id| {
                let post = Post {
                    id,
                    title: format!("post {id}"),
                    body: format!("body of post {id}"),
                    user_id: (id - 1) / 10 + 1,
                };
                (id, post)
            })
            .collect();
        let users = (1..=SEEDED_USERS)
            .map(|id| {
                let user = User {
                    id,
                    name: format!("User {id}"),
                    username: format!("user{id}"),
                    email: format!("user{id}@example.com"),
                    phone: String::new(),
                    website: String::new(),
                };
                (id, user)
            })
            .collect();
        let comments = (1..=SEEDED_COMMENTS)
            .map(|id| {
                let comment = Comment {
                    id,
                    post_id: (id - 1) / 5 + 1,
                    name: format!("comment {id}"),
                    email: format!("commenter{id}@example.com"),
                    body: format!("body of comment {id}"),
                };
                (id, comment)
            })
            .collect();
        Self {
            posts,
            users,
            comments,
        }
    }
}

fn next_id<T>(map: &BTreeMap<i64, T>) -> i64 {
    map.keys().next_back().copied().unwrap_or(0) + 1
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/comments", get(list_comments).post(create_comment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(store.posts.values().cloned().collect())
}

async fn create_post(State(db): State<Db>, Json(input): Json<NewPost>) -> (StatusCode, Json<Post>) {
    let mut store = db.write().await;
    let post = Post {
        id: next_id(&store.posts),
        title: input.title,
        body: input.body,
        user_id: input.user_id,
    };
    store.posts.insert(post.id, post.clone());
    log::info!("created post {}", post.id);
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Post>, StatusCode> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement; the id in the path wins over the body.
async fn update_post(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<NewPost>,
) -> Result<Json<Post>, StatusCode> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    post.title = input.title;
    post.body = input.body;
    post.user_id = input.user_id;
    log::info!("updated post {id}");
    Ok(Json(post.clone()))
}

/// Answers 200 with an empty object, as the public service does.
async fn delete_post(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    store.posts.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    log::info!("deleted post {id}");
    Ok(Json(json!({})))
}

async fn create_user(State(db): State<Db>, Json(input): Json<NewUser>) -> (StatusCode, Json<User>) {
    let mut store = db.write().await;
    let user = User {
        id: next_id(&store.users),
        name: input.name,
        username: input.username,
        email: input.email,
        phone: input.phone,
        website: input.website,
    };
    store.users.insert(user.id, user.clone());
    log::info!("created user {}", user.id);
    (StatusCode::CREATED, Json(user))
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, StatusCode> {
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn list_comments(State(db): State<Db>) -> Json<Vec<Comment>> {
    let store = db.read().await;
    Json(store.comments.values().cloned().collect())
}

async fn create_comment(
    State(db): State<Db>,
    Json(input): Json<NewComment>,
) -> (StatusCode, Json<Comment>) {
    let mut store = db.write().await;
    let comment = Comment {
        id: next_id(&store.comments),
        post_id: input.post_id,
        name: input.name,
        email: input.email,
        body: input.body,
    };
    store.comments.insert(comment.id, comment.clone());
    log::info!("created comment {} on post {}", comment.id, comment.post_id);
    (StatusCode::CREATED, Json(comment))
}
