//! Payload DTOs for the posts, users and comments resources.
//!
//! Field names follow the remote API's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Owner id sent with every post update; the remote API requires one and
/// the edit form does not carry it.
pub const UPDATE_OWNER_ID: i64 = 1;

/// The editable part of a post read by `GET /posts/{id}`. Any other field
/// in the reply is ignored; missing ones read as `""`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

/// Optional contact fields are sent as empty strings rather than omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Full replacement body for `PUT /posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

impl UpdatePost {
    /// Builds the update body; the owner is always `UPDATE_OWNER_ID`.
    pub fn new(id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            user_id: UPDATE_OWNER_ID,
        }
    }
}
