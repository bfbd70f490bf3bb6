use serde::{Deserialize, Serialize};

use super::{Book, UserPublic};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub user: UserPublic,
    #[serde(default)]
    pub book: Option<Book>,
    pub content: String,
    pub rating: i32,
    #[serde(default)]
    pub comment_date: Option<String>,
    #[serde(default)]
    pub last_update_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreate {
    pub book_id: i64,
    pub content: String,
    pub rating: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
}
