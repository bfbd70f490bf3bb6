//! Reservations and favorites.

use serde::{Deserialize, Serialize};

use super::{Book, UserPublic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub book_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    #[serde(default)]
    pub user: Option<UserPublic>,
    #[serde(default)]
    pub book: Option<Book>,
    #[serde(default)]
    pub reservation_date: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// Favorite as listed under `GET /favorites/user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: i64,
    pub book: Book,
    #[serde(default)]
    pub create_time: Option<String>,
}

/// Favorite as returned by `POST /favorites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub book_id: i64,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub book_isbn: Option<String>,
    #[serde(default, rename = "bookCoverURL")]
    pub book_cover_url: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCreate {
    pub book_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCheck {
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCount {
    pub count: u64,
}
