//! Wire DTOs for the library REST API.
//!
//! All types use camelCase field names on the wire. Timestamps are kept as
//! the backend's ISO-8601 strings; the client never computes dates.

mod book;
mod borrow;
mod catalog;
mod comment;
mod common;
mod fee;
mod reservation;
mod statistics;
mod user;

pub use book::{
    Author, Book, BookCopy, BookCopyStatus, BookCreate, BookSearchParams, BookSummary,
    BookUpdate, CopyBookRef, IndexCategory, IsbnExists, Publisher,
};
pub use borrow::{BorrowRecord, BorrowRequest, BorrowResponse, BorrowStatus, LoanState};
pub use catalog::{
    BorrowingRule, BorrowingRuleCreate, BorrowingRuleUpdate, Notice, NoticeCreate, NoticeUpdate,
};
pub use comment::{Comment, CommentCreate, CommentUpdate};
pub use common::{LoginResult, MessageResponse};
pub use fee::{Fee, FeeCalculation};
pub use reservation::{
    Favorite, FavoriteCheck, FavoriteCount, FavoriteCreate, FavoriteEntry, Reservation,
    ReserveRequest,
};
pub use statistics::{BookStatistics, TopBooksRequest, UserStatistics};
pub use user::{Role, UserCreate, UserIdentity, UserPublic, UserUpdate};
